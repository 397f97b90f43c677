//! retext command-line harness
//!
//! Reads a message body from stdin, applies one transformation and writes the result to stdout.
//!
//! # Usage
//!
//! ```bash
//! echo "ghbdtn" | retext tr ru
//! echo "teh cat" | retext s 'teh/the/' --spans --prefix 'Maybe you mean:'
//! echo "hELLO" | retext caps
//! ```
//!
//! Logging goes to stderr; set `RETEXT_LOG` (e.g. `RETEXT_LOG=debug`) or pass `-v`.

mod cli;

use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use retext_core::{source_text, utf16};

use crate::cli::Cli;

fn init_logging(cli: &Cli) {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RETEXT_LOG", cli.log_level()),
    )
    .init();
}

fn run(cli: &Cli) -> Result<()> {
    let command = cli.command.to_command()?;

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    let text = source_text(input.as_str())?;
    log::debug!("running {command:?} on {} char(s)", text.chars().count());

    let mut result = command
        .execute_with(text, cli.substitute_options())?
        .into_substitution();
    if let Some(prefix) = cli.prefix.as_deref() {
        result = result.with_prefix(&format!("{prefix}\n\n"));
    }

    let mut stdout = io::stdout().lock();
    stdout.write_all(result.text.as_bytes())?;
    stdout.flush()?;

    if cli.spans {
        let spans = if cli.utf16 {
            utf16::to_utf16_spans(&result.text, &result.spans)
        } else {
            result.spans
        };
        eprintln!("{}", serde_json::to_string(&spans)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (status, message) = cli.command.report(&err);
            eprintln!("{message}");
            ExitCode::from(status)
        }
    }
}
