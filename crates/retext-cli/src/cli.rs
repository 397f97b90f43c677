use clap::{ArgAction, Parser, Subcommand};
use retext_core::{ErrorKind, SubstituteOptions, TransformCommand, TransformError, suggest_fix};

/// Exit status for mistakes in the command or its input.
pub const EXIT_USAGE: u8 = 2;
/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Transform text read from stdin the way the chat bot commands do.
#[derive(Parser, Debug)]
#[command(name = "retext", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CommandArgs,

    /// Print formatting spans as JSON on stderr
    #[arg(long, global = true)]
    pub spans: bool,

    /// Address printed spans in UTF-16 code units instead of characters
    #[arg(long, global = true, requires = "spans")]
    pub utf16: bool,

    /// Prepend a bold header to the result (e.g. "Maybe you mean:")
    #[arg(long, global = true, value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Upper bound in bytes on compiled patterns
    #[arg(long, global = true, value_name = "BYTES")]
    pub size_limit: Option<usize>,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum CommandArgs {
    /// Swap keyboard layout: `en`, `ru`, or nothing to toggle both ways
    Tr {
        /// Target layout
        layout: Option<String>,
    },
    /// sed-like replacement: <find-re>/<replace>/[flags]
    S {
        /// The directive, trailing `/` included
        #[arg(allow_hyphen_values = true)]
        directive: String,
    },
    /// Toggle caps lock on the text
    Caps,
}

impl CommandArgs {
    /// The bot command name and raw argument string.
    pub fn name_and_args(&self) -> (&'static str, &str) {
        match self {
            Self::Tr { layout } => ("tr", layout.as_deref().unwrap_or_default()),
            Self::S { directive } => ("s", directive.as_str()),
            Self::Caps => ("caps", ""),
        }
    }

    pub fn to_command(&self) -> Result<TransformCommand, TransformError> {
        let (name, args) = self.name_and_args();
        TransformCommand::parse(name, args)
    }

    /// The exit status and stderr message for a failed run of this command.
    pub fn report(&self, err: &anyhow::Error) -> (u8, String) {
        match err.downcast_ref::<TransformError>() {
            Some(TransformError::MissingTrailingSeparator { .. }) => {
                let (name, args) = self.name_and_args();
                let hint = format!(
                    "Seems like you forgot to add trailing slash.\n\nPossible fix: retext {name} '{}'",
                    suggest_fix(args)
                );
                (EXIT_USAGE, hint)
            }
            Some(err) if err.kind() == ErrorKind::Input => (EXIT_USAGE, format!("error: {err}")),
            _ => (EXIT_FAILURE, format!("error: {err:#}")),
        }
    }
}

impl Cli {
    pub fn substitute_options(&self) -> SubstituteOptions {
        SubstituteOptions {
            size_limit: self.size_limit,
            ..SubstituteOptions::default()
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["retext", "s", "a/b/", "--spans", "-vv"]).unwrap();
        assert!(cli.spans);
        assert_eq!(cli.log_level(), "debug");
        assert_eq!(cli.command.name_and_args(), ("s", "a/b/"));

        let cli = Cli::try_parse_from(["retext", "tr"]).unwrap();
        assert_eq!(cli.command.name_and_args(), ("tr", ""));
    }

    #[test]
    fn test_utf16_requires_spans() {
        assert!(Cli::try_parse_from(["retext", "caps", "--utf16"]).is_err());
    }

    fn failed_run(args: &[&str]) -> (u8, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let err = anyhow::Error::from(cli.command.to_command().unwrap_err());
        cli.command.report(&err)
    }

    #[test]
    fn test_missing_separator_exits_with_hint() {
        let (status, message) = failed_run(&["retext", "s", "foo/bar"]);
        assert_eq!(status, EXIT_USAGE);
        assert_eq!(
            message,
            "Seems like you forgot to add trailing slash.\n\nPossible fix: retext s 'foo/bar/'"
        );
    }

    #[test]
    fn test_input_errors_exit_with_usage_status() {
        let (status, message) = failed_run(&["retext", "s", "a/b/z"]);
        assert_eq!(status, EXIT_USAGE);
        assert!(message.starts_with("error: "));
    }

    #[test]
    fn test_other_errors_exit_with_failure() {
        let (status, _) = failed_run(&["retext", "tr", "de"]);
        assert_eq!(status, EXIT_FAILURE);

        let err = anyhow::anyhow!("failed to read stdin");
        let cli = Cli::try_parse_from(["retext", "caps"]).unwrap();
        assert_eq!(
            cli.command.report(&err),
            (EXIT_FAILURE, "error: failed to read stdin".to_string())
        );
    }

    #[test]
    fn test_to_command_reports_directive_errors() {
        let cli = Cli::try_parse_from(["retext", "s", "foo/bar"]).unwrap();
        assert!(matches!(
            cli.command.to_command(),
            Err(TransformError::MissingTrailingSeparator { .. })
        ));
    }
}
