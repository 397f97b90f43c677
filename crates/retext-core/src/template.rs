//! Replacement templates.
//!
//! Users write replacements the way Python's `re.sub` accepts them:
//!
//! | syntax | meaning |
//! |---|---|
//! | `\1` .. `\99` | numbered group |
//! | `\g<2>`, `\g<name>` | numbered or named group; `\g<0>` is the whole match |
//! | `\0`, `\0nn`, `\nnn` | octal character code (`\0` is NUL, three digits for `\1nn`..`\377`) |
//! | `\a` `\b` `\f` `\n` `\r` `\t` `\v` `\\` | BEL, backspace, form feed, newline, CR, tab, VT, backslash |
//! | `$` | a literal dollar sign |
//!
//! Any other backslash escape of a non-letter is kept verbatim (`\&` stays `\&`); an unknown
//! escape of an ASCII letter is rejected.
//!
//! A [`ReplaceTemplate`] is compiled once per substitution into the `regex` crate's `$` syntax
//! and expanded with [`regex::Captures::expand`].

use regex::{Captures, Regex};

use crate::error::TransformError;

/// A replacement template checked against the pattern it will be expanded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceTemplate {
    expansion: String,
}

impl ReplaceTemplate {
    /// Compile `template` for use with `re`.
    ///
    /// Fails with [`TransformError::InvalidTemplate`] for group references the pattern does not
    /// define and for malformed escapes.
    pub fn compile(template: &str, re: &Regex) -> Result<Self, TransformError> {
        let mut expansion = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '\\' {
                push_literal(&mut expansion, ch);
                continue;
            }
            let Some(next) = chars.next() else {
                return Err(invalid("bad escape (end of template)"));
            };
            match next {
                '0' => {
                    let mut code = 0;
                    for _ in 0..2 {
                        let Some(digit) = chars.peek().and_then(|c| c.to_digit(8)) else {
                            break;
                        };
                        code = code * 8 + digit;
                        chars.next();
                    }
                    push_code(&mut expansion, code);
                }
                '1'..='9' => {
                    let first = next.to_digit(10).unwrap_or_default();
                    let Some(second) = chars.peek().and_then(|c| c.to_digit(10)) else {
                        push_group_index(&mut expansion, first as usize, re)?;
                        continue;
                    };
                    chars.next();
                    if first < 8
                        && second < 8
                        && let Some(third) = chars.peek().and_then(|c| c.to_digit(8))
                    {
                        chars.next();
                        let code = first * 64 + second * 8 + third;
                        if code > 0o377 {
                            return Err(invalid(&format!(
                                "octal escape value \\{next}{second}{third} outside of range 0-0o377"
                            )));
                        }
                        push_code(&mut expansion, code);
                    } else {
                        push_group_index(&mut expansion, (first * 10 + second) as usize, re)?;
                    }
                }
                'g' => {
                    if chars.next() != Some('<') {
                        return Err(invalid("missing < after \\g"));
                    }
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('>') => break,
                            Some(c) => name.push(c),
                            None => return Err(invalid("missing >, unterminated name")),
                        }
                    }
                    push_group_name(&mut expansion, &name, re)?;
                }
                'a' => expansion.push('\x07'),
                'b' => expansion.push('\x08'),
                'f' => expansion.push('\x0c'),
                'n' => expansion.push('\n'),
                'r' => expansion.push('\r'),
                't' => expansion.push('\t'),
                'v' => expansion.push('\x0b'),
                '\\' => expansion.push('\\'),
                c if c.is_ascii_alphabetic() => {
                    return Err(invalid(&format!("bad escape \\{c}")));
                }
                c => {
                    expansion.push('\\');
                    push_literal(&mut expansion, c);
                }
            }
        }

        Ok(Self { expansion })
    }

    /// Expand the template against one match.
    pub fn expand(&self, caps: &Captures<'_>) -> String {
        let mut out = String::new();
        caps.expand(&self.expansion, &mut out);
        out
    }
}

fn invalid(message: &str) -> TransformError {
    TransformError::InvalidTemplate(message.to_string())
}

fn push_literal(expansion: &mut String, ch: char) {
    if ch == '$' {
        expansion.push_str("$$");
    } else {
        expansion.push(ch);
    }
}

fn push_code(expansion: &mut String, code: u32) {
    // Octal escapes top out at 0o377, so every code is a valid char.
    push_literal(expansion, char::from_u32(code).unwrap_or_default());
}

fn push_group_index(expansion: &mut String, group: usize, re: &Regex) -> Result<(), TransformError> {
    if group >= re.captures_len() {
        return Err(invalid(&format!("invalid group reference {group}")));
    }
    expansion.push_str(&format!("${{{group}}}"));
    Ok(())
}

fn push_group_name(expansion: &mut String, name: &str, re: &Regex) -> Result<(), TransformError> {
    if let Ok(group) = name.parse::<usize>() {
        return push_group_index(expansion, group, re);
    }
    if name.is_empty() || !re.capture_names().flatten().any(|n| n == name) {
        return Err(invalid(&format!("unknown group name '{name}'")));
    }
    expansion.push_str(&format!("${{{name}}}"));
    Ok(())
}
