//! Options deck parser.
//!
//! The deck is line-oriented and SPICE-flavoured:
//!
//! ```text
//! deck     = { line }
//! line     = comment | options | ".end" | empty
//! comment  = '*' { any_char } | ('#' | ';') { any_char }
//! options  = (".options" | ".option") { key '=' value }
//! key      = "ver" | "vea" | "ier" | "iea"
//! value    = number [unit_suffix]
//! ```
//!
//! Directives and keys are case-insensitive. Later assignments override
//! earlier ones; keys that never appear keep their defaults.

use std::fs;
use std::path::Path;

use crate::error::{ConvergenceError, Result};

use super::ToleranceConfig;

/// Parse an options deck into a validated [`ToleranceConfig`].
pub fn parse_options(input: &str) -> Result<ToleranceConfig> {
    let mut config = ToleranceConfig::default();

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('*') {
            continue;
        }

        let mut words = Words::new(line);
        let Some((col, directive)) = words.next() else {
            continue;
        };

        match directive.to_ascii_lowercase().as_str() {
            ".options" | ".option" => {}
            ".end" => break,
            _ => {
                return Err(ConvergenceError::option_syntax(
                    line_no,
                    col,
                    format!("expected '.options', found '{directive}'"),
                ))
            }
        }

        for (col, word) in words {
            let Some((key, value)) = word.split_once('=') else {
                return Err(ConvergenceError::option_syntax(
                    line_no,
                    col,
                    format!("expected key=value, found '{word}'"),
                ));
            };
            if key.is_empty() {
                return Err(ConvergenceError::option_syntax(line_no, col, "missing option name"));
            }

            let number = parse_value(value).ok_or_else(|| ConvergenceError::InvalidValue {
                line: line_no,
                text: value.to_string(),
            })?;

            let key = key.to_ascii_lowercase();
            if !config.set_by_name(&key, number) {
                return Err(ConvergenceError::UnknownOption {
                    name: key,
                    line: line_no,
                });
            }
            log::debug!("options line {line_no}: {key} = {number:e}");
        }
    }

    config.validated()
}

/// Read and parse an options deck from disk.
pub fn load_options(path: &Path) -> Result<ToleranceConfig> {
    let content = fs::read_to_string(path).map_err(|e| ConvergenceError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_options(&content)
}

/// Parse a number string with optional engineering suffix.
///
/// Accepts `f p n u µ m k K M G` and the SPICE `meg` (any case).
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.len() > 3 && text.is_char_boundary(text.len() - 3) {
        let (head, tail) = text.split_at(text.len() - 3);
        if tail.eq_ignore_ascii_case("meg") {
            return head.parse::<f64>().ok().map(|v| v * 1e6);
        }
    }

    let (num_str, multiplier) = if let Some(last) = text.chars().last() {
        let mult = match last {
            'f' => 1e-15,
            'p' => 1e-12,
            'n' => 1e-9,
            'u' | 'µ' => 1e-6,
            'm' => 1e-3,
            'k' | 'K' => 1e3,
            'M' => 1e6,
            'G' => 1e9,
            _ => 1.0,
        };
        if mult != 1.0 {
            (&text[..text.len() - last.len_utf8()], mult)
        } else {
            (text, 1.0)
        }
    } else {
        (text, 1.0)
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

fn strip_comment(line: &str) -> &str {
    match line.find(['#', ';']) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Whitespace-separated words with their 1-based column.
struct Words<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Words<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.line;
        let rest = &line[self.pos..];
        let start = self.pos + (rest.len() - rest.trim_start().len());
        if start >= line.len() {
            self.pos = line.len();
            return None;
        }
        let word_len = line[start..]
            .find(char::is_whitespace)
            .unwrap_or(line.len() - start);
        self.pos = start + word_len;
        let column = line[..start].chars().count() + 1;
        Some((column, &line[start..start + word_len]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_value() {
        assert_relative_eq!(parse_value("10k").unwrap(), 10_000.0, max_relative = 1e-12);
        assert_relative_eq!(parse_value("100n").unwrap(), 100e-9, max_relative = 1e-12);
        assert_relative_eq!(parse_value("4.7u").unwrap(), 4.7e-6, max_relative = 1e-12);
        assert_relative_eq!(parse_value("1µ").unwrap(), 1e-6, max_relative = 1e-12);
        assert_relative_eq!(parse_value("1M").unwrap(), 1_000_000.0, max_relative = 1e-12);
        assert_relative_eq!(parse_value("2.2meg").unwrap(), 2.2e6, max_relative = 1e-12);
        assert_relative_eq!(parse_value("1m").unwrap(), 1e-3, max_relative = 1e-12);
        assert_relative_eq!(parse_value("3f").unwrap(), 3e-15, max_relative = 1e-12);
        assert_relative_eq!(parse_value("1e-9").unwrap(), 1e-9, max_relative = 1e-12);
        assert_relative_eq!(parse_value("-0.5").unwrap(), -0.5, max_relative = 1e-12);
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("1x"), None);
        assert_eq!(parse_value("k"), None);
    }

    #[test]
    fn test_parse_options_full_deck() {
        let deck = "\
* tolerance deck
.options ver=1m vea=1u   # voltages
.OPTIONS IER=1e-4 iea=1p ; currents
";
        let cfg = parse_options(deck).unwrap();
        assert_relative_eq!(cfg.ver, 1e-3, max_relative = 1e-12);
        assert_relative_eq!(cfg.vea, 1e-6, max_relative = 1e-12);
        assert_relative_eq!(cfg.ier, 1e-4, max_relative = 1e-12);
        assert_relative_eq!(cfg.iea, 1e-12, max_relative = 1e-12);
    }

    #[test]
    fn test_parse_options_keeps_defaults() {
        let cfg = parse_options(".option vea=10u\n").unwrap();
        assert_eq!(cfg.ver, ToleranceConfig::default().ver);
        assert_relative_eq!(cfg.vea, 1e-5, max_relative = 1e-12);
    }

    #[test]
    fn test_parse_options_stops_at_end() {
        let cfg = parse_options(".options ver=1\n.end\nnot a directive\n").unwrap();
        assert_relative_eq!(cfg.ver, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_parse_options_unknown_key() {
        let err = parse_options(".options reltol=1m").unwrap_err();
        assert!(matches!(err, ConvergenceError::UnknownOption { ref name, line: 1 } if name == "reltol"));
    }

    #[test]
    fn test_parse_options_bad_pair_column() {
        let err = parse_options("\n.options  ver 1m").unwrap_err();
        match err {
            ConvergenceError::OptionSyntax { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 11);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_options_bad_directive() {
        let err = parse_options("R1 in out 10k").unwrap_err();
        assert!(matches!(err, ConvergenceError::OptionSyntax { line: 1, column: 1, .. }));
    }

    #[test]
    fn test_parse_options_bad_value() {
        let err = parse_options(".options iea=tiny").unwrap_err();
        assert!(matches!(err, ConvergenceError::InvalidValue { line: 1, .. }));
    }

    #[test]
    fn test_parse_options_negative_rejected() {
        let err = parse_options(".options vea=-1u").unwrap_err();
        assert!(matches!(err, ConvergenceError::InvalidTolerance { name: "vea", .. }));
    }
}
