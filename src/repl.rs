//! Line-oriented read-tokenize-parse-print loop
//!
//! The loop owns everything the front end hands back: it prints results and
//! errors and decides to keep going after a bad line.

use crate::config::ReplConfig;
use crate::error::LispError;
use crate::lexer::Lexer;
use crate::parser;
use crate::render;
use std::io::{self, BufRead, Read, Write};
use thiserror::Error;
use tracing::{debug, warn};

/// Failures while handling one line
#[derive(Error, Debug)]
pub enum ReplError {
    /// The line did not tokenize or parse
    #[error(transparent)]
    Lisp(#[from] LispError),

    /// The result could not be serialized
    #[error("could not serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Counters for a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplSummary {
    /// Non-blank lines handed to the front end
    pub lines: usize,
    /// Lines that ended in an error
    pub failures: usize,
    /// Lines cut down to the configured buffer size
    pub truncated: usize,
}

/// Interactive session driver
pub struct Repl {
    config: ReplConfig,
    lexer: Lexer,
}

impl Repl {
    /// Creates a session with the given settings
    pub fn new(config: ReplConfig) -> Self {
        let lexer = Lexer::new(config.source_name.as_str());
        Repl { config, lexer }
    }

    /// Session settings
    pub fn config(&self) -> &ReplConfig {
        &self.config
    }

    /// Tokenizes and parses one line, returning the rendered result
    pub fn process_line(&self, line: &[u8]) -> Result<String, ReplError> {
        let tokens = self.lexer.tokenize(line)?;
        let node = parser::parse(&tokens)?;
        debug!(
            tokens = tokens.len(),
            nodes = node.node_count(),
            kind = node.kind_name(),
            "parsed line"
        );
        Ok(render::render(
            self.config.emit,
            &tokens,
            std::slice::from_ref(&node),
        )?)
    }

    /// Runs until end of input or the exit command
    ///
    /// At most `max_line_length` bytes of a line are buffered; the rest of an
    /// overlong line is skipped without being kept.
    pub fn run<R, W, E>(
        &self,
        mut input: R,
        mut output: W,
        mut errors: E,
    ) -> io::Result<ReplSummary>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut summary = ReplSummary::default();
        let capacity = self.config.line_capacity();
        let mut buffer = Vec::with_capacity(capacity + 1);

        loop {
            write!(output, "{} > ", self.config.prompt)?;
            output.flush()?;

            buffer.clear();
            // one byte past capacity tells an overlong line from a full one
            let limit = capacity as u64 + 1;
            if input.by_ref().take(limit).read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            if buffer.last() == Some(&b'\n') {
                buffer.pop();
            }

            if buffer.len() > capacity {
                let skipped = skip_line(&mut input)?;
                warn!(
                    length = buffer.len() + skipped,
                    capacity, "line exceeds buffer, truncating"
                );
                buffer.truncate(capacity);
                summary.truncated += 1;
            }

            let text = String::from_utf8_lossy(&buffer);
            let trimmed = text.trim();
            if trimmed == self.config.exit_command {
                break;
            }
            if trimmed.is_empty() {
                continue;
            }

            summary.lines += 1;
            match self.process_line(&buffer) {
                Ok(rendered) => writeln!(output, "{}", rendered)?,
                Err(err) => {
                    summary.failures += 1;
                    writeln!(errors, "{}", err)?;
                }
            }
        }

        Ok(summary)
    }
}

/// Consumes input up to and including the next newline, returning how many
/// bytes were dropped before it
fn skip_line<R: BufRead>(input: &mut R) -> io::Result<usize> {
    let mut skipped = 0;
    loop {
        let available = input.fill_buf()?;
        if available.is_empty() {
            return Ok(skipped);
        }
        let (used, done) = match available.iter().position(|&b| b == b'\n') {
            Some(newline) => (newline + 1, true),
            None => (available.len(), false),
        };
        input.consume(used);
        if done {
            return Ok(skipped + used - 1);
        }
        skipped += used;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmitMode;

    fn run_session(config: ReplConfig, input: &str) -> (ReplSummary, String, String) {
        let repl = Repl::new(config);
        let mut output = Vec::new();
        let mut errors = Vec::new();
        let summary = repl
            .run(input.as_bytes(), &mut output, &mut errors)
            .unwrap();
        (
            summary,
            String::from_utf8(output).unwrap(),
            String::from_utf8(errors).unwrap(),
        )
    }

    #[test]
    fn test_session() {
        let (summary, output, errors) = run_session(
            ReplConfig::default(),
            "(define f (x) x)\n\n(f 1\n(+ 1 2)\nexit\n(ignored)\n",
        );

        assert_eq!(summary.lines, 3);
        assert_eq!(summary.failures, 1);
        assert_eq!(
            output,
            "lisp > (define f (x) x)\nlisp > lisp > lisp > (+ 1 2)\nlisp > "
        );
        assert_eq!(errors, "stdin:0:4: expected an expression, found end of file\n");
    }

    #[test]
    fn test_ends_on_eof() {
        let (summary, output, _) = run_session(ReplConfig::default(), "(f)");
        assert_eq!(summary.lines, 1);
        assert_eq!(output, "lisp > (f)\nlisp > ");
    }

    #[test]
    fn test_lexer_error_is_reported() {
        let (summary, _, errors) = run_session(ReplConfig::default(), "(f \"open\n");
        assert_eq!(summary.failures, 1);
        assert_eq!(errors, "stdin:0:8: unterminated string\n");
    }

    #[test]
    fn test_truncation() {
        let config = ReplConfig {
            max_line_length: 6,
            ..ReplConfig::default()
        };
        let (summary, _, errors) = run_session(config, "(f 1 2)\n");
        assert_eq!(summary.truncated, 1);
        assert_eq!(errors, "stdin:0:5: expected an expression, found end of file\n");
    }

    #[test]
    fn test_token_mode() {
        let config = ReplConfig {
            prompt: "t".to_string(),
            emit: EmitMode::Tokens,
            ..ReplConfig::default()
        };
        let repl = Repl::new(config);
        let rendered = repl.process_line(b"(f)").unwrap();
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.starts_with("LispToken => LPAREN '(' @ stdin:0:0"));
    }

    #[test]
    fn test_custom_exit_command() {
        let config = ReplConfig {
            exit_command: "quit".to_string(),
            ..ReplConfig::default()
        };
        let (summary, _, errors) = run_session(config, "exit\nquit\n");
        assert_eq!(summary.lines, 1);
        assert_eq!(summary.failures, 1);
        assert!(errors.contains("expected `(` to start a declaration"));
    }

    #[test]
    fn test_truncation_skips_rest_of_line() {
        let config = ReplConfig {
            max_line_length: 6,
            ..ReplConfig::default()
        };
        let (summary, output, errors) = run_session(config, "(f 1 2 3 4 5 6)\n(g)\n");
        assert_eq!(summary.lines, 2);
        assert_eq!(summary.truncated, 1);
        assert_eq!(summary.failures, 1);
        assert!(output.ends_with("lisp > (g)\nlisp > "));
        assert_eq!(errors.lines().count(), 1);
    }

    #[test]
    fn test_line_of_exact_capacity_is_kept() {
        let config = ReplConfig {
            max_line_length: 6,
            ..ReplConfig::default()
        };
        let (summary, output, _) = run_session(config, "(f 1)\n");
        assert_eq!(summary.truncated, 0);
        assert_eq!(output, "lisp > (f 1)\nlisp > ");
    }

    #[test]
    fn test_skip_line_reads_in_chunks() {
        let long = format!("{}\n(next)", "x".repeat(10_000));
        let mut input = io::BufReader::with_capacity(16, long.as_bytes());
        assert_eq!(skip_line(&mut input).unwrap(), 10_000);

        let mut rest = String::new();
        input.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "(next)");

        let mut empty: &[u8] = b"";
        assert_eq!(skip_line(&mut empty).unwrap(), 0);
    }
}
