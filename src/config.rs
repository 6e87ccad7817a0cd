//! REPL and checker configuration
//!
//! Settings come from three layers, later ones winning: built-in defaults, an
//! optional JSON file, and command line flags / `MINILISP_*` environment
//! variables (applied by the binary).

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Prompt printed before each line
pub const DEFAULT_PROMPT: &str = "lisp";
/// Line that ends the session
pub const DEFAULT_EXIT_COMMAND: &str = "exit";
/// Line buffer size; one byte is reserved, so at most `0x3ff` bytes are kept
pub const DEFAULT_MAX_LINE_LENGTH: usize = 0x400;

/// What to print for each successfully processed input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmitMode {
    /// One `LispToken => ...` line per token
    Tokens,
    /// The parsed tree printed back as s-expressions
    #[default]
    Ast,
    /// The parsed tree as pretty JSON
    Json,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for [`ReplConfig`]
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Settings for the REPL collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Prompt text, printed as `<prompt> > `
    pub prompt: String,
    /// Literal line that ends the session
    pub exit_command: String,
    /// Size of the line buffer in bytes
    pub max_line_length: usize,
    /// Name stamped into token positions
    pub source_name: String,
    /// Output format
    pub emit: EmitMode,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            prompt: DEFAULT_PROMPT.to_string(),
            exit_command: DEFAULT_EXIT_COMMAND.to_string(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            source_name: crate::lexer::DEFAULT_SOURCE_NAME.to_string(),
            emit: EmitMode::default(),
        }
    }
}

impl ReplConfig {
    /// Parses a JSON document; missing fields keep their defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: ReplConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Number of input bytes kept from each line
    pub fn line_capacity(&self) -> usize {
        self.max_line_length.saturating_sub(1)
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_line_length < 2 {
            return Err(ConfigError::Invalid {
                field: "max_line_length",
                reason: format!("must be at least 2, got {}", self.max_line_length),
            });
        }
        if self.exit_command.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "exit_command",
                reason: "must not be blank".to_string(),
            });
        }
        Ok(())
    }
}
