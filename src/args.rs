//! the args for running minilisp

use anyhow::Context;
use clap::{value_parser, ArgAction};
use minilisp::{EmitMode, ReplConfig};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(
    author,
    version,
    about = "Tokenizes and parses minilisp source, interactively or from a file"
)]
pub struct Args {
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,

    /// Check a whole file instead of starting the REPL
    #[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,
    /// JSON file with REPL settings
    #[clap(long, env = "MINILISP_CONFIG")]
    config: Option<PathBuf>,
    /// Prompt text
    #[clap(long, env = "MINILISP_PROMPT")]
    prompt: Option<String>,
    /// Output format
    #[clap(long, value_enum, env = "MINILISP_EMIT")]
    emit: Option<EmitMode>,
    /// Line buffer size in bytes
    #[clap(long, env = "MINILISP_MAX_LINE_LENGTH")]
    max_line_length: Option<usize>,
    /// Name reported in positions for REPL input
    #[clap(long)]
    source_name: Option<String>,
}

impl Args {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.verbose as i8 - self.quiet as i8 {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Layers the config file and flags over the defaults
    pub fn repl_config(&self) -> anyhow::Result<ReplConfig> {
        let mut config = match &self.config {
            Some(path) => ReplConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ReplConfig::default(),
        };

        if let Some(prompt) = &self.prompt {
            config.prompt = prompt.clone();
        }
        if let Some(emit) = self.emit {
            config.emit = emit;
        }
        if let Some(max_line_length) = self.max_line_length {
            config.max_line_length = max_line_length;
        }
        if let Some(source_name) = &self.source_name {
            config.source_name = source_name.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
