use crate::args::Args;
use anyhow::Context;
use clap::Parser;
use minilisp::{check_source, render, Repl, ReplConfig};
use std::io;
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

mod args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level_filter())?;
    trace!("starting minilisp with args: {args:?}");
    debug!("minilisp version: {}", minilisp::VERSION);

    let config = args.repl_config()?;
    debug!(?config, "resolved configuration");

    match &args.file {
        Some(path) => check_file(&config, path),
        None => run_repl(config),
    }
}

fn run_repl(config: ReplConfig) -> anyhow::Result<()> {
    let repl = Repl::new(config);
    let summary = repl.run(io::stdin().lock(), io::stdout().lock(), io::stderr().lock())?;
    info!(
        lines = summary.lines,
        failures = summary.failures,
        truncated = summary.truncated,
        "session finished"
    );
    Ok(())
}

fn check_file(config: &ReplConfig, path: &Path) -> anyhow::Result<()> {
    let source = std::fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    let (tokens, nodes) = check_source(&path.display().to_string(), &source)?;
    debug!(
        tokens = tokens.len(),
        forms = nodes.len(),
        "checked {}",
        path.display()
    );
    println!("{}", render::render(config.emit, &tokens, &nodes)?);
    Ok(())
}

fn init_logging(level_filter: LevelFilter) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;

    Ok(())
}
