use std::io;
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use hbnb_console::cli::{Args, CLI};
use hbnb_console::storage::FileStorage;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only command output.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut cli = CLI::new(FileStorage::new(&args.file))
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    match args.one_shot() {
        Some(line) => {
            cli.execute_line(&line, &mut io::stdout().lock())
                .context("failed to write command output")?;
        }
        None => cli.run().context("console input/output failed")?,
    }

    Ok(())
}
