use anyhow::Context;
use clap::Parser;

use put_yield::config::{ConfigFile, RunConfig};
use put_yield::{cli, example, logging, pipeline, schema};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::init_with_default(if cli.verbose { "debug" } else { "warn" });

    match cli.command {
        cli::Command::Schema => schema::run(),
        cli::Command::Example => example::run(),
        cli::Command::Fetch(args) => {
            let file = match &args.config {
                Some(path) => ConfigFile::load(path)?,
                None => ConfigFile::default(),
            };
            let config =
                RunConfig::resolve(file.merge(args.overrides())).context("invalid run parameters")?;
            pipeline::run(&config).map(|_| ())
        }
    }
}
