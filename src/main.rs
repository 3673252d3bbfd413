mod archive;
mod backup;
mod cli;
mod commands;
mod config;
mod download;
mod error;
mod layout;
mod paths;
mod placement;
mod restore;
mod ui;
mod verify;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Commands};
use config::Config;
use std::io;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    // One config instance for the whole run; commands mutate and persist it
    // explicitly.
    let mut config = Config::load()?;

    match cli.command {
        Commands::Fetch(args) => commands::fetch::run(&config, &args),
        Commands::Provision(args) => commands::provision::run(&mut config, &args),
        Commands::Verify(args) => commands::verify::run(&config, &args),
        Commands::Backup(command) => commands::backup::run(&command),
        Commands::Restore { index } => commands::restore::run(index),
        Commands::Clean => commands::clean::run(),
        Commands::Doctor => commands::doctor::run(&config),
        Commands::Config(command) => commands::config::run(&mut config, &command),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "sdforge", &mut io::stdout());
            Ok(())
        }
    }
}
