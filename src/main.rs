//! segtype command-line entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use segtype::cli::{Cli, Commands, ConfigCommands};
use segtype::logging::{self, LogTarget};
use segtype::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let log_file = cli.log_file.clone().or_else(|| config.log.file.clone());
    let target = match (&cli.command, log_file.as_deref()) {
        (_, Some(path)) => LogTarget::File(path),
        (Commands::Practice { .. }, None) => LogTarget::Discard,
        (_, None) => LogTarget::Stderr,
    };
    logging::init(cli.verbose, target)?;

    match cli.command {
        Commands::Practice { media, dir } => {
            commands::practice::handle(&media, dir.as_deref(), &config)
        }
        Commands::Segments { media, dir, json } => {
            commands::segments::handle(&media, dir.as_deref(), json, &config)
        }
        Commands::Locate {
            media,
            position_ms,
            dir,
        } => commands::locate::handle(&media, position_ms, dir.as_deref(), &config),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init => commands::config::handle_init(),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
