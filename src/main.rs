mod api;
mod cli;
mod config;
mod logging;
mod paths;
mod ride;
#[cfg(test)]
mod testing;
mod tui;
mod util;
mod workout;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = config::load_config()?;

    match cli.command {
        Command::Ride { server } => {
            logging::init()?;
            server.apply(&mut config.server);
            ride::run_ride(&config)
        }

        Command::Plan { server } => {
            logging::init()?;
            server.apply(&mut config.server);
            ride::print_plan(&config)
        }

        Command::Zones => {
            ride::print_zones(&config.zones);
            Ok(())
        }

        Command::Paths => {
            println!("Config: {}", paths::config_file().display());
            println!("Log:    {}", paths::log_file().display());
            Ok(())
        }
    }
}
