use clap::{Args, Parser, Subcommand};

use crate::config::ServerConfig;

#[derive(Parser)]
#[command(name = "spinclass")]
#[command(about = "Ride spin-class workouts from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the workout screen and ride a plan
    Ride {
        #[command(flatten)]
        server: ServerArgs,
    },

    /// Fetch a workout plan and print its blocks
    Plan {
        #[command(flatten)]
        server: ServerArgs,
    },

    /// Show the goal pace for each zone
    Zones,

    /// Show where config and log files are stored
    Paths,
}

/// Overrides for the `[server]` section of config.toml.
#[derive(Args, Debug, Default)]
pub struct ServerArgs {
    /// Workout id to load (defaults to config)
    #[arg(long)]
    pub workout: Option<u32>,

    /// Backend base URL, e.g. http://localhost:5000 (defaults to config)
    #[arg(long)]
    pub api_url: Option<String>,
}

impl ServerArgs {
    pub fn apply(&self, server: &mut ServerConfig) {
        if let Some(id) = self.workout {
            server.workout_id = id;
        }
        if let Some(url) = &self.api_url {
            server.api_base_url = url.clone();
        }
    }
}
