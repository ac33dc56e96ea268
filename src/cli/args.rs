use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vakit", version, author, about = "Prayer times, countdown and Hijri date in your terminal")]
pub struct Cli {
    /// City to load instead of the last one used
    #[arg(long, global = true)]
    pub city: Option<String>,

    /// Start with the prayer-time alert muted
    #[arg(long)]
    pub muted: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print today's prayer times and the countdown to the next prayer
    Times {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show where the config file lives
    Config {
        /// Write a config file with default values if none exists
        #[arg(long)]
        init: bool,
    },
}
