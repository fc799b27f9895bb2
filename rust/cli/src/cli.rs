//! Command-line surface: argument structs parsed by clap.

use clap::{Parser, Subcommand};

use crate::config::SiteKind;

#[derive(Parser, Debug)]
#[command(name = "handscope", version, about = "Hand history ingestion")]
pub struct HandscopeCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load every history file of a directory and print a summary
    Load {
        /// Account or history directory
        #[arg(long)]
        dir: Option<String>,
        #[arg(long, value_enum)]
        site: Option<SiteKind>,
        /// Worker threads for the parse pool
        #[arg(long)]
        workers: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Parse one history file
    Parse {
        #[arg(long)]
        file: String,
        #[arg(long, value_enum)]
        site: Option<SiteKind>,
        /// Print the whole site as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved configuration
    Cfg,
}

/// Names shown in the usage hint after a parse failure.
pub const COMMANDS: &[&str] = &["load", "parse", "cfg"];
