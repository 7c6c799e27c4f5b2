pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sourcelines")]
#[command(about = "Merge analyzer annotations into per-line source records", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Show debug logs")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        env = "SOURCELINES_CONFIG",
        help = "Configuration file (defaults to ./sourcelines.toml)"
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Write a default configuration file")]
    Init {
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },

    #[command(about = "Decorate every file of a report and write line records as JSON lines")]
    Decorate {
        #[arg(help = "Report file, or a directory of .json reports")]
        report: PathBuf,
        #[arg(short, long, help = "Output file (defaults to stdout)")]
        output: Option<PathBuf>,
    },

    #[command(about = "Decorate a report and list files with inconsistent data")]
    Check {
        #[arg(help = "Report file, or a directory of .json reports")]
        report: PathBuf,
    },

    #[command(about = "Configure sourcelines settings")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    #[command(about = "Set a configuration value")]
    Set {
        key: String,
        value: String,
    },
    #[command(about = "Get a configuration value")]
    Get {
        key: String,
    },
    #[command(about = "List all configuration values")]
    List,
}
