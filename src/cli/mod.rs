use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "unitsmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactively define a service and install its unit file
    Create {
        /// Unit directory to check against and install into
        #[arg(long, value_name = "DIRECTORY", env = "UNITSMITH_UNIT_DIR")]
        unit_dir: Option<PathBuf>,

        /// Stop after writing the unit file; print manual install steps
        #[arg(long)]
        no_install: bool,

        /// Where the backup copy is written (defaults to the current directory)
        #[arg(long, value_name = "DIRECTORY")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}
