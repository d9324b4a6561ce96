use crate::model::WeekStart;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daygrid", version, about = "Terminal month planner with drag-and-drop tasks")]
pub struct Cli {
    /// Settings file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the default settings file and print its location
    Init,
    /// Print a month grid
    Grid {
        /// Month to show, in YYYY-MM format (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
        /// First column of each week (overrides the settings file)
        #[arg(long, value_enum)]
        week_start: Option<WeekStart>,
    },
    /// Launch the interactive TUI
    Tui {
        /// Month to open, in YYYY-MM format (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },
}
