mod cli;
mod commands;
mod config;
mod drag;
mod editor;
mod grid;
mod logging;
mod model;
mod render;
mod store;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let config = args.config.as_deref();
    let command = args.command.unwrap_or(cli::Command::Tui { month: None });
    match command {
        cli::Command::Init => commands::init(config),
        cli::Command::Grid { month, week_start } => commands::grid(config, month, week_start),
        cli::Command::Tui { month } => commands::tui(config, month),
    }
}
