//! GeoGrid CLI - Command-line interface
//!
//! This binary provides a command-line interface to the GeoGrid library.
//! Results go to stdout; errors and logs go to stderr.

mod commands;
mod error;
mod runner;

use clap::{ArgAction, Parser, Subcommand};

use commands::bounds::BoundsArgs;
use commands::config::ConfigCommands;
use commands::convert::ConvertArgs;
use commands::mgrs::MgrsAction;
use commands::tile::TileAction;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "geogrid")]
#[command(version = geogrid::VERSION)]
#[command(about = "Convert between XYZ tiles, MGRS, WKT, WKB and GeoJSON", long_about = None)]
struct Cli {
    /// Raise the log level (repeat for more detail)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// XYZ tile decode and encode
    Tile {
        #[command(subcommand)]
        action: TileAction,
    },

    /// MGRS reference decode and encode
    Mgrs {
        #[command(subcommand)]
        action: MgrsAction,
    },

    /// Convert input from one format to another
    Convert(ConvertArgs),

    /// Print the extent of a geometry as min_lon,min_lat,max_lon,max_lat
    Bounds(BoundsArgs),

    /// View and modify ~/.geogrid/config.ini
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // Config commands must work even when the file holds invalid values
    if let Commands::Config { command } = cli.command {
        return commands::config::run(command);
    }

    let runner = CliRunner::new(cli.verbose)?;

    match cli.command {
        Commands::Tile { action } => commands::tile::run(action, &runner),
        Commands::Mgrs { action } => commands::mgrs::run(action, &runner),
        Commands::Convert(args) => commands::convert::run(args, &runner),
        Commands::Bounds(args) => commands::bounds::run(args),
        Commands::Config { command } => commands::config::run(command),
    }
}
