//! XYZ tile commands.

use clap::Subcommand;
use geogrid::format::{self, Format, Input};
use geogrid::Geometry;

use super::common::{OutputArgs, PositionArgs};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Tile subcommands.
#[derive(Debug, Subcommand)]
pub enum TileAction {
    /// Decode tile indices into the tile's footprint
    Decode {
        /// Tile column
        x: u32,
        /// Tile row (0 at the top)
        y: u32,
        /// Zoom level (0-22)
        z: u8,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Find the tile containing a position, printed as z/x/y
    Encode {
        #[command(flatten)]
        position: PositionArgs,

        /// Zoom level (0-22) [default: xyz.default_zoom]
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=22))]
        zoom: Option<u8>,
    },
}

/// Run a tile subcommand.
pub fn run(action: TileAction, runner: &CliRunner) -> Result<(), CliError> {
    let config = runner.config();

    let text = match action {
        TileAction::Decode { x, y, z, output } => {
            let (to, options) = output.resolve(config);
            format::convert(Format::Xyz, &Input::Tile { x, y, zoom: z }, to, &options)?
        }
        TileAction::Encode { position, zoom } => {
            let mut options = config.encode_options();
            options.zoom = zoom.unwrap_or(options.zoom);
            format::encode(Format::Xyz, &Geometry::Point(position.coord()), &options)?
        }
    };

    println!("{}", text);
    Ok(())
}
