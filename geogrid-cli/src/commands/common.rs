//! Common arguments and helpers shared across CLI commands.

use std::io::{self, Read};

use clap::Args;
use geogrid::config::ConfigFile;
use geogrid::wkb::ByteOrder;
use geogrid::{Coord, EncodeOptions, Format};

use crate::error::CliError;

/// Output selection shared by every converting command.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Target format: xyz, mgrs, wkt, wkb, geojson [default: output.format]
    #[arg(long)]
    pub to: Option<Format>,

    /// Zoom level for xyz output [default: xyz.default_zoom]
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=22))]
    pub zoom: Option<u8>,

    /// Digits per axis for mgrs output, 0-5 [default: mgrs.precision]
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub precision: Option<u8>,

    /// Indent GeoJSON output
    #[arg(long)]
    pub pretty: bool,

    /// Byte order for wkb output: little or big [default: output.byte_order]
    #[arg(long)]
    pub byte_order: Option<ByteOrder>,
}

impl OutputArgs {
    /// Resolve the target format and encoding options from CLI args and config.
    pub fn resolve(&self, config: &ConfigFile) -> (Format, EncodeOptions) {
        // CLI takes precedence, then config
        let defaults = config.encode_options();
        let options = EncodeOptions {
            zoom: self.zoom.unwrap_or(defaults.zoom),
            precision: self.precision.unwrap_or(defaults.precision),
            byte_order: self.byte_order.unwrap_or(defaults.byte_order),
            pretty: self.pretty || defaults.pretty,
        };
        (self.to.unwrap_or(config.output.format), options)
    }
}

/// A position given as `--lat`/`--lon`.
#[derive(Debug, Args)]
pub struct PositionArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

impl PositionArgs {
    pub fn coord(&self) -> Coord {
        Coord::new(self.lon, self.lat)
    }
}

/// Returns `input` when given, otherwise everything on stdin.
pub fn read_input(input: Option<String>) -> Result<String, CliError> {
    match input {
        Some(text) => Ok(text),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(CliError::ReadInput)?;
            Ok(text)
        }
    }
}
