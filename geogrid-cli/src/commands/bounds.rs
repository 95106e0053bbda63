//! Bounds command - the extent of a geometry, with an optional margin.

use clap::Args;
use geogrid::format::{self, Format, Input};

use super::common::read_input;
use crate::error::CliError;

/// Default scale factor applied to the extent.
pub const DEFAULT_BUFFER: f64 = 1.1;

/// Arguments for the bounds command.
#[derive(Debug, Args)]
pub struct BoundsArgs {
    /// Source format: xyz (as z/x/y), mgrs, wkt, wkb, geojson
    #[arg(long)]
    pub from: Format,

    /// Scale factor about the center; 1.0 prints the exact extent
    #[arg(long, default_value_t = DEFAULT_BUFFER)]
    pub buffer: f64,

    /// Input text; read from stdin when omitted
    pub input: Option<String>,
}

/// Run the bounds command.
///
/// Prints `min_lon,min_lat,max_lon,max_lat`.
pub fn run(args: BoundsArgs) -> Result<(), CliError> {
    let text = read_input(args.input)?;
    println!("{}", extent(args.from, text.trim(), args.buffer)?);
    Ok(())
}

fn extent(from: Format, text: &str, buffer: f64) -> Result<String, CliError> {
    if !buffer.is_finite() || buffer <= 0.0 {
        return Err(CliError::InvalidArgument(format!(
            "buffer must be a positive number, got {}",
            buffer
        )));
    }

    let decoded = format::decode(from, &Input::from_text(from, text)?)?;
    let bbox = decoded.bbox.ok_or_else(|| {
        CliError::InvalidArgument("an empty geometry has no extent".to_string())
    })?;
    Ok(bbox.scale(buffer).to_string())
}
