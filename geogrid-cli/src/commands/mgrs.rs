//! MGRS reference commands.

use clap::Subcommand;
use geogrid::format::{self, Format, Input};
use geogrid::Geometry;

use super::common::{OutputArgs, PositionArgs};
use crate::error::CliError;
use crate::runner::CliRunner;

/// MGRS subcommands.
#[derive(Debug, Subcommand)]
pub enum MgrsAction {
    /// Decode a reference into its grid cell
    Decode {
        /// MGRS reference, e.g. 33UUU or "18T WL 83959 07350"
        #[arg(required = true, num_args = 1..)]
        reference: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Encode a position as an MGRS reference
    Encode {
        #[command(flatten)]
        position: PositionArgs,

        /// Digits per axis, 0-5 [default: mgrs.precision]
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
        precision: Option<u8>,
    },
}

/// Run an MGRS subcommand.
pub fn run(action: MgrsAction, runner: &CliRunner) -> Result<(), CliError> {
    let config = runner.config();

    let text = match action {
        MgrsAction::Decode { reference, output } => {
            let (to, options) = output.resolve(config);
            let input = Input::Mgrs(reference.join(" "));
            format::convert(Format::Mgrs, &input, to, &options)?
        }
        MgrsAction::Encode {
            position,
            precision,
        } => {
            let mut options = config.encode_options();
            options.precision = precision.unwrap_or(options.precision);
            format::encode(Format::Mgrs, &Geometry::Point(position.coord()), &options)?
        }
    };

    println!("{}", text);
    Ok(())
}
