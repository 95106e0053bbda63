//! Convert command - decode any format and re-encode it as another.

use clap::Args;
use geogrid::format::{self, Format, Input};
use tracing::debug;

use super::common::{read_input, OutputArgs};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the convert command.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Source format: xyz (as z/x/y), mgrs, wkt, wkb, geojson
    #[arg(long)]
    pub from: Format,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Input text; read from stdin when omitted
    pub input: Option<String>,
}

/// Run the convert command.
pub fn run(args: ConvertArgs, runner: &CliRunner) -> Result<(), CliError> {
    let (to, options) = args.output.resolve(runner.config());
    let text = read_input(args.input)?;
    let input = Input::from_text(args.from, text.trim())?;

    debug!(from = %args.from, to = %to, bytes = text.len(), "Converting");

    let output = format::convert(args.from, &input, to, &options)?;
    println!("{}", output);
    Ok(())
}
