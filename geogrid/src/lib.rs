//! GeoGrid - Conversions between grid references and geometry encodings
//!
//! This library converts between XYZ (slippy map) tiles, MGRS references,
//! WKT, WKB hex and GeoJSON. Every format decodes into the canonical WGS84
//! [`Geometry`] model and encodes from it, so any pair of formats can be
//! converted in two steps.
//!
//! # High-Level API
//!
//! The [`format`] module dispatches on a [`Format`] tag:
//!
//! ```
//! use geogrid::format::{self, EncodeOptions, Format, Input};
//!
//! let input = Input::Mgrs("33UUU".to_string());
//! let wkt = format::convert(Format::Mgrs, &input, Format::Wkt, &EncodeOptions::default())?;
//! assert!(wkt.starts_with("POLYGON (("));
//! # Ok::<(), geogrid::ConvertError>(())
//! ```
//!
//! Each codec can also be used directly, e.g. [`mgrs::encode`] or
//! [`wkb::parse`].

pub mod config;
pub mod coord;
pub mod error;
pub mod format;
pub mod geojson;
pub mod geometry;
pub mod logging;
pub mod mgrs;
pub mod wkb;
pub mod wkt;

pub use error::{ConvertError, Result};
pub use format::{convert, decode, encode, Decoded, EncodeOptions, Format, Input};
pub use geometry::{BoundingBox, Coord, Geometry, GeometryKind};

/// Version of the GeoGrid library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
