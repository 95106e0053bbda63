//! Well-Known Text codec
//!
//! Reads the seven OGC simple-feature kinds with case-insensitive keywords,
//! optional `Z`/`M`/`ZM` tags (extra ordinates are dropped) and an optional
//! EWKT `SRID=n;` prefix. Parsing is done by the `wkt` crate; this module
//! maps its output into the canonical model. Writes the canonical
//! `KEYWORD (x y, ...)` form.
//!
//! `EMPTY` is accepted for the Multi* kinds and GeometryCollection only;
//! the canonical model has no empty Point, LineString or Polygon.

mod reader;
mod writer;

pub use reader::parse;
pub use writer::serialize;
