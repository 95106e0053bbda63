//! Well-Known Binary codec, exchanged as hex text
//!
//! Reads OGC WKB, ISO WKB with Z/M/ZM type codes and PostGIS EWKB (flag
//! bits and embedded SRID). Extra ordinates and the SRID are dropped. Every
//! nested geometry carries its own byte order flag, so mixed-endian input is
//! accepted.
//!
//! Output is always 2D OGC WKB, little-endian unless requested otherwise,
//! hex-encoded in upper case.

mod common;
pub mod hex;
mod reader;
mod writer;

pub use common::{ByteOrder, WkbType, EWKB_M_FLAG, EWKB_SRID_FLAG, EWKB_Z_FLAG};
pub use reader::{from_bytes, parse};
pub use writer::{serialize, serialize_with, to_bytes, wkb_size};
