use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;
use crate::geometry::GeometryKind;

/// EWKB flag: coordinates carry a Z ordinate
pub const EWKB_Z_FLAG: u32 = 0x8000_0000;
/// EWKB flag: coordinates carry an M ordinate
pub const EWKB_M_FLAG: u32 = 0x4000_0000;
/// EWKB flag: an SRID follows the type code
pub const EWKB_SRID_FLAG: u32 = 0x2000_0000;

const EWKB_FLAGS: u32 = EWKB_Z_FLAG | EWKB_M_FLAG | EWKB_SRID_FLAG;

/// Byte order marker at the start of every WKB geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    BigEndian,
    #[default]
    LittleEndian,
}

impl From<ByteOrder> for u8 {
    fn from(value: ByteOrder) -> Self {
        match value {
            ByteOrder::BigEndian => 0,
            ByteOrder::LittleEndian => 1,
        }
    }
}

impl TryFrom<u8> for ByteOrder {
    type Error = ConvertError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ByteOrder::BigEndian),
            1 => Ok(ByteOrder::LittleEndian),
            other => Err(ConvertError::MalformedWkb(format!(
                "invalid byte order flag {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::BigEndian => f.write_str("big"),
            ByteOrder::LittleEndian => f.write_str("little"),
        }
    }
}

impl FromStr for ByteOrder {
    type Err = String;

    /// Accepts `little`/`big` and the short forms `le`/`be` and `ndr`/`xdr`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "little" | "le" | "ndr" => Ok(ByteOrder::LittleEndian),
            "big" | "be" | "xdr" => Ok(ByteOrder::BigEndian),
            other => Err(format!(
                "unknown byte order '{}' (expected 'little' or 'big')",
                other
            )),
        }
    }
}

/// A decoded WKB type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WkbType {
    pub kind: GeometryKind,
    pub has_z: bool,
    pub has_m: bool,
    pub has_srid: bool,
}

impl WkbType {
    /// Decodes OGC (1-7), ISO (1001-3007) and EWKB flagged type codes.
    pub fn from_code(code: u32) -> Option<Self> {
        let flags = code & EWKB_FLAGS;
        let iso = code & !EWKB_FLAGS;
        let (dimension, base) = (iso / 1000, iso % 1000);
        if dimension > 3 {
            return None;
        }
        let kind = GeometryKind::from_wkb_code(base)?;

        Some(Self {
            kind,
            has_z: flags & EWKB_Z_FLAG != 0 || dimension == 1 || dimension == 3,
            has_m: flags & EWKB_M_FLAG != 0 || dimension == 2 || dimension == 3,
            has_srid: flags & EWKB_SRID_FLAG != 0,
        })
    }

    /// Number of f64 ordinates per position.
    pub fn ordinates(&self) -> usize {
        2 + usize::from(self.has_z) + usize::from(self.has_m)
    }
}
