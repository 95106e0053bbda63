//! Parsed MGRS grid references.

use std::fmt;
use std::str::FromStr;

use super::tables::{band_range, column_index, row_index, zone_exists, SQUARE_SIZE};
use crate::error::{ConvertError, Result};

/// Largest number of digits per axis (1 m resolution).
pub const MAX_PRECISION: u8 = 5;

/// A grid reference such as `33UUU` or `18TWL8395907350`.
///
/// `easting`/`northing` are the offsets in metres of the referenced cell's
/// south-west corner inside its 100 km square; both are zero for the
/// square-only form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MgrsReference {
    pub zone: u8,
    pub band: char,
    pub column: char,
    pub row: char,
    pub easting: u32,
    pub northing: u32,
    pub precision: u8,
}

impl MgrsReference {
    /// The two 100 km square letters.
    pub fn square_id(&self) -> String {
        [self.column, self.row].iter().collect()
    }

    /// Grid zone designation, e.g. `33U`.
    pub fn grid_zone(&self) -> String {
        format!("{:02}{}", self.zone, self.band)
    }

    /// Side length in metres of the referenced cell.
    pub fn cell_size(&self) -> u32 {
        cell_size(self.precision)
    }

    /// Bands N through X lie north of the equator.
    pub fn is_northern(&self) -> bool {
        self.band >= 'N'
    }

    /// Checks that every field names part of the real grid.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| ConvertError::InvalidMgrsFormat {
            input: self.to_string(),
            reason,
        };

        if !(1..=60).contains(&self.zone) {
            return Err(invalid(format!("zone {} is outside 1-60", self.zone)));
        }
        if band_range(self.band).is_none() {
            return Err(invalid(format!("'{}' is not a latitude band", self.band)));
        }
        if !zone_exists(self.zone, self.band) {
            return Err(invalid(format!(
                "grid zone {} does not exist",
                self.grid_zone()
            )));
        }
        if column_index(self.zone, self.column).is_none() {
            return Err(invalid(format!(
                "column '{}' is not used in zone {}",
                self.column, self.zone
            )));
        }
        if row_index(self.zone, self.row).is_none() {
            return Err(invalid(format!("'{}' is not a row letter", self.row)));
        }
        if self.precision > MAX_PRECISION {
            return Err(invalid(format!(
                "precision {} exceeds {}",
                self.precision, MAX_PRECISION
            )));
        }
        let limit = SQUARE_SIZE as u32;
        if self.easting >= limit || self.northing >= limit {
            return Err(invalid("offset exceeds the 100 km square".to_string()));
        }
        Ok(())
    }
}

/// Cell side in metres for a number of digits per axis.
#[inline]
pub fn cell_size(precision: u8) -> u32 {
    10u32.pow(u32::from(MAX_PRECISION.saturating_sub(precision)))
}

impl fmt::Display for MgrsReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{}{}{}", self.zone, self.band, self.column, self.row)?;
        if self.precision > 0 {
            let size = self.cell_size();
            let width = self.precision as usize;
            write!(
                f,
                "{:0width$}{:0width$}",
                self.easting / size,
                self.northing / size,
                width = width
            )?;
        }
        Ok(())
    }
}

impl FromStr for MgrsReference {
    type Err = ConvertError;

    /// Parses a reference, ignoring whitespace and letter case.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let invalid = |reason: &str| ConvertError::InvalidMgrsFormat {
            input: s.trim().to_string(),
            reason: reason.to_string(),
        };

        if !normalized.is_ascii() {
            return Err(invalid("contains non-ASCII characters"));
        }

        let zone_len = normalized
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if zone_len == 0 || zone_len > 2 {
            return Err(invalid("expected a 1-2 digit zone number"));
        }
        let zone: u8 = normalized[..zone_len]
            .parse()
            .map_err(|_| invalid("zone is not a number"))?;

        let rest = normalized[zone_len..].as_bytes();
        if rest.len() < 3 || !rest[..3].iter().all(u8::is_ascii_alphabetic) {
            return Err(invalid("expected a band letter and two square letters"));
        }
        let band = rest[0] as char;
        let column = rest[1] as char;
        let row = rest[2] as char;

        let digits = &normalized[zone_len + 3..];
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("location must be digits only"));
        }
        if digits.len() % 2 != 0 {
            return Err(invalid("location needs the same number of easting and northing digits"));
        }
        if digits.len() > 2 * MAX_PRECISION as usize {
            return Err(invalid("location has more than 10 digits"));
        }

        let precision = (digits.len() / 2) as u8;
        let size = cell_size(precision);
        let (easting, northing) = if precision == 0 {
            (0, 0)
        } else {
            let (e, n) = digits.split_at(precision as usize);
            let e: u32 = e.parse().map_err(|_| invalid("bad easting digits"))?;
            let n: u32 = n.parse().map_err(|_| invalid("bad northing digits"))?;
            (e * size, n * size)
        };

        let reference = MgrsReference {
            zone,
            band,
            column,
            row,
            easting,
            northing,
            precision,
        };
        reference.validate()?;
        Ok(reference)
    }
}
