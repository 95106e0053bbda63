//! Static MGRS lookup tables.
//!
//! Letter sets and band limits for the WGS84 ("AA") lettering scheme. All
//! tables are immutable constants.

/// Latitude band letters from 80°S northwards; I and O are skipped.
pub const BAND_LETTERS: &[u8; 20] = b"CDEFGHJKLMNPQRSTUVWX";

/// Southern limit of MGRS coverage.
pub const MIN_MGRS_LAT: f64 = -80.0;

/// Northern limit of MGRS coverage (exclusive).
pub const MAX_MGRS_LAT: f64 = 84.0;

/// Height of every band except X.
const BAND_HEIGHT: f64 = 8.0;

/// 100 km column letters, selected by `(zone - 1) % 3`.
pub const COLUMN_SETS: [&[u8; 8]; 3] = [b"ABCDEFGH", b"JKLMNPQR", b"STUVWXYZ"];

/// 100 km row letters; odd zones start at A, even zones at F.
pub const ROW_LETTERS: &[u8; 20] = b"ABCDEFGHJKLMNPQRSTUV";

/// Row letter shift applied to even-numbered zones.
pub const EVEN_ZONE_ROW_OFFSET: usize = 5;

/// Side length of a grid square.
pub const SQUARE_SIZE: f64 = 100_000.0;

/// Northing period of the row lettering.
pub const ROW_CYCLE: f64 = 2_000_000.0;

/// Latitude range `[south, north)` of a band letter, or `None` if the
/// letter is not a band.
pub fn band_range(band: char) -> Option<(f64, f64)> {
    let index = BAND_LETTERS.iter().position(|&b| b as char == band)?;
    let south = MIN_MGRS_LAT + index as f64 * BAND_HEIGHT;
    let north = if band == 'X' {
        MAX_MGRS_LAT
    } else {
        south + BAND_HEIGHT
    };
    Some((south, north))
}

/// Band letter for a latitude, or `None` outside 80°S..84°N.
pub fn band_for_lat(lat: f64) -> Option<char> {
    if !(MIN_MGRS_LAT..MAX_MGRS_LAT).contains(&lat) {
        return None;
    }
    // Band X stretches to 84°N
    let index = (((lat - MIN_MGRS_LAT) / BAND_HEIGHT).floor() as usize).min(BAND_LETTERS.len() - 1);
    Some(BAND_LETTERS[index] as char)
}

/// Grid zones that do not exist: 32X, 34X and 36X are absorbed by the
/// widened Svalbard zones.
pub fn zone_exists(zone: u8, band: char) -> bool {
    (1..=60).contains(&zone) && !(band == 'X' && matches!(zone, 32 | 34 | 36))
}

/// Longitude range `[west, east]` of a grid zone designation, including
/// the Norway (31V/32V) and Svalbard (31X..37X) exceptions.
pub fn zone_lon_range(zone: u8, band: char) -> (f64, f64) {
    match (band, zone) {
        ('V', 31) => (0.0, 3.0),
        ('V', 32) => (3.0, 12.0),
        ('X', 31) => (0.0, 9.0),
        ('X', 33) => (9.0, 21.0),
        ('X', 35) => (21.0, 33.0),
        ('X', 37) => (33.0, 42.0),
        _ => {
            let west = -180.0 + (zone as f64 - 1.0) * 6.0;
            (west, west + 6.0)
        }
    }
}

/// Column letter set for a zone.
#[inline]
pub fn column_set(zone: u8) -> &'static [u8; 8] {
    COLUMN_SETS[(zone as usize - 1) % 3]
}

/// Column letter for a 100 km easting index (1-8).
pub fn column_letter(zone: u8, easting_index: usize) -> char {
    column_set(zone)[easting_index.clamp(1, 8) - 1] as char
}

/// 100 km easting index (1-8) of a column letter, if the letter belongs to
/// the zone's set.
pub fn column_index(zone: u8, letter: char) -> Option<usize> {
    column_set(zone)
        .iter()
        .position(|&c| c as char == letter)
        .map(|i| i + 1)
}

/// Row letter for a 100 km northing index within the 2,000,000 m cycle.
pub fn row_letter(zone: u8, northing_index: usize) -> char {
    let shift = if zone % 2 == 0 { EVEN_ZONE_ROW_OFFSET } else { 0 };
    ROW_LETTERS[(northing_index + shift) % ROW_LETTERS.len()] as char
}

/// 100 km northing index (0-19) within the cycle for a row letter.
pub fn row_index(zone: u8, letter: char) -> Option<usize> {
    let position = ROW_LETTERS.iter().position(|&c| c as char == letter)?;
    let shift = if zone % 2 == 0 { EVEN_ZONE_ROW_OFFSET } else { 0 };
    Some((position + ROW_LETTERS.len() - shift) % ROW_LETTERS.len())
}
