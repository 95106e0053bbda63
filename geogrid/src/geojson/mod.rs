//! GeoJSON (RFC 7946) geometry codec
//!
//! Reads a geometry object, or a Feature whose `geometry` is unwrapped.
//! Writes bare geometry objects.

mod model;

use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::geometry::Geometry;
use model::GeoJsonObject;

/// Parses GeoJSON text into a validated geometry.
pub fn parse(text: &str) -> Result<Geometry> {
    let object: GeoJsonObject = serde_json::from_str(text).map_err(|e| {
        debug!(error = %e, "GeoJSON rejected by deserializer");
        ConvertError::MalformedGeoJson(e.to_string())
    })?;

    let geometry = object.into_geometry(true)?;
    geometry
        .validate()
        .map_err(|e| ConvertError::MalformedGeoJson(e.to_string()))?;
    Ok(geometry)
}

/// Serializes a geometry as compact GeoJSON.
pub fn serialize(geometry: &Geometry) -> String {
    model::to_value(geometry).to_string()
}

/// Serializes a geometry as indented GeoJSON.
pub fn serialize_pretty(geometry: &Geometry) -> String {
    format!("{:#}", model::to_value(geometry))
}
