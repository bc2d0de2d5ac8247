//! Domain types shared by the map core and the service clients.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CacheCacheError;

// --- Geo types ---

/// A geographic position in degrees.
///
/// The places registry stores coordinates as a single `"<longitude>,<latitude>"`
/// string — longitude FIRST, the opposite of the conventional lat/long order.
/// Parsing keeps that order; callers must not re-swap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl FromStr for GeoPoint {
    type Err = CacheCacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (lon, lat) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lon), Some(lat), None) => (lon.trim(), lat.trim()),
            _ => return Err(CacheCacheError::Coordinates(s.to_string())),
        };
        let longitude: f64 = lon
            .parse()
            .map_err(|_| CacheCacheError::Coordinates(s.to_string()))?;
        let latitude: f64 = lat
            .parse()
            .map_err(|_| CacheCacheError::Coordinates(s.to_string()))?;
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(CacheCacheError::Coordinates(s.to_string()));
        }
        Ok(GeoPoint { longitude, latitude })
    }
}

/// A pixel position inside a [`Viewport`], origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Fixed pixel dimensions of a map render. Not recomputed mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width_px: u32,
    pub height_px: u32,
}

impl Viewport {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self { width_px, height_px }
    }

    pub fn width(&self) -> f64 {
        f64::from(self.width_px)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.height_px)
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint { x: self.width() / 2.0, y: self.height() / 2.0 }
    }
}

// --- Places ---

/// A place record exactly as the places registry returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePlace {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `"<longitude>,<latitude>"` — see [`GeoPoint`].
    pub coordinates: String,
}

/// A named, geocoded location usable as a hiding spot or waypoint.
///
/// Immutable for the lifetime of a game session; `name` is the unique key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub coordinates: GeoPoint,
}

impl TryFrom<WirePlace> for Place {
    type Error = CacheCacheError;

    fn try_from(wire: WirePlace) -> Result<Self, Self::Error> {
        let coordinates = wire.coordinates.parse()?;
        Ok(Place {
            key: wire.key,
            name: wire.name,
            description: wire.description,
            coordinates,
        })
    }
}

/// Convert wire records to domain places, dropping entries whose coordinates
/// do not parse. The map core never sees a malformed point.
pub fn parse_places(wire: Vec<WirePlace>) -> Vec<Place> {
    wire.into_iter()
        .filter_map(|w| {
            let name = w.name.clone();
            match Place::try_from(w) {
                Ok(place) => Some(place),
                Err(e) => {
                    warn!(place = %name, error = %e, "Dropping place with unparseable coordinates");
                    None
                }
            }
        })
        .collect()
}
