//! Map location - an external map link pinning where a mural is
//!
//! The link is validated for shape only; it is never geocoded. When the link
//! carries explicit coordinates (`?q=lat,lng` or `@lat,lng`) they can be
//! extracted for the map layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

const ACCEPTED_HOSTS: [&str; 2] = ["google.com/maps", "maps.app.goo.gl"];

/// Latitude / longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }

    fn parse_pair(raw: &str) -> Option<Self> {
        let raw = raw.replace("%2C", ",").replace("%2c", ",");
        let mut parts = raw.split(',');
        let lat = parts.next()?.trim().parse::<f64>().ok()?;
        let lng = parts.next()?.trim().parse::<f64>().ok()?;
        Self::new(lat, lng)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapLocation(String);

impl MapLocation {
    /// Validate a map link. Accepts Google Maps links (full or short form).
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidMapLocation(
                "map location is required".to_string(),
            ));
        }
        if !ACCEPTED_HOSTS.iter().any(|host| trimmed.contains(host)) {
            return Err(DomainError::InvalidMapLocation(
                "map location must be a Google Maps link".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wrap a stored value without re-validating it
    pub fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    /// Build a canonical link pointing at the given coordinates
    pub fn from_coordinates(coordinates: Coordinates) -> Self {
        Self(format!(
            "https://www.google.com/maps?q={},{}",
            coordinates.lat, coordinates.lng
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Extract explicit coordinates from the link, if it carries any
    pub fn coordinates(&self) -> Option<Coordinates> {
        if let Some((_, query)) = self.0.split_once('?') {
            let query = query.split('#').next().unwrap_or_default();
            let found = query
                .split('&')
                .filter_map(|pair| pair.strip_prefix("q=").or_else(|| pair.strip_prefix("query=")))
                .find_map(Coordinates::parse_pair);
            if found.is_some() {
                return found;
            }
        }

        // Place links: .../@-34.6037,-58.3816,15z
        let (_, after_at) = self.0.split_once('@')?;
        let pair = after_at.split(['/', '?']).next()?;
        Coordinates::parse_pair(pair)
    }
}

impl fmt::Display for MapLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
