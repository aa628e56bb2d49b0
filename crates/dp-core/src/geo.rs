//! Geographic coordinate type and great-circle geometry.
//!
//! A [`Coordinate`] is identified by the exact latitude/longitude *text* it
//! was read from.  The parsed `f64` degrees are carried alongside for
//! geometry, but they never take part in equality or hashing: two
//! coordinates are the same road node iff their texts are identical.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{CoreError, CoreResult};

const EARTH_RADIUS_KM: f64 = 6_371.0;
const KM_PER_MILE: f64 = 1.609_344;

/// A WGS-84 point keyed by its textual latitude/longitude.
///
/// The texts are reference-counted so cloning a `Coordinate` (which the
/// router does for every parent link) never copies string data.
#[derive(Clone, Debug)]
pub struct Coordinate {
    lat_text: Arc<str>,
    lon_text: Arc<str>,
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Build a coordinate from its two text tokens.
    ///
    /// Surrounding whitespace is trimmed; the trimmed text is the identity.
    ///
    /// # Errors
    ///
    /// [`CoreError::Parse`] if either token is not a finite decimal number.
    pub fn new(lat_text: &str, lon_text: &str) -> CoreResult<Self> {
        let lat_text = lat_text.trim();
        let lon_text = lon_text.trim();
        let lat = parse_degrees(lat_text, "latitude")?;
        let lon = parse_degrees(lon_text, "longitude")?;
        Ok(Self {
            lat_text: Arc::from(lat_text),
            lon_text: Arc::from(lon_text),
            lat,
            lon,
        })
    }

    /// Parse a `"lat lon"` pair separated by whitespace.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let mut tokens = s.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(lat), Some(lon), None) => Self::new(lat, lon),
            _ => Err(CoreError::Parse(format!(
                "expected \"<lat> <lon>\", got {s:?}"
            ))),
        }
    }

    /// Build a coordinate from numeric degrees, rendering the identity text
    /// with seven decimal places (≈ 1 cm).
    ///
    /// Handy for synthetic networks; loaders should prefer [`Coordinate::new`]
    /// so that identity follows the source text exactly.
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self {
            lat_text: Arc::from(format!("{lat:.7}")),
            lon_text: Arc::from(format!("{lon:.7}")),
            lat,
            lon,
        }
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    #[inline]
    pub fn lat_text(&self) -> &str {
        &self.lat_text
    }

    #[inline]
    pub fn lon_text(&self) -> &str {
        &self.lon_text
    }

    /// Great-circle ("crow") distance to `other` in miles.
    #[inline]
    pub fn distance_miles(&self, other: &Coordinate) -> f64 {
        distance_miles(self, other)
    }
}

fn parse_degrees(text: &str, what: &str) -> CoreResult<f64> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CoreError::Parse(format!("invalid {what} {text:?}"))),
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat_text == other.lat_text && self.lon_text == other.lon_text
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat_text.hash(state);
        self.lon_text.hash(state);
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat_text, self.lon_text)
    }
}

/// Haversine great-circle distance in kilometres.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let u = ((lat2 - lat1) * 0.5).sin();
    let v = ((b.lon - a.lon).to_radians() * 0.5).sin();
    2.0 * EARTH_RADIUS_KM * (u * u + lat1.cos() * lat2.cos() * v * v).sqrt().asin()
}

/// Haversine great-circle distance in miles.
///
/// Never exceeds the length of any road path between the two points, so it
/// is an admissible A* heuristic.
pub fn distance_miles(a: &Coordinate, b: &Coordinate) -> f64 {
    distance_km(a, b) / KM_PER_MILE
}

/// Planar bearing of the line `from → to` in degrees, in `[0, 360)`.
///
/// 0° is due east and angles grow counter-clockwise (90° = north), treating
/// longitude as x and latitude as y.
pub fn bearing_deg(from: &Coordinate, to: &Coordinate) -> f64 {
    let angle = (to.lat - from.lat).atan2(to.lon - from.lon).to_degrees();
    normalize_deg(angle)
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_deg(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}
