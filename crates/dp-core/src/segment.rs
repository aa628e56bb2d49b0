//! Directed street segments.

use std::fmt;
use std::sync::Arc;

use crate::geo::{self, Coordinate};

/// A directed edge between two coordinates bearing a street name.
///
/// A two-way street is stored as two `Segment`s, one per direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start: Coordinate,
    pub end:   Coordinate,
    pub name:  Arc<str>,
}

impl Segment {
    pub fn new(start: Coordinate, end: Coordinate, name: impl Into<Arc<str>>) -> Self {
        Self { start, end, name: name.into() }
    }

    /// The same street traversed in the opposite direction.
    pub fn reversed(&self) -> Segment {
        Segment {
            start: self.end.clone(),
            end:   self.start.clone(),
            name:  Arc::clone(&self.name),
        }
    }

    /// Great-circle length in miles.
    #[inline]
    pub fn length_miles(&self) -> f64 {
        geo::distance_miles(&self.start, &self.end)
    }

    /// Planar bearing of the segment in degrees, `[0, 360)`, 0° = east.
    #[inline]
    pub fn bearing_deg(&self) -> f64 {
        geo::bearing_deg(&self.start, &self.end)
    }
}

/// Counter-clockwise angle needed to turn from `from` onto `to`, in `[0, 360)`.
///
/// Values just above 0 are gentle left turns, values just below 360 gentle
/// right turns, and 180 is a U-turn.
pub fn turn_angle_deg(from: &Segment, to: &Segment) -> f64 {
    geo::normalize_deg(to.bearing_deg() - from.bearing_deg())
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.name, self.start, self.end)
    }
}
