//! Turn-by-turn delivery commands.

use std::fmt;
use std::sync::Arc;

/// Eight-point compass heading derived from a segment bearing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompassDirection {
    East,
    Northeast,
    North,
    Northwest,
    West,
    Southwest,
    South,
    Southeast,
}

impl CompassDirection {
    /// Classify a bearing in degrees (0° = east, counter-clockwise).
    ///
    /// Each direction owns a 45° sector centred on it; the east sector wraps
    /// around 0°.
    pub fn from_bearing(deg: f64) -> Self {
        let deg = dp_core::geo::normalize_deg(deg);
        match deg {
            d if d < 22.5 => CompassDirection::East,
            d if d < 67.5 => CompassDirection::Northeast,
            d if d < 112.5 => CompassDirection::North,
            d if d < 157.5 => CompassDirection::Northwest,
            d if d < 202.5 => CompassDirection::West,
            d if d < 247.5 => CompassDirection::Southwest,
            d if d < 292.5 => CompassDirection::South,
            d if d < 337.5 => CompassDirection::Southeast,
            _ => CompassDirection::East,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompassDirection::East      => "east",
            CompassDirection::Northeast => "northeast",
            CompassDirection::North     => "north",
            CompassDirection::Northwest => "northwest",
            CompassDirection::West      => "west",
            CompassDirection::Southwest => "southwest",
            CompassDirection::South     => "south",
            CompassDirection::Southeast => "southeast",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Classify a turn angle from [`dp_core::turn_angle_deg`].
    ///
    /// Angles within `threshold_deg` of straight ahead (either side of 0°)
    /// are not a turn.  Exactly 0° is never a turn, even with a zero
    /// threshold.
    pub fn from_angle(angle_deg: f64, threshold_deg: f64) -> Option<Self> {
        if angle_deg == 0.0 {
            None
        } else if angle_deg >= threshold_deg && angle_deg < 180.0 {
            Some(TurnDirection::Left)
        } else if angle_deg >= 180.0 && angle_deg <= 360.0 - threshold_deg {
            Some(TurnDirection::Right)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TurnDirection::Left  => "left",
            TurnDirection::Right => "right",
        }
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instruction for the driver.
#[derive(Clone, Debug, PartialEq)]
pub enum DeliveryCommand {
    /// Follow `street` heading `direction` for `miles`.
    Proceed { direction: CompassDirection, street: Arc<str>, miles: f64 },
    /// Turn onto `street`.
    Turn { direction: TurnDirection, street: Arc<str> },
    /// Hand over `item` at the current location.
    Deliver { item: String },
}

impl DeliveryCommand {
    /// Short lowercase tag, used as the `kind` column in CSV output.
    pub fn kind(&self) -> &'static str {
        match self {
            DeliveryCommand::Proceed { .. } => "proceed",
            DeliveryCommand::Turn { .. }    => "turn",
            DeliveryCommand::Deliver { .. } => "deliver",
        }
    }
}

impl fmt::Display for DeliveryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryCommand::Proceed { direction, street, miles } => {
                write!(f, "Proceed {direction} on {street} for {miles:.2} miles")
            }
            DeliveryCommand::Turn { direction, street } => write!(f, "Turn {direction} on {street}"),
            DeliveryCommand::Deliver { item } => write!(f, "Deliver {item}"),
        }
    }
}
