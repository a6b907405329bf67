//! Logic errors the simulation refuses to paper over

use std::fmt;

/// An invariant the step function must never break
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Tried to swallow an item at least as large as the hole
    OversizedSwallow { item_radius: f32, hole_radius: f32 },
    /// Trail grew past its fixed capacity
    TrailOverflow { len: usize },
    /// Hole radius left [start, max]
    RadiusOutOfRange { radius: f32 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::OversizedSwallow {
                item_radius,
                hole_radius,
            } => write!(
                f,
                "hole of radius {} swallowed an item of radius {}",
                hole_radius, item_radius
            ),
            SimError::TrailOverflow { len } => write!(f, "trail holds {} points", len),
            SimError::RadiusOutOfRange { radius } => {
                write!(f, "hole radius {} is out of range", radius)
            }
        }
    }
}

impl std::error::Error for SimError {}
