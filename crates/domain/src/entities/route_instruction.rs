//! Turn-by-turn route instruction

use serde::{Deserialize, Serialize};

use crate::value_objects::ManeuverCode;

/// One maneuver of a route, built from a single service step
///
/// Instructions are immutable once created; the service's original maneuver
/// code is preserved next to the generated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInstruction {
    duration: f64,
    distance: f64,
    code: Option<String>,
    instruction: String,
}

impl RouteInstruction {
    /// Create a new instruction
    #[must_use]
    pub fn new(
        duration: f64,
        distance: f64,
        code: Option<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            duration,
            distance,
            code,
            instruction: instruction.into(),
        }
    }

    /// Step duration in seconds
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Step distance, in the unit the service uses
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// The service's maneuver code, if any
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Typed maneuver for the code
    #[must_use]
    pub fn maneuver(&self) -> Option<ManeuverCode> {
        self.code.as_deref().map(ManeuverCode::parse)
    }

    /// Human-readable instruction text
    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }
}
