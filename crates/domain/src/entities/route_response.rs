//! Canonical route response

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::RouteInstruction;
use crate::value_objects::{BoundingBox, Geometry};

/// A normalized route, independent of the service dialect it came from
///
/// Every field is independently optional on the wire: a field the service did
/// not send keeps its zero value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Total travel time in seconds
    pub total_time: f64,
    /// Total distance, in the unit the service uses
    pub total_distance: f64,
    /// Extent of the route
    pub bbox: BoundingBox,
    /// Route path, if the service sent one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_geometry: Option<Geometry>,
    /// Turn-by-turn instructions in travel order
    pub route_instructions: Vec<RouteInstruction>,
}

impl RouteResponse {
    /// Create an empty response
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total travel time rounded to whole minutes
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn duration_minutes(&self) -> u32 {
        if !self.total_time.is_finite() || self.total_time <= 0.0 {
            return 0;
        }
        (self.total_time / 60.0).round() as u32
    }

    /// Number of instructions
    #[must_use]
    pub fn instruction_count(&self) -> usize {
        self.route_instructions.len()
    }

    /// Format as a compact one-line summary
    #[must_use]
    pub fn format_summary(&self) -> String {
        let geometry = self
            .route_geometry
            .as_ref()
            .map_or_else(String::new, |g| {
                format!(", {} of {} positions", g.type_name(), g.position_count())
            });
        format!(
            "{} ({}min, {} instructions){geometry}",
            self.total_distance,
            self.duration_minutes(),
            self.instruction_count()
        )
    }
}

impl fmt::Display for RouteResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())
    }
}
