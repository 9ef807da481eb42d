//! Maneuver code value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed view of a service maneuver code
///
/// Route services describe each step with a short token:
/// - `F`: straight ahead
/// - `B`: U-turn
/// - `L` / `R`: turn left / right
/// - `BL` / `BR`: sharp left / right
/// - `FL` / `FR`: slight left / right
/// - `round_about_entry` / `round_about_exit`: roundabout
///
/// Matching is exact and case-sensitive; anything else is kept as
/// [`ManeuverCode::Other`] so unknown codes stay visible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ManeuverCode {
    /// `F`
    Straight,
    /// `B`
    UTurn,
    /// `L`
    Left,
    /// `R`
    Right,
    /// `BL`
    SharpLeft,
    /// `BR`
    SharpRight,
    /// `FL`
    SlightLeft,
    /// `FR`
    SlightRight,
    /// `round_about_entry`
    RoundaboutEntry,
    /// `round_about_exit`
    RoundaboutExit,
    /// Any code the service may add later
    Other(String),
}

impl ManeuverCode {
    /// Map a wire code to a maneuver
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code {
            "F" => Self::Straight,
            "B" => Self::UTurn,
            "L" => Self::Left,
            "R" => Self::Right,
            "BL" => Self::SharpLeft,
            "BR" => Self::SharpRight,
            "FL" => Self::SlightLeft,
            "FR" => Self::SlightRight,
            "round_about_entry" => Self::RoundaboutEntry,
            "round_about_exit" => Self::RoundaboutExit,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire code
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Straight => "F",
            Self::UTurn => "B",
            Self::Left => "L",
            Self::Right => "R",
            Self::SharpLeft => "BL",
            Self::SharpRight => "BR",
            Self::SlightLeft => "FL",
            Self::SlightRight => "FR",
            Self::RoundaboutEntry => "round_about_entry",
            Self::RoundaboutExit => "round_about_exit",
            Self::Other(code) => code,
        }
    }

    /// Whether the code is one the service documents
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Whether the maneuver involves a roundabout
    #[must_use]
    pub const fn is_roundabout(&self) -> bool {
        matches!(self, Self::RoundaboutEntry | Self::RoundaboutExit)
    }
}

impl From<&str> for ManeuverCode {
    fn from(code: &str) -> Self {
        Self::parse(code)
    }
}

impl From<String> for ManeuverCode {
    fn from(code: String) -> Self {
        Self::parse(&code)
    }
}

impl From<ManeuverCode> for String {
    fn from(code: ManeuverCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for ManeuverCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
