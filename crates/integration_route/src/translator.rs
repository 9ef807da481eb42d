//! Maneuver code to instruction text

use domain::ManeuverCode;

use crate::config::RouteResponseConfig;
use crate::messages::{MessageKey, Messages};

/// Turns a maneuver code and road name into a readable instruction
///
/// | code | instruction |
/// |---|---|
/// | `F` | straight ahead onto the road, or "continue straight ahead" on an unnamed road |
/// | `B` | U-turn |
/// | `L` / `R` | turn left / right |
/// | `BL` / `BR` | turn sharply left / right |
/// | `FL` / `FR` | turn slightly left / right |
/// | `round_about_entry` / `round_about_exit` | enter / exit roundabout |
/// | none | take the road |
/// | anything else | `?code? road`, so unknown codes stay visible |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionTranslator {
    messages: Messages,
    unnamed_road: String,
}

impl InstructionTranslator {
    /// Create a translator
    #[must_use]
    pub fn new(messages: Messages, unnamed_road: impl Into<String>) -> Self {
        Self {
            messages,
            unnamed_road: unnamed_road.into(),
        }
    }

    /// Create a translator from configuration
    #[must_use]
    pub fn from_config(config: &RouteResponseConfig) -> Self {
        Self::new(
            Messages::new(config.locale),
            config.unnamed_road_sentinel.clone(),
        )
    }

    /// Translate one step
    #[must_use]
    pub fn translate(&self, code: Option<&str>, road_name: &str) -> String {
        let Some(code) = code else {
            return self.messages.get(MessageKey::InstructionTake, &[road_name]);
        };

        let key = match ManeuverCode::parse(code) {
            ManeuverCode::Straight if road_name == self.unnamed_road => {
                return self.messages.get(MessageKey::InstructionContinueStraight, &[]);
            },
            ManeuverCode::Straight => MessageKey::InstructionStraightOnto,
            ManeuverCode::UTurn => MessageKey::InstructionUTurn,
            ManeuverCode::Left => MessageKey::InstructionLeft,
            ManeuverCode::Right => MessageKey::InstructionRight,
            ManeuverCode::SharpLeft => MessageKey::InstructionSharpLeft,
            ManeuverCode::SharpRight => MessageKey::InstructionSharpRight,
            ManeuverCode::SlightLeft => MessageKey::InstructionSlightLeft,
            ManeuverCode::SlightRight => MessageKey::InstructionSlightRight,
            ManeuverCode::RoundaboutEntry => MessageKey::InstructionRoundaboutEntry,
            ManeuverCode::RoundaboutExit => MessageKey::InstructionRoundaboutExit,
            ManeuverCode::Other(_) => {
                return self
                    .messages
                    .get(MessageKey::InstructionUnknown, &[code, road_name]);
            },
        };

        self.messages.get(key, &[road_name])
    }
}

impl Default for InstructionTranslator {
    fn default() -> Self {
        Self::from_config(&RouteResponseConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UNNAMED_ROAD_SENTINEL;
    use crate::messages::Locale;

    fn english() -> InstructionTranslator {
        InstructionTranslator::default()
    }

    #[test]
    fn test_straight_on_unnamed_road() {
        assert_eq!(
            english().translate(Some("F"), UNNAMED_ROAD_SENTINEL),
            "continue straight ahead"
        );
    }

    #[test]
    fn test_straight_on_named_road() {
        let text = english().translate(Some("F"), "Main St");
        assert_eq!(text, "straight ahead onto Main St");
    }

    #[test]
    fn test_every_documented_code() {
        let translator = english();
        let cases = [
            ("B", "make a U-turn Main St"),
            ("L", "turn left Main St"),
            ("R", "turn right Main St"),
            ("BL", "turn sharply left Main St"),
            ("BR", "turn sharply right Main St"),
            ("FL", "turn slightly left Main St"),
            ("FR", "turn slightly right Main St"),
            ("round_about_entry", "enter roundabout Main St"),
            ("round_about_exit", "exit roundabout Main St"),
        ];
        for (code, expected) in cases {
            assert_eq!(translator.translate(Some(code), "Main St"), expected);
        }
    }

    #[test]
    fn test_missing_code() {
        assert_eq!(english().translate(None, "Main St"), "take Main St");
    }

    #[test]
    fn test_unknown_code_stays_visible() {
        let text = english().translate(Some("ZZ"), "Main St");
        assert_eq!(text, "?ZZ? Main St");
        assert!(text.contains("ZZ"));
    }

    #[test]
    fn test_sentinel_only_affects_straight() {
        assert_eq!(
            english().translate(Some("L"), UNNAMED_ROAD_SENTINEL),
            format!("turn left {UNNAMED_ROAD_SENTINEL}")
        );
    }

    #[test]
    fn test_custom_sentinel() {
        let translator =
            InstructionTranslator::new(Messages::new(Locale::En), "no name provided");
        assert_eq!(
            translator.translate(Some("F"), "no name provided"),
            "continue straight ahead"
        );
        assert_eq!(
            translator.translate(Some("F"), UNNAMED_ROAD_SENTINEL),
            format!("straight ahead onto {UNNAMED_ROAD_SENTINEL}")
        );
    }

    #[test]
    fn test_french_phrasing() {
        let translator = InstructionTranslator::from_config(&RouteResponseConfig {
            locale: Locale::Fr,
            ..RouteResponseConfig::default()
        });
        assert_eq!(
            translator.translate(Some("F"), UNNAMED_ROAD_SENTINEL),
            "Continuer tout droit"
        );
        assert_eq!(translator.translate(Some("B"), "D7"), "Demi-tour D7");
        assert_eq!(
            translator.translate(Some("round_about_entry"), "N12"),
            "Entrée rond-point N12"
        );
        assert_eq!(translator.translate(None, "A6"), "Prendre A6");
    }
}
