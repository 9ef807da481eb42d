//! User-facing message catalog
//!
//! Every error detail and generated instruction comes from here. Templates use
//! positional `{0}`, `{1}` placeholders that are filled in a single pass, so
//! arguments containing braces are inserted literally.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language of generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// French, the route service's native language
    Fr,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::Fr => write!(f, "fr"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "fr" | "french" | "français" => Ok(Self::Fr),
            _ => Err(format!("Invalid locale: {s}. Use 'en' or 'fr'")),
        }
    }
}

/// Catalog keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// No payload
    ServiceResponseEmpty,
    /// Unsupported format; `{0}` requested pair, `{1}` supported formats
    ServiceResponseFormat,
    /// Unparsable payload; `{0}` format name
    ServiceResponseAnalyse,
    /// Service-reported error; `{0}` service message
    ServiceResponseException,
    /// Service exception report without text
    ServiceResponseException2,
    /// Badly formatted field; `{0}` field name
    ParamFormat,
    /// `F` with a named road; `{0}` road
    InstructionStraightOnto,
    /// `F` on an unnamed road
    InstructionContinueStraight,
    /// `B`; `{0}` road
    InstructionUTurn,
    /// `L`; `{0}` road
    InstructionLeft,
    /// `R`; `{0}` road
    InstructionRight,
    /// `BL`; `{0}` road
    InstructionSharpLeft,
    /// `BR`; `{0}` road
    InstructionSharpRight,
    /// `FL`; `{0}` road
    InstructionSlightLeft,
    /// `FR`; `{0}` road
    InstructionSlightRight,
    /// `round_about_entry`; `{0}` road
    InstructionRoundaboutEntry,
    /// `round_about_exit`; `{0}` road
    InstructionRoundaboutExit,
    /// No code; `{0}` road
    InstructionTake,
    /// Unknown code; `{0}` code, `{1}` road
    InstructionUnknown,
}

/// Message lookup for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    /// Create a catalog for a locale
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// The catalog's locale
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Format the message for `key` with positional arguments
    ///
    /// Missing arguments are replaced by an empty string.
    #[must_use]
    pub fn get(&self, key: MessageKey, args: &[&str]) -> String {
        fill(self.template(key), args)
    }

    /// Raw template for `key`
    #[must_use]
    pub const fn template(&self, key: MessageKey) -> &'static str {
        match self.locale {
            Locale::En => english(key),
            Locale::Fr => french(key),
        }
    }
}

const fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::ServiceResponseEmpty => "The service response is empty",
        MessageKey::ServiceResponseFormat => {
            "Unsupported response format {0}, expected one of: {1}"
        },
        MessageKey::ServiceResponseAnalyse => "Unable to analyse the {0} service response",
        MessageKey::ServiceResponseException => "The service returned an error: {0}",
        MessageKey::ServiceResponseException2 => "The service returned an exception report",
        MessageKey::ParamFormat => "Parameter {0} is not correctly formatted",
        MessageKey::InstructionStraightOnto => "straight ahead onto {0}",
        MessageKey::InstructionContinueStraight => "continue straight ahead",
        MessageKey::InstructionUTurn => "make a U-turn {0}",
        MessageKey::InstructionLeft => "turn left {0}",
        MessageKey::InstructionRight => "turn right {0}",
        MessageKey::InstructionSharpLeft => "turn sharply left {0}",
        MessageKey::InstructionSharpRight => "turn sharply right {0}",
        MessageKey::InstructionSlightLeft => "turn slightly left {0}",
        MessageKey::InstructionSlightRight => "turn slightly right {0}",
        MessageKey::InstructionRoundaboutEntry => "enter roundabout {0}",
        MessageKey::InstructionRoundaboutExit => "exit roundabout {0}",
        MessageKey::InstructionTake => "take {0}",
        MessageKey::InstructionUnknown => "?{0}? {1}",
    }
}

const fn french(key: MessageKey) -> &'static str {
    match key {
        MessageKey::ServiceResponseEmpty => "La réponse du service est vide",
        MessageKey::ServiceResponseFormat => {
            "Format de réponse {0} non supporté, formats attendus : {1}"
        },
        MessageKey::ServiceResponseAnalyse => "Impossible d'analyser la réponse {0} du service",
        MessageKey::ServiceResponseException => "Le service a renvoyé une erreur : {0}",
        MessageKey::ServiceResponseException2 => "Le service a renvoyé un rapport d'exception",
        MessageKey::ParamFormat => "Le paramètre {0} n'est pas correctement formaté",
        MessageKey::InstructionStraightOnto => "Tout droit {0}",
        MessageKey::InstructionContinueStraight => "Continuer tout droit",
        MessageKey::InstructionUTurn => "Demi-tour {0}",
        MessageKey::InstructionLeft => "Tourner à gauche {0}",
        MessageKey::InstructionRight => "Tourner à droite {0}",
        MessageKey::InstructionSharpLeft => "Tourner très à gauche {0}",
        MessageKey::InstructionSharpRight => "Tourner très à droite {0}",
        MessageKey::InstructionSlightLeft => "Tourner légèrement à gauche {0}",
        MessageKey::InstructionSlightRight => "Tourner légèrement à droite {0}",
        MessageKey::InstructionRoundaboutEntry => "Entrée rond-point {0}",
        MessageKey::InstructionRoundaboutExit => "Sortie rond-point {0}",
        MessageKey::InstructionTake => "Prendre {0}",
        MessageKey::InstructionUnknown => "?{0}? {1}",
    }
}

/// Replace `{n}` placeholders in one pass
fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after
            .find('}')
            .and_then(|close| after[..close].parse::<usize>().ok().map(|index| (index, close)));

        match placeholder {
            Some((index, close)) => {
                out.push_str(args.get(index).copied().unwrap_or_default());
                rest = &after[close + 1..];
            },
            None => {
                out.push('{');
                rest = after;
            },
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_positional_arguments() {
        assert_eq!(fill("?{0}? {1}", &["ZZ", "Main St"]), "?ZZ? Main St");
        assert_eq!(fill("{1} then {0}", &["a", "b"]), "b then a");
    }

    #[test]
    fn test_fill_missing_argument_is_empty() {
        assert_eq!(fill("turn left {0}", &[]), "turn left ");
    }

    #[test]
    fn test_fill_arguments_are_literal() {
        assert_eq!(fill("{0} {1}", &["{1}", "x"]), "{1} x");
    }

    #[test]
    fn test_fill_keeps_non_placeholders() {
        assert_eq!(fill("a {b} {", &[]), "a {b} {");
        assert_eq!(fill("no braces", &["x"]), "no braces");
    }

    #[test]
    fn test_english_messages() {
        let messages = Messages::new(Locale::En);
        assert_eq!(
            messages.get(MessageKey::ParamFormat, &["geometryWkt"]),
            "Parameter geometryWkt is not correctly formatted"
        );
        assert_eq!(
            messages.get(MessageKey::InstructionLeft, &["Rue X"]),
            "turn left Rue X"
        );
    }

    #[test]
    fn test_french_messages() {
        let messages = Messages::new(Locale::Fr);
        assert_eq!(
            messages.get(MessageKey::InstructionSlightRight, &["D7"]),
            "Tourner légèrement à droite D7"
        );
        assert_eq!(
            messages.get(MessageKey::ServiceResponseException, &["pas d'itinéraire"]),
            "Le service a renvoyé une erreur : pas d'itinéraire"
        );
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("FR".parse::<Locale>().unwrap(), Locale::Fr);
        assert!("de".parse::<Locale>().is_err());
        assert_eq!(Locale::default(), Locale::En);
        assert_eq!(Locale::Fr.to_string(), "fr");
    }
}
