//! Leg and step flattening shared by the REST readers

use domain::{RouteInstruction, parse_leading_float};

use crate::translator::InstructionTranslator;

/// A step as read from the wire, before translation
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WireStep {
    pub duration: f64,
    pub distance: f64,
    pub code: Option<String>,
    pub name: String,
}

impl WireStep {
    fn into_instruction(self, translator: &InstructionTranslator) -> RouteInstruction {
        let instruction = translator.translate(self.code.as_deref(), &self.name);
        RouteInstruction::new(self.duration, self.distance, self.code, instruction)
    }
}

/// Flatten legs of steps in leg order, then step order, and translate each
pub(crate) fn flatten_legs(
    legs: Vec<Vec<WireStep>>,
    translator: &InstructionTranslator,
) -> Vec<RouteInstruction> {
    legs.into_iter()
        .flatten()
        .map(|step| step.into_instruction(translator))
        .collect()
}

/// Read a duration that is either plain seconds or an `H:MM:SS` clock value
pub(crate) fn seconds_from_text(text: &str) -> f64 {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if (2..=3).contains(&parts.len()) {
        let values: Option<Vec<f64>> = parts.iter().map(|p| p.parse::<f64>().ok()).collect();
        if let Some(values) = values {
            return values.iter().fold(0.0, |total, v| total.mul_add(60.0, *v));
        }
    }
    parse_leading_float(text)
}
