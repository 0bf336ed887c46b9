use super::{CalculationResult, Composition, Train};
use crate::brake::BrakeCalculator;
use crate::imports::*;
use crate::rules::RuleSource;
use crate::safety::SafetyValidator;

/// Verdict on a composition: the separation check and, if that passed, the
/// brake calculation
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub validation_passed: bool,
    pub validation_message: String,
    /// `None` when validation failed and the brake calculation was skipped
    pub result: Option<CalculationResult>,
    pub train: Option<Train>,
}

impl Assessment {
    pub fn departure_allowed(&self) -> bool {
        self.validation_passed && self.result.as_ref().map_or(false, |r| r.is_safe)
    }

    /// Message to show the operator: the validation failure if any, else
    /// the brake calculation message
    pub fn message(&self) -> &str {
        match &self.result {
            Some(result) if self.validation_passed => &result.message,
            _ => &self.validation_message,
        }
    }
}

/// Runs the separation check on `composition` and, only when it passes, the
/// brake calculation.  Rule source failures abort the assessment.
pub fn assess<R: RuleSource>(
    validator: &SafetyValidator,
    calculator: &BrakeCalculator<R>,
    composition: &Composition,
) -> anyhow::Result<Assessment> {
    let (validation_passed, validation_message) = validator.validate(&composition.wagons);
    if !validation_passed {
        #[cfg(feature = "logging")]
        log::info!("Composition rejected: {}", validation_message);
        return Ok(Assessment {
            validation_passed,
            validation_message,
            result: None,
            train: None,
        });
    }
    let (result, train) = calculator.calculate(
        &composition.locomotives,
        &composition.wagons,
        composition.slope,
    )?;
    Ok(Assessment {
        validation_passed,
        validation_message,
        result: Some(result),
        train: Some(train),
    })
}
