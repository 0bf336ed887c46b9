//! Brake performance of an assembled train

use crate::imports::*;
use crate::locomotive::Locomotive;
use crate::rules::RuleSource;
use crate::train::{CalculationResult, Train};
use crate::wagon::SelectedWagon;

pub const SAFE_TO_DEPART_MSG: &str = "Train is safe to depart.";
pub const INSUFFICIENT_BRAKE_MSG: &str = "Brake percentage is insufficient for this slope.";
pub const ZERO_WEIGHT_MSG: &str = "train weight is zero";

/// Brake weight as a whole percentage of train weight, always rounded down
/// so that braking power is never overstated.  `total_weight` must be
/// positive.
pub fn brake_percentage(total_brake_weight: si::Mass, total_weight: si::Mass) -> u32 {
    let raw = 100.0 * total_brake_weight.get::<si::kilogram>() / total_weight.get::<si::kilogram>();
    raw.floor() as u32
}

/// Turns train weights into a brake percentage and resolves the permitted
/// speed through a [RuleSource]
#[derive(Debug, Clone)]
pub struct BrakeCalculator<R> {
    rule_source: R,
}

impl<R: RuleSource> BrakeCalculator<R> {
    pub fn new(rule_source: R) -> Self {
        Self { rule_source }
    }

    pub fn rule_source(&self) -> &R {
        &self.rule_source
    }

    /// Aggregates the train and evaluates its brake performance on a
    /// gradient of `slope` per mille.
    ///
    /// A train without weight is reported unsafe without consulting the rule
    /// source.  A rule source failure is returned as is.
    pub fn calculate(
        &self,
        locomotives: &[Locomotive],
        wagons: &[SelectedWagon],
        slope: i32,
    ) -> anyhow::Result<(CalculationResult, Train)> {
        let train = Train::new(locomotives, wagons);

        if train.total_weight <= si::Mass::ZERO {
            return Ok((
                CalculationResult {
                    brake_percentage: 0,
                    max_speed: 0,
                    is_safe: false,
                    message: ZERO_WEIGHT_MSG.into(),
                },
                train,
            ));
        }

        let brake_percentage = brake_percentage(train.total_brake_weight, train.total_weight);
        let max_speed = self.rule_source.max_speed(slope, brake_percentage)?;
        let is_safe = max_speed > 0;
        #[cfg(feature = "logging")]
        log::debug!(
            "slope {}: brake percentage {} -> max speed {} km/h",
            slope,
            brake_percentage,
            max_speed
        );

        Ok((
            CalculationResult {
                brake_percentage,
                max_speed,
                is_safe,
                message: if is_safe {
                    SAFE_TO_DEPART_MSG
                } else {
                    INSUFFICIENT_BRAKE_MSG
                }
                .into(),
            },
            train,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{BrakeSpeedTable, RuleBook, SpeedRule};
    use crate::testing::*;

    fn hot_loco() -> Locomotive {
        Locomotive::new("GM-12", 2065, 120.0 * uc::T, true).unwrap()
    }

    #[test]
    fn test_brake_percentage_floors() {
        assert_eq!(brake_percentage(45.0 * uc::T, 100.0 * uc::T), 45);
        assert_eq!(brake_percentage(45.9 * uc::T, 100.0 * uc::T), 45);
        assert_eq!(brake_percentage(136.0 * uc::T, 200.0 * uc::T), 68);
        assert_eq!(brake_percentage(2.0 * uc::T, 3.0 * uc::T), 66);
        assert_eq!(brake_percentage(si::Mass::ZERO, 3.0 * uc::T), 0);
    }

    #[test]
    fn test_reference_train() {
        let calculator = BrakeCalculator::new(FixedSpeedRuleSource {
            slope: 10,
            brake_percentage: 68,
            speed: 60,
        });
        let wagons = vec![weighted_wagon(147001, 50.0, 25.0), weighted_wagon(147002, 30.0, 15.0)];
        let (result, train) = calculator.calculate(&[hot_loco()], &wagons, 10).unwrap();
        assert!(almost_eq(train.total_weight.get::<si::megagram>(), 200.0, None));
        assert!(almost_eq(train.total_brake_weight.get::<si::megagram>(), 136.0, None));
        assert_eq!(
            result,
            CalculationResult {
                brake_percentage: 68,
                max_speed: 60,
                is_safe: true,
                message: SAFE_TO_DEPART_MSG.into(),
            }
        );
    }

    #[test]
    fn test_zero_weight_train() {
        let calculator = BrakeCalculator::new(FailingRuleSource);
        let (result, train) = calculator.calculate(&[], &[], 10).unwrap();
        assert!(!result.is_safe);
        assert_eq!(result.message, ZERO_WEIGHT_MSG);
        assert_eq!(result.brake_percentage, 0);
        assert_eq!(result.max_speed, 0);
        assert_eq!(train.total_weight, si::Mass::ZERO);
    }

    #[test]
    fn test_insufficient_brake() {
        let calculator = BrakeCalculator::new(RuleBook::default());
        // 120 t dead loco, no brake weight at all
        let loco = Locomotive::new("GM-12", 2065, 120.0 * uc::T, false).unwrap();
        let (result, _) = calculator.calculate(&[loco], &[], 0).unwrap();
        assert_eq!(result.brake_percentage, 0);
        assert_eq!(result.max_speed, 0);
        assert!(!result.is_safe);
        assert_eq!(result.message, INSUFFICIENT_BRAKE_MSG);
    }

    #[test]
    fn test_unhealthy_brakes_lower_percentage() {
        let calculator = BrakeCalculator::new(RuleBook::default());
        let mut wagons: Vec<SelectedWagon> = (0..4).map(|i| wagon(147001 + i, None)).collect();
        let (healthy, _) = calculator.calculate(&[hot_loco()], &wagons, 5).unwrap();
        for w in wagons.iter_mut() {
            w.set_main_brake_healthy(false);
        }
        let (unhealthy, _) = calculator.calculate(&[hot_loco()], &wagons, 5).unwrap();
        // (96 + 4 * 53) / (120 + 4 * 90) = 64.1 %, then 96 / 480 = 20 %
        assert_eq!(healthy.brake_percentage, 64);
        assert_eq!(unhealthy.brake_percentage, 20);
        assert!(healthy.is_safe);
        assert!(!unhealthy.is_safe);
    }

    #[test]
    fn test_speed_from_table() {
        let table = BrakeSpeedTable::new(
            vec![0, 10, 20],
            vec![40, 60, 80],
            vec![vec![60, 80, 100], vec![50, 70, 90], vec![40, 60, 80]],
        )
        .unwrap();
        let calculator = BrakeCalculator::new(RuleBook::new(SpeedRule::Table(table), vec![]).unwrap());
        let wagons = vec![weighted_wagon(147001, 50.0, 25.0), weighted_wagon(147002, 30.0, 15.0)];
        let (result, _) = calculator.calculate(&[hot_loco()], &wagons, 10).unwrap();
        assert_eq!(result.brake_percentage, 68);
        assert_eq!(result.max_speed, 70);
    }

    #[test]
    fn test_rule_source_failure_propagates() {
        let calculator = BrakeCalculator::new(FailingRuleSource);
        let err = calculator.calculate(&[hot_loco()], &[], 10).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::RuleSourceError("database is locked".into()))
        );
    }

    #[test]
    fn test_inputs_are_untouched() {
        let calculator = BrakeCalculator::new(RuleBook::default());
        let locos = vec![hot_loco()];
        let wagons = vec![wagon(147001, Some("3a"))];
        let before = (locos.clone(), wagons.clone());
        calculator.calculate(&locos, &wagons, 0).unwrap();
        assert_eq!((locos, wagons), before);
    }
}
