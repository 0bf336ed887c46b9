//! Fixtures shared by unit tests

use crate::imports::*;
use crate::rules::{DangerRule, RuleBook, RuleSource, SpeedRule};
use crate::wagon::{SelectedWagon, WagonSpec};

/// Covered wagon: 23 t empty / 90 t loaded, brake weight 26 t / 53 t
pub(crate) fn covered_wagon_spec(number: u32) -> WagonSpec {
    WagonSpec {
        number,
        wagon_type: "Covered (Gas)".into(),
        axle_count: 4,
        weight_empty: 23.0 * uc::T,
        weight_loaded: 90.0 * uc::T,
        max_capacity: 67.0 * uc::T,
        brake_weight_empty: 26.0 * uc::T,
        brake_weight_loaded: 53.0 * uc::T,
        length: 16.8 * uc::M,
        ..Default::default()
    }
}

/// Loaded covered wagon, carrying `code` if given
pub(crate) fn wagon(number: u32, code: Option<&str>) -> SelectedWagon {
    let mut wagon = SelectedWagon::new(covered_wagon_spec(number));
    if let Some(code) = code {
        wagon.set_dangerous_goods(code).unwrap();
    }
    wagon
}

/// Wagon with explicit loaded weight and brake weight, in tonnes
pub(crate) fn weighted_wagon(number: u32, weight: f64, brake_weight: f64) -> SelectedWagon {
    SelectedWagon::new(WagonSpec {
        number,
        wagon_type: "Flat".into(),
        axle_count: 4,
        weight_empty: weight * uc::T,
        weight_loaded: weight * uc::T,
        brake_weight_empty: brake_weight * uc::T,
        brake_weight_loaded: brake_weight * uc::T,
        length: 14.0 * uc::M,
        ..Default::default()
    })
}

/// Rule book with the default threshold speed rule and the given matrix,
/// every entry mirrored
pub(crate) fn symmetric_rule_book(rules: &[(&str, &str, &str)]) -> RuleBook {
    let mut danger_rules = vec![];
    for (a, b, status) in rules {
        danger_rules.push(DangerRule::new(*a, *b, *status));
        if a != b {
            danger_rules.push(DangerRule::new(*b, *a, *status));
        }
    }
    RuleBook::new(SpeedRule::default(), danger_rules).unwrap()
}

/// Rule source that fails every request
pub(crate) struct FailingRuleSource;

impl RuleSource for FailingRuleSource {
    fn max_speed(&self, _slope: i32, _brake_percentage: u32) -> anyhow::Result<u32> {
        bail!(Error::RuleSourceError("database is locked".into()))
    }

    fn danger_rules(&self) -> anyhow::Result<Vec<DangerRule>> {
        bail!(Error::RuleSourceError("database is locked".into()))
    }
}

/// Rule source answering a single fixed speed, with an empty danger matrix
pub(crate) struct FixedSpeedRuleSource {
    pub slope: i32,
    pub brake_percentage: u32,
    pub speed: u32,
}

impl RuleSource for FixedSpeedRuleSource {
    fn max_speed(&self, slope: i32, brake_percentage: u32) -> anyhow::Result<u32> {
        ensure!(
            slope == self.slope && brake_percentage == self.brake_percentage,
            "unexpected lookup ({slope}, {brake_percentage})"
        );
        Ok(self.speed)
    }

    fn danger_rules(&self) -> anyhow::Result<Vec<DangerRule>> {
        Ok(vec![])
    }
}
