use super::DangerRule;
use std::sync::Arc;

/// Source of the rules the safety core evaluates against.  Implementations
/// may be backed by a database, files or memory; failures are returned
/// to the caller as is.
pub trait RuleSource {
    /// Maximum permitted speed (km/h) for a train with `brake_percentage`
    /// on a gradient of `slope` per mille.  Zero means departure is not
    /// permitted.
    fn max_speed(&self, slope: i32, brake_percentage: u32) -> anyhow::Result<u32>;

    /// The complete dangerous-goods compatibility table
    fn danger_rules(&self) -> anyhow::Result<Vec<DangerRule>>;
}

impl<T: RuleSource + ?Sized> RuleSource for &T {
    fn max_speed(&self, slope: i32, brake_percentage: u32) -> anyhow::Result<u32> {
        (**self).max_speed(slope, brake_percentage)
    }

    fn danger_rules(&self) -> anyhow::Result<Vec<DangerRule>> {
        (**self).danger_rules()
    }
}

impl<T: RuleSource + ?Sized> RuleSource for Box<T> {
    fn max_speed(&self, slope: i32, brake_percentage: u32) -> anyhow::Result<u32> {
        (**self).max_speed(slope, brake_percentage)
    }

    fn danger_rules(&self) -> anyhow::Result<Vec<DangerRule>> {
        (**self).danger_rules()
    }
}

impl<T: RuleSource + ?Sized> RuleSource for Arc<T> {
    fn max_speed(&self, slope: i32, brake_percentage: u32) -> anyhow::Result<u32> {
        (**self).max_speed(slope, brake_percentage)
    }

    fn danger_rules(&self) -> anyhow::Result<Vec<DangerRule>> {
        (**self).danger_rules()
    }
}
