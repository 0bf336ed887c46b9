//! Dangerous-goods separation check over an ordered wagon sequence

use crate::imports::*;
use crate::rules::{DangerStatus, RuleSource};
use crate::wagon::SelectedWagon;

/// Message reported when no separation rule is violated
pub const VALIDATION_PASSED_MSG: &str = "All checks passed.";

/// First separation violation found in a composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Position of the leading wagon in the sequence
    pub first_index: usize,
    /// Position of the trailing wagon in the sequence
    pub second_index: usize,
    pub first_number: u32,
    pub second_number: u32,
    pub first_code: String,
    pub second_code: String,
    /// Status governing the pair; unknown or missing entries are reported as
    /// [DangerStatus::Forbidden]
    pub status: DangerStatus,
}

impl Violation {
    /// Difference in sequence position, 1 meaning adjacent
    pub fn gap(&self) -> usize {
        self.second_index - self.first_index
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status == DangerStatus::Forbidden {
            return write!(
                f,
                "Conflict: Wagon #{} ({}) cannot be adjacent to Wagon #{} ({})",
                self.first_number, self.first_code, self.second_number, self.second_code
            );
        }
        let buffers = self.status.buffers_required();
        write!(
            f,
            "Conflict: Wagon #{} ({}) needs {} buffer wagon{} from Wagon #{} ({})",
            self.first_number,
            self.first_code,
            buffers,
            if buffers == 1 { "" } else { "s" },
            self.second_number,
            self.second_code
        )
    }
}

/// Checks wagon order against the dangerous-goods compatibility matrix.
///
/// The matrix is loaded once at construction and is read-only afterwards,
/// so one validator may be shared between threads.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SafetyValidator {
    /// code A -> code B -> status
    rules: HashMap<String, HashMap<String, DangerStatus>>,
}

impl SafetyValidator {
    /// Loads the complete compatibility table from `rule_source`.  Fails only
    /// if the rule source fails; an empty table is valid and rejects every
    /// pair of dangerous wagons.
    pub fn new<R: RuleSource + ?Sized>(rule_source: &R) -> anyhow::Result<Self> {
        let danger_rules = rule_source.danger_rules()?;
        let mut rules: HashMap<String, HashMap<String, DangerStatus>> = HashMap::new();
        for rule in &danger_rules {
            let status = rule.status().unwrap_or_else(|| {
                #[cfg(feature = "logging")]
                log::warn!(
                    "Unknown danger status {:?} for ({}, {}), treating as forbidden",
                    rule.status,
                    rule.code_a,
                    rule.code_b
                );
                DangerStatus::Forbidden
            });
            rules
                .entry(rule.code_a.clone())
                .or_default()
                .insert(rule.code_b.clone(), status);
        }
        let validator = Self { rules };
        #[cfg(feature = "logging")]
        {
            log::info!("Loaded {} danger rules", danger_rules.len());
            for (code_a, code_b) in validator.asymmetric_pairs() {
                log::warn!(
                    "Danger rule ({}, {}) differs from or lacks its mirror ({}, {})",
                    code_a,
                    code_b,
                    code_b,
                    code_a
                );
            }
        }
        Ok(validator)
    }

    fn exact_status(&self, code_a: &str, code_b: &str) -> Option<DangerStatus> {
        self.rules.get(code_a).and_then(|row| row.get(code_b)).copied()
    }

    /// Status governing a wagon carrying `code_a` ahead of one carrying
    /// `code_b`.  The entry for the exact order wins; if only the mirrored
    /// entry exists it is used instead; if neither exists the pair is
    /// forbidden.
    pub fn status(&self, code_a: &str, code_b: &str) -> DangerStatus {
        self.exact_status(code_a, code_b)
            .or_else(|| {
                let mirrored = self.exact_status(code_b, code_a);
                #[cfg(feature = "logging")]
                if mirrored.is_some() {
                    log::debug!(
                        "No danger rule for ({}, {}), using mirrored entry",
                        code_a,
                        code_b
                    );
                }
                mirrored
            })
            .unwrap_or(DangerStatus::Forbidden)
    }

    /// Pairs `(a, b)` whose entry is not matched by an equal `(b, a)` entry
    pub fn asymmetric_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .rules
            .iter()
            .flat_map(|(code_a, row)| {
                row.iter().filter_map(move |(code_b, status)| {
                    if self.exact_status(code_b, code_a) != Some(*status) {
                        Some((code_a.clone(), code_b.clone()))
                    } else {
                        None
                    }
                })
            })
            .collect();
        pairs.sort();
        pairs
    }

    /// Returns the first violation, scanning leading wagons front to back
    /// and, for each, trailing wagons front to back.  Wagons without
    /// dangerous goods only count as buffers.
    pub fn check(&self, wagons: &[SelectedWagon]) -> Option<Violation> {
        for (i, first) in wagons.iter().enumerate() {
            let Some(code_a) = first.dangerous_goods_code() else {
                continue;
            };
            for (j, second) in wagons.iter().enumerate().skip(i + 1) {
                let Some(code_b) = second.dangerous_goods_code() else {
                    continue;
                };
                let status = self.status(code_a, code_b);
                if j - i < status.min_gap() {
                    return Some(Violation {
                        first_index: i,
                        second_index: j,
                        first_number: first.number(),
                        second_number: second.number(),
                        first_code: code_a.to_string(),
                        second_code: code_b.to_string(),
                        status,
                    });
                }
            }
        }
        None
    }

    /// Verdict and message for the composition: `(true, "All checks
    /// passed.")` or `(false, <description of the first violation>)`
    pub fn validate(&self, wagons: &[SelectedWagon]) -> (bool, String) {
        match self.check(wagons) {
            Some(violation) => (false, violation.to_string()),
            None => (true, VALIDATION_PASSED_MSG.to_string()),
        }
    }
}
