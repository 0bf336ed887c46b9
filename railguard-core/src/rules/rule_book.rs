use super::*;
use crate::imports::*;

/// In-memory [RuleSource]: a speed rule plus the full danger matrix
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBook {
    pub speed_rule: SpeedRule,
    pub danger_rules: Vec<DangerRule>,
}

impl SerdeAPI for RuleBook {
    fn init(&mut self) -> anyhow::Result<()> {
        if let SpeedRule::Table(table) = &mut self.speed_rule {
            table.init()?;
        }
        Ok(())
    }
}

impl RuleBook {
    pub fn new(speed_rule: SpeedRule, danger_rules: Vec<DangerRule>) -> anyhow::Result<Self> {
        let mut rule_book = Self {
            speed_rule,
            danger_rules,
        };
        rule_book.init()?;
        Ok(rule_book)
    }

    /// Builds a rule book from a danger matrix CSV and, if given, a brake
    /// speed table CSV.  Without a speed table the default
    /// [ThresholdSpeedRule] applies.
    pub fn from_csv_files<P: AsRef<Path>, Q: AsRef<Path>>(
        brake_speed_table: Option<P>,
        danger_matrix: Q,
    ) -> anyhow::Result<Self> {
        let speed_rule = match brake_speed_table {
            Some(path) => SpeedRule::Table(import_brake_speed_table(path)?),
            None => {
                #[cfg(feature = "logging")]
                log::info!("No brake speed table configured, using threshold speed rule");
                SpeedRule::default()
            }
        };
        Self::new(speed_rule, import_danger_matrix(danger_matrix)?)
    }
}

impl RuleSource for RuleBook {
    fn max_speed(&self, slope: i32, brake_percentage: u32) -> anyhow::Result<u32> {
        Ok(self.speed_rule.lookup(slope, brake_percentage))
    }

    fn danger_rules(&self) -> anyhow::Result<Vec<DangerRule>> {
        Ok(self.danger_rules.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_files() {
        let rule_book = RuleBook::from_csv_files(
            Some("./src/rules/test_brake_speed_table.csv"),
            "./src/rules/test_danger_matrix.csv",
        )
        .unwrap();
        assert_eq!(rule_book.max_speed(10, 60).unwrap(), 70);
        assert_eq!(rule_book.danger_rules().unwrap().len(), 15);
    }

    #[test]
    fn test_threshold_fallback() {
        let rule_book =
            RuleBook::from_csv_files(None::<&str>, "./src/rules/test_danger_matrix.csv").unwrap();
        assert_eq!(rule_book.max_speed(10, 68).unwrap(), 60);
        assert_eq!(rule_book.max_speed(10, 20).unwrap(), 0);
    }

    #[test]
    fn test_yaml_round_trip_validates_table() {
        let rule_book = RuleBook::new(
            SpeedRule::Table(BrakeSpeedTable::new(vec![0], vec![40], vec![vec![60]]).unwrap()),
            vec![DangerRule::new("1", "2", "-")],
        )
        .unwrap();
        let yaml = rule_book.to_yaml().unwrap();
        assert_eq!(RuleBook::from_yaml(&yaml, false).unwrap(), rule_book);

        let broken = RuleBook {
            speed_rule: SpeedRule::Table(BrakeSpeedTable {
                slopes: vec![0],
                percentages: vec![40, 50],
                speeds: vec![vec![60]],
            }),
            danger_rules: vec![],
        };
        assert!(RuleBook::from_yaml(broken.to_yaml().unwrap(), false).is_err());
        assert!(RuleBook::from_yaml(broken.to_yaml().unwrap(), true).is_ok());
    }
}
