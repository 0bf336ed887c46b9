use crate::imports::*;
use crate::locomotive::Locomotive;
use crate::wagon::SelectedWagon;

/// Aggregate of an assembled train.  Always derived from its locomotives and
/// wagons, never edited directly.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    pub locomotives: Vec<Locomotive>,
    pub wagons: Vec<SelectedWagon>,
    #[serde(with = "utils::tonnes")]
    pub total_weight: si::Mass,
    #[serde(with = "utils::tonnes")]
    pub total_brake_weight: si::Mass,
    #[serde(with = "utils::meters")]
    pub total_length: si::Length,
    pub axle_count: u32,
}

impl Train {
    /// Sums locomotives and wagons.  Locomotives without measured geometry
    /// count as 6 axles and 20 m each.
    pub fn new(locomotives: &[Locomotive], wagons: &[SelectedWagon]) -> Self {
        let mut train = Self {
            locomotives: locomotives.to_vec(),
            wagons: wagons.to_vec(),
            ..Default::default()
        };
        for loco in locomotives {
            train.total_weight += loco.weight();
            train.total_brake_weight += loco.brake_weight();
            train.total_length += loco.effective_length();
            train.axle_count += loco.effective_axle_count();
        }
        for wagon in wagons {
            train.total_weight += wagon.effective_weight();
            train.total_brake_weight += wagon.effective_brake_weight();
            train.total_length += wagon.spec.length;
            train.axle_count += wagon.spec.axle_count;
        }
        train
    }

    pub fn dangerous_wagon_count(&self) -> usize {
        self.wagons.iter().filter(|w| w.has_dangerous_goods()).count()
    }
}

/// Outcome of a brake calculation
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Brake weight as a percentage of train weight, rounded down
    pub brake_percentage: u32,
    /// Maximum permitted speed in km/h
    pub max_speed: u32,
    /// `true` if the train may depart
    pub is_safe: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_empty_train() {
        let train = Train::new(&[], &[]);
        assert_eq!(train.total_weight, si::Mass::ZERO);
        assert_eq!(train.axle_count, 0);
    }

    #[test]
    fn test_aggregate() {
        let locos = vec![
            Locomotive::new("GM-12", 2065, 120.0 * uc::T, true).unwrap(),
            Locomotive::new("GM-12", 2066, 120.0 * uc::T, false).unwrap(),
        ];
        let mut wagons = vec![wagon(147001, None), wagon(147002, Some("3a"))];
        wagons[0].set_main_brake_healthy(false);
        let train = Train::new(&locos, &wagons);
        assert!(almost_eq(train.total_weight.get::<si::megagram>(), 420.0, None));
        // 96 t from the hot loco + 53 t from the healthy wagon
        assert!(almost_eq(train.total_brake_weight.get::<si::megagram>(), 149.0, None));
        assert!(almost_eq(train.total_length.get::<si::meter>(), 73.6, None));
        assert_eq!(train.axle_count, 20);
        assert_eq!(train.dangerous_wagon_count(), 1);
        assert_eq!(train.wagons, wagons);
    }
}
