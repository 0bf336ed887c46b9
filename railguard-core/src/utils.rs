use crate::imports::*;

/// Returns true if `val1` and `val2` are within a relative/absolute `epsilon` of each other,
/// depending on magnitude.
pub fn almost_eq(val1: f64, val2: f64, epsilon: Option<f64>) -> bool {
    let epsilon = epsilon.unwrap_or(1e-8);
    ((val2 - val1) / (val1 + val2)).abs() < epsilon || (val2 - val1).abs() < epsilon
}

/// Returns true if the two masses are almost equal, see [almost_eq]
pub fn almost_eq_mass(val1: si::Mass, val2: si::Mass, epsilon: Option<f64>) -> bool {
    almost_eq(val1.get::<si::kilogram>(), val2.get::<si::kilogram>(), epsilon)
}

/// Serde adapter storing a [si::Mass] as a plain number of metric tonnes,
/// the unit used throughout railway weight and brake-weight tables.
pub mod tonnes {
    use crate::si;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(mass: &si::Mass, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(mass.get::<si::megagram>())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<si::Mass, D::Error> {
        Ok(si::Mass::new::<si::megagram>(f64::deserialize(
            deserializer,
        )?))
    }
}

/// Serde adapter storing a [si::Length] as a plain number of metres
pub mod meters {
    use crate::si;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(length: &si::Length, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(length.get::<si::meter>())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<si::Length, D::Error> {
        Ok(si::Length::new::<si::meter>(f64::deserialize(deserializer)?))
    }

    pub mod option {
        use crate::si;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            length: &Option<si::Length>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match length {
                Some(l) => serializer.serialize_some(&l.get::<si::meter>()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<si::Length>, D::Error> {
            Ok(Option::<f64>::deserialize(deserializer)?.map(si::Length::new::<si::meter>))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "tonnes")]
        weight: si::Mass,
        #[serde(with = "meters")]
        length: si::Length,
    }

    #[test]
    fn test_almost_eq() {
        assert!(almost_eq(96.0, 120.0 * 0.8, None));
        assert!(!almost_eq(96.0, 96.1, None));
    }

    #[test]
    fn test_unit_adapters_use_tonnes_and_meters() {
        let sample = Sample {
            weight: 55.8 * uc::T,
            length: 27.0 * uc::M,
        };
        let json = serde_json::to_string(&sample).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(almost_eq(value["weight"].as_f64().unwrap(), 55.8, None));
        assert!(almost_eq(value["length"].as_f64().unwrap(), 27.0, None));
        let back: Sample = serde_json::from_str(&json).unwrap();
        assert!(almost_eq_mass(back.weight, sample.weight, None));
    }
}
