use crate::imports::*;

/// Axle count assumed for a locomotive when no measured value is given.
/// Main-line locomotives on the network run on two three-axle bogies.
pub const LOCO_AXLE_COUNT_DEFAULT: u32 = 6;
/// Length assumed for a locomotive when no measured value is given
pub const LOCO_LENGTH_DEFAULT: si::Length = si::Length {
    dimension: std::marker::PhantomData,
    units: std::marker::PhantomData,
    value: 20.0,
};
/// Fraction of locomotive weight credited as brake weight while the
/// locomotive is active ("hot")
pub const HOT_BRAKE_RATIO: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Locomotive heading (or towed within) the train
pub struct Locomotive {
    /// Model identifier, e.g. "GM-12"
    pub model_id: String,
    /// Fleet number, e.g. 2065
    pub number: u32,
    /// Service weight
    #[serde(with = "utils::tonnes")]
    weight: si::Mass,
    /// Brake contribution, derived from `weight` and `is_hot`
    #[serde(default, with = "utils::tonnes")]
    brake_weight: si::Mass,
    /// `true` if the locomotive is active (pulling), `false` if dead-in-tow
    is_hot: bool,
    /// Measured length, overriding [LOCO_LENGTH_DEFAULT]
    #[serde(default, with = "utils::meters::option")]
    pub length: Option<si::Length>,
    /// Measured axle count, overriding [LOCO_AXLE_COUNT_DEFAULT]
    #[serde(default)]
    pub axle_count: Option<u32>,
}

impl SerdeAPI for Locomotive {
    fn init(&mut self) -> anyhow::Result<()> {
        ensure!(
            self.weight >= si::Mass::ZERO,
            Error::InitError(format!(
                "{}\nlocomotive #{} has negative weight",
                format_dbg!(),
                self.number
            ))
        );
        // brake weight is derived state, never trusted from input
        self.update_brake_weight();
        Ok(())
    }
}

impl Locomotive {
    pub fn new<S: Into<String>>(
        model_id: S,
        number: u32,
        weight: si::Mass,
        is_hot: bool,
    ) -> anyhow::Result<Self> {
        let mut loco = Self {
            model_id: model_id.into(),
            number,
            weight,
            brake_weight: si::Mass::ZERO,
            is_hot,
            length: None,
            axle_count: None,
        };
        loco.init()?;
        Ok(loco)
    }

    pub fn weight(&self) -> si::Mass {
        self.weight
    }

    pub fn set_weight(&mut self, weight: si::Mass) -> anyhow::Result<()> {
        ensure!(
            weight >= si::Mass::ZERO,
            "{}\nlocomotive weight must not be negative",
            format_dbg!()
        );
        self.weight = weight;
        self.update_brake_weight();
        Ok(())
    }

    pub fn is_hot(&self) -> bool {
        self.is_hot
    }

    pub fn set_hot(&mut self, is_hot: bool) {
        self.is_hot = is_hot;
        self.update_brake_weight();
    }

    /// Brake weight this locomotive contributes to the train
    pub fn brake_weight(&self) -> si::Mass {
        self.brake_weight
    }

    /// Length used for the train aggregate
    pub fn effective_length(&self) -> si::Length {
        self.length.unwrap_or(LOCO_LENGTH_DEFAULT)
    }

    /// Axle count used for the train aggregate
    pub fn effective_axle_count(&self) -> u32 {
        self.axle_count.unwrap_or(LOCO_AXLE_COUNT_DEFAULT)
    }

    fn update_brake_weight(&mut self) {
        self.brake_weight = if self.is_hot {
            self.weight * HOT_BRAKE_RATIO
        } else {
            si::Mass::ZERO
        };
    }
}
