use super::WagonSpec;
use crate::imports::*;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    Empty,
    #[default]
    Loaded,
}

/// A catalog wagon placed in a composition, together with the state
/// recorded for this trip.
///
/// The effective weight and effective brake weight are derived fields and
/// are refreshed by every setter that affects them:
/// - effective weight is the loaded weight when loaded, else the empty weight
/// - effective brake weight is zero when the main air brake is unhealthy,
///   else the brake weight matching the load status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedWagon {
    pub spec: WagonSpec,
    load_status: LoadStatus,
    main_brake_healthy: bool,
    hand_brake_healthy: bool,
    brake_handle_healthy: bool,
    /// Dangerous goods code, e.g. "2a", "3bc"; `None` for ordinary freight
    #[serde(default)]
    dangerous_goods: Option<String>,
    #[serde(with = "utils::tonnes")]
    effective_weight: si::Mass,
    #[serde(with = "utils::tonnes")]
    effective_brake_weight: si::Mass,
}

impl SerdeAPI for SelectedWagon {
    fn init(&mut self) -> anyhow::Result<()> {
        self.spec.init()?;
        if self
            .dangerous_goods
            .as_deref()
            .map_or(false, |code| code.trim().is_empty())
        {
            self.dangerous_goods = None;
        }
        ensure!(
            self.load_status == LoadStatus::Loaded || self.dangerous_goods.is_none(),
            Error::InitError(format!(
                "{}\nwagon #{} is empty but carries dangerous goods",
                format_dbg!(),
                self.spec.number
            ))
        );
        self.update_effective();
        Ok(())
    }
}

impl SelectedWagon {
    /// New selection of `spec`: loaded, all brakes healthy, no dangerous goods
    pub fn new(spec: WagonSpec) -> Self {
        let mut wagon = Self {
            spec,
            load_status: LoadStatus::Loaded,
            main_brake_healthy: true,
            hand_brake_healthy: true,
            brake_handle_healthy: true,
            dangerous_goods: None,
            effective_weight: si::Mass::ZERO,
            effective_brake_weight: si::Mass::ZERO,
        };
        wagon.update_effective();
        wagon
    }

    pub fn number(&self) -> u32 {
        self.spec.number
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    pub fn is_loaded(&self) -> bool {
        self.load_status == LoadStatus::Loaded
    }

    /// Sets the load status.  An empty wagon cannot carry dangerous goods,
    /// so switching to [LoadStatus::Empty] drops any dangerous goods code.
    pub fn set_load_status(&mut self, load_status: LoadStatus) {
        self.load_status = load_status;
        if load_status == LoadStatus::Empty {
            self.dangerous_goods = None;
        }
        self.update_effective();
    }

    pub fn main_brake_healthy(&self) -> bool {
        self.main_brake_healthy
    }

    pub fn set_main_brake_healthy(&mut self, healthy: bool) {
        self.main_brake_healthy = healthy;
        self.update_effective();
    }

    pub fn hand_brake_healthy(&self) -> bool {
        self.hand_brake_healthy
    }

    pub fn set_hand_brake_healthy(&mut self, healthy: bool) {
        self.hand_brake_healthy = healthy;
    }

    pub fn brake_handle_healthy(&self) -> bool {
        self.brake_handle_healthy
    }

    pub fn set_brake_handle_healthy(&mut self, healthy: bool) {
        self.brake_handle_healthy = healthy;
    }

    pub fn has_dangerous_goods(&self) -> bool {
        self.dangerous_goods.is_some()
    }

    pub fn dangerous_goods_code(&self) -> Option<&str> {
        self.dangerous_goods.as_deref()
    }

    /// Marks the wagon as carrying dangerous goods of class `code`
    pub fn set_dangerous_goods<S: Into<String>>(&mut self, code: S) -> anyhow::Result<()> {
        let code = code.into().trim().to_string();
        ensure!(
            !code.is_empty(),
            "{}\nwagon #{}: dangerous goods code must not be blank",
            format_dbg!(),
            self.spec.number
        );
        ensure!(
            self.is_loaded(),
            "{}\nwagon #{} is empty and cannot carry dangerous goods",
            format_dbg!(),
            self.spec.number
        );
        self.dangerous_goods = Some(code);
        Ok(())
    }

    pub fn clear_dangerous_goods(&mut self) {
        self.dangerous_goods = None;
    }

    pub fn effective_weight(&self) -> si::Mass {
        self.effective_weight
    }

    pub fn effective_brake_weight(&self) -> si::Mass {
        self.effective_brake_weight
    }

    fn update_effective(&mut self) {
        let (weight, brake_weight) = match self.load_status {
            LoadStatus::Loaded => (self.spec.weight_loaded, self.spec.brake_weight_loaded),
            LoadStatus::Empty => (self.spec.weight_empty, self.spec.brake_weight_empty),
        };
        self.effective_weight = weight;
        self.effective_brake_weight = if self.main_brake_healthy {
            brake_weight
        } else {
            si::Mass::ZERO
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gas_wagon() -> WagonSpec {
        WagonSpec {
            number: 147001,
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

    #[test]
    fn test_effective_values_follow_load_status() {
        let mut wagon = SelectedWagon::new(gas_wagon());
        assert_eq!(wagon.effective_weight(), 90.0 * uc::T);
        assert_eq!(wagon.effective_brake_weight(), 53.0 * uc::T);
        wagon.set_load_status(LoadStatus::Empty);
        assert_eq!(wagon.effective_weight(), 23.0 * uc::T);
        assert_eq!(wagon.effective_brake_weight(), 26.0 * uc::T);
    }

    #[test]
    fn test_unhealthy_main_brake_zeroes_brake_weight() {
        let mut wagon = SelectedWagon::new(gas_wagon());
        wagon.set_main_brake_healthy(false);
        assert_eq!(wagon.effective_brake_weight(), si::Mass::ZERO);
        assert_eq!(wagon.effective_weight(), 90.0 * uc::T);
        wagon.set_load_status(LoadStatus::Empty);
        assert_eq!(wagon.effective_brake_weight(), si::Mass::ZERO);
        wagon.set_main_brake_healthy(true);
        assert_eq!(wagon.effective_brake_weight(), 26.0 * uc::T);
    }

    #[test]
    fn test_hand_brake_and_handle_do_not_affect_brake_weight() {
        let mut wagon = SelectedWagon::new(gas_wagon());
        wagon.set_hand_brake_healthy(false);
        wagon.set_brake_handle_healthy(false);
        assert_eq!(wagon.effective_brake_weight(), 53.0 * uc::T);
    }

    #[test]
    fn test_empty_wagon_cannot_carry_dangerous_goods() {
        let mut wagon = SelectedWagon::new(gas_wagon());
        wagon.set_dangerous_goods("3a").unwrap();
        assert_eq!(wagon.dangerous_goods_code(), Some("3a"));
        wagon.set_load_status(LoadStatus::Empty);
        assert!(!wagon.has_dangerous_goods());
        assert!(wagon.set_dangerous_goods("3a").is_err());
    }

    #[test]
    fn test_blank_code_rejected() {
        let mut wagon = SelectedWagon::new(gas_wagon());
        assert!(wagon.set_dangerous_goods("  ").is_err());
        assert!(!wagon.has_dangerous_goods());
    }

    #[test]
    fn test_blank_code_dropped_on_load() {
        let mut wagon = SelectedWagon::new(gas_wagon());
        wagon.dangerous_goods = Some(" ".into());
        let back = SelectedWagon::from_yaml(wagon.to_yaml().unwrap(), false).unwrap();
        assert!(!back.has_dangerous_goods());
        assert_eq!(back.dangerous_goods_code(), None);

        // an empty wagon with a blank code is not an error either
        wagon.load_status = LoadStatus::Empty;
        wagon.dangerous_goods = Some(String::new());
        wagon.init().unwrap();
        assert!(!wagon.has_dangerous_goods());
    }

    #[test]
    fn test_effective_values_rederived_on_load() {
        let mut wagon = SelectedWagon::new(gas_wagon());
        wagon.set_main_brake_healthy(false);
        let json = wagon.to_json().unwrap();
        let back = SelectedWagon::from_json(json, false).unwrap();
        assert_eq!(back.effective_brake_weight(), si::Mass::ZERO);
        assert!(utils::almost_eq_mass(
            back.effective_weight(),
            90.0 * uc::T,
            None
        ));
    }
}
