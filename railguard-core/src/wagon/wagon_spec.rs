use crate::imports::*;

/// Ancillary technical data printed on the wagon technical sheet.  None of
/// it takes part in the safety evaluation.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSheet {
    /// RIV/UIC letter code, e.g. "Hccrrs"
    #[serde(default)]
    pub riv_code: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Year of entry into service
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub bogie_type: Option<String>,
    #[serde(default)]
    pub bearing_type: Option<String>,
    #[serde(default)]
    pub spring_type: Option<String>,
    #[serde(default)]
    pub hand_brake_type: Option<String>,
    /// Hand brake weight in tonnes
    #[serde(default)]
    pub hand_brake_weight: Option<f64>,
    /// Control (triple) valve type, e.g. "KE1CSL"
    #[serde(default)]
    pub control_valve_type: Option<String>,
    #[serde(default)]
    pub brake_cylinder_type: Option<String>,
    #[serde(default)]
    pub coupling_type: Option<String>,
    /// Load volume in cubic metres
    #[serde(default)]
    pub load_volume: Option<f64>,
    /// Wheel diameter in millimetres
    #[serde(default)]
    pub wheel_diameter: Option<f64>,
    /// Distance between bogie pivots in metres
    #[serde(default)]
    pub bogie_pivot_distance: Option<f64>,
}

/// Static catalog record of a single wagon, identified by its number
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagonSpec {
    /// Six-digit wagon number
    pub number: u32,
    /// Wagon class, e.g. "Covered (Gas)"
    pub wagon_type: String,
    pub axle_count: u32,
    /// Tare weight
    #[serde(with = "utils::tonnes")]
    pub weight_empty: si::Mass,
    /// Gross weight when fully loaded
    #[serde(with = "utils::tonnes")]
    pub weight_loaded: si::Mass,
    /// Payload capacity
    #[serde(with = "utils::tonnes")]
    pub max_capacity: si::Mass,
    /// Brake weight when running empty
    #[serde(with = "utils::tonnes")]
    pub brake_weight_empty: si::Mass,
    /// Brake weight when running loaded
    #[serde(with = "utils::tonnes")]
    pub brake_weight_loaded: si::Mass,
    /// Length over buffers
    #[serde(with = "utils::meters")]
    pub length: si::Length,
    #[serde(default)]
    pub technical: TechnicalSheet,
}

impl SerdeAPI for WagonSpec {
    fn init(&mut self) -> anyhow::Result<()> {
        for (name, mass) in [
            ("weight_empty", self.weight_empty),
            ("weight_loaded", self.weight_loaded),
            ("max_capacity", self.max_capacity),
            ("brake_weight_empty", self.brake_weight_empty),
            ("brake_weight_loaded", self.brake_weight_loaded),
        ] {
            ensure!(
                mass >= si::Mass::ZERO,
                Error::InitError(format!(
                    "{}\nwagon #{}: `{name}` must not be negative",
                    format_dbg!(),
                    self.number
                ))
            );
        }
        ensure!(
            self.length >= si::Length::ZERO,
            Error::InitError(format!(
                "{}\nwagon #{}: `length` must not be negative",
                format_dbg!(),
                self.number
            ))
        );
        Ok(())
    }
}

impl fmt::Display for WagonSpec {
    /// Renders the full technical sheet
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.technical;
        let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());
        let num = |v: Option<f64>| v.map(|x| format!("{x:.2}")).unwrap_or_else(|| "-".into());
        writeln!(f, "[ SPECIFICATION ]")?;
        writeln!(f, "Wagon No: {} | Class: {}", self.number, self.wagon_type)?;
        writeln!(
            f,
            "Manufacturer: {} ({}) | Axles: {}",
            text(&t.manufacturer),
            text(&t.year),
            self.axle_count
        )?;
        writeln!(
            f,
            "Length: {:.2} m | RIV: {}",
            self.length.get::<si::meter>(),
            text(&t.riv_code)
        )?;
        writeln!(f, "[ WEIGHTS ]")?;
        writeln!(
            f,
            "Empty: {:.1} t | Max Load: {:.1} t",
            self.weight_empty.get::<si::megagram>(),
            self.max_capacity.get::<si::megagram>()
        )?;
        writeln!(
            f,
            "Full: {:.1} t | Volume: {} m3",
            self.weight_loaded.get::<si::megagram>(),
            num(t.load_volume)
        )?;
        writeln!(f, "[ BRAKING ]")?;
        writeln!(
            f,
            "Control Valve: {} | Cylinder: {}",
            text(&t.control_valve_type),
            text(&t.brake_cylinder_type)
        )?;
        writeln!(
            f,
            "Empty Brake: {:.1} t | Loaded Brake: {:.1} t",
            self.brake_weight_empty.get::<si::megagram>(),
            self.brake_weight_loaded.get::<si::megagram>()
        )?;
        writeln!(
            f,
            "Hand Brake: {} ({} t)",
            text(&t.hand_brake_type),
            num(t.hand_brake_weight)
        )?;
        writeln!(f, "[ MECHANICAL ]")?;
        writeln!(
            f,
            "Bogie: {} | Springs: {}",
            text(&t.bogie_type),
            text(&t.spring_type)
        )?;
        writeln!(
            f,
            "Bearing: {} | Coupling: {}",
            text(&t.bearing_type),
            text(&t.coupling_type)
        )?;
        write!(
            f,
            "Wheel: {} mm | Pivot Dist: {} m",
            num(t.wheel_diameter),
            num(t.bogie_pivot_distance)
        )
    }
}
