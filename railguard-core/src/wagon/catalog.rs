use super::{TechnicalSheet, WagonSpec};
use crate::imports::*;

/// Lookup of static wagon specifications by wagon number
pub trait WagonCatalog {
    /// Returns the specification of wagon `number`, or
    /// [Error::WagonNotFound] wrapped in the returned error
    fn get_by_number(&self, number: u32) -> anyhow::Result<WagonSpec>;
}

impl<T: WagonCatalog + ?Sized> WagonCatalog for &T {
    fn get_by_number(&self, number: u32) -> anyhow::Result<WagonSpec> {
        (**self).get_by_number(number)
    }
}

impl<T: WagonCatalog + ?Sized> WagonCatalog for Box<T> {
    fn get_by_number(&self, number: u32) -> anyhow::Result<WagonSpec> {
        (**self).get_by_number(number)
    }
}

impl<T: WagonCatalog + ?Sized> WagonCatalog for std::sync::Arc<T> {
    fn get_by_number(&self, number: u32) -> anyhow::Result<WagonSpec> {
        (**self).get_by_number(number)
    }
}

/// One catalog row: every wagon numbered `start_number..=end_number` shares
/// the same specification.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagonClass {
    #[serde(alias = "Wagon Type")]
    pub wagon_type: String,
    #[serde(alias = "Axle Count")]
    pub axle_count: u32,
    #[serde(alias = "Start Number")]
    pub start_number: u32,
    #[serde(alias = "End Number")]
    pub end_number: u32,
    #[serde(alias = "Weight Empty (t)", with = "utils::tonnes")]
    pub weight_empty: si::Mass,
    #[serde(alias = "Weight Loaded (t)", with = "utils::tonnes")]
    pub weight_loaded: si::Mass,
    #[serde(alias = "Max Capacity (t)", with = "utils::tonnes")]
    pub max_capacity: si::Mass,
    #[serde(alias = "Brake Weight Empty (t)", with = "utils::tonnes")]
    pub brake_weight_empty: si::Mass,
    #[serde(alias = "Brake Weight Loaded (t)", with = "utils::tonnes")]
    pub brake_weight_loaded: si::Mass,
    #[serde(alias = "Length (m)", with = "utils::meters")]
    pub length: si::Length,

    #[serde(default, alias = "RIV Code")]
    pub riv_code: Option<String>,
    #[serde(default, alias = "Manufacturer")]
    pub manufacturer: Option<String>,
    #[serde(default, alias = "Year")]
    pub year: Option<String>,
    #[serde(default, alias = "Bogie Type")]
    pub bogie_type: Option<String>,
    #[serde(default, alias = "Bearing Type")]
    pub bearing_type: Option<String>,
    #[serde(default, alias = "Spring Type")]
    pub spring_type: Option<String>,
    #[serde(default, alias = "Hand Brake Type")]
    pub hand_brake_type: Option<String>,
    #[serde(default, alias = "Hand Brake Weight (t)")]
    pub hand_brake_weight: Option<f64>,
    #[serde(default, alias = "Control Valve")]
    pub control_valve_type: Option<String>,
    #[serde(default, alias = "Brake Cylinder")]
    pub brake_cylinder_type: Option<String>,
    #[serde(default, alias = "Coupling Type")]
    pub coupling_type: Option<String>,
    #[serde(default, alias = "Load Volume (m3)")]
    pub load_volume: Option<f64>,
    #[serde(default, alias = "Wheel Diameter (mm)")]
    pub wheel_diameter: Option<f64>,
    #[serde(default, alias = "Bogie Pivot Distance (m)")]
    pub bogie_pivot_distance: Option<f64>,
}

impl WagonClass {
    pub fn contains(&self, number: u32) -> bool {
        (self.start_number..=self.end_number).contains(&number)
    }

    /// Specification of wagon `number` of this class
    pub fn spec(&self, number: u32) -> WagonSpec {
        WagonSpec {
            number,
            wagon_type: self.wagon_type.clone(),
            axle_count: self.axle_count,
            weight_empty: self.weight_empty,
            weight_loaded: self.weight_loaded,
            max_capacity: self.max_capacity,
            brake_weight_empty: self.brake_weight_empty,
            brake_weight_loaded: self.brake_weight_loaded,
            length: self.length,
            technical: TechnicalSheet {
                riv_code: self.riv_code.clone(),
                manufacturer: self.manufacturer.clone(),
                year: self.year.clone(),
                bogie_type: self.bogie_type.clone(),
                bearing_type: self.bearing_type.clone(),
                spring_type: self.spring_type.clone(),
                hand_brake_type: self.hand_brake_type.clone(),
                hand_brake_weight: self.hand_brake_weight,
                control_valve_type: self.control_valve_type.clone(),
                brake_cylinder_type: self.brake_cylinder_type.clone(),
                coupling_type: self.coupling_type.clone(),
                load_volume: self.load_volume,
                wheel_diameter: self.wheel_diameter,
                bogie_pivot_distance: self.bogie_pivot_distance,
            },
        }
    }
}

/// Wagon catalog held in memory as numbered ranges
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagonCatalogTable {
    pub classes: Vec<WagonClass>,
}

impl SerdeAPI for WagonCatalogTable {
    fn init(&mut self) -> anyhow::Result<()> {
        for class in &self.classes {
            ensure!(
                class.start_number <= class.end_number,
                Error::InitError(format!(
                    "{}\n`{}`: start number {} is after end number {}",
                    format_dbg!(),
                    class.wagon_type,
                    class.start_number,
                    class.end_number
                ))
            );
            class.spec(class.start_number).init()?;
        }
        let mut ranges: Vec<&WagonClass> = self.classes.iter().collect();
        ranges.sort_by_key(|c| c.start_number);
        for pair in ranges.windows(2) {
            ensure!(
                pair[0].end_number < pair[1].start_number,
                Error::InitError(format!(
                    "{}\nnumber ranges of `{}` ({}..={}) and `{}` ({}..={}) overlap",
                    format_dbg!(),
                    pair[0].wagon_type,
                    pair[0].start_number,
                    pair[0].end_number,
                    pair[1].wagon_type,
                    pair[1].start_number,
                    pair[1].end_number
                ))
            );
        }
        Ok(())
    }
}

impl WagonCatalogTable {
    pub fn new(classes: Vec<WagonClass>) -> anyhow::Result<Self> {
        let mut catalog = Self { classes };
        catalog.init()?;
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl WagonCatalog for WagonCatalogTable {
    fn get_by_number(&self, number: u32) -> anyhow::Result<WagonSpec> {
        self.classes
            .iter()
            .find(|c| c.contains(number))
            .map(|c| c.spec(number))
            .ok_or_else(|| anyhow!(Error::WagonNotFound(number)))
    }
}

/// Reads a wagon catalog from a CSV file with one row per number range
pub fn import_wagon_catalog<P: AsRef<Path>>(filepath: P) -> anyhow::Result<WagonCatalogTable> {
    let filepath = filepath.as_ref();
    let file_read =
        File::open(filepath).with_context(|| format!("Could not open {filepath:?}"))?;
    let mut reader = csv::Reader::from_reader(file_read);
    let mut classes = vec![];
    for (i, result) in reader.deserialize().enumerate() {
        let class: WagonClass =
            result.with_context(|| format!("{filepath:?}: bad wagon record {}", i + 1))?;
        classes.push(class);
    }
    #[cfg(feature = "logging")]
    log::info!("Loaded {} wagon classes from {:?}", classes.len(), filepath);
    WagonCatalogTable::new(classes)
}
