use crate::imports::*;
use crate::locomotive::Locomotive;
use crate::wagon::{LoadStatus, SelectedWagon, WagonCatalog};
use serde_this_or_that::as_bool;

/// Trip metadata carried into reports and history.  Free text, not
/// validated.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripInfo {
    #[serde(default)]
    pub train_number: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default)]
    pub train_boss_name: String,
    #[serde(default)]
    pub departure_date: String,
    #[serde(default)]
    pub departure_time: String,
}

/// A train being assembled: locomotives, wagons in coupling order, and the
/// gradient (per mille) of the route it will run on
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    #[serde(default)]
    pub trip: TripInfo,
    pub slope: i32,
    pub locomotives: Vec<Locomotive>,
    pub wagons: Vec<SelectedWagon>,
}

impl SerdeAPI for Composition {
    fn init(&mut self) -> anyhow::Result<()> {
        self.locomotives.init()?;
        self.wagons.init()?;
        Ok(())
    }
}

impl Composition {
    pub fn new(trip: TripInfo, slope: i32) -> Self {
        Self {
            trip,
            slope,
            ..Default::default()
        }
    }

    pub fn add_locomotive(&mut self, loco: Locomotive) {
        self.locomotives.push(loco);
    }

    pub fn remove_locomotive(&mut self, idx: usize) -> anyhow::Result<Locomotive> {
        ensure!(
            idx < self.locomotives.len(),
            "{}\nlocomotive index {idx} out of range for {} locomotives",
            format_dbg!(),
            self.locomotives.len()
        );
        Ok(self.locomotives.remove(idx))
    }

    /// Couples `wagon` at the rear of the train
    pub fn push_wagon(&mut self, wagon: SelectedWagon) {
        self.wagons.push(wagon);
    }

    /// Inserts `wagon` at position `idx`, shifting later wagons back.
    /// `idx` may equal the wagon count.
    pub fn insert_wagon(&mut self, idx: usize, wagon: SelectedWagon) -> anyhow::Result<()> {
        ensure!(
            idx <= self.wagons.len(),
            "{}\nwagon index {idx} out of range for {} wagons",
            format_dbg!(),
            self.wagons.len()
        );
        self.wagons.insert(idx, wagon);
        Ok(())
    }

    /// Replaces the wagon at `idx`, returning the one taken out
    pub fn replace_wagon(&mut self, idx: usize, wagon: SelectedWagon) -> anyhow::Result<SelectedWagon> {
        let slot = self.wagon_mut(idx)?;
        Ok(std::mem::replace(slot, wagon))
    }

    pub fn remove_wagon(&mut self, idx: usize) -> anyhow::Result<SelectedWagon> {
        self.check_wagon_idx(idx)?;
        Ok(self.wagons.remove(idx))
    }

    pub fn wagon_mut(&mut self, idx: usize) -> anyhow::Result<&mut SelectedWagon> {
        self.check_wagon_idx(idx)?;
        Ok(&mut self.wagons[idx])
    }

    /// Swaps the wagon at `idx` with its front neighbour.  The first wagon
    /// stays where it is.
    pub fn move_wagon_forward(&mut self, idx: usize) -> anyhow::Result<()> {
        self.check_wagon_idx(idx)?;
        if idx > 0 {
            self.wagons.swap(idx - 1, idx);
        }
        Ok(())
    }

    /// Swaps the wagon at `idx` with its rear neighbour.  The last wagon
    /// stays where it is.
    pub fn move_wagon_backward(&mut self, idx: usize) -> anyhow::Result<()> {
        self.check_wagon_idx(idx)?;
        if idx + 1 < self.wagons.len() {
            self.wagons.swap(idx, idx + 1);
        }
        Ok(())
    }

    fn check_wagon_idx(&self, idx: usize) -> anyhow::Result<()> {
        ensure!(
            idx < self.wagons.len(),
            "{}\nwagon index {idx} out of range for {} wagons",
            format_dbg!(),
            self.wagons.len()
        );
        Ok(())
    }
}

fn return_true() -> bool {
    true
}

/// Wagon as entered by the operator: its number plus the state it is in for
/// this trip.  Static data comes from a [WagonCatalog].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagonEntry {
    pub number: u32,
    #[serde(default)]
    pub load_status: LoadStatus,
    #[serde(default = "return_true")]
    pub main_brake_healthy: bool,
    #[serde(default = "return_true")]
    pub hand_brake_healthy: bool,
    #[serde(default = "return_true")]
    pub brake_handle_healthy: bool,
    #[serde(default)]
    pub dangerous_goods: Option<String>,
}

impl WagonEntry {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            load_status: LoadStatus::Loaded,
            main_brake_healthy: true,
            hand_brake_healthy: true,
            brake_handle_healthy: true,
            dangerous_goods: None,
        }
    }

    /// Looks the wagon up in `catalog` and applies the per-trip state
    pub fn resolve<C: WagonCatalog>(&self, catalog: &C) -> anyhow::Result<SelectedWagon> {
        let spec = catalog.get_by_number(self.number)?;
        let mut wagon = SelectedWagon::new(spec);
        wagon.set_load_status(self.load_status);
        wagon.set_main_brake_healthy(self.main_brake_healthy);
        wagon.set_hand_brake_healthy(self.hand_brake_healthy);
        wagon.set_brake_handle_healthy(self.brake_handle_healthy);
        if let Some(code) = &self.dangerous_goods {
            wagon
                .set_dangerous_goods(code.as_str())
                .with_context(|| format!("wagon #{}", self.number))?;
        }
        Ok(wagon)
    }
}

#[derive(Debug, Deserialize)]
struct WagonEntryRecord {
    #[serde(rename = "Number")]
    number: u32,
    #[serde(rename = "Load Status")]
    load_status: LoadStatus,
    #[serde(rename = "Main Brake Healthy", deserialize_with = "as_bool")]
    main_brake_healthy: bool,
    #[serde(rename = "Hand Brake Healthy", deserialize_with = "as_bool")]
    hand_brake_healthy: bool,
    #[serde(rename = "Brake Handle Healthy", deserialize_with = "as_bool")]
    brake_handle_healthy: bool,
    #[serde(rename = "Dangerous Goods")]
    dangerous_goods: Option<String>,
}

impl From<WagonEntryRecord> for WagonEntry {
    fn from(record: WagonEntryRecord) -> Self {
        Self {
            number: record.number,
            load_status: record.load_status,
            main_brake_healthy: record.main_brake_healthy,
            hand_brake_healthy: record.hand_brake_healthy,
            brake_handle_healthy: record.brake_handle_healthy,
            dangerous_goods: record.dangerous_goods.filter(|code| !code.trim().is_empty()),
        }
    }
}

/// Reads a wagon list in coupling order from CSV, one wagon per row
pub fn import_wagon_entries<P: AsRef<Path>>(filepath: P) -> anyhow::Result<Vec<WagonEntry>> {
    let filepath = filepath.as_ref();
    let file_read =
        File::open(filepath).with_context(|| format!("Could not open {filepath:?}"))?;
    let mut reader = csv::Reader::from_reader(file_read);
    let mut entries = Vec::new();
    for result in reader.deserialize::<WagonEntryRecord>() {
        let record = result.with_context(|| format!("{}\n{filepath:?}", format_dbg!()))?;
        entries.push(record.into());
    }
    Ok(entries)
}

/// Composition as written to a draft file: wagons are referenced by number
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionDraft {
    #[serde(default)]
    pub trip: TripInfo,
    pub slope: i32,
    pub locomotives: Vec<Locomotive>,
    pub wagons: Vec<WagonEntry>,
}

impl SerdeAPI for CompositionDraft {
    fn init(&mut self) -> anyhow::Result<()> {
        self.locomotives.init()?;
        Ok(())
    }
}

impl CompositionDraft {
    /// Resolves every wagon entry against `catalog`, keeping their order
    pub fn resolve<C: WagonCatalog>(&self, catalog: &C) -> anyhow::Result<Composition> {
        let wagons = self
            .wagons
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                entry
                    .resolve(catalog)
                    .with_context(|| format!("{}\nwagon position {}", format_dbg!(), idx + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Composition {
            trip: self.trip.clone(),
            slope: self.slope,
            locomotives: self.locomotives.clone(),
            wagons,
        })
    }
}
