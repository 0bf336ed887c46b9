//! Saved compositions, so a train can be reloaded and edited later

use crate::imports::*;
use crate::locomotive::Locomotive;
use crate::train::{CalculationResult, Composition, Train, TripInfo};
use crate::wagon::SelectedWagon;
use chrono::{DateTime, Utc};

/// Snapshot of an assessed composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Assigned by the [HistoryStore] on save
    pub id: u64,
    pub trip: TripInfo,
    pub created_at: DateTime<Utc>,
    pub slope: i32,
    #[serde(with = "utils::tonnes")]
    pub total_weight: si::Mass,
    /// km/h
    pub max_speed: u32,
    pub locomotives: Vec<Locomotive>,
    pub wagons: Vec<SelectedWagon>,
}

impl SerdeAPI for HistoryItem {
    fn init(&mut self) -> anyhow::Result<()> {
        self.locomotives.init()?;
        self.wagons.init()?;
        Ok(())
    }
}

impl HistoryItem {
    /// Snapshot of `composition` with the outcome of its brake calculation.
    /// The id is left at 0 until the item is saved.
    pub fn new(
        composition: &Composition,
        train: &Train,
        result: &CalculationResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            trip: composition.trip.clone(),
            created_at,
            slope: composition.slope,
            total_weight: train.total_weight,
            max_speed: result.max_speed,
            locomotives: composition.locomotives.clone(),
            wagons: composition.wagons.clone(),
        }
    }

    /// Composition to continue editing from this snapshot
    pub fn to_composition(&self) -> Composition {
        Composition {
            trip: self.trip.clone(),
            slope: self.slope,
            locomotives: self.locomotives.clone(),
            wagons: self.wagons.clone(),
        }
    }
}

/// Persistence of [HistoryItem]s
pub trait HistoryStore {
    /// Stores `item` under a fresh id and returns that id
    fn save(&mut self, item: HistoryItem) -> anyhow::Result<u64>;

    /// Every saved item, newest first
    fn all(&self) -> anyhow::Result<Vec<HistoryItem>>;

    /// Item saved under `id`, or [Error::HistoryError]
    fn get(&self, id: u64) -> anyhow::Result<HistoryItem> {
        self.all()?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| anyhow!(Error::HistoryError(format!("no saved train with id {id}"))))
    }
}

/// Whole history as persisted by [FileHistoryStore]
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    /// Id handed out by the next save.  Ids are never reused.
    pub next_id: u64,
    /// Oldest first
    pub items: Vec<HistoryItem>,
}

impl SerdeAPI for HistoryLog {
    fn init(&mut self) -> anyhow::Result<()> {
        self.items.init()?;
        if let Some(max_id) = self.items.iter().map(|item| item.id).max() {
            ensure!(
                self.next_id > max_id,
                Error::HistoryError(format!(
                    "{}\nnext id {} is not above saved id {}",
                    format_dbg!(),
                    self.next_id,
                    max_id
                ))
            );
        }
        Ok(())
    }
}

impl HistoryLog {
    fn push(&mut self, mut item: HistoryItem) -> u64 {
        // ids start at 1
        self.next_id = self.next_id.max(1);
        item.id = self.next_id;
        self.next_id += 1;
        self.items.push(item);
        self.next_id - 1
    }

    fn newest_first(&self) -> Vec<HistoryItem> {
        self.items.iter().rev().cloned().collect()
    }
}

/// In-process history, lost when dropped
#[derive(Debug, Default, Clone)]
pub struct MemoryHistoryStore {
    log: HistoryLog,
}

impl HistoryStore for MemoryHistoryStore {
    fn save(&mut self, item: HistoryItem) -> anyhow::Result<u64> {
        Ok(self.log.push(item))
    }

    fn all(&self) -> anyhow::Result<Vec<HistoryItem>> {
        Ok(self.log.newest_first())
    }
}

/// History kept in a single file in any [SerdeAPI] format, rewritten on
/// every save
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
    log: HistoryLog,
}

impl FileHistoryStore {
    /// Opens the history at `path`.  A missing file is an empty history and
    /// is created on the first save.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let log = if path.exists() {
            HistoryLog::from_file(&path, false)
                .with_context(|| format!("{}\nfailed to read history {path:?}", format_dbg!()))?
        } else {
            HistoryLog::default()
        };
        Ok(Self { path, log })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for FileHistoryStore {
    fn save(&mut self, item: HistoryItem) -> anyhow::Result<u64> {
        let mut updated = self.log.clone();
        let id = updated.push(item);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("{}\ncould not create {parent:?}", format_dbg!()))?;
            }
        }
        updated
            .to_file(&self.path)
            .with_context(|| format!("{}\nfailed to write history {:?}", format_dbg!(), self.path))?;
        // only committed once the file is written
        self.log = updated;
        #[cfg(feature = "logging")]
        log::info!("Saved train under history id {} to {:?}", id, self.path);
        Ok(id)
    }

    fn all(&self) -> anyhow::Result<Vec<HistoryItem>> {
        Ok(self.log.newest_first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brake::BrakeCalculator;
    use crate::rules::RuleBook;
    use crate::testing::*;
    use chrono::TimeZone;

    fn item(train_number: &str, minute: u32) -> HistoryItem {
        let mut composition = Composition::new(
            TripInfo {
                train_number: train_number.into(),
                driver_name: "A. Driver".into(),
                ..Default::default()
            },
            8,
        );
        composition.add_locomotive(Locomotive::new("GM-12", 2065, 120.0 * uc::T, true).unwrap());
        composition.push_wagon(wagon(147001, Some("3a")));
        composition.push_wagon(wagon(147002, None));
        let (result, train) = BrakeCalculator::new(RuleBook::default())
            .calculate(&composition.locomotives, &composition.wagons, composition.slope)
            .unwrap();
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 8, minute, 0).unwrap();
        HistoryItem::new(&composition, &train, &result, created_at)
    }

    #[test]
    fn test_item_snapshot() {
        let item = item("4711", 0);
        assert_eq!(item.id, 0);
        assert!(almost_eq(item.total_weight.get::<si::megagram>(), 300.0, None));
        assert_eq!(item.max_speed, 60);
        let composition = item.to_composition();
        assert_eq!(composition.slope, 8);
        assert_eq!(composition.trip.train_number, "4711");
        assert_eq!(composition.wagons[0].dangerous_goods_code(), Some("3a"));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryHistoryStore::default();
        assert!(store.all().unwrap().is_empty());
        assert_eq!(store.save(item("1", 0)).unwrap(), 1);
        assert_eq!(store.save(item("2", 1)).unwrap(), 2);
        let all = store.all().unwrap();
        assert_eq!(
            all.iter().map(|i| i.trip.train_number.as_str()).collect::<Vec<_>>(),
            vec!["2", "1"]
        );
        assert_eq!(store.get(1).unwrap().trip.train_number, "1");
        let err = store.get(3).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::HistoryError(_))));
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history").join("trains.yaml");
        let mut store = FileHistoryStore::open(&path).unwrap();
        assert!(store.all().unwrap().is_empty());
        store.save(item("1", 0)).unwrap();
        store.save(item("2", 1)).unwrap();

        let mut reopened = FileHistoryStore::open(&path).unwrap();
        let all = reopened.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, 2);
        assert_eq!(all[0].created_at, Utc.with_ymd_and_hms(2024, 3, 1, 8, 1, 0).unwrap());
        assert_eq!(all[1].wagons, item("1", 0).wagons);
        assert_eq!(reopened.save(item("3", 2)).unwrap(), 3);
    }

    #[test]
    fn test_file_store_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trains.json");
        let mut store = FileHistoryStore::open(&path).unwrap();
        let id = store.save(item("4711", 0)).unwrap();
        let reopened = FileHistoryStore::open(&path).unwrap();
        assert_eq!(reopened.get(id).unwrap().trip.driver_name, "A. Driver");
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileHistoryStore::open(dir.path().join("trains.txt")).unwrap();
        assert!(store.save(item("1", 0)).is_err());
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn test_reused_id_rejected() {
        let mut log = HistoryLog::default();
        log.push(item("1", 0));
        log.next_id = 1;
        assert!(HistoryLog::from_yaml(log.to_yaml().unwrap(), false).is_err());
    }
}
