//! Convenience re-exports for the common workflow: load the rule tables and
//! catalog, resolve a draft, assess it, save it.

pub use crate::brake::BrakeCalculator;
pub use crate::config::RailguardConfig;
pub use crate::error::Error;
pub use crate::history::{FileHistoryStore, HistoryItem, HistoryStore, MemoryHistoryStore};
pub use crate::locomotive::Locomotive;
pub use crate::rules::{DangerRule, DangerStatus, RuleBook, RuleSource};
pub use crate::safety::SafetyValidator;
pub use crate::traits::SerdeAPI;
pub use crate::train::{
    assess, Assessment, CalculationResult, Composition, CompositionDraft, Train, TripInfo,
    WagonEntry,
};
pub use crate::wagon::{LoadStatus, SelectedWagon, WagonCatalog, WagonCatalogTable, WagonSpec};
