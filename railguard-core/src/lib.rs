//! Safety core for assembling a train out of locomotives and wagons.
//!
//! Two evaluations gate a departure:
//! - [safety::SafetyValidator] checks the wagon order against the
//!   dangerous-goods compatibility matrix, and
//! - [brake::BrakeCalculator] aggregates weights and brake weights into a
//!   brake percentage and resolves the permitted speed.
//!
//! Storage, presentation and reporting are collaborators reached through
//! the [rules::RuleSource], [wagon::WagonCatalog] and
//! [history::HistoryStore] traits.
//!
//! # Feature Flags
//! - `logging` -- emit diagnostics through the `log` facade

#[macro_use]
mod macros;

pub mod brake;
pub mod config;
pub mod error;
pub mod history;
pub(crate) mod imports;
pub mod locomotive;
pub mod prelude;
pub mod rules;
pub mod safety;
pub mod si;
#[cfg(test)]
pub(crate) mod testing;
pub mod traits;
pub mod train;
pub mod uc;
pub mod utils;
pub mod wagon;
