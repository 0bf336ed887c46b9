//! Custom error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("`SerdeAPI::init` failed: {0}")]
    InitError(String),
    #[error("`SerdeAPI` failed: {0}")]
    SerdeError(String),
    #[error("rule source failed: {0}")]
    RuleSourceError(String),
    #[error("no wagon specification found for number {0}")]
    WagonNotFound(u32),
    #[error("invalid wagon number {0:?}: expected six digits")]
    InvalidWagonNumber(String),
    #[error("history store failed: {0}")]
    HistoryError(String),
    #[error("{0}")]
    Other(String),
}
