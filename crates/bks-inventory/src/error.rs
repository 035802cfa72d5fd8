//! Error types for bks-inventory.

use bks_core::StationId;
use thiserror::Error;

/// Errors raised by inventory accessors.
///
/// A `CapacityViolation` is an expected, recoverable condition — agents back
/// off and retry or reroute; it must never tear down an agent or the run.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InventoryError {
    #[error("station {station} holds {count}/{capacity} bikes; adjusting by {delta} would leave bounds")]
    CapacityViolation {
        station:  StationId,
        /// Count observed when the adjustment was rejected.
        count:    u32,
        capacity: u32,
        delta:    i32,
    },

    #[error("station {0} does not exist")]
    UnknownStation(StationId),
}

/// Alias for `Result<T, InventoryError>`.
pub type InventoryResult<T> = Result<T, InventoryError>;
