//! Error types for bks-sim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(&'static str),

    #[error(
        "fleet of {configured} bikes cannot fill {station_count} stations to {initial_fill} each"
    )]
    FleetTooSmall {
        configured:    u32,
        station_count: u32,
        initial_fill:  u32,
    },

    /// The conservation audit failed after all agents stopped.  This is a
    /// synchronization bug, not a recoverable simulation event.
    #[error("fleet conservation violated: expected {expected} bikes, counted {counted}")]
    InvariantViolation { expected: u32, counted: u32 },

    #[error("agent thread '{0}' panicked")]
    AgentPanicked(String),

    #[error("failed to spawn agent thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;
