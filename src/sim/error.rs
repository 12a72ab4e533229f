//! Simulation errors
//!
//! Only caller mistakes surface here. Stepping an uninitialized engine and
//! coincident body centers are tolerated silently.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    /// Spawn attempted with every slot in use; nothing was changed
    #[error("body capacity of {capacity} exhausted")]
    CapacityExceeded { capacity: usize },
    #[error("invalid body: {0}")]
    InvalidBody(&'static str),
    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),
}
