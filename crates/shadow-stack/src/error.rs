//! Error types for shadow stack bookkeeping

use thiserror::Error;

use crate::identity::RoutineId;

/// A return was observed for a routine with no recorded entry
///
/// Indicates either a bug in event delivery or an attack that bypassed
/// entry instrumentation. Always fatal to the monitored process.
#[derive(Debug, Clone, Error)]
#[error("return observed for {routine} with no recorded entry")]
pub struct UnderflowError {
    /// The routine the orphaned exit event named.
    pub routine: RoutineId,
}
