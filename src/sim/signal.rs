use serde::{Deserialize, Serialize};

use crate::id::{CoalitionId, DisruptionId};
use crate::model::DisruptionKind;

/// A notification emitted by one system and consumed by others within the
/// same tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Signal {
    /// A disruption became active (catalog trigger or manual injection).
    DisruptionActivated {
        id: DisruptionId,
        kind: DisruptionKind,
        intensity: u8,
    },
    /// A disruption ran out of duration and moved to history.
    DisruptionExpired { id: DisruptionId },
    CoalitionFormed { id: CoalitionId, size: usize },
    CoalitionDissolved { id: CoalitionId, size: usize },
}
