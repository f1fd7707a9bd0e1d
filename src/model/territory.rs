use serde::{Deserialize, Serialize};

use super::position::Position;
use crate::id::CoalitionId;

/// Area a coalition holds sway over, derived each tick from its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceZone {
    pub coalition: CoalitionId,
    pub center: Position,
    pub radius: f64,
    /// `[0, 100]`.
    pub strength: f64,
    /// `#rrggbb` display hint.
    pub color: String,
}
