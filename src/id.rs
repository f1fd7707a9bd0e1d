use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! typed_id {
    ($name:ident, $prefix:expr) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }
    };
}

typed_id!(AgentId, "agent");
typed_id!(CoalitionId, "coalition");
typed_id!(DisruptionId, "disruption");

/// Monotonic ID generator shared by agents, coalitions, and disruptions.
/// A raw value is never handed out twice, whatever type it ends up wrapped in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    fn next_raw(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn agent(&mut self) -> AgentId {
        AgentId(self.next_raw())
    }

    pub fn coalition(&mut self) -> CoalitionId {
        CoalitionId(self.next_raw())
    }

    pub fn disruption(&mut self) -> DisruptionId {
        DisruptionId(self.next_raw())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
