use thiserror::Error;

/// Failures surfaced to callers of the orchestrator.
///
/// Engine-internal trouble (a silent advisory feed, say) is logged and
/// swallowed instead; only caller input and checkpoint decoding can fail.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("population size {requested} outside valid range {min}..={max}")]
    PopulationOutOfRange {
        requested: usize,
        min: usize,
        max: usize,
    },
    #[error("failed to encode or decode checkpoint: {0}")]
    Checkpoint(#[from] serde_json::Error),
}

impl SimError {
    /// True for the caller-input class of errors.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SimError::PopulationOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_describes_bounds() {
        let err = SimError::PopulationOutOfRange {
            requested: 12,
            min: 50,
            max: 500,
        };
        assert_eq!(
            err.to_string(),
            "population size 12 outside valid range 50..=500"
        );
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn json_errors_convert() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: SimError = json_err.into();
        assert!(!err.is_invalid_argument());
    }
}
