use socket_constants::FinalityKind;
use tracing::warn;

/// Observations needed to decide whether an event has reached finality.
///
/// Fields left as `None` or set to zero count as missing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FinalityCheck {
    /// Latest block on the source chain.
    pub current_block: Option<u64>,
    /// Block the event was included in.
    pub event_block: Option<u64>,
    /// Latest block timestamp on the source chain, in seconds.
    pub current_time: Option<u64>,
    /// Timestamp of the event's block, in seconds.
    pub event_time: Option<u64>,
    /// Required block distance.
    pub finality_block_diff: Option<u64>,
    /// Required time distance, in seconds.
    pub finality_time_diff: Option<u64>,
}

fn present(value: Option<u64>) -> Option<u64> {
    value.filter(|v| *v != 0)
}

impl FinalityCheck {
    /// Block-based observations.
    pub const fn blocks(current_block: u64, event_block: u64, finality_block_diff: u64) -> Self {
        Self {
            current_block: Some(current_block),
            event_block: Some(event_block),
            current_time: None,
            event_time: None,
            finality_block_diff: Some(finality_block_diff),
            finality_time_diff: None,
        }
    }

    /// Time-based observations.
    pub const fn time(current_time: u64, event_time: u64, finality_time_diff: u64) -> Self {
        Self {
            current_block: None,
            event_block: None,
            current_time: Some(current_time),
            event_time: Some(event_time),
            finality_block_diff: None,
            finality_time_diff: Some(finality_time_diff),
        }
    }

    /// `true` once the distance between the current and event observations
    /// reaches the required threshold. The comparison is inclusive.
    ///
    /// Missing inputs are logged and answered with `false`.
    pub fn is_finalized(&self, kind: FinalityKind) -> bool {
        let (current, event, diff) = match kind {
            FinalityKind::Block => {
                (self.current_block, self.event_block, self.finality_block_diff)
            }
            FinalityKind::Time => (self.current_time, self.event_time, self.finality_time_diff),
        };

        match (present(current), present(event), present(diff)) {
            (Some(current), Some(event), Some(diff)) => {
                current >= event && current - event >= diff
            }
            _ => {
                warn!(?kind, ?current, ?event, ?diff, "missing finality inputs");
                false
            }
        }
    }

    /// As [`Self::is_finalized`], with the finality kind given by name.
    ///
    /// Unrecognized kinds are answered with `false`.
    pub fn is_finalized_by_name(&self, kind: &str) -> bool {
        match kind.trim().to_ascii_lowercase().as_str() {
            "block" => self.is_finalized(FinalityKind::Block),
            "time" => self.is_finalized(FinalityKind::Time),
            other => {
                warn!(kind = other, "unknown finality kind");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_threshold_is_inclusive() {
        assert!(FinalityCheck::blocks(110, 100, 10).is_finalized(FinalityKind::Block));
        assert!(!FinalityCheck::blocks(110, 100, 11).is_finalized(FinalityKind::Block));
    }

    #[test]
    fn time_threshold() {
        assert!(FinalityCheck::time(1_000, 940, 60).is_finalized(FinalityKind::Time));
        assert!(!FinalityCheck::time(1_000, 941, 60).is_finalized(FinalityKind::Time));
    }

    #[test]
    fn missing_inputs_are_not_final() {
        assert!(!FinalityCheck::default().is_finalized(FinalityKind::Block));
        assert!(!FinalityCheck::blocks(110, 0, 10).is_finalized(FinalityKind::Block));
        assert!(!FinalityCheck::blocks(110, 100, 0).is_finalized(FinalityKind::Block));
        // block inputs do not satisfy a time check
        assert!(!FinalityCheck::blocks(110, 100, 10).is_finalized(FinalityKind::Time));
    }

    #[test]
    fn event_ahead_of_head() {
        assert!(!FinalityCheck::blocks(100, 110, 1).is_finalized(FinalityKind::Block));
    }

    #[test]
    fn kind_by_name() {
        let check = FinalityCheck::blocks(110, 100, 10);
        assert!(check.is_finalized_by_name("block"));
        assert!(!check.is_finalized_by_name("epoch"));
    }
}
