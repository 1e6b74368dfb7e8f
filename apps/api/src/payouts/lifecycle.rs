use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    OnHold,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Processing => "processing",
            PayoutStatus::Completed => "completed",
            PayoutStatus::Failed => "failed",
            PayoutStatus::OnHold => "on_hold",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PayoutStatus::Pending),
            "processing" => Some(PayoutStatus::Processing),
            "completed" => Some(PayoutStatus::Completed),
            "failed" => Some(PayoutStatus::Failed),
            "on_hold" => Some(PayoutStatus::OnHold),
            _ => None,
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full transition table. `completed` is the only terminal status:
/// `failed` payouts can be re-processed manually, and `on_hold` payouts are
/// released back to `pending`. A payout can never reach `completed` without
/// passing through `processing`.
pub fn can_transition(from: PayoutStatus, to: PayoutStatus) -> bool {
    use PayoutStatus::*;

    matches!(
        (from, to),
        (Pending, Processing)
            | (Pending, OnHold)
            | (OnHold, Pending)
            | (Processing, Completed)
            | (Processing, Failed)
            | (Failed, Processing)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use PayoutStatus::*;

    const ALL: [PayoutStatus; 5] = [Pending, Processing, Completed, Failed, OnHold];

    #[test]
    fn test_happy_path() {
        assert!(can_transition(Pending, Processing));
        assert!(can_transition(Processing, Completed));
    }

    #[test]
    fn test_pending_cannot_jump_to_completed() {
        assert!(!can_transition(Pending, Completed));
        assert!(!can_transition(Pending, Failed));
    }

    #[test]
    fn test_hold_is_a_side_branch_off_pending() {
        assert!(can_transition(Pending, OnHold));
        assert!(can_transition(OnHold, Pending));
        for from in [Processing, Completed, Failed] {
            assert!(!can_transition(from, OnHold), "hold from {from}");
        }
        // A held payout must be released before it can be processed.
        assert!(!can_transition(OnHold, Processing));
    }

    #[test]
    fn test_failed_allows_manual_retry_only() {
        assert!(can_transition(Failed, Processing));
        assert!(!can_transition(Failed, Completed));
        assert!(!can_transition(Failed, Pending));
    }

    #[test]
    fn test_completed_is_terminal() {
        for to in ALL {
            assert!(!can_transition(Completed, to), "completed -> {to}");
        }
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in ALL {
            assert_eq!(PayoutStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PayoutStatus::parse("held"), None);
    }
}
