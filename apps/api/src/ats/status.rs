use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Screening,
    Interviewing,
    Offer,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Screening => "screening",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "applied" => Some(ApplicationStatus::Applied),
            "screening" => Some(ApplicationStatus::Screening),
            "interviewing" => Some(ApplicationStatus::Interviewing),
            "offer" => Some(ApplicationStatus::Offer),
            "hired" => Some(ApplicationStatus::Hired),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Hired | ApplicationStatus::Rejected)
    }

    /// Position in the pipeline. `rejected` has no rank; it is reachable
    /// from any non-terminal status instead.
    fn rank(&self) -> Option<u8> {
        match self {
            ApplicationStatus::Applied => Some(0),
            ApplicationStatus::Screening => Some(1),
            ApplicationStatus::Interviewing => Some(2),
            ApplicationStatus::Offer => Some(3),
            ApplicationStatus::Hired => Some(4),
            ApplicationStatus::Rejected => None,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forward-only pipeline: a status may advance to any later stage (skipping
/// is allowed) or drop to `rejected`, and terminal statuses never move.
pub fn can_advance(from: ApplicationStatus, to: ApplicationStatus) -> bool {
    if from.is_terminal() {
        return false;
    }
    if to == ApplicationStatus::Rejected {
        return true;
    }
    match (from.rank(), to.rank()) {
        (Some(from_rank), Some(to_rank)) => to_rank > from_rank,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    #[test]
    fn test_forward_moves_allowed() {
        assert!(can_advance(Applied, Screening));
        assert!(can_advance(Screening, Interviewing));
        assert!(can_advance(Interviewing, Offer));
        assert!(can_advance(Offer, Hired));
    }

    #[test]
    fn test_stage_skipping_allowed() {
        assert!(can_advance(Applied, Offer));
        assert!(can_advance(Screening, Hired));
    }

    #[test]
    fn test_backward_moves_rejected() {
        assert!(!can_advance(Offer, Screening));
        assert!(!can_advance(Interviewing, Applied));
        assert!(!can_advance(Screening, Screening));
    }

    #[test]
    fn test_rejection_from_any_active_stage() {
        for from in [Applied, Screening, Interviewing, Offer] {
            assert!(can_advance(from, Rejected), "reject from {from}");
        }
    }

    #[test]
    fn test_terminal_statuses_never_move() {
        for to in [Applied, Screening, Interviewing, Offer, Hired, Rejected] {
            assert!(!can_advance(Hired, to), "hired -> {to}");
            assert!(!can_advance(Rejected, to), "rejected -> {to}");
        }
    }
}
