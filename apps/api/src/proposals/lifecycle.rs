use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalState {
    Proposed,
    Accepted,
    Declined,
    Submitted,
    Closed,
}

impl ProposalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalState::Proposed => "proposed",
            ProposalState::Accepted => "accepted",
            ProposalState::Declined => "declined",
            ProposalState::Submitted => "submitted",
            ProposalState::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "proposed" => Some(ProposalState::Proposed),
            "accepted" => Some(ProposalState::Accepted),
            "declined" => Some(ProposalState::Declined),
            "submitted" => Some(ProposalState::Submitted),
            "closed" => Some(ProposalState::Closed),
            _ => None,
        }
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProposalState::Declined | ProposalState::Closed)
    }
}

impl fmt::Display for ProposalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalAction {
    Accept,
    Decline,
    Submit,
    Close,
}

impl ProposalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalAction::Accept => "accept",
            ProposalAction::Decline => "decline",
            ProposalAction::Submit => "submit",
            ProposalAction::Close => "close",
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            ProposalAction::Accept => "proposal.accepted",
            ProposalAction::Decline => "proposal.declined",
            ProposalAction::Submit => "proposal.submitted",
            ProposalAction::Close => "proposal.closed",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot {action} a proposal in state '{from}'")]
pub struct InvalidTransition {
    pub from: ProposalState,
    pub action: &'static str,
}

/// Resolves the state an action leads to from `current`.
/// Accept/decline require `proposed`, submit requires `accepted`, close is
/// valid from any non-terminal state.
pub fn transition(
    current: ProposalState,
    action: ProposalAction,
) -> Result<ProposalState, InvalidTransition> {
    use ProposalAction::*;
    use ProposalState::*;

    match (current, action) {
        (Proposed, Accept) => Ok(Accepted),
        (Proposed, Decline) => Ok(Declined),
        (Accepted, Submit) => Ok(Submitted),
        (state, Close) if !state.is_terminal() => Ok(Closed),
        (from, action) => Err(InvalidTransition {
            from,
            action: action.as_str(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProposalAction::*;
    use ProposalState::*;

    #[test]
    fn test_accept_only_from_proposed() {
        assert_eq!(transition(Proposed, Accept), Ok(Accepted));
        for state in [Accepted, Declined, Submitted, Closed] {
            assert!(transition(state, Accept).is_err(), "accept from {state}");
        }
    }

    #[test]
    fn test_decline_only_from_proposed() {
        assert_eq!(transition(Proposed, Decline), Ok(Declined));
        for state in [Accepted, Declined, Submitted, Closed] {
            assert!(transition(state, Decline).is_err(), "decline from {state}");
        }
    }

    #[test]
    fn test_submit_only_from_accepted() {
        assert_eq!(transition(Accepted, Submit), Ok(Submitted));
        for state in [Proposed, Declined, Submitted, Closed] {
            assert!(transition(state, Submit).is_err(), "submit from {state}");
        }
    }

    #[test]
    fn test_close_from_any_non_terminal_state() {
        for state in [Proposed, Accepted, Submitted] {
            assert_eq!(transition(state, Close), Ok(Closed), "close from {state}");
        }
        for state in [Declined, Closed] {
            assert!(transition(state, Close).is_err(), "close from {state}");
        }
    }

    #[test]
    fn test_no_backward_moves() {
        // Once accepted, a proposal can never return to proposed or flip to
        // declined; the only ways out are submit and close.
        assert!(transition(Accepted, Accept).is_err());
        assert!(transition(Accepted, Decline).is_err());
        assert!(transition(Submitted, Submit).is_err());
    }

    #[test]
    fn test_state_round_trips_through_strings() {
        for state in [Proposed, Accepted, Declined, Submitted, Closed] {
            assert_eq!(ProposalState::parse(state.as_str()), Some(state));
        }
        assert_eq!(ProposalState::parse("pending"), None);
    }

    #[test]
    fn test_invalid_transition_message_names_action_and_state() {
        let err = transition(Declined, Accept).unwrap_err();
        assert_eq!(err.to_string(), "cannot accept a proposal in state 'declined'");
    }
}
