//! Reputation scoring.
//!
//! A 0-100 score from two signals: how often a recruiter's proposals are
//! accepted, and how many placements they have closed. Acceptance carries up
//! to 60 points; placements carry 4 points each, capped at 10 placements.
//! A recruiter with no responded proposals yet scores the neutral midpoint
//! of the acceptance band.

use serde::Serialize;

const ACCEPTANCE_POINTS: f64 = 60.0;
const POINTS_PER_PLACEMENT: f64 = 4.0;
const PLACEMENT_CAP: i64 = 10;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReputationInputs {
    pub proposals_accepted: i64,
    pub proposals_declined: i64,
    pub placements: i64,
}

pub fn reputation_score(inputs: &ReputationInputs) -> u32 {
    let responded = inputs.proposals_accepted + inputs.proposals_declined;
    let acceptance_rate = if responded == 0 {
        0.5
    } else {
        inputs.proposals_accepted as f64 / responded as f64
    };

    let placement_points = inputs.placements.clamp(0, PLACEMENT_CAP) as f64 * POINTS_PER_PLACEMENT;
    let score = acceptance_rate * ACCEPTANCE_POINTS + placement_points;
    score.round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(accepted: i64, declined: i64, placements: i64) -> ReputationInputs {
        ReputationInputs {
            proposals_accepted: accepted,
            proposals_declined: declined,
            placements,
        }
    }

    #[test]
    fn test_new_recruiter_scores_neutral() {
        assert_eq!(reputation_score(&inputs(0, 0, 0)), 30);
    }

    #[test]
    fn test_perfect_record_caps_at_hundred() {
        assert_eq!(reputation_score(&inputs(20, 0, 10)), 100);
        // More placements than the cap cannot push past 100.
        assert_eq!(reputation_score(&inputs(20, 0, 50)), 100);
    }

    #[test]
    fn test_all_declined_scores_placements_only() {
        assert_eq!(reputation_score(&inputs(0, 10, 0)), 0);
        assert_eq!(reputation_score(&inputs(0, 10, 3)), 12);
    }

    #[test]
    fn test_acceptance_rate_scales_the_band() {
        // 50% acceptance -> 30 points, plus one placement.
        assert_eq!(reputation_score(&inputs(5, 5, 1)), 34);
        // 75% acceptance -> 45 points.
        assert_eq!(reputation_score(&inputs(3, 1, 0)), 45);
    }

    #[test]
    fn test_more_acceptances_never_lower_the_score() {
        let base = reputation_score(&inputs(2, 4, 2));
        let better = reputation_score(&inputs(4, 4, 2));
        assert!(better >= base);
    }
}
