//! Fee-split computation.
//!
//! A placement fee is a percentage of first-year salary. Collaborating
//! recruiters each take a percentage of that fee; whatever their shares do
//! not cover stays with the platform. All money is integer minor units.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Float comparisons against the 100% ceiling use this tolerance so that
/// split sets like three 33.3333…% shares are not rejected by accumulation
/// error.
const PERCENT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaboratorRole {
    Sourcer,
    Submitter,
    Closer,
    Support,
}

impl CollaboratorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollaboratorRole::Sourcer => "sourcer",
            CollaboratorRole::Submitter => "submitter",
            CollaboratorRole::Closer => "closer",
            CollaboratorRole::Support => "support",
        }
    }
}

/// One collaborator's requested cut, as supplied by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct SplitSpec {
    pub recruiter_user_id: Uuid,
    pub role: CollaboratorRole,
    pub split_percentage: f64,
}

/// A collaborator's resolved share of the fee.
#[derive(Debug, Clone, Serialize)]
pub struct CollaboratorShare {
    pub recruiter_user_id: Uuid,
    pub role: CollaboratorRole,
    pub split_percentage: f64,
    pub split_amount: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeeDistribution {
    pub fee_amount: i64,
    pub shares: Vec<CollaboratorShare>,
    /// Sum of all collaborator shares. Always <= fee_amount.
    pub recruiter_share_amount: i64,
    /// What remains with the platform. Never negative.
    pub platform_share: i64,
}

#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    #[error("salary must be non-negative, got {0}")]
    NegativeSalary(i64),

    #[error("fee_percentage must be between 0 and 100, got {0}")]
    FeePercentageOutOfRange(f64),

    #[error("split_percentage must be non-negative, got {0}")]
    NegativeSplit(f64),

    #[error("collaborator splits sum to {0}%, exceeding 100%")]
    SplitsExceedHundred(f64),
}

/// `fee_amount = round(salary * fee_percentage / 100)`.
pub fn compute_fee_amount(salary: i64, fee_percentage: f64) -> i64 {
    (salary as f64 * fee_percentage / 100.0).round() as i64
}

/// Computes the full distribution of a placement fee across collaborators.
///
/// Individual shares are floored to whole minor units; flooring guarantees
/// the platform remainder cannot go negative under rounding, so the
/// `recruiter_share_amount <= fee_amount` invariant holds for every split
/// set that passes validation.
pub fn distribute(
    salary: i64,
    fee_percentage: f64,
    splits: &[SplitSpec],
) -> Result<FeeDistribution, SplitError> {
    if salary < 0 {
        return Err(SplitError::NegativeSalary(salary));
    }
    if !(0.0..=100.0).contains(&fee_percentage) {
        return Err(SplitError::FeePercentageOutOfRange(fee_percentage));
    }

    let mut total_percentage = 0.0;
    for split in splits {
        if split.split_percentage < 0.0 {
            return Err(SplitError::NegativeSplit(split.split_percentage));
        }
        total_percentage += split.split_percentage;
    }
    if total_percentage > 100.0 + PERCENT_TOLERANCE {
        return Err(SplitError::SplitsExceedHundred(total_percentage));
    }

    let fee_amount = compute_fee_amount(salary, fee_percentage);

    let shares: Vec<CollaboratorShare> = splits
        .iter()
        .map(|split| CollaboratorShare {
            recruiter_user_id: split.recruiter_user_id,
            role: split.role,
            split_percentage: split.split_percentage,
            split_amount: (fee_amount as f64 * split.split_percentage / 100.0).floor() as i64,
        })
        .collect();

    let recruiter_share_amount: i64 = shares.iter().map(|s| s.split_amount).sum();
    let platform_share = fee_amount - recruiter_share_amount;

    Ok(FeeDistribution {
        fee_amount,
        shares,
        recruiter_share_amount,
        platform_share,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(pct: f64) -> SplitSpec {
        SplitSpec {
            recruiter_user_id: Uuid::new_v4(),
            role: CollaboratorRole::Sourcer,
            split_percentage: pct,
        }
    }

    #[test]
    fn test_fee_amount_is_rounded_percentage_of_salary() {
        // $120,000.00 at 20% -> $24,000.00
        assert_eq!(compute_fee_amount(12_000_000, 20.0), 2_400_000);
        // Rounding: $100.01 at 33% -> 3300.33 cents -> 3300
        assert_eq!(compute_fee_amount(10_001, 33.0), 3300);
        // Half rounds away from zero: 150 * 25% = 37.5 -> 38
        assert_eq!(compute_fee_amount(150, 25.0), 38);
    }

    #[test]
    fn test_splits_over_hundred_rejected() {
        let err = distribute(1_000_000, 20.0, &[split(60.0), split(50.0)]).unwrap_err();
        assert_eq!(err, SplitError::SplitsExceedHundred(110.0));
    }

    #[test]
    fn test_exactly_hundred_percent_allowed() {
        let dist = distribute(1_000_000, 20.0, &[split(50.0), split(50.0)]).unwrap();
        assert_eq!(dist.fee_amount, 200_000);
        assert_eq!(dist.recruiter_share_amount, 200_000);
        assert_eq!(dist.platform_share, 0);
    }

    #[test]
    fn test_repeating_thirds_survive_float_accumulation() {
        let thirds = [
            split(100.0 / 3.0),
            split(100.0 / 3.0),
            split(100.0 / 3.0),
        ];
        assert!(distribute(1_000_000, 20.0, &thirds).is_ok());
    }

    #[test]
    fn test_platform_remainder_never_negative_under_rounding() {
        // Fee of 10 cents, four 25% cuts: each floors from 2.5 to 2.
        let dist = distribute(
            50,
            20.0,
            &[split(25.0), split(25.0), split(25.0), split(25.0)],
        )
        .unwrap();
        assert_eq!(dist.fee_amount, 10);
        assert_eq!(dist.shares.iter().map(|s| s.split_amount).sum::<i64>(), 8);
        assert_eq!(dist.platform_share, 2);
    }

    #[test]
    fn test_recruiter_share_never_exceeds_fee() {
        let dist = distribute(9_999_999, 17.5, &[split(40.0), split(35.0), split(25.0)]).unwrap();
        assert!(dist.recruiter_share_amount <= dist.fee_amount);
        assert_eq!(
            dist.recruiter_share_amount,
            dist.shares.iter().map(|s| s.split_amount).sum::<i64>()
        );
        assert_eq!(
            dist.platform_share,
            dist.fee_amount - dist.recruiter_share_amount
        );
    }

    #[test]
    fn test_no_collaborators_leaves_full_fee_with_platform() {
        let dist = distribute(2_000_000, 25.0, &[]).unwrap();
        assert_eq!(dist.fee_amount, 500_000);
        assert!(dist.shares.is_empty());
        assert_eq!(dist.recruiter_share_amount, 0);
        assert_eq!(dist.platform_share, 500_000);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert_eq!(
            distribute(-1, 20.0, &[]).unwrap_err(),
            SplitError::NegativeSalary(-1)
        );
        assert_eq!(
            distribute(100, 120.0, &[]).unwrap_err(),
            SplitError::FeePercentageOutOfRange(120.0)
        );
        assert_eq!(
            distribute(100, 20.0, &[split(-5.0)]).unwrap_err(),
            SplitError::NegativeSplit(-5.0)
        );
    }
}
