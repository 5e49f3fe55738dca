//! Weighted scoring and verdict derivation.

use crate::model::{TestResult, Verdict};
use serde::{Deserialize, Serialize};

/// Score at or above which the threshold-side verdict applies.
pub const VERDICT_THRESHOLD: u32 = 70;

/// Which side of the 70-point threshold maps to which verdict. Two historical
/// variants of this logic exist; the strategy pins one per run and the tests
/// assert the default explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStrategy {
    /// `base_score >= 70` → `Bid` (worth bidding, review it), else `Pass`
    /// (pass on the job). This is the shipped behavior.
    #[default]
    BidAboveThreshold,
    /// Swapped reading: `base_score >= 70` → `Pass`, else `Bid`.
    PassAboveThreshold,
}

/// All four scoring outputs, produced together from one results slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub base_score: u32,
    pub final_score: u32,
    pub has_critical_fail: bool,
    pub verdict: Verdict,
}

/// Compute the weighted scorecard for a completed result list.
///
/// Empty input and zero total weight are explicit fallbacks, never errors.
pub fn score_results(results: &[TestResult], strategy: ScoreStrategy) -> Scorecard {
    if results.is_empty() {
        return Scorecard {
            base_score: 0,
            final_score: 0,
            has_critical_fail: false,
            verdict: Verdict::NoQuestions,
        };
    }

    let has_critical_fail = results.iter().any(|r| r.critical && !r.passed);

    let total: u32 = results.iter().map(|r| r.weight).sum();
    let earned: u32 = results.iter().filter(|r| r.passed).map(|r| r.weight).sum();
    let base_score = if total > 0 {
        ((earned as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    let final_score = if has_critical_fail { 0 } else { base_score };

    let verdict = if has_critical_fail {
        Verdict::CriticalFail
    } else {
        let above = base_score >= VERDICT_THRESHOLD;
        match strategy {
            ScoreStrategy::BidAboveThreshold => {
                if above {
                    Verdict::Bid
                } else {
                    Verdict::Pass
                }
            }
            ScoreStrategy::PassAboveThreshold => {
                if above {
                    Verdict::Pass
                } else {
                    Verdict::Bid
                }
            }
        }
    };

    Scorecard {
        base_score,
        final_score,
        has_critical_fail,
        verdict,
    }
}
