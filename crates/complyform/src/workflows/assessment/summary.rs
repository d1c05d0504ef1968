use serde::{Deserialize, Serialize};

use super::repository::AssessmentRecord;
use super::scoring::Recommendation;

/// Roll-up of an organization's assessment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub total_assessments: usize,
    pub bid_recommended: usize,
    pub caution_recommended: usize,
    pub no_bid_recommended: usize,
    /// Mean risk score rounded to two decimals; zero when there is no history.
    pub average_risk_score: f64,
}

impl AssessmentSummary {
    pub fn from_records(records: &[AssessmentRecord]) -> Self {
        let count = |wanted: Recommendation| {
            records
                .iter()
                .filter(|record| record.fields.recommendation == wanted)
                .count()
        };

        let total_assessments = records.len();
        let average_risk_score = if total_assessments == 0 {
            0.0
        } else {
            let sum: u64 = records
                .iter()
                .map(|record| u64::from(record.fields.overall_risk_score))
                .sum();
            round_to_cents(sum as f64 / total_assessments as f64)
        };

        Self {
            total_assessments,
            bid_recommended: count(Recommendation::Bid),
            caution_recommended: count(Recommendation::Caution),
            no_bid_recommended: count(Recommendation::NoBid),
            average_risk_score,
        }
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
