use serde::{Deserialize, Serialize};

use super::config::RecommendationThresholds;

/// Bid decision surfaced to the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Bid,
    Caution,
    NoBid,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Bid => "BID",
            Recommendation::Caution => "CAUTION",
            Recommendation::NoBid => "NO_BID",
        }
    }

    pub fn rationale(&self) -> &'static str {
        match self {
            Recommendation::NoBid => {
                "HIGH RISK: Significant compliance gaps or timing constraints. \
                 Recommend passing on this opportunity."
            }
            Recommendation::Caution => {
                "MODERATE RISK: Some concerns identified. \
                 Proceed with careful planning and strong subcontractor commitments."
            }
            Recommendation::Bid => {
                "LOW RISK: Good subcontractor availability and reasonable timeline. \
                 Strong opportunity to pursue."
            }
        }
    }
}

pub(crate) fn classify(risk_score: u8, thresholds: &RecommendationThresholds) -> Recommendation {
    if risk_score >= thresholds.no_bid {
        Recommendation::NoBid
    } else if risk_score >= thresholds.caution {
        Recommendation::Caution
    } else {
        Recommendation::Bid
    }
}
