//! Risk annotation attached to a suggestion.

use serde::{Deserialize, Serialize};

/// Coarse risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
}

/// Model confidence and risk bucket for a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Confidence in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Risk bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_serializes_to_empty_object() {
        let json = serde_json::to_string(&RiskAssessment::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn risk_level_lowercase() {
        let risk = RiskAssessment {
            confidence: Some(0.72),
            risk_level: Some(RiskLevel::Medium),
        };
        let json = serde_json::to_value(risk).unwrap();
        assert_eq!(json["risk_level"], "medium");
        assert_eq!(json["confidence"], 0.72);
    }
}
