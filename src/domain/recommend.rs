//! Recommendation generation.
//!
//! A base set keyed by risk level, extended with factor-specific guidance.
//! String content and ordering are part of the output contract: callers
//! and stored history rely on them verbatim.

use crate::domain::scoring::{
    FeatureContribution, RiskLevel, FEATURE_CA125, FEATURE_INFERTILITY, FEATURE_PAIN,
};

/// Build the recommendation list for a risk level and its fired factors.
///
/// Order is fixed: the level's base set first, then conditional additions
/// for pain, CA-125, and infertility, in that order.
#[must_use]
pub fn generate(risk_level: RiskLevel, factors: &[FeatureContribution]) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    let base: &[&str] = match risk_level {
        RiskLevel::High => &[
            "Consult a gynecologist or endometriosis specialist immediately",
            "Consider comprehensive diagnostic imaging (ultrasound/MRI)",
            "Discuss treatment options including hormonal therapy or surgery",
        ],
        RiskLevel::Medium => &[
            "Schedule an appointment with your gynecologist",
            "Keep a symptom diary to track patterns",
            "Consider pelvic ultrasound for initial assessment",
        ],
        RiskLevel::Low => &[
            "Continue monitoring symptoms and overall health",
            "Maintain regular gynecological check-ups",
        ],
    };
    recommendations.extend(base.iter().map(|s| (*s).to_string()));

    let fired = |feature: &str| factors.iter().any(|f| f.feature == feature);

    if fired(FEATURE_PAIN) {
        recommendations.push("Discuss pain management strategies with your doctor".to_string());
    }
    if fired(FEATURE_CA125) {
        recommendations.push("Request detailed blood work analysis".to_string());
    }
    if fired(FEATURE_INFERTILITY) {
        recommendations.push("Consider fertility consultation if planning pregnancy".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(feature: &str) -> FeatureContribution {
        FeatureContribution {
            feature: feature.to_string(),
            impact: 10,
            value: "x".to_string(),
        }
    }

    #[test]
    fn test_base_set_sizes() {
        assert_eq!(generate(RiskLevel::High, &[]).len(), 3);
        assert_eq!(generate(RiskLevel::Medium, &[]).len(), 3);
        assert_eq!(generate(RiskLevel::Low, &[]).len(), 2);
    }

    #[test]
    fn test_conditionals_append_in_fixed_order() {
        let factors = vec![
            factor(FEATURE_INFERTILITY),
            factor(FEATURE_CA125),
            factor(FEATURE_PAIN),
        ];
        let recommendations = generate(RiskLevel::Medium, &factors);
        assert_eq!(
            &recommendations[3..],
            &[
                "Discuss pain management strategies with your doctor",
                "Request detailed blood work analysis",
                "Consider fertility consultation if planning pregnancy",
            ]
        );
    }

    #[test]
    fn test_unrelated_factors_add_nothing() {
        let factors = vec![factor("Age"), factor("Family History")];
        assert_eq!(generate(RiskLevel::Low, &factors).len(), 2);
    }
}
