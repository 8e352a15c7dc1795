//! Risk scoring engine: the additive rule table and its result types.
//!
//! Each rule inspects one aspect of the questionnaire independently and,
//! when it fires, adds a fixed impact to the running risk score and records
//! a contributing factor. Probability, confidence, stage, and the
//! recommendation set are all derived from the fired rules. The function is
//! total over numerically valid input and performs no I/O.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::AssessmentRecord;
use crate::domain::recommend;

/// Risk level classification for endometriosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk, routine monitoring
    Low,
    /// Medium risk, follow-up recommended
    Medium,
    /// High risk, specialist consultation advised
    High,
}

impl RiskLevel {
    /// Display label used by the results screen.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - Continue routine monitoring",
            Self::Medium => "Medium risk - Clinical follow-up recommended",
            Self::High => "High risk - Specialist consultation advised",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (22, 163, 74),    // Green (#16A34A)
            Self::Medium => (202, 138, 4), // Amber (#CA8A04)
            Self::High => (220, 38, 38),   // Red (#DC2626)
        }
    }

    /// Lowercase wire form, matching the serialized representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// One fired rule: which feature contributed, how much, and the value shown
/// to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub feature: String,
    pub impact: u32,
    pub value: String,
}

/// Output of the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,

    /// Estimated probability of endometriosis, 0.0 to 0.95
    pub probability: f64,

    /// Heuristic confidence in the estimate, 0.75 to 0.95
    pub confidence: f64,

    /// Predicted rASRM-style stage, 0 (none) to 4
    pub stage: u8,

    /// Fired factors, impact-descending, at most [`MAX_FACTORS`]
    pub factors: Vec<FeatureContribution>,

    /// Guidance strings, base set by level plus factor-specific additions
    pub recommendations: Vec<String>,
}

/// Factor names as they appear in results, reports, and explanations.
pub const FEATURE_AGE: &str = "Age";
pub const FEATURE_PAIN: &str = "Pain Symptoms";
pub const FEATURE_DIGESTIVE: &str = "Digestive/Urinary";
pub const FEATURE_FAMILY_HISTORY: &str = "Family History";
pub const FEATURE_CA125: &str = "CA-125 Level";
pub const FEATURE_INFERTILITY: &str = "Infertility";
pub const FEATURE_CRP: &str = "CRP Level";
pub const FEATURE_MENTAL_HEALTH: &str = "Mental Health Impact";

/// Maximum number of factors carried into the result.
pub const MAX_FACTORS: usize = 8;

const AGE_IMPACT: u32 = 15;
const PAIN_HIGH_IMPACT: u32 = 30;
const PAIN_MODERATE_IMPACT: u32 = 15;
const DIGESTIVE_IMPACT: u32 = 20;
const FAMILY_HISTORY_IMPACT: u32 = 20;
const CA125_IMPACT: u32 = 25;
const INFERTILITY_IMPACT: u32 = 15;
const CRP_IMPACT: u32 = 10;
const MENTAL_HEALTH_IMPACT: u32 = 5;

const PROBABILITY_CAP: f64 = 0.95;
const CONFIDENCE_BASE: f64 = 0.75;
const CONFIDENCE_PER_FACTOR: f64 = 0.03;
const CONFIDENCE_CAP: f64 = 0.95;

fn contribution(feature: &str, impact: u32, value: String) -> FeatureContribution {
    FeatureContribution {
        feature: feature.to_string(),
        impact,
        value,
    }
}

/// Score a questionnaire record.
///
/// Deterministic: the same record always produces an identical result.
#[must_use]
pub fn score(record: &AssessmentRecord) -> RiskAssessment {
    let mut factors: Vec<FeatureContribution> = Vec::new();
    let mut risk_score: u32 = 0;

    // Peak incidence window
    if (25..=35).contains(&record.age) {
        risk_score += AGE_IMPACT;
        factors.push(contribution(FEATURE_AGE, AGE_IMPACT, record.age.to_string()));
    }

    // Pain composite (dysmenorrhea + pelvic pain + dyspareunia), the
    // strongest indicator block
    let pain = record.pain_composite();
    if pain > 15 {
        risk_score += PAIN_HIGH_IMPACT;
        factors.push(contribution(
            FEATURE_PAIN,
            PAIN_HIGH_IMPACT,
            format!("High ({pain}/30)"),
        ));
    } else if pain > 8 {
        risk_score += PAIN_MODERATE_IMPACT;
        factors.push(contribution(
            FEATURE_PAIN,
            PAIN_MODERATE_IMPACT,
            format!("Moderate ({pain}/30)"),
        ));
    }

    // Digestive/urinary composite (dyschezia + urinary symptoms)
    let digestive = record.digestive_composite();
    if digestive > 10 {
        risk_score += DIGESTIVE_IMPACT;
        factors.push(contribution(
            FEATURE_DIGESTIVE,
            DIGESTIVE_IMPACT,
            format!("High ({digestive}/20)"),
        ));
    }

    if record.family_history {
        risk_score += FAMILY_HISTORY_IMPACT;
        factors.push(contribution(
            FEATURE_FAMILY_HISTORY,
            FAMILY_HISTORY_IMPACT,
            "Yes".to_string(),
        ));
    }

    // CA-125 elevated above the 35 U/mL reference limit
    if record.ca125_level > 35.0 {
        risk_score += CA125_IMPACT;
        factors.push(contribution(
            FEATURE_CA125,
            CA125_IMPACT,
            format!("{:.1} U/mL", record.ca125_level),
        ));
    }

    if record.infertility_status {
        risk_score += INFERTILITY_IMPACT;
        factors.push(contribution(
            FEATURE_INFERTILITY,
            INFERTILITY_IMPACT,
            "Yes".to_string(),
        ));
    }

    // CRP above the 10 mg/L inflammation threshold
    if record.crp_level > 10.0 {
        risk_score += CRP_IMPACT;
        factors.push(contribution(
            FEATURE_CRP,
            CRP_IMPACT,
            format!("{:.1} mg/L", record.crp_level),
        ));
    }

    if record.mental_health_score > 6 {
        risk_score += MENTAL_HEALTH_IMPACT;
        factors.push(contribution(
            FEATURE_MENTAL_HEALTH,
            MENTAL_HEALTH_IMPACT,
            record.mental_health_score.to_string(),
        ));
    }

    let probability = (f64::from(risk_score) / 100.0).min(PROBABILITY_CAP);
    let confidence =
        (CONFIDENCE_BASE + CONFIDENCE_PER_FACTOR * factors.len() as f64).min(CONFIDENCE_CAP);

    let (risk_level, stage) = if probability < 0.3 {
        (RiskLevel::Low, 0)
    } else if probability < 0.6 {
        (RiskLevel::Medium, if risk_score > 50 { 2 } else { 1 })
    } else {
        (RiskLevel::High, if risk_score > 80 { 4 } else { 3 })
    };

    let recommendations = recommend::generate(risk_level, &factors);

    // Stable sort keeps insertion order among equal impacts
    factors.sort_by(|a, b| b.impact.cmp(&a.impact));
    factors.truncate(MAX_FACTORS);

    RiskAssessment {
        risk_level,
        probability,
        confidence,
        stage,
        factors,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> AssessmentRecord {
        AssessmentRecord {
            age: 20,
            bmi: 22.0,
            cycle_length: 28,
            age_of_menarche: 12,
            ..Default::default()
        }
    }

    #[test]
    fn test_deterministic() {
        let record = AssessmentRecord {
            age: 30,
            dysmenorrhea_score: 7,
            family_history: true,
            ca125_level: 40.0,
            ..baseline()
        };
        assert_eq!(score(&record), score(&record));
    }

    #[test]
    fn test_no_indicators_scores_zero() {
        let result = score(&baseline());
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!((result.probability - 0.0).abs() < f64::EPSILON);
        assert!((result.confidence - 0.75).abs() < f64::EPSILON);
        assert_eq!(result.stage, 0);
        assert!(result.factors.is_empty());
        assert_eq!(
            result.recommendations,
            vec![
                "Continue monitoring symptoms and overall health",
                "Maintain regular gynecological check-ups",
            ]
        );
    }

    #[test]
    fn test_combined_high_risk_profile() {
        // age 30 (+15), pain 8+8+4 = 20 (+30), family history (+20),
        // CA-125 40 (+25): risk score 90
        let record = AssessmentRecord {
            age: 30,
            dysmenorrhea_score: 8,
            pelvic_pain_score: 8,
            dyspareunia_score: 4,
            family_history: true,
            ca125_level: 40.0,
            crp_level: 5.0,
            mental_health_score: 3,
            ..baseline()
        };
        let result = score(&record);

        assert_eq!(result.risk_level, RiskLevel::High);
        assert!((result.probability - 0.90).abs() < 1e-9);
        assert!((result.confidence - 0.87).abs() < 1e-9);
        assert_eq!(result.stage, 4);

        let fired: Vec<(&str, u32)> = result
            .factors
            .iter()
            .map(|f| (f.feature.as_str(), f.impact))
            .collect();
        assert_eq!(
            fired,
            vec![
                (FEATURE_PAIN, 30),
                (FEATURE_CA125, 25),
                (FEATURE_FAMILY_HISTORY, 20),
                (FEATURE_AGE, 15),
            ]
        );
        assert_eq!(result.factors[0].value, "High (20/30)");
        assert_eq!(result.factors[1].value, "40.0 U/mL");

        assert_eq!(
            result.recommendations,
            vec![
                "Consult a gynecologist or endometriosis specialist immediately",
                "Consider comprehensive diagnostic imaging (ultrasound/MRI)",
                "Discuss treatment options including hormonal therapy or surgery",
                "Discuss pain management strategies with your doctor",
                "Request detailed blood work analysis",
            ]
        );
    }

    #[test]
    fn test_age_window_boundaries() {
        for (age, fires) in [(24, false), (25, true), (35, true), (36, false)] {
            let record = AssessmentRecord { age, ..baseline() };
            let result = score(&record);
            assert_eq!(
                result.factors.iter().any(|f| f.feature == FEATURE_AGE),
                fires,
                "age {age}"
            );
        }
    }

    #[test]
    fn test_pain_composite_thresholds() {
        // Strictly greater than: 8 fires nothing, 15 stays moderate
        let cases = [
            (4, 4, None),
            (5, 4, Some("Moderate (9/30)")),
            (10, 5, Some("Moderate (15/30)")),
            (10, 6, Some("High (16/30)")),
        ];
        for (dysmenorrhea, pelvic, expected) in cases {
            let record = AssessmentRecord {
                dysmenorrhea_score: dysmenorrhea,
                pelvic_pain_score: pelvic,
                ..baseline()
            };
            let result = score(&record);
            let value = result
                .factors
                .iter()
                .find(|f| f.feature == FEATURE_PAIN)
                .map(|f| f.value.clone());
            assert_eq!(
                value.as_deref(),
                expected,
                "pain total {}",
                dysmenorrhea + pelvic
            );
        }
    }

    #[test]
    fn test_digestive_threshold() {
        let at_limit = AssessmentRecord {
            dyschezia_score: 5,
            urinary_symptoms_score: 5,
            ..baseline()
        };
        assert!(!score(&at_limit)
            .factors
            .iter()
            .any(|f| f.feature == FEATURE_DIGESTIVE));

        let above = AssessmentRecord {
            dyschezia_score: 6,
            urinary_symptoms_score: 5,
            ..baseline()
        };
        let result = score(&above);
        let factor = result
            .factors
            .iter()
            .find(|f| f.feature == FEATURE_DIGESTIVE)
            .expect("Should fire above 10");
        assert_eq!(factor.value, "High (11/20)");
        assert_eq!(factor.impact, 20);
    }

    #[test]
    fn test_ca125_reference_limit_is_exclusive() {
        let at_limit = AssessmentRecord {
            ca125_level: 35.0,
            ..baseline()
        };
        let result = score(&at_limit);
        assert!(!result.factors.iter().any(|f| f.feature == FEATURE_CA125));
        assert!((result.probability - 0.0).abs() < f64::EPSILON);

        let above = AssessmentRecord {
            ca125_level: 35.1,
            ..baseline()
        };
        assert!(score(&above)
            .factors
            .iter()
            .any(|f| f.feature == FEATURE_CA125));
    }

    #[test]
    fn test_probability_monotonic_in_dysmenorrhea() {
        let mut last = -1.0;
        for severity in 0..=10 {
            let record = AssessmentRecord {
                dysmenorrhea_score: severity,
                pelvic_pain_score: 6,
                ..baseline()
            };
            let p = score(&record).probability;
            assert!(
                p >= last,
                "probability dropped from {last} to {p} at severity {severity}"
            );
            last = p;
        }
    }

    #[test]
    fn test_bounds_with_everything_elevated() {
        // All eight rules fire: 15+30+20+20+25+15+10+5 = 140
        let record = AssessmentRecord {
            age: 30,
            dysmenorrhea_score: 10,
            pelvic_pain_score: 10,
            dyspareunia_score: 10,
            dyschezia_score: 10,
            urinary_symptoms_score: 10,
            mental_health_score: 10,
            family_history: true,
            infertility_status: true,
            ca125_level: 120.0,
            crp_level: 25.0,
            ..baseline()
        };
        let result = score(&record);

        assert!((result.probability - 0.95).abs() < f64::EPSILON);
        assert!((result.confidence - 0.95).abs() < f64::EPSILON);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.stage, 4);
        assert_eq!(result.factors.len(), MAX_FACTORS);
        assert!(result
            .factors
            .windows(2)
            .all(|pair| pair[0].impact >= pair[1].impact));
    }

    #[test]
    fn test_stage_splits_within_medium_and_high() {
        // pain 30 + age 15 = 45: medium, stage 1
        let medium_low = AssessmentRecord {
            age: 30,
            dysmenorrhea_score: 10,
            pelvic_pain_score: 10,
            ..baseline()
        };
        let result = score(&medium_low);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.stage, 1);

        // pain 30 + age 15 + crp 10 = 55: medium, stage 2
        let medium_high = AssessmentRecord {
            crp_level: 12.0,
            ..medium_low.clone()
        };
        let result = score(&medium_high);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.stage, 2);

        // pain 30 + ca125 25 + family 20 + mental 5 = 80: high, stage 3
        let high_low = AssessmentRecord {
            dysmenorrhea_score: 10,
            pelvic_pain_score: 10,
            ca125_level: 50.0,
            family_history: true,
            mental_health_score: 8,
            ..baseline()
        };
        let result = score(&high_low);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.stage, 3);
    }

    #[test]
    fn test_equal_impacts_keep_rule_order() {
        // Age and infertility both contribute 15; age is evaluated first
        let record = AssessmentRecord {
            age: 30,
            infertility_status: true,
            ..baseline()
        };
        let result = score(&record);
        let names: Vec<&str> = result.factors.iter().map(|f| f.feature.as_str()).collect();
        assert_eq!(names, vec![FEATURE_AGE, FEATURE_INFERTILITY]);
    }

    #[test]
    fn test_result_serde_round_trip() {
        let record = AssessmentRecord {
            age: 30,
            dysmenorrhea_score: 8,
            pelvic_pain_score: 8,
            dyspareunia_score: 4,
            family_history: true,
            ca125_level: 40.0,
            ..baseline()
        };
        let result = score(&record);

        let json = serde_json::to_string(&result).expect("Should serialize");
        assert!(json.contains("\"risk_level\":\"high\""));

        let back: RiskAssessment = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(back, result);
    }
}
