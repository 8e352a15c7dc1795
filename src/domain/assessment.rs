//! Questionnaire intake types for endometriosis risk assessment.
//!
//! Symptom scores follow the 0-10 self-report scale used by the intake
//! form; biomarker units are U/mL (CA-125) and mg/L (CRP).

use serde::{Deserialize, Serialize};

/// A completed intake questionnaire, immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AssessmentRecord {
    /// Age in years (18-60 accepted by the form)
    pub age: u32,

    /// Body mass index, entered directly or derived from weight/height
    pub bmi: f64,

    /// Menstrual cycle length in days (20-40 accepted by the form)
    pub cycle_length: u32,

    /// Age at first menstruation (8-18 accepted by the form)
    pub age_of_menarche: u32,

    /// Menstrual pain severity, 0-10
    pub dysmenorrhea_score: u8,

    /// Chronic pelvic pain severity, 0-10
    pub pelvic_pain_score: u8,

    /// Pain during intercourse, 0-10
    pub dyspareunia_score: u8,

    /// Painful bowel movements, 0-10
    pub dyschezia_score: u8,

    /// Urinary symptom severity, 0-10
    pub urinary_symptoms_score: u8,

    /// Impact on mental wellbeing, 0-10
    pub mental_health_score: u8,

    /// First-degree relative with endometriosis
    pub family_history: bool,

    /// Diagnosed or suspected infertility
    pub infertility_status: bool,

    /// CA-125 blood level in U/mL
    pub ca125_level: f64,

    /// C-reactive protein level in mg/L
    pub crp_level: f64,
}

impl AssessmentRecord {
    /// Combined pain score: dysmenorrhea + pelvic pain + dyspareunia (0-30).
    #[must_use]
    pub fn pain_composite(&self) -> u32 {
        u32::from(self.dysmenorrhea_score)
            + u32::from(self.pelvic_pain_score)
            + u32::from(self.dyspareunia_score)
    }

    /// Combined digestive/urinary score: dyschezia + urinary symptoms (0-20).
    #[must_use]
    pub fn digestive_composite(&self) -> u32 {
        u32::from(self.dyschezia_score) + u32::from(self.urinary_symptoms_score)
    }

    /// Validate that all fields are within the ranges the intake form accepts.
    ///
    /// The scorer itself is total and never validates; this is the single
    /// enforcement point, called before submission.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(18..=60).contains(&self.age) {
            errors.push(format!("Age {} out of range [18, 60]", self.age));
        }
        if !self.bmi.is_finite() || self.bmi <= 0.0 {
            errors.push(format!("BMI {} must be a positive number", self.bmi));
        }
        if !(20..=40).contains(&self.cycle_length) {
            errors.push(format!(
                "Cycle length {} out of range [20, 40]",
                self.cycle_length
            ));
        }
        if !(8..=18).contains(&self.age_of_menarche) {
            errors.push(format!(
                "Age of menarche {} out of range [8, 18]",
                self.age_of_menarche
            ));
        }

        let scores = [
            ("Dysmenorrhea", self.dysmenorrhea_score),
            ("Pelvic pain", self.pelvic_pain_score),
            ("Dyspareunia", self.dyspareunia_score),
            ("Dyschezia", self.dyschezia_score),
            ("Urinary symptoms", self.urinary_symptoms_score),
            ("Mental health impact", self.mental_health_score),
        ];
        for (name, score) in scores {
            if score > 10 {
                errors.push(format!("{name} score {score} out of range [0, 10]"));
            }
        }

        if !self.ca125_level.is_finite() || self.ca125_level < 0.0 {
            errors.push(format!(
                "CA-125 level {} must be non-negative",
                self.ca125_level
            ));
        }
        if !self.crp_level.is_finite() || self.crp_level < 0.0 {
            errors.push(format!("CRP level {} must be non-negative", self.crp_level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Compute BMI from weight in kg and height in cm, rounded to two decimals.
///
/// Returns `None` when either measurement is non-positive or non-finite.
#[must_use]
pub fn bmi_from(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !weight_kg.is_finite() || !height_cm.is_finite() || weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Some((bmi * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> AssessmentRecord {
        AssessmentRecord {
            age: 30,
            bmi: 23.5,
            cycle_length: 28,
            age_of_menarche: 12,
            dysmenorrhea_score: 5,
            pelvic_pain_score: 5,
            dyspareunia_score: 5,
            dyschezia_score: 5,
            urinary_symptoms_score: 5,
            mental_health_score: 5,
            family_history: false,
            infertility_status: false,
            ca125_level: 20.0,
            crp_level: 3.0,
        }
    }

    #[test]
    fn test_composites() {
        let record = AssessmentRecord {
            dysmenorrhea_score: 8,
            pelvic_pain_score: 8,
            dyspareunia_score: 4,
            dyschezia_score: 6,
            urinary_symptoms_score: 5,
            ..Default::default()
        };
        assert_eq!(record.pain_composite(), 20);
        assert_eq!(record.digestive_composite(), 11);
    }

    #[test]
    fn test_validation_accepts_form_ranges() {
        assert!(valid_record().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let invalid = AssessmentRecord {
            age: 17,              // below form minimum
            cycle_length: 45,     // above form maximum
            dysmenorrhea_score: 11,
            ca125_level: -1.0,
            ..valid_record()
        };
        let errors = invalid.validate().expect_err("Should collect errors");
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_bmi_from_weight_and_height() {
        let bmi = bmi_from(65.0, 165.0).expect("Should compute");
        assert!((bmi - 23.88).abs() < 1e-9);
        assert!(bmi_from(0.0, 165.0).is_none());
        assert!(bmi_from(65.0, 0.0).is_none());
    }
}
