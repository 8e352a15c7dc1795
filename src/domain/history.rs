//! Stored assessment entries: questionnaire, result, and metadata.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::AssessmentRecord;
use crate::domain::scoring::RiskAssessment;

/// A scored assessment as it appears in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Unique identifier
    pub id: String,

    /// The questionnaire as submitted
    pub record: AssessmentRecord,

    /// The scoring result
    pub result: RiskAssessment,

    /// Timestamp of submission
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Wrap a scored questionnaire with a fresh id and timestamp.
    #[must_use]
    pub fn new(record: AssessmentRecord, result: RiskAssessment) -> Self {
        Self {
            id: uuid_v4(),
            record,
            result,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Generate a simple UUID v4 (random) using CSPRNG.
///
/// Uses ChaCha20Rng seeded from OS entropy to ensure cryptographic randomness
/// on all platforms. This prevents UUID prediction attacks.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scoring;

    #[test]
    fn test_assessment_creation() {
        let record = AssessmentRecord {
            age: 30,
            family_history: true,
            ..Default::default()
        };
        let result = scoring::score(&record);
        let assessment = Assessment::new(record.clone(), result.clone());

        assert_eq!(assessment.record, record);
        assert_eq!(assessment.result, result);
        assert_eq!(assessment.id.len(), 36);
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36); // UUID format with dashes

        // Version and variant nibbles are fixed
        assert_eq!(&id1[14..15], "4");
        assert!(matches!(&id1[19..20], "8" | "9" | "a" | "b"));
    }

    #[test]
    fn test_assessment_serde_round_trip() {
        let record = AssessmentRecord {
            age: 28,
            bmi: 24.21,
            ca125_level: 36.5,
            ..Default::default()
        };
        let assessment = Assessment::new(record.clone(), scoring::score(&record));

        let json = serde_json::to_string(&assessment).expect("Should serialize");
        let back: Assessment = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(back, assessment);
    }
}
