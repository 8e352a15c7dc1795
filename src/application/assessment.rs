//! Assessment service: Orchestrates scoring and history persistence.
//!
//! This service coordinates:
//! - Scoring a submitted questionnaire
//! - Wrapping the result with id and timestamp
//! - History persistence and retrieval
//!
//! Range validation happens here, at the submission boundary; the scoring
//! engine itself is total and performs none. The intake form runs the same
//! checks per step for immediate feedback.

use std::sync::Arc;

use crate::domain::{scoring, Assessment, AssessmentRecord};
use crate::ports::HistoryStore;
use crate::EndosightError;

/// Service for scoring questionnaires and managing history.
pub struct AssessmentService<S>
where
    S: HistoryStore,
{
    storage: Arc<S>,
}

impl<S> AssessmentService<S>
where
    S: HistoryStore,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new assessment service.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Score a questionnaire and persist the result to history.
    ///
    /// Scoring is pure and synchronous. A persistence failure is logged but
    /// does not fail the submission: the user still gets their result.
    ///
    /// # Errors
    /// Returns [`EndosightError::Validation`] when any field is out of range.
    pub fn submit(&self, record: AssessmentRecord) -> Result<Assessment, EndosightError> {
        if let Err(errors) = record.validate() {
            return Err(EndosightError::Validation(errors.join("; ")));
        }

        tracing::info!("Scoring submitted questionnaire...");

        let result = scoring::score(&record);
        tracing::debug!(
            "Scored: risk={}, probability={:.2}, {} factors",
            result.risk_level,
            result.probability,
            result.factors.len()
        );

        let assessment = Assessment::new(record, result);

        if let Err(e) = self.storage.save(&assessment) {
            tracing::warn!("Failed to save assessment to history: {:?}", e);
        }

        tracing::info!(
            "Assessment complete: risk={}, probability={:.1}%, stage={}",
            assessment.result.risk_level,
            assessment.result.probability * 100.0,
            assessment.result.stage
        );

        Ok(assessment)
    }

    /// Get stored assessments, most recent first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn history(&self) -> Result<Vec<Assessment>, EndosightError> {
        self.storage
            .list()
            .map_err(|e| EndosightError::Storage(e.into()))
    }

    /// Get recent assessments from history (up to `limit`).
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<Assessment>, EndosightError> {
        self.storage
            .list_recent(limit)
            .map_err(|e| EndosightError::Storage(e.into()))
    }

    /// Get total stored assessment count.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn count(&self) -> Result<usize, EndosightError> {
        self.storage
            .count()
            .map_err(|e| EndosightError::Storage(e.into()))
    }

    /// Delete all stored assessments.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn clear_history(&self) -> Result<(), EndosightError> {
        tracing::warn!("Clearing assessment history...");
        self.storage
            .clear()
            .map_err(|e| EndosightError::Storage(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteHistory;
    use crate::domain::RiskLevel;

    fn create_test_service() -> AssessmentService<SqliteHistory> {
        let storage = Arc::new(SqliteHistory::in_memory().expect("Should create db"));
        AssessmentService::new(storage)
    }

    fn high_risk_record() -> AssessmentRecord {
        AssessmentRecord {
            age: 30,
            bmi: 23.88,
            cycle_length: 28,
            age_of_menarche: 12,
            dysmenorrhea_score: 8,
            pelvic_pain_score: 8,
            dyspareunia_score: 4,
            family_history: true,
            ca125_level: 40.0,
            crp_level: 5.0,
            mental_health_score: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_submit_scores_and_persists() {
        let service = create_test_service();

        let assessment = service
            .submit(high_risk_record())
            .expect("Should submit");

        assert_eq!(assessment.result.risk_level, RiskLevel::High);
        assert_eq!(assessment.result.stage, 4);

        let history = service.history().expect("Should list");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], assessment);
    }

    #[test]
    fn test_submit_matches_direct_scoring() {
        let service = create_test_service();
        let record = high_risk_record();

        let assessment = service.submit(record.clone()).expect("Should submit");
        assert_eq!(assessment.result, scoring::score(&record));
        assert_eq!(assessment.record, record);
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let service = create_test_service();

        let first = service
            .submit(AssessmentRecord {
                age: 20,
                bmi: 21.0,
                cycle_length: 28,
                age_of_menarche: 13,
                ..Default::default()
            })
            .expect("Should submit");
        let second = service.submit(high_risk_record()).expect("Should submit");

        let history = service.history().expect("Should list");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second.id);
        assert_eq!(history[1].id, first.id);
    }

    #[test]
    fn test_submit_rejects_out_of_range_record() {
        let service = create_test_service();

        let result = service.submit(AssessmentRecord {
            age: 17,
            ..high_risk_record()
        });

        assert!(matches!(result, Err(EndosightError::Validation(_))));
        assert_eq!(service.count().expect("Should count"), 0);
    }

    #[test]
    fn test_clear_history() {
        let service = create_test_service();

        service.submit(high_risk_record()).expect("Should submit");
        assert_eq!(service.count().expect("Should count"), 1);

        service.clear_history().expect("Should clear");
        assert_eq!(service.count().expect("Should count"), 0);
    }
}
