//! SQLite adapter: Implementation of `HistoryStore`.
//!
//! Provides local persistence for assessment history. The questionnaire and
//! its result are stored as JSON columns so a loaded entry is structurally
//! identical to the one saved.
//!
//! # Mutex Behavior
//!
//! Database connection is protected by `Mutex`. A poisoned mutex (from panic
//! in another thread) will cause panic. This fail-fast behavior is intentional
//! for data integrity in healthcare applications.
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::domain::{Assessment, AssessmentRecord, RiskAssessment};
use crate::ports::{HistoryStore, HISTORY_LIMIT};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// SQLite history adapter.
pub struct SqliteHistory {
    conn: Mutex<Connection>,
}

impl SqliteHistory {
    /// Create a new SQLite history store with the given database path.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Create an in-memory SQLite database (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().expect("Lock failed");

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS assessments (
                id TEXT PRIMARY KEY,
                record TEXT NOT NULL,
                result TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_assessments_created
                ON assessments(created_at DESC);
            ",
        )?;

        Ok(())
    }

    fn row_to_assessment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Assessment> {
        let id: String = row.get(0)?;
        let record_json: String = row.get(1)?;
        let result_json: String = row.get(2)?;
        let created_at_str: String = row.get(3)?;

        let record: AssessmentRecord = serde_json::from_str(&record_json)
            .map_err(|e| json_column_error(1, e))?;
        let result: RiskAssessment = serde_json::from_str(&result_json)
            .map_err(|e| json_column_error(2, e))?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .unwrap_or_else(|_| chrono::Utc::now());

        Ok(Assessment {
            id,
            record,
            result,
            created_at,
        })
    }
}

fn json_column_error(index: usize, e: serde_json::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
}

impl HistoryStore for SqliteHistory {
    type Error = StorageError;

    fn save(&self, assessment: &Assessment) -> Result<(), Self::Error> {
        let record_json = serde_json::to_string(&assessment.record)?;
        let result_json = serde_json::to_string(&assessment.result)?;

        let conn = self.conn.lock().expect("Lock failed");

        conn.execute(
            r"
            INSERT INTO assessments (id, record, result, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![
                assessment.id,
                record_json,
                result_json,
                assessment.created_at.to_rfc3339(),
            ],
        )?;

        // Evict everything older than the newest HISTORY_LIMIT entries
        conn.execute(
            r"
            DELETE FROM assessments
            WHERE id NOT IN (
                SELECT id FROM assessments
                ORDER BY created_at DESC
                LIMIT ?1
            )
            ",
            params![HISTORY_LIMIT as i64],
        )?;

        tracing::debug!("Saved assessment {} to history", assessment.id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Assessment>, Self::Error> {
        self.list_recent(HISTORY_LIMIT)
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<Assessment>, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let mut stmt = conn.prepare(
            r"
            SELECT id, record, result, created_at
            FROM assessments
            ORDER BY created_at DESC
            LIMIT ?1
            ",
        )?;

        let assessments = stmt
            .query_map(params![limit as i64], Self::row_to_assessment)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(assessments)
    }

    fn count(&self) -> Result<usize, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM assessments", [], |row| row.get(0))?;

        Ok(count as usize)
    }

    fn clear(&self) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        conn.execute("DELETE FROM assessments", [])?;
        tracing::warn!("Cleared assessment history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scoring;

    fn sample_assessment(offset_secs: i64) -> Assessment {
        let record = AssessmentRecord {
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
        };
        let mut assessment = Assessment::new(record.clone(), scoring::score(&record));
        assessment.created_at += chrono::Duration::seconds(offset_secs);
        assessment
    }

    #[test]
    fn test_save_and_list_round_trip() {
        let storage = SqliteHistory::in_memory().expect("Should create db");

        assert_eq!(storage.count().expect("Should count"), 0);

        let assessment = sample_assessment(0);
        storage.save(&assessment).expect("Should save");

        let loaded = storage.list().expect("Should list");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], assessment);
    }

    #[test]
    fn test_list_most_recent_first() {
        let storage = SqliteHistory::in_memory().expect("Should create db");

        let older = sample_assessment(0);
        let newer = sample_assessment(60);
        storage.save(&newer).expect("Should save");
        storage.save(&older).expect("Should save");

        let loaded = storage.list().expect("Should list");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, newer.id);
        assert_eq!(loaded[1].id, older.id);
    }

    #[test]
    fn test_save_trims_to_history_limit() {
        let storage = SqliteHistory::in_memory().expect("Should create db");

        let mut ids = Vec::new();
        for i in 0..25 {
            let assessment = sample_assessment(i);
            ids.push(assessment.id.clone());
            storage.save(&assessment).expect("Should save");
        }

        assert_eq!(storage.count().expect("Should count"), HISTORY_LIMIT);

        let loaded = storage.list().expect("Should list");
        assert_eq!(loaded.len(), HISTORY_LIMIT);
        // Newest survives, the first five saved are evicted
        assert_eq!(loaded[0].id, ids[24]);
        let surviving: Vec<&String> = loaded.iter().map(|a| &a.id).collect();
        for evicted in &ids[..5] {
            assert!(!surviving.contains(&evicted));
        }
    }

    #[test]
    fn test_list_recent_respects_limit() {
        let storage = SqliteHistory::in_memory().expect("Should create db");

        for i in 0..5 {
            storage.save(&sample_assessment(i)).expect("Should save");
        }

        let recent = storage.list_recent(2).expect("Should list");
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn test_clear_removes_everything() {
        let storage = SqliteHistory::in_memory().expect("Should create db");

        storage.save(&sample_assessment(0)).expect("Should save");
        storage.clear().expect("Should clear");

        assert_eq!(storage.count().expect("Should count"), 0);
        assert!(storage.list().expect("Should list").is_empty());
    }

    #[test]
    fn test_file_backed_storage_persists() {
        let dir = tempfile::tempdir().expect("Should create tempdir");
        let db_path = dir.path().join("history.db");

        let assessment = sample_assessment(0);
        {
            let storage = SqliteHistory::new(&db_path).expect("Should create db");
            storage.save(&assessment).expect("Should save");
        }

        let reopened = SqliteHistory::new(&db_path).expect("Should reopen db");
        let loaded = reopened.list().expect("Should list");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], assessment);
    }
}
