//! History port: Trait for persistent assessment storage.
//!
//! This trait abstracts the storage backend (SQLite) from the application logic.

use crate::domain::Assessment;

/// Maximum number of assessments retained in history.
///
/// Saving beyond the limit evicts the oldest entries.
pub const HISTORY_LIMIT: usize = 20;

/// Trait for local assessment history operations.
///
/// All data is stored locally and never transmitted.
pub trait HistoryStore: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save an assessment, then trim history to [`HISTORY_LIMIT`] entries
    /// by evicting the oldest.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save(&self, assessment: &Assessment) -> Result<(), Self::Error>;

    /// Load stored assessments, most recent first, at most
    /// [`HISTORY_LIMIT`] entries.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn list(&self) -> Result<Vec<Assessment>, Self::Error>;

    /// Load recent assessments (up to `limit`), most recent first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn list_recent(&self, limit: usize) -> Result<Vec<Assessment>, Self::Error>;

    /// Get the number of stored assessments.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn count(&self) -> Result<usize, Self::Error>;

    /// Delete all stored assessments.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn clear(&self) -> Result<(), Self::Error>;
}
