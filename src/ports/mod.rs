//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (storage).

mod storage;

pub use storage::{HistoryStore, HISTORY_LIMIT};
