//! # EndoSight
#![allow(non_snake_case)]
//!
//! Terminal endometriosis risk self-assessment with a local history and a
//! scripted assistant.
//!
//! This crate provides:
//! - A deterministic rule-table risk scorer over symptom and biomarker input
//! - SQLite-backed assessment history, capped to the most recent entries
//! - Plain-text report export and a templated FAQ assistant
//! - Terminal UI for local-only use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (AssessmentRecord, RiskAssessment, Assessment)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (SQLite, log sanitizing)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, AssessmentRecord, RiskAssessment, RiskLevel};

/// Result type for EndoSight operations
pub type Result<T> = std::result::Result<T, EndosightError>;

/// Main error type for EndoSight
#[derive(Debug, thiserror::Error)]
pub enum EndosightError {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("Invalid assessment data: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
