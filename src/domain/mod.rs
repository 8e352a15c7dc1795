//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external dependencies.
//! The scoring engine lives here and performs no I/O.

mod assessment;
mod history;
pub mod recommend;
pub mod scoring;

pub use assessment::{bmi_from, AssessmentRecord};
pub use history::Assessment;
pub use scoring::{FeatureContribution, RiskAssessment, RiskLevel};
