//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a professional medical-themed interface for:
//! - Dashboard with history overview
//! - Three-step assessment intake
//! - Risk results with factor breakdown
//! - Assessment history and report export
//! - Question-and-answer chat about results

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
