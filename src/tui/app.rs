//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::sqlite::SqliteHistory;
use crate::application::{explain, export, AssessmentService};
use crate::domain::{Assessment, RiskLevel};

use super::ui::{
    chat::{render_chat, ChatState},
    dashboard::{render_dashboard, DashboardState, RecentSummary},
    history::{render_history, HistoryState},
    intake::{render_intake, IntakeFormState, IntakeStep},
    render_disclaimer,
    results::{render_results, ExportStatus},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Intake,
    Results,
    History,
    Chat,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Assessment service
    service: AssessmentService<SqliteHistory>,

    /// Directory reports are written to
    export_dir: PathBuf,

    /// Dashboard state
    dashboard_state: DashboardState,

    /// Intake form state
    intake_state: IntakeFormState,

    /// History screen state
    history_state: HistoryState,

    /// Chat screen state
    chat_state: ChatState,

    /// Assessment shown on the results screen and discussed in chat
    current_assessment: Option<Assessment>,

    /// Outcome of the last export attempt from the results screen
    export_status: Option<ExportStatus>,

    /// Screen to return to when leaving chat
    chat_return: Screen,
}

impl App {
    /// Create a new application instance using default adapters.
    ///
    /// This is a convenience method that constructs the storage adapter
    /// internally. For more control, use `with_dependencies()`.
    ///
    /// # Errors
    /// Returns error if the history database cannot be opened.
    pub fn new() -> Result<Self> {
        // Initialize storage
        let db_path = std::env::var("ENDOSIGHT_DB_PATH")
            .or_else(|_| std::env::var("Endosight_DB_PATH"))
            .unwrap_or_else(|_| "endosight.db".to_string());
        let storage = Arc::new(SqliteHistory::new(&db_path)?);

        let service = AssessmentService::new(storage);

        // Reports land next to the database unless configured otherwise
        let export_dir = std::env::var("ENDOSIGHT_EXPORT_DIR")
            .or_else(|_| std::env::var("Endosight_EXPORT_DIR"))
            .unwrap_or_else(|_| ".".to_string());

        Ok(Self::with_dependencies(service, PathBuf::from(export_dir)))
    }

    /// Create application with injected dependencies (Composition Root pattern).
    ///
    /// This allows `main.rs` or tests to construct the storage adapter
    /// externally, providing proper dependency injection.
    #[must_use]
    pub fn with_dependencies(service: AssessmentService<SqliteHistory>, export_dir: PathBuf) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            service,
            export_dir,
            dashboard_state: DashboardState::default(),
            intake_state: IntakeFormState::default(),
            history_state: HistoryState::default(),
            chat_state: ChatState::default(),
            current_assessment: None,
            export_status: None,
            chat_return: Screen::Dashboard,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Initial state update
        self.update_dashboard_state();

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Min(0),
                        Constraint::Length(3),
                    ])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Dashboard => {
                        // Fetch only for render and drop immediately after.
                        let recent_summary: RecentSummary = match self.service.recent(10) {
                            Ok(entries) => {
                                let mut summary = RecentSummary::default();
                                summary.total = entries.len();
                                for entry in entries.iter() {
                                    match entry.result.risk_level {
                                        RiskLevel::Low => summary.low += 1,
                                        RiskLevel::Medium => summary.medium += 1,
                                        RiskLevel::High => summary.high += 1,
                                    }
                                }
                                summary
                            }
                            Err(_) => RecentSummary::default(),
                        };

                        render_dashboard(f, content_area, &self.dashboard_state, recent_summary);
                    }
                    Screen::Intake => render_intake(f, content_area, &self.intake_state),
                    Screen::Results => {
                        if let Some(assessment) = &self.current_assessment {
                            render_results(
                                f,
                                content_area,
                                assessment,
                                self.export_status.as_ref(),
                            );
                        }
                    }
                    Screen::History => render_history(f, content_area, &self.history_state),
                    Screen::Chat => render_chat(f, content_area, &self.chat_state),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Intake => self.handle_intake_key(key),
            Screen::Results => self.handle_results_key(key),
            Screen::History => self.handle_history_key(key),
            Screen::Chat => self.handle_chat_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.intake_state = IntakeFormState::default();
                self.screen = Screen::Intake;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.load_history();
                self.screen = Screen::History;
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.enter_chat(Screen::Dashboard);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_intake_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                if !self.intake_state.prev_step() {
                    self.intake_state.clear_sensitive();
                    self.screen = Screen::Dashboard;
                }
            }
            KeyCode::Up => {
                self.intake_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.intake_state.next_field();
            }
            KeyCode::Left => {
                self.intake_state.slider_left();
            }
            KeyCode::Right => {
                self.intake_state.slider_right();
            }
            KeyCode::Char(' ') => {
                self.intake_state.toggle();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.intake_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.intake_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.intake_state.delete_char();
            }
            KeyCode::Delete => {
                self.intake_state.clear_field();
            }
            KeyCode::Enter => {
                self.advance_intake();
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('e') | KeyCode::Char('E') => {
                self.export_current();
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.enter_chat(Screen::Results);
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.intake_state = IntakeFormState::default();
                self.export_status = None;
                self.screen = Screen::Intake;
            }
            KeyCode::Enter | KeyCode::Esc => {
                self.export_status = None;
                self.update_dashboard_state();
                self.screen = Screen::Dashboard;
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        // Confirmation prompt takes over until answered
        if self.history_state.confirm_clear {
            match key {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    match self.service.clear_history() {
                        Ok(()) => {
                            self.history_state.status_message =
                                Some("History cleared".to_string());
                            self.current_assessment = None;
                        }
                        Err(e) => {
                            tracing::error!("Failed to clear history: {}", e);
                        }
                    }
                    self.history_state.confirm_clear = false;
                    self.history_state.entries.clear();
                    self.history_state.selected = 0;
                    self.update_dashboard_state();
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.history_state.confirm_clear = false;
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Esc => {
                self.update_dashboard_state();
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up => {
                self.history_state.select_prev();
            }
            KeyCode::Down => {
                self.history_state.select_next();
            }
            KeyCode::Enter => {
                if let Some(entry) = self.history_state.selected_entry() {
                    self.current_assessment = Some(entry.clone());
                    self.export_status = None;
                    self.screen = Screen::Results;
                }
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                let outcome = self
                    .history_state
                    .selected_entry()
                    .map(|entry| export::write_report(entry, &self.export_dir));
                match outcome {
                    Some(Ok(path)) => {
                        self.history_state.status_message =
                            Some(format!("Report saved to {}", path.display()));
                    }
                    Some(Err(e)) => {
                        tracing::error!("Report export failed: {}", e);
                    }
                    None => {}
                }
            }
            KeyCode::Char('x') | KeyCode::Char('X') => {
                if !self.history_state.entries.is_empty() {
                    self.history_state.confirm_clear = true;
                }
            }
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.chat_state.clear_sensitive();
                self.screen = self.chat_return;
            }
            KeyCode::Enter => {
                let question = std::mem::take(&mut self.chat_state.input);
                if question.trim().is_empty() {
                    return;
                }
                let reply = explain::respond(&question, self.current_assessment.as_ref());
                self.chat_state.push_user(question);
                self.chat_state.push_assistant(reply);
            }
            KeyCode::Char(c) => {
                self.chat_state.input.push(c);
            }
            KeyCode::Backspace => {
                self.chat_state.input.pop();
            }
            _ => {}
        }
    }

    fn advance_intake(&mut self) {
        if let Err(e) = self.intake_state.validate_step() {
            self.intake_state.error_message = Some(e);
            return;
        }

        if self.intake_state.step == IntakeStep::Biomarkers {
            self.submit_intake();
        } else {
            self.intake_state.next_step();
        }
    }

    fn submit_intake(&mut self) {
        match self.intake_state.to_record() {
            Ok(record) => match self.service.submit(record) {
                Ok(assessment) => {
                    self.current_assessment = Some(assessment);
                    self.export_status = None;

                    // Clear plaintext buffers from the UI immediately.
                    self.intake_state.clear_sensitive();
                    self.screen = Screen::Results;
                }
                Err(e) => {
                    self.intake_state.error_message = Some(e.to_string());
                }
            },
            Err(e) => {
                self.intake_state.error_message = Some(e);
            }
        }
    }

    fn export_current(&mut self) {
        let Some(assessment) = &self.current_assessment else {
            return;
        };

        match export::write_report(assessment, &self.export_dir) {
            Ok(path) => {
                self.export_status = Some(ExportStatus::Saved(path));
            }
            Err(e) => {
                tracing::error!("Report export failed: {}", e);
                self.export_status = Some(ExportStatus::Failed(e.to_string()));
            }
        }
    }

    fn enter_chat(&mut self, from: Screen) {
        // Chat needs an assessment for context; fall back to the latest saved one.
        if self.current_assessment.is_none() {
            match self.service.recent(1) {
                Ok(mut entries) => self.current_assessment = entries.pop(),
                Err(e) => tracing::error!("Failed to load latest assessment: {}", e),
            }
        }

        let Some(assessment) = &self.current_assessment else {
            return;
        };

        self.chat_state.clear_sensitive();
        self.chat_state.push_assistant(explain::greeting(assessment));
        self.chat_return = from;
        self.screen = Screen::Chat;
    }

    fn load_history(&mut self) {
        match self.service.history() {
            Ok(entries) => {
                self.history_state.entries = entries;
                self.history_state.selected = 0;
                self.history_state.confirm_clear = false;
                self.history_state.status_message = None;
            }
            Err(e) => {
                tracing::error!("Failed to load history: {}", e);
            }
        }
    }

    fn update_dashboard_state(&mut self) {
        match self.service.count() {
            Ok(count) => {
                self.dashboard_state.database_ok = true;
                self.dashboard_state.assessment_count = count;
            }
            Err(e) => {
                // Fail-closed in UI: show the failure, but don't crash the app.
                self.dashboard_state.database_ok = false;
                tracing::error!("Failed to read assessment count: {}", e);
            }
        }

        self.dashboard_state.latest = match self.service.recent(1) {
            Ok(entries) => entries
                .first()
                .map(|a| (a.result.risk_level, a.result.probability)),
            Err(_) => None,
        };
    }
}
