//! Assessment history view.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::Assessment;
use crate::tui::styles::MedicalTheme;

/// History screen state for rendering and navigation.
#[derive(Default)]
pub struct HistoryState {
    pub entries: Vec<Assessment>,
    pub selected: usize,
    pub confirm_clear: bool,
    pub status_message: Option<String>,
}

impl HistoryState {
    /// Move selection down
    pub fn select_next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1).min(self.entries.len() - 1);
        }
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Currently highlighted entry, if any.
    pub fn selected_entry(&self) -> Option<&Assessment> {
        self.entries.get(self.selected)
    }
}

/// Render the history screen
pub fn render_history(f: &mut Frame, area: Rect, state: &HistoryState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // List
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_history_header(f, chunks[0], state);
    render_history_list(f, chunks[1], state);
    render_history_footer(f, chunks[2], state);
}

fn render_history_header(f: &mut Frame, area: Rect, state: &HistoryState) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Assessment History", MedicalTheme::title()),
        Span::styled(
            format!(" │ {} saved", state.entries.len()),
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_history_list(f: &mut Frame, area: Rect, state: &HistoryState) {
    let block = Block::default()
        .title(Span::styled(" Saved Assessments ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    if state.entries.is_empty() {
        let empty_msg = Paragraph::new(Line::from(vec![Span::styled(
            "No assessments yet. Press [N] on the dashboard to start.",
            MedicalTheme::text_muted(),
        )]))
        .block(block);
        f.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Line> = state
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = i == state.selected;
            let marker = if is_selected { "►" } else { " " };
            let date = entry
                .created_at
                .with_timezone(&Local)
                .format("%b %-d, %Y %H:%M")
                .to_string();
            let result = &entry.result;

            let row_style = if is_selected {
                MedicalTheme::selected()
            } else {
                MedicalTheme::text()
            };

            Line::from(vec![
                Span::styled(format!(" {marker} "), MedicalTheme::key_hint()),
                Span::styled(format!("{date:<22}"), row_style),
                Span::styled(
                    format!("{:<12}", result.risk_level.label()),
                    MedicalTheme::risk_level(result.risk_level),
                ),
                Span::styled(
                    format!("{:>6.1}%  ", result.probability * 100.0),
                    row_style,
                ),
                Span::styled(
                    if result.stage == 0 {
                        "Stage N/A".to_string()
                    } else {
                        format!("Stage {}", result.stage)
                    },
                    MedicalTheme::text_secondary(),
                ),
            ])
        })
        .collect();

    // Keep the selection in view when the list outgrows the panel
    let visible = area.height.saturating_sub(2) as usize;
    let offset = state.selected.saturating_sub(visible.saturating_sub(1));

    let list = Paragraph::new(rows).block(block).scroll((offset as u16, 0));
    f.render_widget(list, area);
}

fn render_history_footer(f: &mut Frame, area: Rect, state: &HistoryState) {
    let content = if state.confirm_clear {
        Line::from(vec![
            Span::styled("Delete ALL saved assessments? ", MedicalTheme::warning()),
            Span::styled("[Y] ", MedicalTheme::key_hint()),
            Span::styled("Yes ", MedicalTheme::key_desc()),
            Span::styled("[N] ", MedicalTheme::key_hint()),
            Span::styled("No", MedicalTheme::key_desc()),
        ])
    } else if let Some(message) = &state.status_message {
        Line::from(vec![
            Span::styled("✓ ", MedicalTheme::success()),
            Span::styled(message.clone(), MedicalTheme::success()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("View ", MedicalTheme::key_desc()),
            Span::styled("[E] ", MedicalTheme::key_hint()),
            Span::styled("Export ", MedicalTheme::key_desc()),
            Span::styled("[X] ", MedicalTheme::key_hint()),
            Span::styled("Clear All ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Dashboard", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
