//! Dashboard view: Main overview screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::RiskLevel;
use crate::tui::styles::MedicalTheme;

/// Risk distribution over the most recent assessments.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecentSummary {
    pub total: usize,
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

/// Dashboard state for rendering.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub database_ok: bool,
    pub assessment_count: usize,
    pub latest: Option<(RiskLevel, f64)>,
}

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState, recent: RecentSummary) {
    // Split into header and main content
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_main_content(f, chunks[1], state, recent);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("EndoSight", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled(
            "Endometriosis Risk Self-Assessment",
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

fn render_main_content(f: &mut Frame, area: Rect, state: &DashboardState, recent: RecentSummary) {
    // Split into left (status) and right (recent assessments)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Status panels
            Constraint::Percentage(60), // Recent assessments
        ])
        .split(area);

    render_status_panels(f, chunks[0], state);
    render_recent_summary(f, chunks[1], recent);
}

fn render_status_panels(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // System status
            Constraint::Min(0),    // Quick actions
        ])
        .margin(1)
        .split(area);

    // System Status
    let mut status_items = vec![
        format_status_item("Assessment History Database", state.database_ok),
        Line::from(vec![
            Span::styled("  Assessments: ", MedicalTheme::text_secondary()),
            Span::styled(state.assessment_count.to_string(), MedicalTheme::text()),
        ]),
    ];

    if let Some((level, probability)) = state.latest {
        status_items.push(Line::from(vec![
            Span::styled("  Latest: ", MedicalTheme::text_secondary()),
            Span::styled(level.label().to_string(), MedicalTheme::risk_level(level)),
            Span::styled(
                format!(" ({:.1}%)", probability * 100.0),
                MedicalTheme::text_muted(),
            ),
        ]));
    } else {
        status_items.push(Line::from(vec![
            Span::styled("  Latest: ", MedicalTheme::text_secondary()),
            Span::styled("none", MedicalTheme::text_muted()),
        ]));
    }

    let status_block = Block::default()
        .title(Span::styled(" System Status ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let status_list = Paragraph::new(status_items).block(status_block);
    f.render_widget(status_list, chunks[0]);

    // Quick Actions
    let actions = vec![
        Line::from(vec![
            Span::styled("[N] ", MedicalTheme::key_hint()),
            Span::styled("New Assessment", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[H] ", MedicalTheme::key_hint()),
            Span::styled("History", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[C] ", MedicalTheme::key_hint()),
            Span::styled("Ask Questions", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[Q] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ]),
    ];

    let actions_block = Block::default()
        .title(Span::styled(" Quick Actions ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let actions_list = Paragraph::new(actions).block(actions_block);
    f.render_widget(actions_list, chunks[1]);
}

fn format_status_item(label: &str, ok: bool) -> Line<'static> {
    let (icon, style) = if ok {
        ("OK", MedicalTheme::success())
    } else {
        ("FAIL", MedicalTheme::danger())
    };

    Line::from(vec![
        Span::styled(format!("  {icon} "), style),
        Span::styled(label.to_string(), MedicalTheme::text()),
    ])
}

fn render_recent_summary(f: &mut Frame, area: Rect, recent: RecentSummary) {
    let block = Block::default()
        .title(Span::styled(" Recent Activity ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    if recent.total == 0 {
        let empty_msg = Paragraph::new(Line::from(vec![Span::styled(
            "No assessments yet. Press [N] to start.",
            MedicalTheme::text_muted(),
        )]))
        .block(block);
        f.render_widget(empty_msg, area);
        return;
    }

    let total = recent.total;

    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Last ", MedicalTheme::text_secondary()),
            Span::styled(total.to_string(), MedicalTheme::text()),
            Span::styled(" assessments by risk level", MedicalTheme::text_muted()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Low: ", MedicalTheme::text_secondary()),
            Span::styled(recent.low.to_string(), MedicalTheme::risk_level(RiskLevel::Low)),
            Span::styled("  ", MedicalTheme::text()),
            Span::styled("Medium: ", MedicalTheme::text_secondary()),
            Span::styled(
                recent.medium.to_string(),
                MedicalTheme::risk_level(RiskLevel::Medium),
            ),
            Span::styled("  ", MedicalTheme::text()),
            Span::styled("High: ", MedicalTheme::text_secondary()),
            Span::styled(recent.high.to_string(), MedicalTheme::risk_level(RiskLevel::High)),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press [H] to browse full results, or [C] to ask about the latest one.",
            MedicalTheme::text_muted(),
        )]),
    ];

    let p = Paragraph::new(lines).block(Block::default());
    f.render_widget(p, inner);
}
