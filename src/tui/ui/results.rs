//! Assessment results view.

use std::path::PathBuf;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Assessment, RiskLevel};
use crate::tui::styles::MedicalTheme;

/// Outcome of the most recent export attempt, shown in the footer.
#[derive(Debug, Clone)]
pub enum ExportStatus {
    Saved(PathBuf),
    Failed(String),
}

/// Render the results screen
pub fn render_results(
    f: &mut Frame,
    area: Rect,
    assessment: &Assessment,
    status: Option<&ExportStatus>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_results_header(f, chunks[0]);
    render_results_content(f, chunks[1], assessment);
    render_results_footer(f, chunks[2], status);
}

fn render_results_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Assessment Results", MedicalTheme::title()),
        Span::styled(" │ Rule-Based Risk Estimate", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_results_content(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_risk_panel(f, columns[0], assessment);
    render_detail_panel(f, columns[1], assessment);
}

fn render_risk_panel(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let result = &assessment.result;

    let block = Block::default()
        .title(Span::styled(" Risk Estimate ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Risk level
            Constraint::Length(3), // Probability
            Constraint::Length(3), // Confidence
            Constraint::Length(2), // Stage
            Constraint::Min(0),    // Padding
        ])
        .margin(1)
        .split(inner);

    // Risk level (big display)
    let risk_style = MedicalTheme::risk_level(result.risk_level);
    let risk_icon = match result.risk_level {
        RiskLevel::Low => "OK",
        RiskLevel::Medium | RiskLevel::High => "!",
    };

    let risk_display = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} {}", risk_icon, result.risk_level.label()),
            risk_style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(Span::styled(
            result.risk_level.description(),
            MedicalTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(risk_display, chunks[0]);

    // Probability bar
    let prob_gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Risk Probability ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(risk_style)
        .percent((result.probability * 100.0) as u16)
        .label(format!("{:.1}%", result.probability * 100.0));
    f.render_widget(prob_gauge, chunks[1]);

    // Confidence bar
    let conf_gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Model Confidence ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::gauge(result.confidence))
        .percent((result.confidence * 100.0) as u16)
        .label(format!("{:.1}%", result.confidence * 100.0));
    f.render_widget(conf_gauge, chunks[2]);

    // Predicted stage ("N/A" when no disease is indicated)
    let stage_display = if result.stage == 0 {
        "N/A".to_string()
    } else {
        format!("Stage {}", result.stage)
    };
    let stage = Paragraph::new(Line::from(vec![
        Span::styled("Predicted Stage: ", MedicalTheme::text_secondary()),
        Span::styled(stage_display, MedicalTheme::text()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(stage, chunks[3]);
}

fn render_detail_panel(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let result = &assessment.result;
    let factor_rows = result.factors.len().max(1) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(factor_rows + 2), Constraint::Min(4)])
        .split(area);

    // Contributing factors with impact bars
    let factor_block = Block::default()
        .title(Span::styled(" Contributing Factors ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let factor_lines: Vec<Line> = if result.factors.is_empty() {
        vec![Line::from(Span::styled(
            " No elevated factors identified.",
            MedicalTheme::text_muted(),
        ))]
    } else {
        result
            .factors
            .iter()
            .map(|factor| {
                let bar = "█".repeat((factor.impact as usize).min(30));
                Line::from(vec![
                    Span::styled(format!(" {:<22}", factor.feature), MedicalTheme::text()),
                    Span::styled(bar, MedicalTheme::factor_impact(factor.impact)),
                    Span::styled(
                        format!(" {} pts ({})", factor.impact, factor.value),
                        MedicalTheme::text_secondary(),
                    ),
                ])
            })
            .collect()
    };

    let factors = Paragraph::new(factor_lines).block(factor_block);
    f.render_widget(factors, chunks[0]);

    // Recommendations
    let rec_block = Block::default()
        .title(Span::styled(" Recommendations ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let rec_lines: Vec<Line> = result
        .recommendations
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            Line::from(vec![
                Span::styled(format!(" {}. ", i + 1), MedicalTheme::key_hint()),
                Span::styled(rec.clone(), MedicalTheme::text()),
            ])
        })
        .collect();

    let recs = Paragraph::new(rec_lines)
        .block(rec_block)
        .wrap(Wrap { trim: true });
    f.render_widget(recs, chunks[1]);
}

fn render_results_footer(f: &mut Frame, area: Rect, status: Option<&ExportStatus>) {
    let content = match status {
        Some(ExportStatus::Saved(path)) => Line::from(vec![
            Span::styled("✓ ", MedicalTheme::success()),
            Span::styled(
                format!("Report saved to {}", path.display()),
                MedicalTheme::success(),
            ),
        ]),
        Some(ExportStatus::Failed(message)) => Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(
                format!("Export failed: {message}"),
                MedicalTheme::danger(),
            ),
        ]),
        None => Line::from(vec![
            Span::styled("[E] ", MedicalTheme::key_hint()),
            Span::styled("Export Report ", MedicalTheme::key_desc()),
            Span::styled("[C] ", MedicalTheme::key_hint()),
            Span::styled("Ask Questions ", MedicalTheme::key_desc()),
            Span::styled("[N] ", MedicalTheme::key_hint()),
            Span::styled("New Assessment ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Dashboard", MedicalTheme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
