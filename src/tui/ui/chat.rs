//! Question-and-answer view for discussing assessment results.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::styles::MedicalTheme;
use zeroize::Zeroize;

/// One exchange in the conversation.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub from_user: bool,
    pub text: String,
}

/// Chat screen state
#[derive(Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
}

impl ChatState {
    /// Append a user message
    pub fn push_user(&mut self, text: String) {
        self.messages.push(ChatMessage {
            from_user: true,
            text,
        });
    }

    /// Append an assistant message
    pub fn push_assistant(&mut self, text: String) {
        self.messages.push(ChatMessage {
            from_user: false,
            text,
        });
    }

    /// Wipe the conversation from memory.
    ///
    /// Messages quote assessment results, so buffers are zeroized rather
    /// than just dropped.
    pub fn clear_sensitive(&mut self) {
        for message in self.messages.iter_mut() {
            message.text.zeroize();
        }
        self.messages.clear();
        self.input.zeroize();
        self.input.clear();
    }
}

/// Render the chat screen
pub fn render_chat(f: &mut Frame, area: Rect, state: &ChatState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Conversation
            Constraint::Length(3), // Input
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_chat_header(f, chunks[0]);
    render_conversation(f, chunks[1], state);
    render_chat_input(f, chunks[2], state);
    render_chat_footer(f, chunks[3]);
}

fn render_chat_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Ask About Your Results", MedicalTheme::title()),
        Span::styled(" │ Educational Information Only", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_conversation(f: &mut Frame, area: Rect, state: &ChatState) {
    let block = Block::default()
        .title(Span::styled(" Conversation ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let width = area.width.saturating_sub(4).max(20) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for message in &state.messages {
        let (prefix, prefix_style) = if message.from_user {
            ("You: ", MedicalTheme::focused())
        } else {
            ("Assistant: ", MedicalTheme::info())
        };

        let mut first = true;
        for paragraph in message.text.split('\n') {
            for row in wrap_text(paragraph, width.saturating_sub(prefix.len())) {
                if first {
                    lines.push(Line::from(vec![
                        Span::styled(format!(" {prefix}"), prefix_style),
                        Span::styled(row, MedicalTheme::text()),
                    ]));
                    first = false;
                } else {
                    lines.push(Line::from(vec![
                        Span::raw(" ".repeat(prefix.len() + 1)),
                        Span::styled(row, MedicalTheme::text()),
                    ]));
                }
            }
        }
        lines.push(Line::from(""));
    }

    // Pin the view to the newest message
    let visible = area.height.saturating_sub(2) as usize;
    let offset = lines.len().saturating_sub(visible);

    let conversation = Paragraph::new(lines).block(block).scroll((offset as u16, 0));
    f.render_widget(conversation, area);
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            rows.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

fn render_chat_input(f: &mut Frame, area: Rect, state: &ChatState) {
    let block = Block::default()
        .title(Span::styled(" Your Question ", MedicalTheme::focused()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let value_display = if state.input.is_empty() {
        Span::styled(
            "Type a question, or 'summary' for a quick explanation",
            MedicalTheme::text_muted(),
        )
    } else {
        Span::styled(&state.input, MedicalTheme::text())
    };

    let input = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        value_display,
        Span::styled("▌", MedicalTheme::focused()),
    ]))
    .block(block);

    f.render_widget(input, area);
}

fn render_chat_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Send ", MedicalTheme::key_desc()),
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled("Back", MedicalTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
