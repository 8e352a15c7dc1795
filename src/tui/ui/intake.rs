//! Assessment intake form: three-step questionnaire.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{bmi_from, AssessmentRecord};
use crate::tui::styles::MedicalTheme;
use zeroize::Zeroize;

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeStep {
    Basics,
    Symptoms,
    Biomarkers,
}

impl IntakeStep {
    fn title(self) -> &'static str {
        match self {
            Self::Basics => "Step 1 of 3: Basic Information",
            Self::Symptoms => "Step 2 of 3: Symptoms & History",
            Self::Biomarkers => "Step 3 of 3: Biomarkers & Lab Results",
        }
    }
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub min: f64,
    pub max: f64,
}

/// Symptom severity slider, 0 to 10.
#[derive(Debug, Clone)]
pub struct SliderField {
    pub label: &'static str,
    pub value: u8,
}

/// Yes/no history toggle.
#[derive(Debug, Clone)]
pub struct ToggleField {
    pub label: &'static str,
    pub value: bool,
}

// Basics field indexes
const AGE: usize = 0;
const MENARCHE: usize = 1;
const WEIGHT: usize = 2;
const HEIGHT: usize = 3;
const BMI: usize = 4;
const CYCLE: usize = 5;

const SLIDER_MAX: u8 = 10;

/// Intake form state
pub struct IntakeFormState {
    pub step: IntakeStep,
    pub basics: Vec<FormField>,
    pub sliders: Vec<SliderField>,
    pub toggles: Vec<ToggleField>,
    pub biomarkers: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for IntakeFormState {
    fn default() -> Self {
        Self {
            step: IntakeStep::Basics,
            basics: vec![
                FormField {
                    label: "Age",
                    hint: "years (18-60)",
                    value: String::new(),
                    min: 18.0,
                    max: 60.0,
                },
                FormField {
                    label: "Age at First Period",
                    hint: "years (8-18)",
                    value: String::new(),
                    min: 8.0,
                    max: 18.0,
                },
                FormField {
                    label: "Weight",
                    hint: "kg, optional (30-250)",
                    value: String::new(),
                    min: 30.0,
                    max: 250.0,
                },
                FormField {
                    label: "Height",
                    hint: "cm, optional (100-230)",
                    value: String::new(),
                    min: 100.0,
                    max: 230.0,
                },
                FormField {
                    label: "BMI",
                    hint: "auto from weight/height, or enter manually",
                    value: String::new(),
                    min: 10.0,
                    max: 60.0,
                },
                FormField {
                    label: "Cycle Length",
                    hint: "days (20-40)",
                    value: String::new(),
                    min: 20.0,
                    max: 40.0,
                },
            ],
            sliders: vec![
                SliderField {
                    label: "Menstrual Cramps (Dysmenorrhea)",
                    value: 5,
                },
                SliderField {
                    label: "Pelvic Pain (non-menstrual)",
                    value: 5,
                },
                SliderField {
                    label: "Pain During Intercourse (Dyspareunia)",
                    value: 5,
                },
                SliderField {
                    label: "Painful Bowel Movements (Dyschezia)",
                    value: 5,
                },
                SliderField {
                    label: "Urinary Symptoms",
                    value: 5,
                },
                SliderField {
                    label: "Mental Health Impact",
                    value: 5,
                },
            ],
            toggles: vec![
                ToggleField {
                    label: "Family History of Endometriosis",
                    value: false,
                },
                ToggleField {
                    label: "History of Infertility",
                    value: false,
                },
            ],
            biomarkers: vec![
                FormField {
                    label: "CA-125 Level",
                    hint: "U/mL, blank if unknown (normal: <35)",
                    value: String::new(),
                    min: 0.0,
                    max: 500.0,
                },
                FormField {
                    label: "CRP Level",
                    hint: "mg/L, blank if unknown (normal: <10)",
                    value: String::new(),
                    min: 0.0,
                    max: 300.0,
                },
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl IntakeFormState {
    fn field_count(&self) -> usize {
        match self.step {
            IntakeStep::Basics => self.basics.len(),
            IntakeStep::Symptoms => self.sliders.len() + self.toggles.len(),
            IntakeStep::Biomarkers => self.biomarkers.len(),
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.field_count();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.field_count() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current text field
    pub fn input_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.') {
            return;
        }
        match self.step {
            IntakeStep::Basics => {
                self.basics[self.selected_field].value.push(c);
                self.sync_bmi();
            }
            IntakeStep::Symptoms => {}
            IntakeStep::Biomarkers => {
                self.biomarkers[self.selected_field].value.push(c);
            }
        }
        self.error_message = None;
    }

    /// Delete the last character of the current text field
    pub fn delete_char(&mut self) {
        match self.step {
            IntakeStep::Basics => {
                self.basics[self.selected_field].value.pop();
                self.sync_bmi();
            }
            IntakeStep::Symptoms => {}
            IntakeStep::Biomarkers => {
                self.biomarkers[self.selected_field].value.pop();
            }
        }
    }

    /// Clear the current text field
    pub fn clear_field(&mut self) {
        match self.step {
            IntakeStep::Basics => {
                self.basics[self.selected_field].value.clear();
                self.sync_bmi();
            }
            IntakeStep::Symptoms => {}
            IntakeStep::Biomarkers => {
                self.biomarkers[self.selected_field].value.clear();
            }
        }
    }

    /// Decrease the selected slider by one
    pub fn slider_left(&mut self) {
        if self.step != IntakeStep::Symptoms {
            return;
        }
        if let Some(slider) = self.sliders.get_mut(self.selected_field) {
            slider.value = slider.value.saturating_sub(1);
        }
    }

    /// Increase the selected slider by one
    pub fn slider_right(&mut self) {
        if self.step != IntakeStep::Symptoms {
            return;
        }
        if let Some(slider) = self.sliders.get_mut(self.selected_field) {
            slider.value = (slider.value + 1).min(SLIDER_MAX);
        }
    }

    /// Flip the selected yes/no toggle
    pub fn toggle(&mut self) {
        if self.step != IntakeStep::Symptoms {
            return;
        }
        let index = self.selected_field.wrapping_sub(self.sliders.len());
        if let Some(toggle) = self.toggles.get_mut(index) {
            toggle.value = !toggle.value;
        }
    }

    // Keep the BMI field in sync while weight and height are edited
    fn sync_bmi(&mut self) {
        let weight: Option<f64> = self.basics[WEIGHT].value.parse().ok();
        let height: Option<f64> = self.basics[HEIGHT].value.parse().ok();
        if let (Some(w), Some(h)) = (weight, height) {
            if let Some(bmi) = bmi_from(w, h) {
                self.basics[BMI].value = format!("{bmi:.2}");
            }
        }
    }

    /// Validate the current step. `Ok` means the step is ready to leave.
    pub fn validate_step(&self) -> Result<(), String> {
        match self.step {
            IntakeStep::Basics => {
                parse_required(&self.basics[AGE])?;
                parse_required(&self.basics[MENARCHE])?;
                parse_optional(&self.basics[WEIGHT])?;
                parse_optional(&self.basics[HEIGHT])?;
                parse_required(&self.basics[BMI])?;
                parse_required(&self.basics[CYCLE])?;
                Ok(())
            }
            // Sliders and toggles are bounded by construction
            IntakeStep::Symptoms => Ok(()),
            IntakeStep::Biomarkers => {
                for field in self.biomarkers.iter() {
                    parse_optional(field)?;
                }
                Ok(())
            }
        }
    }

    /// Advance to the next step, resetting selection.
    pub fn next_step(&mut self) {
        self.step = match self.step {
            IntakeStep::Basics => IntakeStep::Symptoms,
            IntakeStep::Symptoms | IntakeStep::Biomarkers => IntakeStep::Biomarkers,
        };
        self.selected_field = 0;
        self.error_message = None;
    }

    /// Go back one step. Returns false when already on the first step.
    pub fn prev_step(&mut self) -> bool {
        let previous = match self.step {
            IntakeStep::Basics => return false,
            IntakeStep::Symptoms => IntakeStep::Basics,
            IntakeStep::Biomarkers => IntakeStep::Symptoms,
        };
        self.step = previous;
        self.selected_field = 0;
        self.error_message = None;
        true
    }

    /// Wipe all text buffers from memory and reset the form.
    ///
    /// Intended to be called when the questionnaire is submitted or
    /// abandoned so plaintext health data does not persist in UI state.
    pub fn clear_sensitive(&mut self) {
        for field in self.basics.iter_mut().chain(self.biomarkers.iter_mut()) {
            field.value.zeroize();
            field.value.clear();
        }
        for slider in self.sliders.iter_mut() {
            slider.value = 5;
        }
        for toggle in self.toggles.iter_mut() {
            toggle.value = false;
        }
        self.step = IntakeStep::Basics;
        self.selected_field = 0;
        self.error_message = None;
    }

    /// Validate all steps and convert to an [`AssessmentRecord`].
    pub fn to_record(&self) -> Result<AssessmentRecord, String> {
        let age = parse_required(&self.basics[AGE])? as u32;
        let age_of_menarche = parse_required(&self.basics[MENARCHE])? as u32;
        let bmi = parse_required(&self.basics[BMI])?;
        let cycle_length = parse_required(&self.basics[CYCLE])? as u32;

        let ca125_level = parse_optional(&self.biomarkers[0])?.unwrap_or(0.0);
        let crp_level = parse_optional(&self.biomarkers[1])?.unwrap_or(0.0);

        Ok(AssessmentRecord {
            age,
            bmi,
            cycle_length,
            age_of_menarche,
            dysmenorrhea_score: self.sliders[0].value,
            pelvic_pain_score: self.sliders[1].value,
            dyspareunia_score: self.sliders[2].value,
            dyschezia_score: self.sliders[3].value,
            urinary_symptoms_score: self.sliders[4].value,
            mental_health_score: self.sliders[5].value,
            family_history: self.toggles[0].value,
            infertility_status: self.toggles[1].value,
            ca125_level,
            crp_level,
        })
    }

    /// Load sample data for a quick walkthrough
    pub fn load_sample_data(&mut self) {
        let sample = [
            ("65", WEIGHT),
            ("165", HEIGHT),
            ("30", AGE),
            ("12", MENARCHE),
            ("28", CYCLE),
        ];
        for (value, index) in sample {
            self.basics[index].value = value.to_string();
        }
        self.sync_bmi();

        let scores = [8, 8, 4, 0, 0, 3];
        for (slider, score) in self.sliders.iter_mut().zip(scores) {
            slider.value = score;
        }
        self.toggles[0].value = true;
        self.toggles[1].value = false;

        self.biomarkers[0].value = "40".to_string();
        self.biomarkers[1].value = "5".to_string();
        self.error_message = None;
    }
}

fn parse_required(field: &FormField) -> Result<f64, String> {
    let value: f64 = field
        .value
        .parse()
        .map_err(|_| format!("{}: Invalid number", field.label))?;

    if value < field.min || value > field.max {
        return Err(format!(
            "{}: Value must be between {} and {}",
            field.label, field.min, field.max
        ));
    }

    Ok(value)
}

fn parse_optional(field: &FormField) -> Result<Option<f64>, String> {
    if field.value.is_empty() {
        return Ok(None);
    }
    parse_required(field).map(Some)
}

/// Render the intake questionnaire
pub fn render_intake(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_intake_header(f, chunks[0], state);
    match state.step {
        IntakeStep::Basics => render_field_grid(f, chunks[1], &state.basics, state.selected_field),
        IntakeStep::Symptoms => render_symptoms(f, chunks[1], state),
        IntakeStep::Biomarkers => render_biomarkers(f, chunks[1], state),
    }
    render_intake_footer(f, chunks[2], state);
}

fn render_intake_header(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("New Assessment", MedicalTheme::title()),
        Span::styled(
            format!(" │ {}", state.step.title()),
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

fn render_field_grid(f: &mut Frame, area: Rect, fields: &[FormField], selected: usize) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (fields.len() + 1) / 2;

    render_field_column(f, columns[0], &fields[..mid], 0, selected);
    render_field_column(f, columns[1], &fields[mid..], mid, selected);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        };

        let title_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = if field.value.is_empty() {
            Span::styled(field.hint, MedicalTheme::text_muted())
        } else {
            Span::styled(&field.value, MedicalTheme::text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected {
                Span::styled("▌", MedicalTheme::focused())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}

fn render_symptoms(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(state.sliders.len() as u16 + 3),
            Constraint::Min(4),
        ])
        .margin(1)
        .split(area);

    // Severity sliders
    let slider_block = Block::default()
        .title(Span::styled(
            " Symptom Severity (0 = none, 10 = severe) ",
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let mut lines = Vec::new();
    for (i, slider) in state.sliders.iter().enumerate() {
        let is_selected = i == state.selected_field;
        let label_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let filled = "█".repeat(slider.value as usize);
        let empty = "░".repeat((SLIDER_MAX - slider.value) as usize);
        let marker = if is_selected { "►" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), MedicalTheme::key_hint()),
            Span::styled(format!("{:<38}", slider.label), label_style),
            Span::styled(filled, MedicalTheme::factor_impact(u32::from(slider.value) * 3)),
            Span::styled(empty, MedicalTheme::text_muted()),
            Span::styled(format!(" {}/10", slider.value), MedicalTheme::text()),
        ]));
    }

    let sliders = Paragraph::new(lines).block(slider_block);
    f.render_widget(sliders, chunks[0]);

    // Yes/no history toggles
    let toggle_block = Block::default()
        .title(Span::styled(" Medical History ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let mut toggle_lines = Vec::new();
    for (i, toggle) in state.toggles.iter().enumerate() {
        let is_selected = state.sliders.len() + i == state.selected_field;
        let label_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };
        let (mark, mark_style) = if toggle.value {
            ("[X]", MedicalTheme::success())
        } else {
            ("[ ]", MedicalTheme::text_muted())
        };
        let marker = if is_selected { "►" } else { " " };

        toggle_lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), MedicalTheme::key_hint()),
            Span::styled(format!("{mark} "), mark_style),
            Span::styled(toggle.label, label_style),
        ]));
    }

    let toggles = Paragraph::new(toggle_lines).block(toggle_block);
    f.render_widget(toggles, chunks[1]);
}

fn render_biomarkers(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .margin(1)
        .split(area);

    render_field_grid(f, chunks[0], &state.biomarkers, state.selected_field);
    render_review(f, chunks[1], state);
}

fn render_review(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let block = Block::default()
        .title(Span::styled(" Review ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let value_of = |field: &FormField| {
        if field.value.is_empty() {
            "-".to_string()
        } else {
            field.value.clone()
        }
    };

    let pain: u32 = state.sliders[..3].iter().map(|s| u32::from(s.value)).sum();
    let digestive: u32 = state.sliders[3..5].iter().map(|s| u32::from(s.value)).sum();
    let yes_no = |v: bool| if v { "Yes" } else { "No" };

    let lines = vec![
        Line::from(vec![
            Span::styled("  Age: ", MedicalTheme::text_secondary()),
            Span::styled(value_of(&state.basics[AGE]), MedicalTheme::text()),
            Span::styled("   BMI: ", MedicalTheme::text_secondary()),
            Span::styled(value_of(&state.basics[BMI]), MedicalTheme::text()),
            Span::styled("   Cycle: ", MedicalTheme::text_secondary()),
            Span::styled(value_of(&state.basics[CYCLE]), MedicalTheme::text()),
            Span::styled("   First period: ", MedicalTheme::text_secondary()),
            Span::styled(value_of(&state.basics[MENARCHE]), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Pain composite: ", MedicalTheme::text_secondary()),
            Span::styled(format!("{pain}/30"), MedicalTheme::text()),
            Span::styled("   Digestive/urinary composite: ", MedicalTheme::text_secondary()),
            Span::styled(format!("{digestive}/20"), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Family history: ", MedicalTheme::text_secondary()),
            Span::styled(yes_no(state.toggles[0].value), MedicalTheme::text()),
            Span::styled("   Infertility: ", MedicalTheme::text_secondary()),
            Span::styled(yes_no(state.toggles[1].value), MedicalTheme::text()),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Check the values above, then press [Enter] to complete the assessment.",
            MedicalTheme::text_muted(),
        )]),
    ];

    let review = Paragraph::new(lines).block(block);
    f.render_widget(review, area);
}

fn render_intake_footer(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        let mut spans = vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
        ];
        if state.step == IntakeStep::Symptoms {
            spans.push(Span::styled("[←→] ", MedicalTheme::key_hint()));
            spans.push(Span::styled("Adjust ", MedicalTheme::key_desc()));
            spans.push(Span::styled("[Space] ", MedicalTheme::key_hint()));
            spans.push(Span::styled("Toggle ", MedicalTheme::key_desc()));
        }
        spans.push(Span::styled("[Enter] ", MedicalTheme::key_hint()));
        spans.push(Span::styled(
            if state.step == IntakeStep::Biomarkers {
                "Submit "
            } else {
                "Next Step "
            },
            MedicalTheme::key_desc(),
        ));
        spans.push(Span::styled("[S] ", MedicalTheme::key_hint()));
        spans.push(Span::styled("Sample Data ", MedicalTheme::key_desc()));
        spans.push(Span::styled("[Esc] ", MedicalTheme::key_hint()));
        spans.push(Span::styled("Back", MedicalTheme::key_desc()));
        Line::from(spans)
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_basics(state: &mut IntakeFormState) {
        state.basics[AGE].value = "30".to_string();
        state.basics[MENARCHE].value = "12".to_string();
        state.basics[BMI].value = "23.88".to_string();
        state.basics[CYCLE].value = "28".to_string();
    }

    #[test]
    fn test_bmi_syncs_from_weight_and_height() {
        let mut state = IntakeFormState::default();
        state.basics[WEIGHT].value = "65".to_string();
        state.basics[HEIGHT].value = "165".to_string();
        state.sync_bmi();

        assert_eq!(state.basics[BMI].value, "23.88");
    }

    #[test]
    fn test_bmi_untouched_until_both_present() {
        let mut state = IntakeFormState::default();
        state.basics[WEIGHT].value = "65".to_string();
        state.sync_bmi();

        assert!(state.basics[BMI].value.is_empty());
    }

    #[test]
    fn test_input_char_rejects_letters() {
        let mut state = IntakeFormState::default();
        state.input_char('a');
        state.input_char('3');
        state.input_char('0');

        assert_eq!(state.basics[AGE].value, "30");
    }

    #[test]
    fn test_validate_basics_rejects_empty_age() {
        let state = IntakeFormState::default();
        let err = state.validate_step().expect_err("Should reject empty form");

        assert_eq!(err, "Age: Invalid number");
    }

    #[test]
    fn test_validate_basics_rejects_out_of_range_age() {
        let mut state = IntakeFormState::default();
        required_basics(&mut state);
        state.basics[AGE].value = "17".to_string();

        let err = state.validate_step().expect_err("Should reject age 17");
        assert_eq!(err, "Age: Value must be between 18 and 60");
    }

    #[test]
    fn test_validate_basics_allows_blank_optional_fields() {
        let mut state = IntakeFormState::default();
        required_basics(&mut state);

        assert!(state.validate_step().is_ok());
    }

    #[test]
    fn test_blank_biomarkers_default_to_zero() {
        let mut state = IntakeFormState::default();
        required_basics(&mut state);

        let record = state.to_record().expect("Should build record");
        assert_eq!(record.ca125_level, 0.0);
        assert_eq!(record.crp_level, 0.0);
    }

    #[test]
    fn test_sample_data_passes_every_step() {
        let mut state = IntakeFormState::default();
        state.load_sample_data();

        assert!(state.validate_step().is_ok());
        state.next_step();
        assert!(state.validate_step().is_ok());
        state.next_step();
        assert!(state.validate_step().is_ok());
    }

    #[test]
    fn test_to_record_maps_all_fields() {
        let mut state = IntakeFormState::default();
        state.load_sample_data();

        let record = state.to_record().expect("Should build record");
        assert_eq!(record.age, 30);
        assert_eq!(record.age_of_menarche, 12);
        assert_eq!(record.cycle_length, 28);
        assert!((record.bmi - 23.88).abs() < 0.01);
        assert_eq!(record.dysmenorrhea_score, 8);
        assert_eq!(record.pelvic_pain_score, 8);
        assert_eq!(record.dyspareunia_score, 4);
        assert_eq!(record.dyschezia_score, 0);
        assert_eq!(record.urinary_symptoms_score, 0);
        assert_eq!(record.mental_health_score, 3);
        assert!(record.family_history);
        assert!(!record.infertility_status);
        assert_eq!(record.ca125_level, 40.0);
        assert_eq!(record.crp_level, 5.0);
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut state = IntakeFormState::default();
        state.prev_field();
        assert_eq!(state.selected_field, state.basics.len() - 1);

        state.next_field();
        assert_eq!(state.selected_field, 0);
    }

    #[test]
    fn test_clear_sensitive_wipes_buffers() {
        let mut state = IntakeFormState::default();
        state.load_sample_data();
        state.next_step();

        state.clear_sensitive();

        assert!(state.basics.iter().all(|f| f.value.is_empty()));
        assert!(state.biomarkers.iter().all(|f| f.value.is_empty()));
        assert!(state.sliders.iter().all(|s| s.value == 5));
        assert!(state.toggles.iter().all(|t| !t.value));
        assert_eq!(state.step, IntakeStep::Basics);
    }
}
