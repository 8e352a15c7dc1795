//! Plain-text report export.
//!
//! Renders a paginated report from a stored assessment: fixed page width,
//! fixed lines per page, a centered footer on every page. Rendering is pure;
//! only [`write_report`] touches the filesystem.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::Assessment;

const PAGE_WIDTH: usize = 78;
const PAGE_LINES: usize = 58;

fn center(text: &str) -> String {
    if text.len() >= PAGE_WIDTH {
        return text.to_string();
    }
    let pad = (PAGE_WIDTH - text.len()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(title.to_string());
    lines.push("-".repeat(PAGE_WIDTH));
}

fn content_lines(assessment: &Assessment) -> Vec<String> {
    let record = &assessment.record;
    let result = &assessment.result;
    let mut lines = Vec::new();

    lines.push("=".repeat(PAGE_WIDTH));
    lines.push(center("EndoSight Assessment Report"));
    lines.push("=".repeat(PAGE_WIDTH));
    lines.push(String::new());

    let date = assessment.created_at.with_timezone(&Local);
    lines.push(format!(
        "Assessment Date: {}",
        date.format("%B %-d, %Y at %I:%M %p")
    ));
    lines.push(String::new());

    heading(&mut lines, "RISK ASSESSMENT");
    lines.push(format!("Risk Level: {}", result.risk_level.label()));
    lines.push(format!(
        "Risk Probability: {:.1}%",
        result.probability * 100.0
    ));
    lines.push(format!(
        "Confidence Level: {:.1}%",
        result.confidence * 100.0
    ));
    lines.push(format!("Predicted Stage: Stage {}", result.stage));
    lines.push(String::new());

    heading(&mut lines, "CONTRIBUTING FACTORS");
    for factor in &result.factors {
        lines.push(format!("{}:", factor.feature));
        lines.push(format!("  Impact: {}", factor.impact));
        lines.push(format!("  Value: {}", factor.value));
        lines.push(String::new());
    }

    heading(&mut lines, "RECOMMENDATIONS");
    for (index, recommendation) in result.recommendations.iter().enumerate() {
        for (i, line) in wrap(recommendation, PAGE_WIDTH - 4).iter().enumerate() {
            if i == 0 {
                lines.push(format!("{}. {}", index + 1, line));
            } else {
                lines.push(format!("   {line}"));
            }
        }
    }
    lines.push(String::new());

    heading(&mut lines, "PATIENT INFORMATION");
    lines.push(format!("Age: {} years", record.age));
    lines.push(format!("BMI: {:.1}", record.bmi));
    if record.cycle_length != 0 {
        lines.push(format!("Cycle Length: {} days", record.cycle_length));
    }
    if record.age_of_menarche != 0 {
        lines.push(format!("Age of Menarche: {} years", record.age_of_menarche));
    }
    lines.push(String::new());

    lines.push("Symptoms (0-10 scale):".to_string());
    lines.push(format!("  Dysmenorrhea: {}", record.dysmenorrhea_score));
    lines.push(format!("  Pelvic Pain: {}", record.pelvic_pain_score));
    lines.push(format!("  Dyspareunia: {}", record.dyspareunia_score));
    lines.push(format!("  Dyschezia: {}", record.dyschezia_score));
    lines.push(format!("  Urinary Symptoms: {}", record.urinary_symptoms_score));
    lines.push(format!(
        "  Mental Health Impact: {}",
        record.mental_health_score
    ));
    lines.push(String::new());

    lines.push("Medical History:".to_string());
    lines.push(format!(
        "  Family History: {}",
        if record.family_history { "Yes" } else { "No" }
    ));
    lines.push(format!(
        "  Infertility: {}",
        if record.infertility_status { "Yes" } else { "No" }
    ));
    lines.push(String::new());

    if record.ca125_level > 0.0 || record.crp_level > 0.0 {
        lines.push("Biomarkers:".to_string());
        if record.ca125_level > 0.0 {
            lines.push(format!("  CA-125: {} U/mL", record.ca125_level));
        }
        if record.crp_level > 0.0 {
            lines.push(format!("  CRP: {} mg/L", record.crp_level));
        }
        lines.push(String::new());
    }

    lines.push("IMPORTANT DISCLAIMER".to_string());
    lines.extend(wrap(
        "This assessment is designed to provide informational insights only. It \
         should not be used as a substitute for professional medical diagnosis or \
         treatment. If you have concerns about endometriosis or related symptoms, \
         please consult a qualified healthcare provider for proper evaluation and \
         care.",
        PAGE_WIDTH,
    ));

    lines
}

fn paginate(content: &[String]) -> String {
    let page_count = content.len().div_ceil(PAGE_LINES).max(1);
    let generated = Local::now().format("%-m/%-d/%Y");

    let mut out = Vec::new();
    for (page, chunk) in content.chunks(PAGE_LINES).enumerate() {
        out.extend(chunk.iter().cloned());
        out.resize((page * PAGE_LINES) + PAGE_LINES + page, String::new());
        out.push(center(&format!(
            "Page {} of {} | EndoSight Report | Generated {}",
            page + 1,
            page_count,
            generated
        )));
    }

    let mut report = out.join("\n");
    report.push('\n');
    report
}

/// Render the full paginated report for one assessment.
#[must_use]
pub fn render_report(assessment: &Assessment) -> String {
    paginate(&content_lines(assessment))
}

/// Write the rendered report into `dir` and return the created path.
///
/// The file name carries the assessment date, so exporting the same entry
/// twice overwrites the previous report.
pub fn write_report(assessment: &Assessment, dir: &Path) -> crate::Result<PathBuf> {
    let date = assessment.created_at.with_timezone(&Local);
    let file_name = format!("EndoSight_Assessment_{}.txt", date.format("%-m-%-d-%Y"));
    let path = dir.join(file_name);

    std::fs::write(&path, render_report(assessment))?;
    tracing::info!("Exported assessment report to {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{scoring, AssessmentRecord, RiskAssessment, RiskLevel};

    fn high_risk_assessment() -> Assessment {
        let record = AssessmentRecord {
            age: 30,
            bmi: 23.88,
            cycle_length: 28,
            age_of_menarche: 12,
            dysmenorrhea_score: 8,
            pelvic_pain_score: 8,
            dyspareunia_score: 4,
            family_history: true,
            ca125_level: 40.0,
            crp_level: 5.0,
            mental_health_score: 3,
            ..Default::default()
        };
        Assessment::new(record.clone(), scoring::score(&record))
    }

    #[test]
    fn test_report_sections() {
        let report = render_report(&high_risk_assessment());

        assert!(report.contains("EndoSight Assessment Report"));
        assert!(report.contains("RISK ASSESSMENT"));
        assert!(report.contains("Risk Level: High Risk"));
        assert!(report.contains("Risk Probability: 90.0%"));
        assert!(report.contains("Confidence Level: 87.0%"));
        assert!(report.contains("Predicted Stage: Stage 4"));
        assert!(report.contains("Pain Symptoms:"));
        assert!(report.contains("  Impact: 30"));
        assert!(report.contains("  Value: High (20/30)"));
        assert!(report
            .contains("1. Consult a gynecologist or endometriosis specialist immediately"));
        assert!(report.contains("Age: 30 years"));
        assert!(report.contains("BMI: 23.9"));
        assert!(report.contains("  CA-125: 40 U/mL"));
        assert!(report.contains("  CRP: 5 mg/L"));
        assert!(report.contains("IMPORTANT DISCLAIMER"));
    }

    #[test]
    fn test_report_footer_on_every_page() {
        let report = render_report(&high_risk_assessment());
        let pages = report
            .lines()
            .filter(|l| l.contains("| EndoSight Report |"))
            .count();

        assert!(pages >= 1);
        for (index, line) in report
            .lines()
            .filter(|l| l.contains("| EndoSight Report |"))
            .enumerate()
        {
            assert!(line.contains(&format!("Page {} of {}", index + 1, pages)));
        }
        // The footer closes the report
        assert!(report
            .trim_end()
            .lines()
            .last()
            .is_some_and(|l| l.contains("| EndoSight Report |")));
    }

    #[test]
    fn test_report_lines_fit_page_width() {
        let report = render_report(&high_risk_assessment());
        for line in report.lines() {
            assert!(line.len() <= PAGE_WIDTH, "line too wide: {line}");
        }
    }

    #[test]
    fn test_report_tolerates_empty_result() {
        let record = AssessmentRecord {
            age: 20,
            bmi: 21.0,
            ..Default::default()
        };
        let result = RiskAssessment {
            risk_level: RiskLevel::Low,
            probability: 0.0,
            confidence: 0.75,
            stage: 0,
            factors: Vec::new(),
            recommendations: Vec::new(),
        };
        let report = render_report(&Assessment::new(record, result));

        assert!(report.contains("CONTRIBUTING FACTORS"));
        assert!(report.contains("RECOMMENDATIONS"));
        assert!(report.contains("Predicted Stage: Stage 0"));
    }

    #[test]
    fn test_write_report_creates_file() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let assessment = high_risk_assessment();

        let path = write_report(&assessment, dir.path()).expect("Should write report");

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .expect("Should have a file name");
        assert!(name.starts_with("EndoSight_Assessment_"));
        assert!(name.ends_with(".txt"));

        let written = std::fs::read_to_string(&path).expect("Should read report back");
        assert!(written.contains("Risk Level: High Risk"));
    }
}
