//! Terminal projection of an analysis record.
//!
//! Pure string building: clamped percentage bars for emotions, active
//! traits only, text sections only when present and non-empty. No failure
//! modes of its own.

use colored::Colorize;
use tonedeck_core::analysis::{clamp_score, display_label};
use tonedeck_core::AnalysisResult;

const BAR_WIDTH: usize = 24;

/// Renders the full result block, section by section.
///
/// Sections with nothing to show are omitted entirely; an all-empty
/// record renders as a single shrug line.
pub fn render_result(result: &AnalysisResult) -> String {
    let mut sections = Vec::new();

    if let Some(tags) = &result.input_tags {
        if !tags.is_empty() {
            let mut block = vec![section_header("Detected Emotions")];
            for (label, score) in tags {
                block.push(emotion_line(label, *score));
            }
            sections.push(block.join("\n"));
        }
    }

    let traits = result.active_traits();
    if !traits.is_empty() {
        let mut block = vec![section_header("Response Personality")];
        let chips: Vec<String> = traits
            .iter()
            .map(|label| format!("[{}]", display_label(label)).green().to_string())
            .collect();
        block.push(format!("  {}", chips.join(" ")));
        sections.push(block.join("\n"));
    }

    if let Some(prompt) = non_empty(&result.final_prompt) {
        sections.push(format!(
            "{}\n{}",
            section_header("Generated Prompt Instruction"),
            indent(prompt)
        ));
    }

    if let Some(text) = non_empty(&result.response_text) {
        sections.push(format!(
            "{}\n{}",
            section_header("AI Response"),
            indent(text)
        ));
    }

    if sections.is_empty() {
        return "(the engine returned nothing to show)".dimmed().to_string();
    }

    sections.join("\n\n")
}

fn section_header(title: &str) -> String {
    format!("=== {title} ===").bright_cyan().bold().to_string()
}

fn emotion_line(label: &str, score: f32) -> String {
    let clamped = clamp_score(score);
    format!(
        "  {:<18} {:>4.0}% {}",
        display_label(label),
        clamped * 100.0,
        progress_bar(clamped)
    )
}

fn progress_bar(score: f32) -> String {
    let filled = (clamp_score(score) * BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "{}{}",
        "█".repeat(filled).bright_cyan(),
        "░".repeat(BAR_WIDTH - filled).bright_black()
    )
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.trim().is_empty())
}
