//! HTML report export.
//!
//! Projects the last analysis into a themed, self-contained HTML page.
//! The original product shipped one near-duplicate page per theme; here a
//! single template is parameterized by [`Theme`].

use minijinja::{context, Environment};
use serde::Serialize;
use std::path::Path;
use tonedeck_core::analysis::{clamp_score, display_label};
use tonedeck_core::error::Result;
use tonedeck_core::{AnalysisResult, Theme, ToneDeckError};

static REPORT_TEMPLATE: &str = include_str!("templates/report.html");

#[derive(Serialize)]
struct EmotionRow {
    label: String,
    percent: String,
    width: u32,
}

fn accents(theme: Theme) -> (&'static str, &'static str) {
    match theme {
        Theme::Aqua => ("#2dd4bf", "#06b6d4"),
        Theme::Dusk => ("#7c3aed", "#ec4899"),
        Theme::Plain => ("#6b7280", "#374151"),
    }
}

/// Renders the report page for one analysis.
///
/// Sections follow the renderer rules: clamped scores, active traits
/// only, text sections only when present and non-empty.
pub fn render_report(
    result: &AnalysisResult,
    theme: Theme,
    art_data_uri: Option<&str>,
) -> Result<String> {
    let emotions: Vec<EmotionRow> = result
        .input_tags
        .iter()
        .flatten()
        .map(|(label, score)| {
            let clamped = clamp_score(*score);
            EmotionRow {
                label: display_label(label),
                percent: format!("{:.0}%", clamped * 100.0),
                width: (clamped * 100.0).round() as u32,
            }
        })
        .collect();

    let traits: Vec<String> = result
        .active_traits()
        .into_iter()
        .map(display_label)
        .collect();

    let (accent_start, accent_end) = accents(theme);

    // The .html name switches minijinja's auto-escaping on for user text
    let mut env = Environment::new();
    env.add_template("report.html", REPORT_TEMPLATE)
        .map_err(|err| ToneDeckError::template(err.to_string()))?;
    let template = env
        .get_template("report.html")
        .map_err(|err| ToneDeckError::template(err.to_string()))?;

    template
        .render(context! {
            accent_start,
            accent_end,
            art => art_data_uri,
            emotions,
            traits,
            final_prompt => non_empty(&result.final_prompt),
            response_text => non_empty(&result.response_text),
        })
        .map_err(|err| ToneDeckError::template(err.to_string()))
}

/// Renders and writes the report to `path`.
pub fn write_report(
    path: &Path,
    result: &AnalysisResult,
    theme: Theme,
    art_data_uri: Option<&str>,
) -> Result<()> {
    let html = render_report(result, theme, art_data_uri)?;
    std::fs::write(path, html)?;
    Ok(())
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.trim().is_empty())
}
