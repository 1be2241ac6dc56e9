//! Analysis result domain model.
//!
//! This module contains the record produced by one analysis pass, whether
//! it came from the remote engine or from the demo responder.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The record produced by analyzing one piece of user input.
///
/// All four fields are optional: an engine is free to omit any of them, and
/// an absent field is distinct from an empty mapping. Consumers must treat
/// both as "nothing to show" rather than as an error.
///
/// Field presence is part of the type on purpose. The display layer never
/// probes for keys; it pattern-matches on `Option`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Detected emotions, keyed by label, with intensity scores in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tags: Option<BTreeMap<String, f32>>,

    /// Personality traits for the response, keyed by label. Only entries
    /// whose flag is `true` are considered active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_tags: Option<BTreeMap<String, bool>>,

    /// The synthesized prompt instruction text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_prompt: Option<String>,

    /// The generated natural-language reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
}

impl AnalysisResult {
    /// Returns the labels of active personality traits, in stable order.
    ///
    /// Traits with a `false` flag are filtered out, not reported as
    /// inactive. An absent or empty map yields an empty vector.
    pub fn active_traits(&self) -> Vec<&str> {
        self.response_tags
            .as_ref()
            .map(|tags| {
                tags.iter()
                    .filter(|(_, active)| **active)
                    .map(|(label, _)| label.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns true if there are any detected emotions to show.
    pub fn has_emotions(&self) -> bool {
        self.input_tags
            .as_ref()
            .is_some_and(|tags| !tags.is_empty())
    }

    /// Returns true if the record carries nothing displayable at all.
    pub fn is_empty(&self) -> bool {
        !self.has_emotions()
            && self.active_traits().is_empty()
            && !has_text(&self.final_prompt)
            && !has_text(&self.response_text)
    }
}

fn has_text(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|text| !text.trim().is_empty())
}

/// Clamps an emotion score into the displayable [0, 1] range.
///
/// Upstream scores are expected to already be in range; out-of-range input
/// must render without panicking, so clamping is the policy. NaN maps to 0.
pub fn clamp_score(score: f32) -> f32 {
    if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) }
}

/// Turns a raw tag label into a display label: underscores become spaces
/// and each word is title-cased (`confident_mentor` -> `Confident Mentor`).
pub fn display_label(raw: &str) -> String {
    raw.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traits(pairs: &[(&str, bool)]) -> BTreeMap<String, bool> {
        pairs
            .iter()
            .map(|(label, active)| (label.to_string(), *active))
            .collect()
    }

    #[test]
    fn test_active_traits_filters_false_flags() {
        let result = AnalysisResult {
            response_tags: Some(traits(&[("a", true), ("b", false)])),
            ..Default::default()
        };
        assert_eq!(result.active_traits(), vec!["a"]);
    }

    #[test]
    fn test_absent_and_empty_maps_are_both_nothing() {
        let absent = AnalysisResult::default();
        let empty = AnalysisResult {
            input_tags: Some(BTreeMap::new()),
            response_tags: Some(BTreeMap::new()),
            ..Default::default()
        };

        assert!(!absent.has_emotions());
        assert!(!empty.has_emotions());
        assert!(absent.active_traits().is_empty());
        assert!(empty.active_traits().is_empty());
        assert!(absent.is_empty());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_absence_survives_serde_round_trip() {
        let result = AnalysisResult {
            final_prompt: Some("Be kind.".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("input_tags"));

        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert!(back.input_tags.is_none());
    }

    #[test]
    fn test_whitespace_only_text_counts_as_empty() {
        let result = AnalysisResult {
            response_text: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(result.is_empty());
    }

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(0.5), 0.5);
        assert_eq!(clamp_score(-0.3), 0.0);
        assert_eq!(clamp_score(1.7), 1.0);
        assert_eq!(clamp_score(f32::NAN), 0.0);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("confident_mentor"), "Confident Mentor");
        assert_eq!(display_label("calm"), "Calm");
        assert_eq!(display_label("a__b"), "A B");
    }
}
