//! Session state domain model.
//!
//! A session tracks the mutable state behind one interactive visit: the
//! current input text, the last computed analysis, and the demo-mode toggle.

use crate::analysis::AnalysisResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mutable, session-scoped state.
///
/// Initialized empty on first visit and mutated by user actions (typing,
/// the random-sample trigger, the mode toggle). A cache clear resets the
/// session selectively: the input text and the demo-mode toggle survive,
/// everything else is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
    /// Current content of the input box
    pub input_text: String,
    /// The last computed analysis, if any
    pub last_result: Option<AnalysisResult>,
    /// Whether the demo (substitute) mode is active
    pub demo_mode: bool,
}

impl SessionState {
    /// Creates an empty session with demo mode off.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now.clone(),
            updated_at: now,
            input_text: String::new(),
            last_result: None,
            demo_mode: false,
        }
    }

    /// Creates an empty session with the demo-mode toggle preset.
    pub fn with_demo_mode(demo_mode: bool) -> Self {
        Self {
            demo_mode,
            ..Self::new()
        }
    }

    /// Replaces the input text.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
        self.touch();
    }

    /// Stores the result of a completed analysis.
    pub fn set_result(&mut self, result: AnalysisResult) {
        self.last_result = Some(result);
        self.touch();
    }

    /// Flips the demo-mode toggle and returns the new value.
    pub fn toggle_demo_mode(&mut self) -> bool {
        self.demo_mode = !self.demo_mode;
        self.touch();
        self.demo_mode
    }

    /// Applies the session-side effect of a cache clear.
    ///
    /// The input text and the demo-mode toggle are preserved; the last
    /// result is dropped.
    pub fn apply_cache_clear(&mut self) {
        self.last_result = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = SessionState::new();
        assert!(session.input_text.is_empty());
        assert!(session.last_result.is_none());
        assert!(!session.demo_mode);
        assert!(!session.id.is_empty());
    }

    #[test]
    fn test_toggle_demo_mode() {
        let mut session = SessionState::new();
        assert!(session.toggle_demo_mode());
        assert!(!session.toggle_demo_mode());
    }

    #[test]
    fn test_cache_clear_preserves_input_and_toggle() {
        let mut session = SessionState::with_demo_mode(true);
        session.set_input("hello there");
        session.set_result(AnalysisResult {
            final_prompt: Some("be warm".to_string()),
            ..Default::default()
        });

        session.apply_cache_clear();

        assert_eq!(session.input_text, "hello there");
        assert!(session.demo_mode);
        assert!(session.last_result.is_none());
    }
}
