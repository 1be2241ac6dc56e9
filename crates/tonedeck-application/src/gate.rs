//! Initialization gate: credential preconditions for the engine.
//!
//! The credential is accepted under either of two environment variable
//! names; the first present, non-empty one wins. Absence is a
//! user-visible, non-fatal condition, never a crash.

/// Environment variable names accepted for the engine credential, in
/// lookup order.
pub const CREDENTIAL_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

/// Environment access seam, so the gate is testable without touching the
/// process environment.
pub trait EnvProvider: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Default)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Resolves the engine credential, or a human-readable reason it is
/// missing.
///
/// The reason names both accepted variables and is surfaced to the user
/// verbatim; callers must not attempt engine construction on `Err`.
pub fn resolve_credential(env: &dyn EnvProvider) -> Result<String, String> {
    for name in CREDENTIAL_VARS {
        if let Some(value) = env.var(name) {
            if !value.trim().is_empty() {
                return Ok(value);
            }
        }
    }
    Err(format!(
        "No API key found. Please set {} or {} in your environment variables.",
        CREDENTIAL_VARS[0], CREDENTIAL_VARS[1]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeEnv(HashMap<String, String>);

    impl FakeEnv {
        fn empty() -> Self {
            Self(HashMap::new())
        }

        fn with(pairs: &[(&str, &str)]) -> Self {
            Self(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
        }
    }

    impl EnvProvider for FakeEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
    }

    #[test]
    fn test_first_name_wins() {
        let env = FakeEnv::with(&[("GOOGLE_API_KEY", "google-key"), ("GEMINI_API_KEY", "gemini-key")]);
        assert_eq!(resolve_credential(&env).unwrap(), "google-key");
    }

    #[test]
    fn test_second_name_accepted() {
        let env = FakeEnv::with(&[("GEMINI_API_KEY", "gemini-key")]);
        assert_eq!(resolve_credential(&env).unwrap(), "gemini-key");
    }

    #[test]
    fn test_empty_value_does_not_count() {
        let env = FakeEnv::with(&[("GOOGLE_API_KEY", "   "), ("GEMINI_API_KEY", "gemini-key")]);
        assert_eq!(resolve_credential(&env).unwrap(), "gemini-key");
    }

    #[test]
    fn test_missing_reason_names_both_variables() {
        let reason = resolve_credential(&FakeEnv::empty()).unwrap_err();
        assert!(reason.contains("GOOGLE_API_KEY"));
        assert!(reason.contains("GEMINI_API_KEY"));
    }
}
