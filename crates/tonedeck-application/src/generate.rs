//! The per-request mode selector.
//!
//! Each user action runs one pass: reject blank input, then either the
//! demo path (never fails) or the full engine path (gate, cached handle,
//! timed call, typed failure classification).

use crate::context::AppContext;
use thiserror::Error;
use tonedeck_core::{AnalysisResult, SessionState};
use tonedeck_interaction::EngineError;
use tracing::debug;

/// User-visible failure taxonomy of one generate request.
///
/// Nothing from the engine or the environment escapes the selector as an
/// unhandled fault; every path ends here or in a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Blank submission, rejected before any mode transition.
    #[error("Please enter some text before generating.")]
    EmptyInput,

    /// Preconditions unmet (credential absent) or engine construction
    /// failed; the reason is surfaced verbatim.
    #[error("{reason}")]
    Unready { reason: String },

    /// The engine refused or died for lack of resources.
    #[error("{message}")]
    ResourceExhausted { message: String },

    /// The engine call exceeded the configured deadline.
    #[error("The engine did not answer within {timeout_secs} seconds.")]
    Timeout { timeout_secs: u64 },

    /// Any other engine failure, raw message surfaced.
    #[error("Processing error: {message}")]
    Processing { message: String },
}

impl GenerateError {
    /// Whether the error message should carry the demo-mode workaround
    /// hint.
    pub fn suggests_demo_mode(&self) -> bool {
        matches!(
            self,
            Self::Unready { .. } | Self::ResourceExhausted { .. }
        )
    }
}

impl AppContext {
    /// Runs one analysis request against the session's current input.
    ///
    /// Empty or whitespace-only input is rejected up front and the
    /// session is left untouched. On success the record is stored in the
    /// session before being returned.
    pub async fn generate(
        &self,
        session: &mut SessionState,
    ) -> Result<AnalysisResult, GenerateError> {
        let input = session.input_text.trim();
        if input.is_empty() {
            return Err(GenerateError::EmptyInput);
        }
        let input = input.to_string();

        let result = if session.demo_mode {
            debug!("demo mode active, bypassing engine");
            self.responder().respond(self.library(), &input).await
        } else {
            let engine = self.engine().await?;
            match tokio::time::timeout(self.config().engine.timeout(), engine.run(&input)).await {
                Ok(Ok(result)) => result,
                Ok(Err(err)) => return Err(classify_engine_error(err)),
                Err(_) => {
                    return Err(GenerateError::Timeout {
                        timeout_secs: self.config().engine.timeout_secs,
                    });
                }
            }
        };

        session.set_result(result.clone());
        Ok(result)
    }
}

fn classify_engine_error(err: EngineError) -> GenerateError {
    if err.is_resource_exhaustion() {
        GenerateError::ResourceExhausted {
            message: err.to_string(),
        }
    } else {
        GenerateError::Processing {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustion_classification_by_type_and_message() {
        let typed = classify_engine_error(EngineError::ResourceExhausted("quota".to_string()));
        assert!(matches!(typed, GenerateError::ResourceExhausted { .. }));

        let untyped = classify_engine_error(EngineError::Other(
            "worker terminated: Out of Memory".to_string(),
        ));
        assert!(matches!(untyped, GenerateError::ResourceExhausted { .. }));

        let other = classify_engine_error(EngineError::Other("socket closed".to_string()));
        assert!(matches!(other, GenerateError::Processing { .. }));
    }

    #[test]
    fn test_demo_hint_policy() {
        assert!(
            GenerateError::Unready {
                reason: "no key".to_string()
            }
            .suggests_demo_mode()
        );
        assert!(
            GenerateError::ResourceExhausted {
                message: "oom".to_string()
            }
            .suggests_demo_mode()
        );
        assert!(!GenerateError::EmptyInput.suggests_demo_mode());
        assert!(
            !GenerateError::Processing {
                message: "x".to_string()
            }
            .suggests_demo_mode()
        );
    }
}
