//! The engine seam: trait and boundary error type.

use async_trait::async_trait;
use thiserror::Error;
use tonedeck_core::AnalysisResult;

/// An emotion-tagging and response-generation engine.
///
/// Implementations are opaque to the orchestration layer: one operation,
/// raw text in, an [`AnalysisResult`] out. Implementations must be safe to
/// share behind an `Arc` across sessions.
#[async_trait]
pub trait ToneEngine: Send + Sync {
    /// Short human-readable description of the backing implementation.
    fn describe(&self) -> &str;

    /// Analyzes one piece of user input.
    async fn run(&self, input: &str) -> Result<AnalysisResult, EngineError>;
}

/// Message substrings that mark an untyped error as memory-related.
const OOM_MARKERS: [&str; 3] = ["out of memory", "memory", "oom"];

/// Typed error produced at the engine boundary.
///
/// External failures are translated into these variants at the boundary;
/// nothing below the engine seam leaks upward untyped.
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    /// The engine could not be constructed (bad credential, unreachable
    /// backend, invalid settings).
    #[error("Failed to initialize engine: {0}")]
    Construction(String),

    /// The remote call itself failed.
    #[error("{message}")]
    Process {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// The backend refused the call for lack of resources (quota, memory).
    #[error("Engine resources exhausted: {0}")]
    ResourceExhausted(String),

    /// The backend answered, but not in the expected shape.
    #[error("Invalid engine response: {0}")]
    InvalidResponse(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl EngineError {
    /// Whether this failure belongs to the memory/resource-exhaustion
    /// class.
    ///
    /// The typed variant is the primary signal; the case-insensitive
    /// message scan is kept only as a fallback for untyped errors coming
    /// through [`EngineError::Other`] or [`EngineError::Process`].
    pub fn is_resource_exhaustion(&self) -> bool {
        if matches!(self, Self::ResourceExhausted(_)) {
            return true;
        }
        let message = self.to_string().to_lowercase();
        OOM_MARKERS.iter().any(|marker| message.contains(marker))
    }

    /// Whether retrying the same call could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Process { is_retryable, .. } => *is_retryable,
            Self::ResourceExhausted(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_exhaustion_is_detected() {
        let err = EngineError::ResourceExhausted("quota exceeded".to_string());
        assert!(err.is_resource_exhaustion());
    }

    #[test]
    fn test_message_scan_fallback() {
        let err = EngineError::Other("worker killed: Out Of Memory".to_string());
        assert!(err.is_resource_exhaustion());

        let err = EngineError::Process {
            status_code: Some(500),
            message: "OOM while loading model".to_string(),
            is_retryable: true,
        };
        assert!(err.is_resource_exhaustion());
    }

    #[test]
    fn test_unrelated_errors_are_not_exhaustion() {
        let err = EngineError::Other("connection reset by peer".to_string());
        assert!(!err.is_resource_exhaustion());

        let err = EngineError::Construction("API key rejected".to_string());
        assert!(!err.is_resource_exhaustion());
    }
}
