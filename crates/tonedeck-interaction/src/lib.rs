//! Engine boundary for ToneDeck.
//!
//! Defines the `ToneEngine` seam the orchestration layer talks to, the
//! typed `EngineError` produced at that boundary, the Gemini REST
//! implementation, and the demo (substitute) responder.

pub mod engine;
pub mod gemini_engine;
pub mod substitute;

pub use engine::{EngineError, ToneEngine};
pub use gemini_engine::GeminiToneEngine;
pub use substitute::SubstituteResponder;
