//! Orchestration layer for ToneDeck.
//!
//! Owns the long-lived application context: the engine resource cache,
//! the branding-art cache, the initialization gate, the per-request mode
//! selector, and the report export. Request handlers receive the context
//! explicitly; there is no hidden global state.

pub mod art_cache;
pub mod config_service;
pub mod context;
pub mod engine_cache;
pub mod export;
pub mod gate;
pub mod generate;

pub use context::AppContext;
pub use engine_cache::{EngineCache, EngineFactory};
pub use gate::{resolve_credential, EnvProvider, SystemEnv, CREDENTIAL_VARS};
pub use generate::GenerateError;
