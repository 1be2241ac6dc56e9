pub mod analysis;
pub mod config;
pub mod error;
pub mod samples;
pub mod session;

// Re-export the types that cross crate boundaries most often
pub use analysis::AnalysisResult;
pub use config::{AppConfig, EngineMode, EngineSettings, Theme};
pub use error::ToneDeckError;
pub use samples::SampleLibrary;
pub use session::SessionState;
