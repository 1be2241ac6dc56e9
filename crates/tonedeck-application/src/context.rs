//! The long-lived application context.
//!
//! Owns the configuration, the sample library, both caches, and the
//! environment seam. Request handlers receive the context explicitly.

use crate::art_cache::ArtCache;
use crate::engine_cache::{EngineCache, EngineFactory};
use crate::gate::{resolve_credential, EnvProvider, SystemEnv};
use crate::generate::GenerateError;
use std::sync::Arc;
use tonedeck_core::samples::SampleLibrary;
use tonedeck_core::{AppConfig, SessionState};
use tonedeck_interaction::{GeminiToneEngine, SubstituteResponder, ToneEngine};
use tracing::info;

/// Application context shared by every session of the process.
///
/// The engine handle inside is effectively process-wide; its cache
/// guarantees at-most-one construction per epoch even under concurrent
/// first access.
pub struct AppContext {
    config: AppConfig,
    library: SampleLibrary,
    env: Arc<dyn EnvProvider>,
    engine_factory: Option<EngineFactory>,
    engine_cache: EngineCache,
    art_cache: ArtCache,
    responder: SubstituteResponder,
}

impl AppContext {
    /// Creates a context wired to the real environment and the Gemini
    /// engine.
    pub fn new(config: AppConfig) -> Self {
        let responder = SubstituteResponder::new(config.demo_latency());
        let art_cache = ArtCache::new(config.art_ttl());
        Self {
            config,
            library: SampleLibrary::builtin().clone(),
            env: Arc::new(SystemEnv),
            engine_factory: None,
            engine_cache: EngineCache::new(),
            art_cache,
            responder,
        }
    }

    /// Replaces the environment seam.
    pub fn with_env(mut self, env: Arc<dyn EnvProvider>) -> Self {
        self.env = env;
        self
    }

    /// Replaces the engine factory (tests, alternative backends).
    pub fn with_engine_factory(mut self, factory: EngineFactory) -> Self {
        self.engine_factory = Some(factory);
        self
    }

    /// Replaces the sample library.
    pub fn with_library(mut self, library: SampleLibrary) -> Self {
        self.library = library;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn library(&self) -> &SampleLibrary {
        &self.library
    }

    pub(crate) fn responder(&self) -> &SubstituteResponder {
        &self.responder
    }

    /// Runs the initialization gate and returns the cached engine handle.
    ///
    /// The credential check happens before any construction attempt: a
    /// missing credential means the factory is never invoked. Construction
    /// failures are converted to a user-visible reason, cached, and
    /// re-reported until [`AppContext::clear_caches`].
    pub async fn engine(&self) -> Result<Arc<dyn ToneEngine>, GenerateError> {
        let credential = resolve_credential(self.env.as_ref())
            .map_err(|reason| GenerateError::Unready { reason })?;

        let outcome = match &self.engine_factory {
            Some(factory) => self.engine_cache.get_or_create(|| factory()).await,
            None => {
                let settings = self.config.engine.clone();
                self.engine_cache
                    .get_or_create(|| async move {
                        let engine = GeminiToneEngine::new(credential, &settings)?;
                        Ok(Arc::new(engine) as Arc<dyn ToneEngine>)
                    })
                    .await
            }
        };

        outcome.map_err(|reason| GenerateError::Unready { reason })
    }

    /// Clears both process-wide caches and applies the selective session
    /// reset: input text and the demo-mode toggle survive, the last
    /// result is dropped.
    pub async fn clear_caches(&self, session: &mut SessionState) {
        self.engine_cache.clear().await;
        self.art_cache.clear();
        session.apply_cache_clear();
        info!("engine and art caches cleared");
    }

    /// Uniformly selects a sample prompt; demo-table keys are included
    /// while the session has demo mode on.
    pub fn random_prompt(&self, session: &SessionState) -> Option<String> {
        self.library
            .random_prompt(session.demo_mode)
            .map(str::to_string)
    }

    /// Returns the cached branding-art payload, if any candidate path is
    /// readable.
    pub fn art_data_uri(&self) -> Option<String> {
        self.art_cache.data_uri(&self.config.art_paths)
    }
}
