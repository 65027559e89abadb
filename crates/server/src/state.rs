//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use bangla_dict_config::Settings;
use bangla_dict_core::{AiTranslator, DisabledTranslator};
use bangla_dict_persistence::{
    InMemoryStatusStore, InMemoryTranslationStore, StatusStore, TranslationStore,
};
use bangla_dict_resolver::TranslationResolver;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    /// Offline → AI → fallback pipeline, owns the translation store
    pub resolver: Arc<TranslationResolver>,
    /// Legacy status checks (ScyllaDB or in-memory)
    pub status_store: Arc<dyn StatusStore>,
}

impl AppState {
    /// In-memory stores and no AI provider
    pub fn new(config: Settings) -> Self {
        Self::with_stores(
            config,
            Arc::new(DisabledTranslator),
            Arc::new(InMemoryTranslationStore::new()),
            Arc::new(InMemoryStatusStore::new()),
        )
    }

    pub fn with_stores(
        config: Settings,
        translator: Arc<dyn AiTranslator>,
        translations: Arc<dyn TranslationStore>,
        status_store: Arc<dyn StatusStore>,
    ) -> Self {
        let resolver = TranslationResolver::new(translator, translations)
            .with_persist_fallback(config.resolver.persist_fallback);

        Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
            status_store,
        }
    }

    /// True when records are stored in ScyllaDB
    pub fn is_distributed(&self) -> bool {
        self.resolver.is_distributed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_in_memory() {
        let state = AppState::new(Settings::default());
        assert!(!state.is_distributed());
        assert_eq!(state.resolver.translator_name(), "disabled");
        assert_eq!(state.resolver.dictionary().len(), 15);
    }
}
