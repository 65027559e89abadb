//! Dictionary Server Entry Point

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use bangla_dict_config::{load_settings, RuntimeEnvironment, Settings};
use bangla_dict_core::{AiTranslator, DisabledTranslator};
use bangla_dict_llm::{LlmTranslator, OpenAIBackend, OpenAIConfig};
use bangla_dict_persistence::{
    InMemoryStatusStore, InMemoryTranslationStore, StatusStore, TranslationStore,
};
use bangla_dict_server::{create_router, init_metrics, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is normal outside development
    let dotenv = dotenvy::dotenv();

    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("BANGLA_DICT_ENV").ok();
    let config = match load_settings(env.as_deref()) {
        Ok(settings) => {
            // Tracing not yet initialized, use eprintln for early logging
            eprintln!(
                "Loaded configuration from files (env: {})",
                env.as_deref().unwrap_or("default")
            );
            settings
        }
        Err(e) => {
            let requested = env
                .as_deref()
                .and_then(RuntimeEnvironment::parse)
                .unwrap_or_default();
            // Defaults mean in-memory storage; never serve a strict environment on them
            if requested.is_strict() {
                eprintln!(
                    "Error: Invalid configuration for {:?} environment: {}. Refusing to start.",
                    requested, e
                );
                return Err(e.into());
            }
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    init_tracing(&config);

    tracing::info!("Starting Dictionary Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = ?config.environment,
        config_path = env.as_deref().unwrap_or("default"),
        dotenv = dotenv.is_ok(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled && init_metrics().is_some() {
        tracing::info!("Initialized Prometheus metrics at /metrics");
    }

    let translator = init_translator(&config);
    tracing::info!(translator = %translator.name(), "AI translator ready");

    let (translations, status): (Arc<dyn TranslationStore>, Arc<dyn StatusStore>) =
        if config.persistence.enabled {
            tracing::info!("Initializing ScyllaDB persistence layer...");
            match init_persistence(&config).await {
                Ok(persistence) => {
                    tracing::info!(
                        hosts = ?config.persistence.scylla_hosts,
                        keyspace = %config.persistence.keyspace,
                        "ScyllaDB persistence initialized"
                    );
                    (
                        Arc::new(persistence.translations),
                        Arc::new(persistence.status),
                    )
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to initialize ScyllaDB: {}. Falling back to in-memory.",
                        e
                    );
                    in_memory_stores()
                }
            }
        } else {
            tracing::info!("Persistence disabled, using in-memory stores");
            in_memory_stores()
        };

    let state = AppState::with_stores(config.clone(), translator, translations, status);
    tracing::info!(
        distributed = state.is_distributed(),
        offline_words = state.resolver.dictionary().len(),
        persist_fallback = config.resolver.persist_fallback,
        "Initialized application state"
    );

    let app = create_router(state);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("bangla_dict={},tower_http=debug", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    subscriber.with(fmt_layer).init();
}

/// Wire the chat-model translator when a credential is configured
fn init_translator(config: &Settings) -> Arc<dyn AiTranslator> {
    if !config.llm.is_active() {
        tracing::warn!("No AI credential configured; unknown words use the template fallback");
        return Arc::new(DisabledTranslator);
    }

    match OpenAIBackend::new(OpenAIConfig::from_settings(&config.llm)) {
        Ok(backend) => Arc::new(LlmTranslator::new(Arc::new(backend))),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create AI backend; AI translations disabled");
            Arc::new(DisabledTranslator)
        }
    }
}

async fn init_persistence(
    config: &Settings,
) -> Result<bangla_dict_persistence::PersistenceLayer, bangla_dict_persistence::PersistenceError> {
    let scylla_config = bangla_dict_persistence::ScyllaConfig {
        hosts: config.persistence.scylla_hosts.clone(),
        keyspace: config.persistence.keyspace.clone(),
        replication_factor: config.persistence.replication_factor,
    };

    bangla_dict_persistence::init(scylla_config).await
}

fn in_memory_stores() -> (Arc<dyn TranslationStore>, Arc<dyn StatusStore>) {
    (
        Arc::new(InMemoryTranslationStore::new()),
        Arc::new(InMemoryStatusStore::new()),
    )
}
