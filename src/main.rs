//! Aid Intake server binary - composition root.
//!
//! 1. Load configuration from the environment
//! 2. Install the tracing subscriber
//! 3. Load the question catalog
//! 4. Wire adapters into the application state
//! 5. Serve HTTP until Ctrl-C, then cancel pending deletions

use std::sync::Arc;

use aid_intake::adapters::{
    app_router, load_catalog, renderer_for, CatalogLoadError, DownloadSettings,
    FileAnswerSetRepository, InMemorySessionStore, LlmAnswerJudge, LocalArtifactStorage,
    OpenAIConfig, OpenAIProvider, QuestionnaireAppState, TokioDeletionScheduler,
};
use aid_intake::application::DocumentFiller;
use aid_intake::config::{AppConfig, ConfigError, ServerConfig, ValidationError};
use aid_intake::ports::{AIError, AIProvider, ArtifactStorage, DeletionScheduler};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),

    #[error("AI provider setup failed: {0}")]
    Provider(#[from] AIError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!("Starting aid-intake v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Arc::new(load_catalog(&config.questionnaire.catalog_path).await?);

    let api_key = config
        .ai
        .openai_api_key
        .clone()
        .ok_or(ValidationError::MissingRequired("OPENAI_API_KEY"))?;
    let provider: Arc<dyn AIProvider> = Arc::new(OpenAIProvider::new(
        OpenAIConfig::from_secret(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    )?);

    let paths = config.documents.paths();
    let storage: Arc<dyn ArtifactStorage> = Arc::new(LocalArtifactStorage::new());
    let answers = Arc::new(FileAnswerSetRepository::new(&config.documents.answers_path));
    let scheduler = Arc::new(TokioDeletionScheduler::new(storage.clone()));
    let filler = Arc::new(DocumentFiller::new(
        answers.clone(),
        storage.clone(),
        renderer_for(paths.format()),
        paths.clone(),
    ));

    tracing::info!(
        questions = catalog.len(),
        model = %config.ai.model,
        template = %paths.template.display(),
        format = %paths.format(),
        "Components ready"
    );

    let state = QuestionnaireAppState {
        catalog,
        sessions: Arc::new(InMemorySessionStore::new()),
        judge: Arc::new(LlmAnswerJudge::new(provider)),
        answers,
        storage,
        scheduler: scheduler.clone(),
        filler,
        downloads: DownloadSettings {
            filename: config.documents.download_name.clone(),
            download_cleanup: config.documents.download_cleanup(),
            generate_cleanup: config.documents.generate_cleanup(),
        },
    };

    let router = app_router(
        state,
        &config.server.cors_origins_list(),
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(pending = scheduler.pending(), "Cancelling scheduled deletions");
    scheduler.shutdown();

    Ok(())
}
