use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{self, AppState};
use crate::cli::commands::ServeArgs;
use crate::config::{self, Overrides};
use crate::errors::PhishguardError;
use crate::llm::{GeminiProvider, LLMProvider};
use crate::store::{FirestoreStore, ReportStore};

pub async fn handle_serve(args: ServeArgs) -> Result<(), PhishguardError> {
    let overrides = Overrides {
        host: args.host,
        port: args.port,
        api_key: args.api_key,
        model: args.model,
        credentials: args.credentials,
        collection: args.collection,
    };
    let config = config::load_config(args.config.as_deref(), overrides).await?;

    let api_key = config.api_key.clone().ok_or_else(|| {
        PhishguardError::Config(
            "No Gemini API key configured (set GEMINI_API_KEY or llm.api_key)".into(),
        )
    })?;
    let model: Arc<dyn LLMProvider> =
        Arc::new(GeminiProvider::new(&api_key, Some(&config.model)));
    info!(model = %config.model, "Model client ready");

    // A missing or unreadable key file keeps the process up; reports
    // degrade to "offline" instead.
    let store: Option<Arc<dyn ReportStore>> =
        match FirestoreStore::from_key_file(&config.credentials, &config.collection) {
            Ok(store) => {
                info!(collection = %store.collection(), "Report store online");
                Some(Arc::new(store))
            }
            Err(e) => {
                warn!(error = %e, "Report store unavailable, continuing without persistence");
                None
            }
        };

    let app = api::build_router(AppState { model, store });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| PhishguardError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
