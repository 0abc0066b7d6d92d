//! Landing command - Resolves a token's landing page against the backend.

use std::sync::Arc;

use crate::cli::args::LandingArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{BackendClient, HttpBackend};
use crate::services::{SessionManager, SessionService};

/// Execute the landing command
pub async fn execute(args: LandingArgs, config: Config) -> AppResult<()> {
    let backend: Arc<dyn BackendClient> = Arc::new(HttpBackend::new(&config)?);
    let sessions = SessionManager::new(backend);

    let viewer = sessions.identify(Some(&args.token)).await;
    let landing = sessions.landing(&viewer).await;

    if landing.degraded {
        tracing::warn!("Backend errors forced a fallback landing");
    }

    if args.json {
        let json = serde_json::to_string_pretty(&landing)
            .map_err(|e| AppError::internal(format!("Failed to encode landing: {}", e)))?;
        println!("{}", json);
    } else {
        println!("{} -> {}", landing.role, landing.path);
    }

    Ok(())
}
