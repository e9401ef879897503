//! Axum router configuration and setup.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, get_service},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::error::Result;
use crate::web::config::WebConfig;
use crate::web::handlers::{self, AppState};

/// Create the application router with all routes and middleware.
pub async fn create_app(config: WebConfig, state: Arc<AppState>) -> Result<Router> {
    let mut app = Router::new()
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/health", get(handlers::health_check));

    // Dashboard route: a static index.html wins when one is configured
    // and present, otherwise the embedded page is served.
    let mut index_file = None;
    if let Some(static_path) = &config.static_path {
        let static_path = PathBuf::from(static_path);
        if static_path.exists() {
            info!("Serving static files from: {:?}", static_path);
            app = app.nest_service("/static", ServeDir::new(&static_path));

            let candidate = static_path.join("index.html");
            if candidate.exists() {
                index_file = Some(candidate);
            }
        } else {
            warn!("Static path {:?} does not exist, serving embedded dashboard", static_path);
        }
    }
    app = match index_file {
        Some(index) => app.route("/", get_service(ServeFile::new(index))),
        None => app.route("/", get(handlers::dashboard)),
    };

    // Add CORS middleware if enabled
    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    // Add tracing middleware
    app = app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    Ok(app.with_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::cache::TieredCache;
    use crate::telemetry::data::{DiskUsage, FastBatch, Reading, SlowBatch, SystemLoad, ThermalStatus};
    use crate::telemetry::traits::TierSampler;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FixtureSampler;

    #[async_trait]
    impl TierSampler for FixtureSampler {
        async fn sample_fast(&self) -> FastBatch {
            FastBatch {
                nvidia: Reading::failed("nvidia-smi missing"),
                sys: Reading::Value(SystemLoad::default()),
                temps: Reading::Value(ThermalStatus::default()),
            }
        }

        async fn sample_slow(&self) -> SlowBatch {
            SlowBatch {
                disk: DiskUsage::not_found("nvme0n1p2"),
                ollama: Vec::new(),
            }
        }
    }

    fn fixture_state() -> Arc<AppState> {
        Arc::new(AppState {
            cache: TieredCache::new(
                FixtureSampler,
                Duration::from_secs(60),
                Duration::from_secs(60),
            ),
        })
    }

    #[tokio::test]
    async fn app_builds_with_default_config() {
        let app = create_app(WebConfig::default(), fixture_state()).await;
        assert!(app.is_ok());
    }

    #[tokio::test]
    async fn app_builds_without_cors_or_static_files() {
        let config = WebConfig::default().with_cors(false).with_static_path(None);
        let app = create_app(config, fixture_state()).await;
        assert!(app.is_ok());
    }
}
