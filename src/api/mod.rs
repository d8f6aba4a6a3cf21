pub mod errors;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::CoastConfig;
use crate::errors::CoastError;
use crate::notify::NotificationBoard;
use crate::platform::{CoastPlatform, PlatformPorts};

#[derive(Clone)]
pub struct AppState {
    pub platform: Arc<CoastPlatform>,
    pub notifications: NotificationBoard,
    pub started_at: DateTime<Utc>,
}

/// Wire a headless platform for `config` and run its initial render.
pub async fn create_app_state(config: CoastConfig) -> Result<AppState, CoastError> {
    let notifications = NotificationBoard::new();
    let ports = PlatformPorts::headless(&config, Arc::new(notifications.clone()));
    let platform = Arc::new(CoastPlatform::new(config, ports));
    platform.start().await?;
    Ok(AppState {
        platform,
        notifications,
        started_at: Utc::now(),
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route(
            "/api/reports",
            get(routes::reports::list_reports).post(routes::reports::submit_report),
        )
        .route("/api/reports/:id", get(routes::reports::get_report))
        .route("/api/view", get(routes::view::get_view))
        .route("/api/stats", get(routes::view::get_stats))
        .route("/api/filters", put(routes::view::apply_filters))
        .route("/api/notifications", get(routes::notifications::list_notifications))
        .route("/api/location", post(routes::location::request_location))
        .route("/api/attachments/preview", post(routes::attachments::preview_attachments))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
