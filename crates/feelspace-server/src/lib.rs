//! Feel Space Web Server
//!
//! Axum-based JSON API for the Feel Space wellness tracker: emotion logging,
//! analytics reports, mini-game sessions and their token rewards.
//!
//! - Restrictive CORS policy (origins from `FEELSPACE_ALLOWED_ORIGINS`)
//! - Input validation (pagination limits, body size limits)
//! - Audit logging for all API access, attributed to the wallet involved
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use feelspace_core::{AnalyticsEngine, Database};

mod handlers;

/// Maximum request body size (64 KB)
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Default page size for list endpoints
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Environment variable holding comma-separated CORS origins
pub const ALLOWED_ORIGINS_ENV: &str = "FEELSPACE_ALLOWED_ORIGINS";

/// Audit actor for requests not tied to a wallet
pub const ANONYMOUS_ACTOR: &str = "anonymous";

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read configuration from the environment
    pub fn from_env() -> Self {
        Self {
            allowed_origins: std::env::var(ALLOWED_ORIGINS_ENV)
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub engine: AnalyticsEngine,
}

/// Audit actor for a request: the wallet it concerns, if any
pub fn audit_actor(wallet: Option<&str>) -> String {
    wallet
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .unwrap_or(ANONYMOUS_ACTOR)
        .to_string()
}

/// Clamp a requested page size into `1..=MAX_PAGE_LIMIT`
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
}

/// Simple success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, config: &ServerConfig) -> Router {
    create_router_with_engine(db, config, AnalyticsEngine::new())
}

/// Create the application router with a custom analytics engine
pub fn create_router_with_engine(
    db: Database,
    config: &ServerConfig,
    engine: AnalyticsEngine,
) -> Router {
    info!(rules = ?engine.rule_names(), "Analytics engine ready");

    let state = Arc::new(AppState { db, engine });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Emotion logs
        .route(
            "/emotions",
            get(handlers::list_emotions).post(handlers::create_emotion),
        )
        .route("/emotions/:id", delete(handlers::delete_emotion))
        // Analytics
        .route("/analytics/:wallet", get(handlers::get_analytics))
        // Games and rewards
        .route(
            "/games",
            get(handlers::list_games).post(handlers::create_game),
        )
        .route("/games/:id/reward", post(handlers::confirm_reward))
        // Wallets
        .route("/wallets/:wallet/summary", get(handlers::get_wallet_summary))
        // Audit log
        .route("/audit", get(handlers::list_audit_log));

    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods(methods.clone())
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    };

    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'",
    );

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ))
}

/// Start the server
pub async fn serve(db: Database, host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    if config.allowed_origins.is_empty() {
        info!("CORS: same-origin only (set {} to allow others)", ALLOWED_ORIGINS_ENV);
    } else {
        info!(origins = ?config.allowed_origins, "CORS origins configured");
    }

    let app = create_router(db, &config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        if let Some(rejection) = err.downcast_ref::<JsonRejection>() {
            // Oversized bodies keep their 413; any other body problem is a 400
            let status = match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            return Self {
                status,
                message: format!("Invalid JSON: {}", rejection.body_text()),
                internal: None,
            };
        }

        // Caller mistakes surface as-is; everything else is hidden
        match err.downcast_ref::<feelspace_core::Error>() {
            Some(feelspace_core::Error::InvalidData(msg))
            | Some(feelspace_core::Error::Import(msg)) => Self::bad_request(msg),
            Some(feelspace_core::Error::NotFound(msg)) => {
                Self::not_found(&format!("{} not found", msg))
            }
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                // Return generic message to client
                message: "An internal error occurred".to_string(),
                // Keep full error for logging
                internal: Some(err),
            },
        }
    }
}

#[cfg(test)]
mod tests;
