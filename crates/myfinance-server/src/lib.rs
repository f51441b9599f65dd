//! MyFinance Web Server
//!
//! Axum-based REST API over the MyFinance core library: health scoring,
//! monthly/yearly/category reports, spending patterns and CSV/PDF export. The server is
//! stateless; every request carries the transactions it reports on.
//!
//! Security features:
//! - Optional API key authentication (`Authorization: Bearer <key>`)
//! - Restrictive CORS policy
//! - Request body size limit
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use myfinance_core::ServerSettings;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

mod handlers;

/// Maximum request body size (10 MB)
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Paths reachable without an API key
const PUBLIC_PATHS: [&str; 1] = ["/api/status"];

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Valid API keys; empty disables authentication
    pub api_keys: Vec<String>,
}

impl ServerConfig {
    pub fn from_settings(settings: &ServerSettings) -> Self {
        Self {
            allowed_origins: settings.allowed_origins.clone(),
            api_keys: settings.api_keys.clone(),
        }
    }

    pub fn require_auth(&self) -> bool {
        !self.api_keys.is_empty()
    }
}

/// Application state shared across handlers
pub struct AppState {
    pub config: ServerConfig,
}

async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if !state.config.require_auth() || PUBLIC_PATHS.contains(&path) {
        return next.run(request).await;
    }

    let api_key_valid = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|key| validate_api_key(key, &state.config.api_keys))
        .unwrap_or(false);

    if api_key_valid {
        info!(path = %path, "Authenticated via API key");
        return next.run(request).await;
    }

    warn!(path = %path, "Unauthorized request - missing or invalid API key");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Constant-time comparison against each configured key
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    valid_keys.iter().any(|key| {
        let key_bytes = key.as_bytes();
        provided_bytes.len() == key_bytes.len() && bool::from(provided_bytes.ct_eq(key_bytes))
    })
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allowed_origins.is_empty() {
        return cors;
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    cors.allow_origin(origins)
}

/// Create the application router
pub fn create_router(config: ServerConfig) -> Router {
    let cors = cors_layer(&config);
    let state = Arc::new(AppState { config });

    let api_routes = Router::new()
        .route("/status", get(handlers::get_status))
        // Health score
        .route("/health/score", post(handlers::score_health))
        // Reports
        .route("/reports/monthly", post(handlers::create_monthly_report))
        .route("/reports/yearly", post(handlers::create_yearly_report))
        .route("/reports/category", post(handlers::create_category_report))
        .route("/reports/patterns", post(handlers::create_spending_patterns))
        // Export
        .route("/export/monthly", post(handlers::export_monthly))
        .route("/export/monthly.pdf", post(handlers::export_monthly_pdf))
        .route("/export/yearly", post(handlers::export_yearly))
        .route("/export/yearly.pdf", post(handlers::export_yearly_pdf))
        .route("/export/category", post(handlers::export_category))
        .route("/export/category.pdf", post(handlers::export_category_pdf))
        .route("/export/health", post(handlers::export_health))
        .route("/export/transactions", post(handlers::export_transactions));

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(state)
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
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ))
}

/// Start the server with custom configuration
pub async fn serve_with_config(host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    if !config.require_auth() {
        warn!("⚠️  Authentication disabled (no API keys configured)");
    }

    let app = create_router(config);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);

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

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
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

        // Bad input is the caller's to fix; show them why
        if let Some(core_err) = err.downcast_ref::<myfinance_core::Error>() {
            if let myfinance_core::Error::InvalidData(msg) | myfinance_core::Error::Import(msg) =
                core_err
            {
                return Self::bad_request(msg);
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
