use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::application::DistanceService;
use crate::config::SecurityConfig;
use crate::error::{AppError, AppResult};
use crate::observability::AppMetrics;
use crate::utils::locale::SupportedLocale;

pub mod distance;

#[derive(Clone)]
pub struct AppState {
    pub distance_service: Arc<DistanceService>,
    pub security: SecurityConfig,
    pub default_locale: SupportedLocale,
    pub app_environment: String,
    pub metrics: Arc<AppMetrics>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(distance::configure)
        .route("/health", web::get().to(health))
        .route("/metrics", web::get().to(metrics));
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check passed")
    ),
    tag = "health"
)]
pub async fn health() -> &'static str {
    "ok"
}

// A valid admin token bypasses the private-network gate; otherwise the
// endpoint is reachable only from private or loopback addresses when
// `metrics_allow_private_only` is set.
async fn metrics(state: web::Data<AppState>, request: HttpRequest) -> AppResult<HttpResponse> {
    if !admin_token_matches(&state.security, &request) && state.security.metrics_allow_private_only
    {
        let ip = request
            .peer_addr()
            .map(|addr| addr.ip())
            .ok_or(AppError::Unauthorized)?;

        if !is_private_or_loopback(ip) {
            return Err(AppError::Unauthorized);
        }
    }

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(state.metrics.render_prometheus()))
}

fn admin_token_matches(security: &SecurityConfig, request: &HttpRequest) -> bool {
    let Some(token) = security
        .metrics_admin_token
        .as_deref()
        .filter(|token| !token.is_empty())
    else {
        return false;
    };

    request
        .headers()
        .get("x-admin-token")
        .and_then(|value| value.to_str().ok())
        == Some(token)
}

fn is_private_or_loopback(ip: std::net::IpAddr) -> bool {
    match ip {
        std::net::IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        std::net::IpAddr::V6(v6) => v6.is_loopback() || v6.is_unique_local(),
    }
}
