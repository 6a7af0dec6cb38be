use std::sync::Arc;
use std::time::Instant;

use actix_web::dev::Service as _;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{middleware::Logger, web, App, HttpServer};
use distance_backend::api::openapi;
use distance_backend::api::routes::{self, AppState};
use distance_backend::application::DistanceService;
use distance_backend::config::AppConfig;
use distance_backend::middleware::request_logging::{status_class, RequestMeta};
use distance_backend::observability::error_tracking::track_server_error;
use distance_backend::observability::AppMetrics;
use distance_backend::security::{cors_middleware, security_headers};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("failed to load application configuration");

    let registry =
        tracing_subscriber::registry().with(EnvFilter::new(config.logging.level.clone()));
    if config.logging.json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }

    let state = AppState {
        distance_service: Arc::new(DistanceService::new()),
        security: config.security.clone(),
        default_locale: config.locale.default_locale(),
        app_environment: config.app.environment.clone(),
        metrics: Arc::new(AppMetrics::default()),
    };

    info!(
        host = %config.app.host,
        port = config.app.port,
        environment = %state.app_environment,
        default_locale = %state.default_locale,
        "starting distance backend"
    );

    let bind_host = config.app.host.clone();
    let bind_port = config.app.port;
    let security_config = config.security.clone();
    let metrics = state.metrics.clone();

    HttpServer::new(move || {
        let metrics = metrics.clone();
        App::new()
            .wrap(Logger::default())
            .wrap_fn(move |req, srv| {
                let meta = RequestMeta::from_request(&req);
                let span = meta.span();
                let metrics = metrics.clone();
                let start = Instant::now();

                let fut = srv.call(req);
                async move {
                    let mut response = fut.await?;

                    response.headers_mut().insert(
                        HeaderName::from_static("x-request-id"),
                        HeaderValue::from_str(&meta.request_id)
                            .unwrap_or_else(|_| HeaderValue::from_static("invalid-request-id")),
                    );

                    let status = response.status().as_u16();
                    let latency_ms = start.elapsed().as_millis() as u64;
                    metrics.record_request(status, latency_ms);

                    let _entered = span.enter();
                    info!(
                        status = status,
                        status_class = status_class(status),
                        latency_ms = latency_ms,
                        "request completed"
                    );
                    track_server_error(&meta.path, &meta.method, status, &meta.request_id);

                    Ok(response)
                }
            })
            .wrap(cors_middleware(&security_config))
            .wrap(security_headers())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
            .configure(openapi::configure_swagger_ui)
    })
    .bind((bind_host, bind_port))?
    .run()
    .await
}
