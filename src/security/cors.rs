use actix_cors::Cors;
use actix_web::http::header;

use crate::config::SecurityConfig;

/// Origin-allowlisted CORS for browser clients of the distance endpoint.
/// Only the methods and request headers the API actually accepts are allowed;
/// no credentials are involved anywhere in the service.
pub fn cors_middleware(config: &SecurityConfig) -> Cors {
    let allowlist = config.cors_allowed_origins.clone();

    Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
        ])
        .max_age(3600)
        .allowed_origin_fn(move |origin, _| {
            origin
                .to_str()
                .map_or(false, |value| allowlist.iter().any(|allowed| allowed == value))
        })
}
