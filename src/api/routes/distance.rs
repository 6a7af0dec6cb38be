use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::info;
use validator::Validate;

use crate::api::dtos::{DistanceRequest, DistanceResponse};
use crate::api::routes::AppState;
use crate::error::AppResult;
use crate::utils::locale;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/distance")
            .route("", web::post().to(calculate))
            .route("/ping", web::get().to(ping)),
    );
}

#[utoipa::path(
    post,
    path = "/distance",
    request_body = DistanceRequest,
    params(
        ("Accept-Language" = Option<String>, Header,
         description = "Weighted language ranges used to pick the display locale"),
    ),
    responses(
        (status = 200, description = "Distance computed", body = DistanceResponse),
        (status = 400, description = "Coordinate out of range", body = crate::api::dtos::ErrorResponse),
    ),
    tag = "distance"
)]
pub async fn calculate(
    state: web::Data<AppState>,
    request: HttpRequest,
    payload: web::Json<DistanceRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;
    let req = payload.into_inner();

    let distance_km = state.distance_service.calculate_km(
        req.user_lat,
        req.user_lng,
        req.target_lat,
        req.target_lng,
    )?;

    let accept_language = request
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    let display_locale = locale::resolve(accept_language, state.default_locale);
    let distance_km_formatted = locale::format_number(distance_km, display_locale);

    info!(
        distance_km,
        locale = %display_locale,
        user_lat = req.user_lat,
        user_lng = req.user_lng,
        target_lat = req.target_lat,
        target_lng = req.target_lng,
        "distance calculated"
    );

    Ok(HttpResponse::Ok().json(DistanceResponse {
        distance_km,
        distance_km_formatted,
    }))
}

#[utoipa::path(
    get,
    path = "/distance/ping",
    responses(
        (status = 200, description = "Service is live")
    ),
    tag = "distance"
)]
pub async fn ping() -> &'static str {
    "ok"
}
