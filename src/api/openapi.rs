use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::routes::distance::calculate,
        crate::api::routes::distance::ping,
        crate::api::routes::health,
    ),
    components(
        schemas(
            crate::api::dtos::distance_dto::DistanceRequest,
            crate::api::dtos::distance_dto::DistanceResponse,
            crate::api::dtos::common::ErrorResponse,
        )
    ),
    tags(
        (name = "distance", description = "Great-circle distance computation"),
        (name = "health", description = "Health check endpoints"),
    ),
    info(
        title = "Distance Backend API",
        version = "0.1.0",
        description = "Haversine great-circle distance API with locale-aware display formatting",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub fn configure_swagger_ui(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
