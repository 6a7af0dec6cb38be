use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Coordinate pairs for a distance computation. Bounds are inclusive; values
/// outside range are rejected, never clamped.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DistanceRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "user_lat must be between -90 and 90"))]
    pub user_lat: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "user_lng must be between -180 and 180"
    ))]
    pub user_lng: f64,

    #[validate(range(
        min = -90.0,
        max = 90.0,
        message = "target_lat must be between -90 and 90"
    ))]
    pub target_lat: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "target_lng must be between -180 and 180"
    ))]
    pub target_lng: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DistanceResponse {
    /// Raw rounded value for machine consumption.
    pub distance_km: f64,
    /// The same value rendered for display in the negotiated locale.
    pub distance_km_formatted: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_lat: f64, user_lng: f64, target_lat: f64, target_lng: f64) -> DistanceRequest {
        DistanceRequest {
            user_lat,
            user_lng,
            target_lat,
            target_lng,
        }
    }

    #[test]
    fn valid_coordinates_pass_validation() {
        assert!(request(-23.5505, -46.6333, -22.9068, -43.1729)
            .validate()
            .is_ok());
    }

    #[test]
    fn boundary_coordinates_pass_validation() {
        assert!(request(-90.0, -180.0, 90.0, 180.0).validate().is_ok());
    }

    #[test]
    fn out_of_range_user_latitude_fails_validation() {
        let errors = request(91.0, 0.0, 0.0, 0.0)
            .validate()
            .expect_err("latitude 91 must fail");
        assert!(errors.errors().contains_key("user_lat"));
    }

    #[test]
    fn out_of_range_target_longitude_fails_validation() {
        let errors = request(0.0, 0.0, 0.0, 181.0)
            .validate()
            .expect_err("longitude 181 must fail");
        assert!(errors.errors().contains_key("target_lng"));
    }

    #[test]
    fn deserializes_from_json_body() {
        let request: DistanceRequest = serde_json::from_str(
            r#"{"user_lat": -23.5505, "user_lng": -46.6333, "target_lat": -22.9068, "target_lng": -43.1729}"#,
        )
        .expect("body should deserialize");
        assert_eq!(request.user_lat, -23.5505);
        assert_eq!(request.target_lng, -43.1729);
    }

    #[test]
    fn response_serializes_raw_and_formatted_values() {
        let response = DistanceResponse {
            distance_km: 360.75,
            distance_km_formatted: "360,75".to_string(),
        };
        let json = serde_json::to_value(&response).expect("response should serialize");
        assert_eq!(json["distance_km"], 360.75);
        assert_eq!(json["distance_km_formatted"], "360,75");
    }
}
