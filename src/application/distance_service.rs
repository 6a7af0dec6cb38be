use tracing::debug;

use crate::domain::{haversine_km, round_half_up, Coordinates, DomainError};

const DECIMAL_PLACES: u32 = 2;

/// Stateless great-circle distance calculator. Holds no state between calls,
/// so a single instance serves any number of concurrent requests.
#[derive(Clone, Default)]
pub struct DistanceService;

impl DistanceService {
    pub fn new() -> Self {
        Self
    }

    /// Validates both coordinate pairs (origin first), then computes the
    /// Haversine distance in kilometers, rounded half-up to 2 decimal places.
    pub fn calculate_km(
        &self,
        user_lat: f64,
        user_lng: f64,
        target_lat: f64,
        target_lng: f64,
    ) -> Result<f64, DomainError> {
        let origin = Coordinates::new(user_lat, user_lng)?;
        let target = Coordinates::new(target_lat, target_lng)?;

        debug!(
            user_lat,
            user_lng, target_lat, target_lng, "computing distance"
        );

        let raw_km = haversine_km(origin, target);
        let distance_km = round_half_up(raw_km, DECIMAL_PLACES);

        debug!(distance_km, raw_km, "distance computed");

        Ok(distance_km)
    }
}
