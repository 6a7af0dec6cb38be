use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::DomainError;

/// WGS84 mean Earth radius in kilometers. Fixed; changing it changes every
/// computed distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Builds a coordinate pair, enforcing the inclusive ranges
    /// [-90, 90] for latitude and [-180, 180] for longitude.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::ValidationError(format!(
                "invalid latitude {lat:.6}: must be between -90 and 90"
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::ValidationError(format!(
                "invalid longitude {lon:.6}: must be between -180 and 180"
            )));
        }
        Ok(Self { lat, lon })
    }

    fn bitwise_eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

/// Great-circle distance between two validated coordinate pairs using the
/// Haversine formula. Returns kilometers, unrounded.
///
/// Identical pairs (bit-for-bit) short-circuit to an exact 0.0 instead of
/// accumulating a near-zero floating artifact.
pub fn haversine_km(origin: Coordinates, target: Coordinates) -> f64 {
    if origin.bitwise_eq(&target) {
        return 0.0;
    }

    let lat1 = origin.lat.to_radians();
    let lat2 = target.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (target.lon - origin.lon).to_radians();

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lon = (d_lon / 2.0).sin();

    let a = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lon * sin_lon;

    // Floating-point error can push `a` slightly outside [0, 1] for
    // near-antipodal or near-identical points, which would NaN the sqrt/asin.
    let a = a.clamp(0.0, 1.0);

    // asin stays well-conditioned as `a` approaches 1 (antipodal points),
    // unlike the atan2 form.
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Deterministic decimal rounding, half-up at the midpoint. Goes through
/// `Decimal` so 2.345 rounds to 2.35 regardless of its binary representation.
pub fn round_half_up(value: f64, decimal_places: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
