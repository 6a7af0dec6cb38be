pub mod coordinates;
pub mod errors;

pub use coordinates::{haversine_km, round_half_up, Coordinates, EARTH_RADIUS_KM};
pub use errors::DomainError;
