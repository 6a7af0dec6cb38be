mod distance_service;

pub use distance_service::DistanceService;
