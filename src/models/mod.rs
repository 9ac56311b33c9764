// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CrowdLevel, CrowdTolerance, DiningPreferences, NewReservation, Recommendation, Reservation,
    ReservationStatus, Restaurant, ScoringWeights,
};
pub use requests::{
    BrowseQuery, CreateReservationRequest, ListReservationsQuery, RecommendRequest,
    UpdateStatusRequest,
};
pub use responses::{
    ErrorResponse, HealthResponse, RecommendResponse, ReservationListResponse,
    RestaurantListResponse,
};
