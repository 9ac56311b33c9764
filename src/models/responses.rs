use serde::{Deserialize, Serialize};
use crate::models::domain::{Recommendation, Reservation, Restaurant};

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
    pub total_candidates: usize,
    pub evaluated_at: chrono::DateTime<chrono::FixedOffset>,
}

/// Response for the restaurant browse endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantListResponse {
    pub restaurants: Vec<Restaurant>,
    pub total_results: usize,
}

/// Response listing a user's reservations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListResponse {
    pub user_id: String,
    pub reservations: Vec<Reservation>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
