use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{DiningPreferences, NewReservation};

/// Request to rank restaurants against a set of preferences
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(nested)]
    pub preferences: DiningPreferences,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[validate(range(max = 100))]
    #[serde(alias = "min_score", rename = "minScore", default)]
    pub min_score: Option<u8>,
    /// Evaluate the time-of-day signal at this instant instead of now
    #[serde(default)]
    pub timestamp: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// Query string accepted by the restaurant browse endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(alias = "max_wait_time", rename = "maxWaitTime", default)]
    pub max_wait_time: Option<u32>,
    #[serde(alias = "promo_only", rename = "promoOnly", default)]
    pub promo_only: Option<bool>,
}

/// Query string for listing a user's reservations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListReservationsQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// Request to book a table
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReservationRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "restaurant_id", rename = "restaurantId")]
    pub restaurant_id: String,
    #[validate(range(min = 1, max = 50))]
    #[serde(alias = "party_size", rename = "partySize")]
    pub party_size: u16,
    #[serde(alias = "reserved_for", rename = "reservedFor")]
    pub reserved_for: chrono::DateTime<chrono::Utc>,
    #[validate(length(max = 500))]
    #[serde(alias = "special_requests", rename = "specialRequests", default)]
    pub special_requests: Option<String>,
}

impl From<CreateReservationRequest> for NewReservation {
    fn from(req: CreateReservationRequest) -> Self {
        NewReservation {
            user_id: req.user_id,
            restaurant_id: req.restaurant_id,
            party_size: req.party_size,
            reserved_for: req.reserved_for,
            special_requests: req.special_requests,
        }
    }
}

/// Request to move a reservation to a new status
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
}
