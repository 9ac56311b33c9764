use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Current busyness of a restaurant
///
/// Parsed case-insensitively. Anything unrecognized is kept as `Unknown`,
/// which sits in the middle of the scale for crowd matching but is never
/// treated as moderate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum CrowdLevel {
    Low,
    Moderate,
    High,
    Unknown,
}

impl CrowdLevel {
    /// Position on the shared low=1, moderate=2, high=3 scale
    pub fn ordinal(self) -> i32 {
        match self {
            CrowdLevel::Low => 1,
            CrowdLevel::Moderate | CrowdLevel::Unknown => 2,
            CrowdLevel::High => 3,
        }
    }
}

impl From<&str> for CrowdLevel {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => CrowdLevel::Low,
            "moderate" => CrowdLevel::Moderate,
            "high" => CrowdLevel::High,
            _ => CrowdLevel::Unknown,
        }
    }
}

impl From<String> for CrowdLevel {
    fn from(value: String) -> Self {
        CrowdLevel::from(value.as_str())
    }
}

impl Default for CrowdLevel {
    fn default() -> Self {
        CrowdLevel::Unknown
    }
}

/// How much busyness a diner is comfortable with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum CrowdTolerance {
    Low,
    Medium,
    High,
}

impl CrowdTolerance {
    pub fn ordinal(self) -> i32 {
        match self {
            CrowdTolerance::Low => 1,
            CrowdTolerance::Medium => 2,
            CrowdTolerance::High => 3,
        }
    }
}

impl From<&str> for CrowdTolerance {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => CrowdTolerance::Low,
            "high" => CrowdTolerance::High,
            _ => CrowdTolerance::Medium,
        }
    }
}

impl From<String> for CrowdTolerance {
    fn from(value: String) -> Self {
        CrowdTolerance::from(value.as_str())
    }
}

impl Default for CrowdTolerance {
    fn default() -> Self {
        CrowdTolerance::Medium
    }
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Restaurant record as served by the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    #[serde(rename = "crowdLevel", default, deserialize_with = "null_as_default")]
    pub crowd_level: CrowdLevel,
    /// Current wait in minutes
    #[serde(rename = "waitTime", default, deserialize_with = "null_as_default")]
    pub wait_time: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(rename = "hasPromo", default, deserialize_with = "null_as_default")]
    pub has_promo: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "priceRange", default)]
    pub price_range: Option<String>,
    #[serde(rename = "promoDescription", default)]
    pub promo_description: Option<String>,
}

/// Dining preferences entered by a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiningPreferences {
    /// Preferred cuisines; empty means no preference
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(rename = "crowdTolerance", default, deserialize_with = "null_as_default")]
    pub crowd_tolerance: CrowdTolerance,
    #[validate(range(min = 1))]
    #[serde(rename = "maxWaitTime")]
    pub max_wait_time: u32,
    // Collected by the preferences form, not used for scoring
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(rename = "diningOccasion", default)]
    pub dining_occasion: Option<String>,
    #[serde(rename = "groupSize", default)]
    pub group_size: Option<u32>,
}

/// A restaurant annotated with its match score and the reasons behind it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub restaurant: Restaurant,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    pub reasons: Vec<String>,
}

/// Points awarded by each scoring signal
///
/// `Default` is the canonical table; deployments may override individual
/// entries from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub cuisine_match: i32,
    pub cuisine_mismatch: i32,
    pub crowd_perfect: i32,
    pub crowd_acceptable: i32,
    pub crowd_poor: i32,
    pub wait_short: i32,
    pub wait_within: i32,
    pub wait_tolerable: i32,
    pub wait_excessive: i32,
    pub quiet_at_peak: i32,
    pub moderate_off_peak: i32,
    pub time_baseline: i32,
    pub promo: i32,
    pub rating_excellent: i32,
    pub rating_good: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            cuisine_match: 25,
            cuisine_mismatch: -10,
            crowd_perfect: 20,
            crowd_acceptable: 10,
            crowd_poor: 0,
            wait_short: 20,
            wait_within: 15,
            wait_tolerable: 5,
            wait_excessive: 0,
            quiet_at_peak: 15,
            moderate_off_peak: 10,
            time_baseline: 5,
            promo: 10,
            rating_excellent: 10,
            rating_good: 5,
        }
    }
}

/// Lifecycle of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }

    /// Cancelled and completed reservations never change again
    pub fn is_terminal(self) -> bool {
        matches!(self, ReservationStatus::Cancelled | ReservationStatus::Completed)
    }

    /// Parse a status name, ignoring case
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ReservationStatus::Pending),
            "confirmed" => Some(ReservationStatus::Confirmed),
            "cancelled" | "canceled" => Some(ReservationStatus::Cancelled),
            "completed" => Some(ReservationStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "restaurantId")]
    pub restaurant_id: String,
    #[serde(rename = "partySize")]
    pub party_size: u16,
    #[serde(rename = "reservedFor")]
    pub reserved_for: chrono::DateTime<chrono::Utc>,
    pub status: ReservationStatus,
    #[serde(rename = "specialRequests", default)]
    pub special_requests: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Fields supplied when booking a table
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: String,
    pub restaurant_id: String,
    pub party_size: u16,
    pub reserved_for: chrono::DateTime<chrono::Utc>,
    pub special_requests: Option<String>,
}

impl NewReservation {
    /// Materialize the record with a fresh id, starting in `Pending`
    pub fn into_reservation(self) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            restaurant_id: self.restaurant_id,
            party_size: self.party_size,
            reserved_for: self.reserved_for,
            status: ReservationStatus::Pending,
            special_requests: self.special_requests,
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crowd_level_parsing_is_case_insensitive() {
        assert_eq!(CrowdLevel::from("LOW"), CrowdLevel::Low);
        assert_eq!(CrowdLevel::from("Moderate"), CrowdLevel::Moderate);
        assert_eq!(CrowdLevel::from("high "), CrowdLevel::High);
        assert_eq!(CrowdLevel::from("packed"), CrowdLevel::Unknown);
        assert_eq!(CrowdLevel::Unknown.ordinal(), 2);
    }

    #[test]
    fn test_tolerance_unknown_defaults_to_medium() {
        assert_eq!(CrowdTolerance::from("whatever"), CrowdTolerance::Medium);
        assert_eq!(CrowdTolerance::from("Low"), CrowdTolerance::Low);
        assert_eq!(CrowdTolerance::Medium.ordinal(), 2);
    }

    #[test]
    fn test_restaurant_deserializes_camel_case() {
        let json = r#"{
            "id": "r1",
            "name": "Baan Thai",
            "cuisine": "Thai",
            "crowdLevel": "LOW",
            "waitTime": 5,
            "rating": 4.5,
            "hasPromo": true
        }"#;

        let restaurant: Restaurant = serde_json::from_str(json).unwrap();
        assert_eq!(restaurant.crowd_level, CrowdLevel::Low);
        assert_eq!(restaurant.wait_time, 5);
        assert!(restaurant.has_promo);
        assert!(restaurant.address.is_none());
    }

    #[test]
    fn test_restaurant_null_fields_use_defaults() {
        let json = r#"{
            "id": "r2",
            "name": "Night Market",
            "cuisine": "Thai",
            "crowdLevel": null,
            "waitTime": null,
            "rating": null,
            "hasPromo": null
        }"#;

        let restaurant: Restaurant = serde_json::from_str(json).unwrap();
        assert_eq!(restaurant.crowd_level, CrowdLevel::Unknown);
        assert_eq!(restaurant.crowd_level.ordinal(), 2);
        assert_eq!(restaurant.wait_time, 0);
        assert_eq!(restaurant.rating, 0.0);
        assert!(!restaurant.has_promo);
    }

    #[test]
    fn test_null_tolerance_is_medium() {
        let json = r#"{"cuisine": [], "crowdTolerance": null, "maxWaitTime": 15}"#;
        let prefs: DiningPreferences = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.crowd_tolerance, CrowdTolerance::Medium);
    }

    #[test]
    fn test_crowd_level_serializes_lowercase() {
        let value = serde_json::to_value(CrowdLevel::Moderate).unwrap();
        assert_eq!(value, serde_json::json!("moderate"));
    }

    #[test]
    fn test_preferences_ignore_inert_fields() {
        let json = r#"{
            "cuisine": ["Thai"],
            "crowdTolerance": "medium",
            "maxWaitTime": 20,
            "budget": "$$",
            "groupSize": 4
        }"#;

        let prefs: DiningPreferences = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.group_size, Some(4));
        assert!(prefs.validate().is_ok());
    }

    #[test]
    fn test_status_parse_and_terminal() {
        assert_eq!(ReservationStatus::parse("Confirmed"), Some(ReservationStatus::Confirmed));
        assert_eq!(ReservationStatus::parse("canceled"), Some(ReservationStatus::Cancelled));
        assert_eq!(ReservationStatus::parse("seated"), None);
        assert!(ReservationStatus::Completed.is_terminal());
        assert!(!ReservationStatus::Pending.is_terminal());
    }
}
