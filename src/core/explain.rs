use crate::core::scoring::{is_preferred_cuisine, wait_band, WaitBand};
use crate::models::{CrowdLevel, CrowdTolerance, DiningPreferences, Restaurant};

/// Reason emitted when no individual rule applies
pub const FALLBACK_REASON: &str = "Good overall match based on current conditions";

/// Build the human-readable reasons behind a match score
///
/// Rules are evaluated in a fixed order (cuisine, crowd, wait, promo,
/// rating) and the output follows that order. Crowd alignment is only
/// reported for the two exact pairings low/low and moderate/medium.
/// The returned list is never empty.
pub fn explain_match(
    restaurant: &Restaurant,
    preferences: &DiningPreferences,
    _score: u8,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if !preferences.cuisine.is_empty() && is_preferred_cuisine(restaurant, preferences) {
        reasons.push(format!("Serves {} cuisine, one of your favorites", restaurant.cuisine));
    }

    match (restaurant.crowd_level, preferences.crowd_tolerance) {
        (CrowdLevel::Low, CrowdTolerance::Low) => {
            reasons.push("Quiet right now, just the way you like it".to_string());
        }
        (CrowdLevel::Moderate, CrowdTolerance::Medium) => {
            reasons.push("Moderately busy, matching your crowd comfort level".to_string());
        }
        _ => {}
    }

    match wait_band(restaurant.wait_time, preferences.max_wait_time) {
        WaitBand::Short => reasons.push(format!(
            "Short wait of {} min, well under your {} min limit",
            restaurant.wait_time, preferences.max_wait_time
        )),
        WaitBand::Within => reasons.push(format!(
            "Wait time is within your {} min limit",
            preferences.max_wait_time
        )),
        WaitBand::Tolerable | WaitBand::Excessive => {}
    }

    if restaurant.has_promo {
        reasons.push("Special promotion available today".to_string());
    }

    if restaurant.rating >= 4.0 {
        reasons.push("Highly rated by other diners".to_string());
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }

    reasons
}
