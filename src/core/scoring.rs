use chrono::Timelike;
use crate::models::{CrowdLevel, CrowdTolerance, DiningPreferences, Restaurant, ScoringWeights};

/// Lunch and dinner rush, inclusive hour ranges
const PEAK_HOURS: [(u32, u32); 2] = [(12, 14), (18, 20)];

/// Calculate a match score (0-100) for a restaurant based on dining preferences
///
/// Scoring formula (default weights):
/// score = clamp(
///     cuisine          # +25 if preferred, -10 if not, 0 with no preference
///   + crowd            # 20 / 10 / 0 by distance from tolerance
///   + wait             # 20 / 15 / 5 / 0 against maxWaitTime
///   + time_of_day      # 15 quiet at peak, 10 moderate off-peak, else 5
///   + promo            # +10
///   + rating,          # +10 at 4.0+, +5 at 3.0+
///   0, 100)
///
/// `now` is only read for its hour, in whatever timezone the caller chose.
pub fn calculate_match_score<T: Timelike>(
    restaurant: &Restaurant,
    preferences: &DiningPreferences,
    now: &T,
    weights: &ScoringWeights,
) -> u8 {
    let total = cuisine_score(restaurant, preferences, weights)
        + crowd_score(restaurant.crowd_level, preferences.crowd_tolerance, weights)
        + wait_score(restaurant.wait_time, preferences.max_wait_time, weights)
        + time_of_day_score(restaurant.crowd_level, now.hour(), weights)
        + promo_score(restaurant.has_promo, weights)
        + rating_score(restaurant.rating, weights);

    total.clamp(0, 100) as u8
}

/// Whether the restaurant serves one of the preferred cuisines
#[inline]
pub fn is_preferred_cuisine(restaurant: &Restaurant, preferences: &DiningPreferences) -> bool {
    preferences.cuisine.iter().any(|c| c == &restaurant.cuisine)
}

#[inline]
fn cuisine_score(
    restaurant: &Restaurant,
    preferences: &DiningPreferences,
    weights: &ScoringWeights,
) -> i32 {
    if preferences.cuisine.is_empty() {
        return 0;
    }

    if is_preferred_cuisine(restaurant, preferences) {
        weights.cuisine_match
    } else {
        weights.cuisine_mismatch
    }
}

/// Crowd score, decreasing with the gap between crowd level and tolerance
#[inline]
pub fn crowd_score(level: CrowdLevel, tolerance: CrowdTolerance, weights: &ScoringWeights) -> i32 {
    match (level.ordinal() - tolerance.ordinal()).abs() {
        0 => weights.crowd_perfect,
        1 => weights.crowd_acceptable,
        _ => weights.crowd_poor,
    }
}

/// Where a wait time falls relative to the diner's limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitBand {
    /// At most half the limit
    Short,
    /// Within the limit
    Within,
    /// Up to 1.5x the limit
    Tolerable,
    Excessive,
}

/// Classify a wait against the limit using integer arithmetic only
#[inline]
pub fn wait_band(wait_time: u32, max_wait_time: u32) -> WaitBand {
    let wait = u64::from(wait_time);
    let max = u64::from(max_wait_time);

    if 2 * wait <= max {
        WaitBand::Short
    } else if wait <= max {
        WaitBand::Within
    } else if 2 * wait <= 3 * max {
        WaitBand::Tolerable
    } else {
        WaitBand::Excessive
    }
}

#[inline]
pub fn wait_score(wait_time: u32, max_wait_time: u32, weights: &ScoringWeights) -> i32 {
    match wait_band(wait_time, max_wait_time) {
        WaitBand::Short => weights.wait_short,
        WaitBand::Within => weights.wait_within,
        WaitBand::Tolerable => weights.wait_tolerable,
        WaitBand::Excessive => weights.wait_excessive,
    }
}

#[inline]
pub fn is_peak_hour(hour: u32) -> bool {
    PEAK_HOURS
        .iter()
        .any(|&(start, end)| hour >= start && hour <= end)
}

/// Quiet places are worth more during the rush, moderate ones outside it
#[inline]
pub fn time_of_day_score(level: CrowdLevel, hour: u32, weights: &ScoringWeights) -> i32 {
    let peak = is_peak_hour(hour);
    match level {
        CrowdLevel::Low if peak => weights.quiet_at_peak,
        CrowdLevel::Moderate if !peak => weights.moderate_off_peak,
        _ => weights.time_baseline,
    }
}

#[inline]
fn promo_score(has_promo: bool, weights: &ScoringWeights) -> i32 {
    if has_promo {
        weights.promo
    } else {
        0
    }
}

#[inline]
fn rating_score(rating: f64, weights: &ScoringWeights) -> i32 {
    if rating >= 4.0 {
        weights.rating_excellent
    } else if rating >= 3.0 {
        weights.rating_good
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn create_test_restaurant(cuisine: &str, crowd: CrowdLevel, wait: u32, rating: f64, promo: bool) -> Restaurant {
        Restaurant {
            id: "r1".to_string(),
            name: "Test Kitchen".to_string(),
            cuisine: cuisine.to_string(),
            crowd_level: crowd,
            wait_time: wait,
            rating,
            has_promo: promo,
            address: None,
            image_url: None,
            price_range: None,
            promo_description: None,
        }
    }

    fn create_test_preferences(cuisine: &[&str], tolerance: CrowdTolerance, max_wait: u32) -> DiningPreferences {
        DiningPreferences {
            cuisine: cuisine.iter().map(|c| c.to_string()).collect(),
            crowd_tolerance: tolerance,
            max_wait_time: max_wait,
            budget: None,
            dining_occasion: None,
            group_size: None,
        }
    }

    fn at(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 30, 0).unwrap()
    }

    #[test]
    fn test_perfect_match_clamps_to_100() {
        let restaurant = create_test_restaurant("Thai", CrowdLevel::Low, 5, 4.5, true);
        let prefs = create_test_preferences(&["Thai"], CrowdTolerance::Low, 20);

        let score = calculate_match_score(&restaurant, &prefs, &at(13), &ScoringWeights::default());
        assert_eq!(score, 100);
    }

    #[test]
    fn test_negative_total_clamps_to_zero() {
        let restaurant = create_test_restaurant("Mexican", CrowdLevel::High, 45, 2.5, false);
        let prefs = create_test_preferences(&["Thai"], CrowdTolerance::Low, 20);

        let score = calculate_match_score(&restaurant, &prefs, &at(16), &ScoringWeights::default());
        assert_eq!(score, 0);
    }

    #[test]
    fn test_crowd_score_by_distance() {
        let w = ScoringWeights::default();
        assert_eq!(crowd_score(CrowdLevel::Moderate, CrowdTolerance::Medium, &w), 20);
        assert_eq!(crowd_score(CrowdLevel::High, CrowdTolerance::Medium, &w), 10);
        assert_eq!(crowd_score(CrowdLevel::Low, CrowdTolerance::High, &w), 0);
        assert_eq!(crowd_score(CrowdLevel::Unknown, CrowdTolerance::Medium, &w), 20);
    }

    #[test]
    fn test_wait_bands() {
        assert_eq!(wait_band(10, 20), WaitBand::Short);
        assert_eq!(wait_band(11, 20), WaitBand::Within);
        assert_eq!(wait_band(20, 20), WaitBand::Within);
        assert_eq!(wait_band(30, 20), WaitBand::Tolerable);
        assert_eq!(wait_band(31, 20), WaitBand::Excessive);
        // Odd limits: 0.5 * 15 = 7.5
        assert_eq!(wait_band(7, 15), WaitBand::Short);
        assert_eq!(wait_band(8, 15), WaitBand::Within);
    }

    #[test]
    fn test_peak_hours() {
        for hour in [12, 13, 14, 18, 19, 20] {
            assert!(is_peak_hour(hour), "hour {} should be peak", hour);
        }
        for hour in [0, 11, 15, 17, 21, 23] {
            assert!(!is_peak_hour(hour), "hour {} should not be peak", hour);
        }
    }

    #[test]
    fn test_time_of_day_score() {
        let w = ScoringWeights::default();
        assert_eq!(time_of_day_score(CrowdLevel::Low, 19, &w), 15);
        assert_eq!(time_of_day_score(CrowdLevel::Low, 10, &w), 5);
        assert_eq!(time_of_day_score(CrowdLevel::Moderate, 10, &w), 10);
        assert_eq!(time_of_day_score(CrowdLevel::Moderate, 13, &w), 5);
        assert_eq!(time_of_day_score(CrowdLevel::High, 10, &w), 5);
        assert_eq!(time_of_day_score(CrowdLevel::Unknown, 10, &w), 5);
        assert_eq!(time_of_day_score(CrowdLevel::Unknown, 19, &w), 5);
    }

    #[test]
    fn test_rating_thresholds() {
        let w = ScoringWeights::default();
        assert_eq!(rating_score(4.0, &w), 10);
        assert_eq!(rating_score(3.9, &w), 5);
        assert_eq!(rating_score(3.0, &w), 5);
        assert_eq!(rating_score(2.99, &w), 0);
    }

    #[test]
    fn test_custom_weights_are_applied() {
        let restaurant = create_test_restaurant("Thai", CrowdLevel::High, 100, 1.0, true);
        let prefs = create_test_preferences(&[], CrowdTolerance::Low, 20);
        let weights = ScoringWeights { promo: 40, ..ScoringWeights::default() };

        // promo 40 + time baseline 5
        let score = calculate_match_score(&restaurant, &prefs, &at(9), &weights);
        assert_eq!(score, 45);
    }
}
