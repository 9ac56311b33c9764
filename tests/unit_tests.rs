// Unit tests for CrowdTable scoring

use chrono::{NaiveTime, TimeZone, Utc};
use crowdtable::core::{
    explain::{explain_match, FALLBACK_REASON},
    scoring::{calculate_match_score, crowd_score, wait_score},
};
use crowdtable::models::{CrowdLevel, CrowdTolerance, DiningPreferences, Restaurant, ScoringWeights};

fn create_restaurant(
    cuisine: &str,
    crowd_level: CrowdLevel,
    wait_time: u32,
    rating: f64,
    has_promo: bool,
) -> Restaurant {
    Restaurant {
        id: "test".to_string(),
        name: "Test".to_string(),
        cuisine: cuisine.to_string(),
        crowd_level,
        wait_time,
        rating,
        has_promo,
        address: None,
        image_url: None,
        price_range: None,
        promo_description: None,
    }
}

fn create_preferences(cuisine: &[&str], tolerance: CrowdTolerance, max_wait_time: u32) -> DiningPreferences {
    DiningPreferences {
        cuisine: cuisine.iter().map(|c| c.to_string()).collect(),
        crowd_tolerance: tolerance,
        max_wait_time,
        budget: None,
        dining_occasion: None,
        group_size: None,
    }
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

const LEVELS: [CrowdLevel; 3] = [CrowdLevel::Low, CrowdLevel::Moderate, CrowdLevel::High];
const TOLERANCES: [CrowdTolerance; 3] = [CrowdTolerance::Low, CrowdTolerance::Medium, CrowdTolerance::High];

#[test]
fn test_thai_at_lunch_peak_scores_100() {
    let restaurant = create_restaurant("Thai", CrowdLevel::Low, 5, 4.5, true);
    let preferences = create_preferences(&["Thai"], CrowdTolerance::Low, 20);

    let score = calculate_match_score(&restaurant, &preferences, &hour(13), &ScoringWeights::default());

    assert_eq!(score, 100);
}

#[test]
fn test_poor_match_clamps_to_zero_off_peak() {
    let restaurant = create_restaurant("Mexican", CrowdLevel::High, 45, 2.5, false);
    let preferences = create_preferences(&["Thai"], CrowdTolerance::Low, 20);

    for h in [0, 9, 11, 15, 16, 17, 21, 23] {
        let score = calculate_match_score(&restaurant, &preferences, &hour(h), &ScoringWeights::default());
        assert_eq!(score, 0, "hour {}", h);
    }
}

#[test]
fn test_empty_cuisine_preference_is_neutral() {
    let preferences = create_preferences(&[], CrowdTolerance::High, 20);
    let weights = ScoringWeights::default();

    // High crowd, high tolerance: 20; wait 40 > 30: 0; high crowd: 5; no promo; rating <3: 0
    for cuisine in ["Thai", "Mexican", "Unknown"] {
        let restaurant = create_restaurant(cuisine, CrowdLevel::High, 40, 1.0, false);
        let score = calculate_match_score(&restaurant, &preferences, &hour(10), &weights);
        assert_eq!(score, 25, "cuisine {}", cuisine);
    }
}

#[test]
fn test_poor_match_explains_with_fallback_only() {
    let restaurant = create_restaurant("Mexican", CrowdLevel::High, 45, 2.5, false);
    let preferences = create_preferences(&["Thai"], CrowdTolerance::Low, 20);

    let reasons = explain_match(&restaurant, &preferences, 0);

    assert_eq!(reasons, vec![FALLBACK_REASON.to_string()]);
}

#[test]
fn test_score_always_within_bounds() {
    let weights = ScoringWeights::default();
    let cuisines: [&[&str]; 3] = [&[], &["Thai"], &["Greek", "Thai"]];

    for level in LEVELS {
        for tolerance in TOLERANCES {
            for wait in [0, 5, 10, 20, 30, 31, 120] {
                for rating in [0.0, 2.9, 3.0, 4.0, 5.0] {
                    for promo in [false, true] {
                        for prefs_cuisine in cuisines {
                            for h in 0..24 {
                                let restaurant = create_restaurant("Thai", level, wait, rating, promo);
                                let preferences = create_preferences(prefs_cuisine, tolerance, 20);
                                let score = calculate_match_score(&restaurant, &preferences, &hour(h), &weights);
                                assert!(score <= 100);

                                let reasons = explain_match(&restaurant, &preferences, score);
                                assert!(!reasons.is_empty());
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_scoring_is_deterministic() {
    let restaurant = create_restaurant("Italian", CrowdLevel::Moderate, 12, 3.7, true);
    let preferences = create_preferences(&["Italian", "Greek"], CrowdTolerance::Medium, 25);
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 19, 15, 0).unwrap();
    let weights = ScoringWeights::default();

    let first = calculate_match_score(&restaurant, &preferences, &now, &weights);
    let second = calculate_match_score(&restaurant, &preferences, &now, &weights);

    assert_eq!(first, second);
    assert_eq!(
        explain_match(&restaurant, &preferences, first),
        explain_match(&restaurant, &preferences, second)
    );
}

#[test]
fn test_crowd_contribution_non_increasing_with_distance() {
    let weights = ScoringWeights::default();

    for tolerance in TOLERANCES {
        let mut by_distance: Vec<(i32, i32)> = LEVELS
            .iter()
            .map(|&level| {
                let distance = (level.ordinal() - tolerance.ordinal()).abs();
                (distance, crowd_score(level, tolerance, &weights))
            })
            .collect();
        by_distance.sort();

        for pair in by_distance.windows(2) {
            assert!(pair[0].1 >= pair[1].1, "{:?} for tolerance {:?}", pair, tolerance);
        }
    }

    assert_eq!(crowd_score(CrowdLevel::Low, CrowdTolerance::Low, &weights), 20);
    assert_eq!(crowd_score(CrowdLevel::Moderate, CrowdTolerance::Low, &weights), 10);
    assert_eq!(crowd_score(CrowdLevel::High, CrowdTolerance::Low, &weights), 0);
}

#[test]
fn test_wait_contribution_non_increasing_with_wait() {
    let weights = ScoringWeights::default();

    for max_wait in [1, 7, 20, 45] {
        let mut previous = i32::MAX;
        for wait in 0..=(max_wait * 2) {
            let current = wait_score(wait, max_wait, &weights);
            assert!(current <= previous, "wait {} max {}", wait, max_wait);
            previous = current;
        }
    }
}

#[test]
fn test_wait_thresholds_at_boundaries() {
    let weights = ScoringWeights::default();

    assert_eq!(wait_score(10, 20, &weights), 20);
    assert_eq!(wait_score(20, 20, &weights), 15);
    assert_eq!(wait_score(30, 20, &weights), 5);
    assert_eq!(wait_score(31, 20, &weights), 0);
}

#[test]
fn test_unknown_crowd_strings_use_middle_ordinal() {
    let restaurant: Restaurant = serde_json::from_str(
        r#"{"id": "x", "name": "X", "cuisine": "Thai", "crowdLevel": "Bustling", "waitTime": 60}"#,
    )
    .unwrap();
    let preferences: DiningPreferences = serde_json::from_str(
        r#"{"cuisine": [], "crowdTolerance": "anything", "maxWaitTime": 20}"#,
    )
    .unwrap();

    assert_eq!(restaurant.crowd_level.ordinal(), 2);
    assert_eq!(preferences.crowd_tolerance.ordinal(), 2);

    assert_eq!(restaurant.crowd_level, CrowdLevel::Unknown);

    // crowd 20 + time baseline 5; an unknown level earns no moderate off-peak bonus
    let score = calculate_match_score(&restaurant, &preferences, &hour(10), &ScoringWeights::default());
    assert_eq!(score, 25);
    assert_eq!(explain_match(&restaurant, &preferences, score), vec![FALLBACK_REASON.to_string()]);
}

#[test]
fn test_cuisine_mismatch_penalty() {
    let weights = ScoringWeights::default();
    let restaurant = create_restaurant("Greek", CrowdLevel::Moderate, 5, 4.2, false);

    let none = calculate_match_score(&restaurant, &create_preferences(&[], CrowdTolerance::Medium, 20), &hour(10), &weights);
    let other = calculate_match_score(&restaurant, &create_preferences(&["Thai"], CrowdTolerance::Medium, 20), &hour(10), &weights);
    let matched = calculate_match_score(&restaurant, &create_preferences(&["Thai", "Greek"], CrowdTolerance::Medium, 20), &hour(10), &weights);

    assert_eq!(none, 60);
    assert_eq!(other, 50);
    assert_eq!(matched, 85);
}
