// Core algorithm exports
pub mod explain;
pub mod filters;
pub mod recommender;
pub mod scoring;

pub use explain::{explain_match, FALLBACK_REASON};
pub use filters::{filter_restaurants, matches_filter, RestaurantFilter};
pub use recommender::{RecommendationEngine, RecommendationResult};
pub use scoring::{calculate_match_score, is_peak_hour, wait_band, WaitBand};
