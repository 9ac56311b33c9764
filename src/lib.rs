//! CrowdTable - restaurant recommendation and reservation service
//!
//! The core of this library is the recommendation engine, which scores
//! restaurants against a diner's preferences (cuisine, crowd tolerance,
//! wait time) plus time-of-day, promotion and rating signals, and explains
//! each score in plain sentences. The HTTP layer adds catalog browsing and
//! reservation management around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, explain_match, RecommendationEngine, RecommendationResult};
pub use crate::models::{CrowdLevel, CrowdTolerance, DiningPreferences, Recommendation, Restaurant, ScoringWeights};
