use chrono::Timelike;
use crate::models::{DiningPreferences, Recommendation, Restaurant, ScoringWeights};
use crate::core::{explain::explain_match, scoring::calculate_match_score};

/// Result of ranking a catalog
#[derive(Debug)]
pub struct RecommendationResult {
    pub recommendations: Vec<Recommendation>,
    pub total_candidates: usize,
}

/// Ranks restaurants against dining preferences
///
/// Stateless apart from its weights, so one instance can be shared freely
/// across workers.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    weights: ScoringWeights,
}

impl RecommendationEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score and explain a single restaurant
    pub fn score<T: Timelike>(
        &self,
        restaurant: &Restaurant,
        preferences: &DiningPreferences,
        now: &T,
    ) -> Recommendation {
        let match_score = calculate_match_score(restaurant, preferences, now, &self.weights);
        let reasons = explain_match(restaurant, preferences, match_score);

        Recommendation {
            restaurant: restaurant.clone(),
            match_score,
            reasons,
        }
    }

    /// Rank restaurants for the given preferences
    ///
    /// # Arguments
    /// * `preferences` - The diner's preferences
    /// * `restaurants` - Candidate restaurants, in catalog order
    /// * `now` - Instant used for the time-of-day signal
    /// * `limit` - Maximum number of recommendations to return
    /// * `min_score` - Candidates scoring below this are dropped
    ///
    /// # Returns
    /// Recommendations sorted by score, highest first. The sort is stable so
    /// equal scores keep their catalog order.
    pub fn recommend<T: Timelike>(
        &self,
        preferences: &DiningPreferences,
        restaurants: &[Restaurant],
        now: &T,
        limit: usize,
        min_score: u8,
    ) -> RecommendationResult {
        let total_candidates = restaurants.len();

        let mut recommendations: Vec<Recommendation> = restaurants
            .iter()
            .map(|restaurant| self.score(restaurant, preferences, now))
            .filter(|rec| rec.match_score >= min_score)
            .collect();

        recommendations.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        recommendations.truncate(limit);

        tracing::debug!(
            "Ranked {} of {} restaurants (min score {})",
            recommendations.len(),
            total_candidates,
            min_score
        );

        RecommendationResult {
            recommendations,
            total_candidates,
        }
    }

    /// Rank against the local wall clock
    pub fn recommend_now(
        &self,
        preferences: &DiningPreferences,
        restaurants: &[Restaurant],
        limit: usize,
        min_score: u8,
    ) -> RecommendationResult {
        self.recommend(preferences, restaurants, &chrono::Local::now(), limit, min_score)
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
