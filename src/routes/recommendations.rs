use actix_web::{web, HttpResponse};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use validator::Validate;
use crate::models::{RecommendRequest, RecommendResponse};
use crate::routes::{ApiError, AppState};

/// Limits and clock settings for the recommendations endpoint
#[derive(Debug, Clone, Copy)]
pub struct RecommendationOptions {
    pub default_limit: u16,
    pub max_limit: u16,
    /// Timezone used when a request carries no timestamp
    pub utc_offset: FixedOffset,
}

impl RecommendationOptions {
    /// Build options, falling back to UTC for an out-of-range offset
    pub fn new(default_limit: u16, max_limit: u16, utc_offset_hours: i32) -> Self {
        let utc_offset = FixedOffset::east_opt(utc_offset_hours * 3600).unwrap_or_else(|| {
            tracing::warn!("Invalid UTC offset {}h, using UTC", utc_offset_hours);
            Utc.fix()
        });

        Self {
            default_limit,
            max_limit: max_limit.max(1),
            utc_offset,
        }
    }

    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.utc_offset)
    }

    fn effective_limit(&self, requested: Option<u16>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit) as usize
    }
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self::new(10, 100, 0)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations", web::post().to(recommend));
}

/// Rank restaurants for a set of dining preferences
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "preferences": {
///     "cuisine": ["Thai"],
///     "crowdTolerance": "low|medium|high",
///     "maxWaitTime": 20
///   },
///   "limit": 10,
///   "minScore": 0,
///   "timestamp": "2024-05-01T13:00:00+02:00"
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return Err(errors.into());
    }

    let req = req.into_inner();
    let options = state.recommendation;
    let limit = options.effective_limit(req.limit);
    let evaluated_at = req.timestamp.unwrap_or_else(|| options.now());

    let restaurants = state.catalog.list().await?;

    let result = state.engine.recommend(
        &req.preferences,
        &restaurants,
        &evaluated_at,
        limit,
        req.min_score.unwrap_or(0),
    );

    tracing::info!(
        "Returning {} recommendations (from {} restaurants)",
        result.recommendations.len(),
        result.total_candidates
    );

    Ok(HttpResponse::Ok().json(RecommendResponse {
        recommendations: result.recommendations,
        total_candidates: result.total_candidates,
        evaluated_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_limit() {
        let options = RecommendationOptions::new(10, 50, 0);
        assert_eq!(options.effective_limit(None), 10);
        assert_eq!(options.effective_limit(Some(80)), 50);
        assert_eq!(options.effective_limit(Some(0)), 1);
    }

    #[test]
    fn test_invalid_offset_falls_back_to_utc() {
        let options = RecommendationOptions::new(10, 50, 99);
        assert_eq!(options.utc_offset.local_minus_utc(), 0);

        let options = RecommendationOptions::new(10, 50, -5);
        assert_eq!(options.utc_offset.local_minus_utc(), -5 * 3600);
    }
}
