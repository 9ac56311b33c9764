// Route exports
pub mod errors;
pub mod recommendations;
pub mod reservations;
pub mod restaurants;

use actix_web::{web, HttpResponse, Responder};
use crate::core::RecommendationEngine;
use crate::models::HealthResponse;
use crate::services::{ReservationRepository, RestaurantCatalog};
use std::sync::Arc;

pub use errors::ApiError;
pub use recommendations::RecommendationOptions;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RestaurantCatalog>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub engine: RecommendationEngine,
    pub recommendation: RecommendationOptions,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(restaurants::configure)
            .configure(recommendations::configure)
            .configure(reservations::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = match state.reservations.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Reservation store ({}) health check failed: {}", state.reservations.backend_tag(), e);
            false
        }
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
