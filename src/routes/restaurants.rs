use actix_web::{web, HttpResponse};
use crate::core::RestaurantFilter;
use crate::models::{BrowseQuery, RestaurantListResponse};
use crate::routes::{ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/restaurants", web::get().to(list_restaurants))
        .route("/restaurants/{id}", web::get().to(get_restaurant));
}

/// Browse restaurants
///
/// GET /api/v1/restaurants?cuisine=Thai&q=noodle&maxWaitTime=20&promoOnly=true
async fn list_restaurants(
    state: web::Data<AppState>,
    query: web::Query<BrowseQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = RestaurantFilter::from(&query.into_inner());
    let restaurants = state.catalog.browse(&filter).await?;

    tracing::debug!("Browse {:?} returned {} restaurants", filter, restaurants.len());

    Ok(HttpResponse::Ok().json(RestaurantListResponse {
        total_results: restaurants.len(),
        restaurants,
    }))
}

/// GET /api/v1/restaurants/{id}
async fn get_restaurant(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let restaurant = state.catalog.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(restaurant))
}
