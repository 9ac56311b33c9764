use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;
use crate::models::{
    CreateReservationRequest, ListReservationsQuery, NewReservation, ReservationListResponse,
    ReservationStatus, UpdateStatusRequest,
};
use crate::routes::{ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/reservations", web::get().to(list_reservations))
        .route("/reservations", web::post().to(create_reservation))
        .route("/reservations/{id}/status", web::patch().to(update_status));
}

/// List a user's reservations
///
/// GET /api/v1/reservations?userId={userId}
async fn list_reservations(
    state: web::Data<AppState>,
    query: web::Query<ListReservationsQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;
    let user_id = query.into_inner().user_id;

    let reservations = state.reservations.list(&user_id).await?;

    Ok(HttpResponse::Ok().json(ReservationListResponse {
        count: reservations.len(),
        user_id,
        reservations,
    }))
}

/// Book a table
///
/// POST /api/v1/reservations
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "restaurantId": "string",
///   "partySize": 2,
///   "reservedFor": "2024-05-01T19:30:00Z",
///   "specialRequests": "string"
/// }
/// ```
async fn create_reservation(
    state: web::Data<AppState>,
    req: web::Json<CreateReservationRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let req = req.into_inner();

    // Unknown restaurants surface as 404
    state.catalog.get(&req.restaurant_id).await?;

    let reservation = state
        .reservations
        .create(NewReservation::from(req))
        .await?;

    tracing::info!(
        "Reservation {} created for {} at {} ({})",
        reservation.id,
        reservation.user_id,
        reservation.restaurant_id,
        state.reservations.backend_tag()
    );

    Ok(HttpResponse::Created().json(reservation))
}

/// Change a reservation's status
///
/// PATCH /api/v1/reservations/{id}/status
///
/// Request body:
/// ```json
/// { "status": "pending|confirmed|cancelled|completed" }
/// ```
async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let status = ReservationStatus::parse(&req.status).ok_or_else(|| {
        ApiError::BadRequest(
            "Status must be one of: pending, confirmed, cancelled, completed".to_string(),
        )
    })?;

    let reservation = state
        .reservations
        .update_status(path.into_inner(), status)
        .await?;

    Ok(HttpResponse::Ok().json(reservation))
}
