use crate::models::{NewReservation, Reservation, ReservationStatus};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Errors that can occur in a reservation store
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cannot change reservation from {from} to {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

/// Storage for reservations
#[async_trait]
pub trait ReservationRepository: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    /// Reservations for a user, earliest `reserved_for` first
    async fn list(&self, user_id: &str) -> Result<Vec<Reservation>, RepositoryError>;

    /// Persist a new reservation in the `Pending` state
    async fn create(&self, reservation: NewReservation) -> Result<Reservation, RepositoryError>;

    /// Move a reservation to `status`
    ///
    /// Fails with `NotFound` for unknown ids and `InvalidTransition` when the
    /// reservation is already cancelled or completed.
    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<Reservation, RepositoryError>;

    async fn health_check(&self) -> Result<bool, RepositoryError>;
}

/// Reject changes out of terminal states; re-applying the same status is a no-op
pub fn check_transition(
    from: ReservationStatus,
    to: ReservationStatus,
) -> Result<(), RepositoryError> {
    if from.is_terminal() && from != to {
        return Err(RepositoryError::InvalidTransition { from, to });
    }
    Ok(())
}

/// Process-local reservation store
#[derive(Default)]
pub struct InMemoryReservationRepository {
    reservations: RwLock<HashMap<Uuid, Reservation>>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Reservation>, RepositoryError> {
        let guard = self.reservations.read().await;
        let mut found: Vec<Reservation> = guard
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.reserved_for
                .cmp(&b.reserved_for)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(found)
    }

    async fn create(&self, reservation: NewReservation) -> Result<Reservation, RepositoryError> {
        let reservation = reservation.into_reservation();
        self.reservations
            .write()
            .await
            .insert(reservation.id, reservation.clone());

        tracing::debug!(
            "Created reservation {} for {} at {}",
            reservation.id,
            reservation.user_id,
            reservation.restaurant_id
        );
        Ok(reservation)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<Reservation, RepositoryError> {
        let mut guard = self.reservations.write().await;
        let reservation = guard
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Reservation {} not found", id)))?;

        check_transition(reservation.status, status)?;
        reservation.status = status;

        Ok(reservation.clone())
    }

    async fn health_check(&self) -> Result<bool, RepositoryError> {
        Ok(true)
    }
}
