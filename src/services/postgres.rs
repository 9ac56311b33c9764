use crate::models::{NewReservation, Reservation, ReservationStatus};
use crate::services::reservations::{check_transition, RepositoryError, ReservationRepository};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

/// Reservation status as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
pub enum StatusColumn {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl From<ReservationStatus> for StatusColumn {
    fn from(value: ReservationStatus) -> Self {
        match value {
            ReservationStatus::Pending => StatusColumn::Pending,
            ReservationStatus::Confirmed => StatusColumn::Confirmed,
            ReservationStatus::Cancelled => StatusColumn::Cancelled,
            ReservationStatus::Completed => StatusColumn::Completed,
        }
    }
}

impl From<StatusColumn> for ReservationStatus {
    fn from(value: StatusColumn) -> Self {
        match value {
            StatusColumn::Pending => ReservationStatus::Pending,
            StatusColumn::Confirmed => ReservationStatus::Confirmed,
            StatusColumn::Cancelled => ReservationStatus::Cancelled,
            StatusColumn::Completed => ReservationStatus::Completed,
        }
    }
}

/// PostgreSQL-backed reservation store
pub struct PostgresReservationRepository {
    pool: PgPool,
}

impl PostgresReservationRepository {
    /// Connect and run pending migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    fn map_row(row: &PgRow) -> Result<Reservation, RepositoryError> {
        let party_size: i16 = row.try_get("party_size")?;
        let status: StatusColumn = row.try_get("status")?;

        Ok(Reservation {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            restaurant_id: row.try_get("restaurant_id")?,
            party_size: u16::try_from(party_size)
                .map_err(|_| RepositoryError::InvalidData(format!("party_size {}", party_size)))?,
            reserved_for: row.try_get("reserved_for")?,
            status: status.into(),
            special_requests: row.try_get("special_requests")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Reservation>, RepositoryError> {
        let query = r#"
            SELECT id, user_id, restaurant_id, party_size, reserved_for,
                   status, special_requests, created_at
            FROM reservations
            WHERE user_id = $1
            ORDER BY reserved_for ASC, created_at ASC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let reservations = rows
            .iter()
            .map(Self::map_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("User {} has {} reservations", user_id, reservations.len());

        Ok(reservations)
    }

    async fn create(&self, reservation: NewReservation) -> Result<Reservation, RepositoryError> {
        let reservation = reservation.into_reservation();
        let party_size = i16::try_from(reservation.party_size).map_err(|_| {
            RepositoryError::InvalidData(format!("party_size {}", reservation.party_size))
        })?;

        let query = r#"
            INSERT INTO reservations
                (id, user_id, restaurant_id, party_size, reserved_for,
                 status, special_requests, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#;

        sqlx::query(query)
            .bind(reservation.id)
            .bind(&reservation.user_id)
            .bind(&reservation.restaurant_id)
            .bind(party_size)
            .bind(reservation.reserved_for)
            .bind(StatusColumn::from(reservation.status))
            .bind(&reservation.special_requests)
            .bind(reservation.created_at)
            .execute(&self.pool)
            .await?;

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
        let mut tx = self.pool.begin().await?;

        let current: Option<StatusColumn> =
            sqlx::query_scalar("SELECT status FROM reservations WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let current = current
            .ok_or_else(|| RepositoryError::NotFound(format!("Reservation {} not found", id)))?;
        check_transition(current.into(), status)?;

        let query = r#"
            UPDATE reservations
            SET status = $2
            WHERE id = $1
            RETURNING id, user_id, restaurant_id, party_size, reserved_for,
                      status, special_requests, created_at
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .bind(StatusColumn::from(status))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("Reservation {} is now {}", id, status);

        Self::map_row(&row)
    }

    async fn health_check(&self) -> Result<bool, RepositoryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
