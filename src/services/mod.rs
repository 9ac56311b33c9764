// Service exports
pub mod cache;
pub mod catalog;
pub mod postgres;
pub mod reservations;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use catalog::{CatalogError, RestaurantCatalog};
pub use postgres::PostgresReservationRepository;
pub use reservations::{InMemoryReservationRepository, RepositoryError, ReservationRepository};
