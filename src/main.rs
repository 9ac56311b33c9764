use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use crowdtable::config::{CatalogSourceKind, LogFormat, LoggingSettings, Settings};
use crowdtable::core::RecommendationEngine;
use crowdtable::routes::{self, errors, AppState, RecommendationOptions};
use crowdtable::services::{
    CacheManager, InMemoryReservationRepository, PostgresReservationRepository,
    ReservationRepository, RestaurantCatalog,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

fn init_logging(logging: &LoggingSettings) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    match logging.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // The subscriber depends on the settings, so a config error is only
    // reported through the returned io::Error
    let settings = match std::env::var("CROWDTABLE_CONFIG") {
        Ok(path) => Settings::load_from(&path),
        Err(_) => Settings::load(),
    }
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, format!("Configuration error: {}", e)))?;

    init_logging(&settings.logging);

    info!("Starting CrowdTable recommendation service...");
    info!("Configuration loaded successfully");

    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);
    let cache = Arc::new(
        CacheManager::new(settings.cache.redis_url.as_deref(), l1_cache_size, cache_ttl).await,
    );

    info!(
        "Cache manager initialized (L1: {} entries, TTL: {}s, redis: {})",
        l1_cache_size,
        cache_ttl,
        cache.has_redis()
    );

    let catalog = match settings.catalog.source {
        CatalogSourceKind::File => RestaurantCatalog::from_file(&settings.catalog.path)
            .await
            .map_err(|e| startup_error("Failed to load restaurant catalog", e))?,
        CatalogSourceKind::Remote => {
            let url = settings
                .catalog
                .url
                .clone()
                .ok_or_else(|| startup_error("Configuration error", "catalog.url is required for a remote catalog"))?;
            RestaurantCatalog::remote(url, cache.clone(), settings.catalog.request_timeout_secs)
                .map_err(|e| startup_error("Failed to create catalog client", e))?
        }
    };

    info!("Restaurant catalog ready ({})", catalog.source_tag());

    let reservations: Arc<dyn ReservationRepository> = match &settings.database.url {
        Some(url) => {
            let db = &settings.database;
            let repo = PostgresReservationRepository::new(
                url,
                db.max_connections.unwrap_or(10),
                db.min_connections.unwrap_or(1),
                db.acquire_timeout_secs.unwrap_or(5),
                db.idle_timeout_secs.unwrap_or(600),
            )
            .await
            .map_err(|e| startup_error("PostgreSQL connection error", e))?;
            Arc::new(repo)
        }
        None => {
            warn!("No database URL configured, reservations are kept in memory");
            Arc::new(InMemoryReservationRepository::new())
        }
    };

    info!("Reservation store initialized ({})", reservations.backend_tag());

    let weights = settings.scoring.weights;
    let engine = RecommendationEngine::new(weights);

    info!("Recommendation engine initialized with weights: {:?}", weights);

    let app_state = AppState {
        catalog: Arc::new(catalog),
        reservations,
        engine,
        recommendation: RecommendationOptions::new(
            settings.recommendation.default_limit,
            settings.recommendation.max_limit,
            settings.recommendation.utc_offset_hours,
        ),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(errors::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(errors::handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(errors::handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
