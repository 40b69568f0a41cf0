use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use helpmatch::config::{LoggingSettings, Settings};
use helpmatch::core::Matcher;
use helpmatch::models::ScoringWeights;
use helpmatch::routes::{self, matches::AppState};
use helpmatch::services::{PostgresClient, RankingCache};
use std::io::{Error as IoError, ErrorKind};
use std::sync::Arc;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

/// RUST_LOG takes precedence over the configured level
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(IoError::new(ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);
    info!("Starting helpmatch matching service...");

    let postgres = match PostgresClient::connect(
        &settings.database.url,
        settings.database.pool_options(),
    )
    .await
    {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to connect to PostgreSQL: {}", e);
            return Err(IoError::new(ErrorKind::Other, e.to_string()));
        }
    };

    info!("PostgreSQL client initialized");

    // Matching works without Redis, only slower
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match RankingCache::connect(&settings.cache.redis_url, l1_cache_size, cache_ttl).await {
        Ok(c) => {
            info!("Ranking cache initialized (local: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);
            Some(Arc::new(c))
        }
        Err(e) => {
            warn!("Failed to connect to Redis ({}), running without cache", e);
            None
        }
    };

    let limits = settings.matching.limits();
    let matcher = Matcher::new(ScoringWeights::default(), limits);

    info!(
        "Matcher initialized (min score: {}, max results: {})",
        limits.min_score, limits.max_results
    );

    let app_state = AppState {
        postgres,
        cache,
        matcher,
        candidate_limit: settings.matching.candidate_limit,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(app_state.matcher))
            .configure(routes::payload_config)
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
