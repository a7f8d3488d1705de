use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;

use flight_weather_api::app_state::AppState;
use flight_weather_api::config::Config;
use flight_weather_api::db::{self, PgFlightSource};
use flight_weather_api::handlers;
use flight_weather_api::logging::{access_logger, setup_logger};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    setup_logger();

    let config = Config::from_env().map_err(io::Error::other)?;
    let pool = db::create_pool(&config.database_url).map_err(io::Error::other)?;
    // Cache and rate limiter live in the shared state, so every worker
    // sees the same entries and the same provider call budget.
    let state = AppState::from_config(&config, Arc::new(PgFlightSource::new(pool)))
        .map_err(io::Error::other)?;

    let bind_address = config.bind_address();
    log::info!(
        "Weather provider limits: {} concurrent, {}ms spacing, cache TTL {}s",
        config.weather.max_concurrent,
        config.weather.min_spacing.as_millis(),
        config.weather.cache_ttl.as_secs()
    );
    log::info!("Starting server at http://{bind_address}");

    HttpServer::new(move || {
        App::new()
            .wrap(handlers::cors())
            .wrap(access_logger())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
