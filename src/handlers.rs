use actix_cors::Cors;
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::models::PaginatedResponse;
use crate::utils::{Pagination, PaginationParams};

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Flight weather API is running")
}

#[get("/heartbeat")]
pub async fn heartbeat(data: web::Data<AppState>) -> impl Responder {
    match data.flights.ping().await {
        Ok(()) => HttpResponse::Ok().body("OK - Database connection is healthy"),
        Err(e) => {
            log::error!("Heartbeat failed: {e}");
            HttpResponse::InternalServerError().body("Database connection is unhealthy")
        }
    }
}

#[get("/api/flights/getWeatherReport")]
pub async fn get_weather_report(
    query: web::Query<PaginationParams>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let pagination = Pagination::new(&query, data.pagination)?;

    let total = data.flights.count().await?;
    let flights = data
        .flights
        .page(pagination.limit, pagination.offset)
        .await?;
    let items = data.enricher.enrich(flights).await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse {
        page: pagination.page,
        limit: pagination.limit,
        total,
        items,
    }))
}

#[post("/api/cache/clear")]
pub async fn clear_cache(data: web::Data<AppState>) -> impl Responder {
    data.cache().clear();
    log::info!("Weather cache cleared");
    HttpResponse::Ok().json(json!({ "message": "Cache cleared successfully" }))
}

#[get("/api/cache/stats")]
pub async fn cache_stats(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.cache().stats())
}

/// Open CORS: any origin, method and header; `*` is sent back as the origin.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Registers every route on an app or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(heartbeat)
        .service(get_weather_report)
        .service(clear_cache)
        .service(cache_stats);
}
