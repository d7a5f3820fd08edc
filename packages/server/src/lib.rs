#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the barangay map.
//!
//! Serves the dashboard summary, the searchable/sortable resources table,
//! and the weather-enriched map markers as JSON. The record feed is
//! loaded once at startup and shared read-only by every worker. Access
//! control is expected to sit in front of this server.

mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use barangay_map_store::{DEFAULT_DATA_PATH, RecordStore, feed_for_location};
use barangay_map_weather::WeatherResolver;

/// Shared application state.
pub struct AppState {
    /// Records loaded at startup.
    pub store: RecordStore,
    /// Weather lookups for the dashboard and map.
    pub resolver: WeatherResolver,
}

/// Registers the `/api` routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/dashboard", web::get().to(handlers::dashboard))
            .route("/resources", web::get().to(handlers::resources))
            .route("/map", web::get().to(handlers::map)),
    );
}

/// Starts the barangay map API server.
///
/// Loads the record feed named by `BARANGAY_DATA` (a file path or URL,
/// default [`DEFAULT_DATA_PATH`]), builds the weather resolver from
/// `OPENWEATHER_API_KEY`, and serves on `BIND_ADDR:PORT`. A feed that
/// fails to load leaves the store empty rather than aborting startup.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the weather HTTP client cannot
/// be built, or if the HTTP server fails to bind or encounters a runtime
/// error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let location =
        std::env::var("BARANGAY_DATA").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());
    log::info!("Loading barangay records from {location}...");
    let store = RecordStore::load(feed_for_location(&location).as_ref()).await;
    if store.is_degraded() {
        log::warn!("Serving with an empty record set");
    }

    let resolver = WeatherResolver::from_env().map_err(std::io::Error::other)?;

    let state = web::Data::new(AppState { store, resolver });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
