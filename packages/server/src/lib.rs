#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the animal alert application.
//!
//! A thin HTTP adapter: it fetches a report snapshot from a
//! [`store::ReportStore`], reads the wall clock once per request, and hands
//! both to the visibility engine. Submission and resolution requests are
//! validated by the domain crates before being written back.

mod handlers;
pub mod store;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use animal_alert_visibility::{ReportCatalog, StalenessPolicy, VisibilityFilter};

use crate::store::{InMemoryReportStore, ReportStore};

/// Shared application state.
pub struct AppState {
    /// Where reports are read from and written to.
    pub store: Arc<dyn ReportStore>,
    /// Visibility engine configured with the retention window.
    pub catalog: ReportCatalog,
}

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (`BIND_ADDR`, default `127.0.0.1`).
    pub bind_addr: String,
    /// Port to bind (`PORT`, default `8080`).
    pub port: u16,
    /// JSON report snapshot to seed the store with (`REPORTS_PATH`).
    pub reports_path: Option<PathBuf>,
    /// Retention window override in hours (`RETENTION_HOURS`).
    pub retention_hours: Option<u32>,
}

impl ServerConfig {
    /// Reads the configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            reports_path: std::env::var_os("REPORTS_PATH").map(PathBuf::from),
            retention_hours: std::env::var("RETENTION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok()),
        }
    }

    /// The report catalog implied by the retention setting.
    #[must_use]
    pub fn catalog(&self) -> ReportCatalog {
        let staleness = self
            .retention_hours
            .map_or_else(StalenessPolicy::default, StalenessPolicy::from_hours);
        ReportCatalog::new(VisibilityFilter::new(staleness))
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/distance-options", web::get().to(handlers::distance_options))
            .route("/reports", web::get().to(handlers::reports))
            .route("/reports", web::post().to(handlers::create_report))
            .route("/reports/{id}/resolve", web::post().to(handlers::resolve_report))
            .route("/stats", web::get().to(handlers::stats)),
    );
}

/// Starts the animal alert API server.
///
/// Reads [`ServerConfig`] from the environment, seeds the in-memory store
/// from `REPORTS_PATH` when set, and starts the Actix-Web HTTP server. The
/// caller provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the report snapshot cannot be
/// loaded, or if the HTTP server fails to bind or encounters a runtime
/// error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env();

    let store = match &config.reports_path {
        Some(path) => {
            log::info!("Seeding reports from {}...", path.display());
            InMemoryReportStore::load(path)
                .await
                .map_err(std::io::Error::other)?
        }
        None => InMemoryReportStore::default(),
    };

    let catalog = config.catalog();
    log::info!(
        "Reports expire after {} hours",
        catalog.filter().staleness().retention().num_hours()
    );

    let state = web::Data::new(AppState {
        store: Arc::new(store),
        catalog,
    });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr.clone(), config.port))?
    .run()
    .await
}
