//! HTTP handler functions for the animal alert API.

use actix_web::{HttpResponse, web};
use animal_alert_report_models::{DISTANCE_OPTIONS_KM, ReportStats, ViewKind};
use animal_alert_server_models::{
    ApiCatalogEntry, ApiHealth, CreateReportRequest, ReportQueryParams, ResolveReportRequest,
    StatsQueryParams,
};
use chrono::Utc;

use crate::AppState;
use crate::store::StoreError;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/distance-options`
///
/// Returns the radius choices for the nearby-cases filter.
pub async fn distance_options() -> HttpResponse {
    HttpResponse::Ok().json(DISTANCE_OPTIONS_KM)
}

/// `GET /api/reports`
///
/// Lists the reports visible in the requested view. The owner view reads
/// only the caller's reports from the store.
pub async fn reports(
    state: web::Data<AppState>,
    params: web::Query<ReportQueryParams>,
) -> HttpResponse {
    let viewer = match params.viewer() {
        Ok(viewer) => viewer,
        Err(e) => {
            log::warn!("Rejected report query: {e}");
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
    };

    let snapshot = match (params.view, params.owner_id.as_deref()) {
        (ViewKind::OwnerList, Some(owner_id)) => state.store.by_owner(owner_id).await,
        (ViewKind::OwnerList, None) => {
            log::warn!("Rejected owner view without ownerId");
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "ownerId is required for the owner view"
            }));
        }
        _ => state.store.all().await,
    };

    match snapshot {
        Ok(rows) => {
            let entries: Vec<ApiCatalogEntry> = state
                .catalog
                .list(&rows, &viewer, params.view, Utc::now())
                .into_iter()
                .map(ApiCatalogEntry::from)
                .collect();
            HttpResponse::Ok().json(entries)
        }
        Err(e) => {
            log::error!("Failed to query reports: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to query reports"
            }))
        }
    }
}

/// `POST /api/reports`
///
/// Validates a submitted draft and stores it as a pending report.
pub async fn create_report(
    state: web::Data<AppState>,
    body: web::Json<CreateReportRequest>,
) -> HttpResponse {
    let CreateReportRequest {
        owner_id,
        draft,
        media_url,
    } = body.into_inner();

    let id = uuid::Uuid::new_v4().to_string();
    let report = match draft.into_report(id, owner_id, media_url, Utc::now()) {
        Ok(report) => report,
        Err(e) => {
            log::warn!("Rejected report submission: {e}");
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
    };

    match state.store.insert(report.clone()).await {
        Ok(()) => HttpResponse::Created().json(report),
        Err(e) => {
            log::error!("Failed to store report {}: {e}", report.id);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to store report"
            }))
        }
    }
}

/// `POST /api/reports/{id}/resolve`
///
/// Marks one of the caller's pending reports as resolved.
pub async fn resolve_report(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ResolveReportRequest>,
) -> HttpResponse {
    let id = path.into_inner();

    match state.store.resolve(&id, &body.owner_id, Utc::now()).await {
        Ok(report) => {
            log::info!("Report {id} resolved");
            HttpResponse::Ok().json(report)
        }
        Err(StoreError::NotFound { .. }) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Report not found: {id}")
        })),
        Err(StoreError::NotOwner { .. }) => {
            log::warn!("User {} tried to resolve report {id}", body.owner_id);
            HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Only the reporter can resolve a report"
            }))
        }
        Err(StoreError::Transition(e)) => HttpResponse::Conflict().json(serde_json::json!({
            "error": e.to_string()
        })),
        Err(e) => {
            log::error!("Failed to resolve report {id}: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to resolve report"
            }))
        }
    }
}

/// `GET /api/stats`
///
/// Returns total, pending and resolved counts for one user's reports.
pub async fn stats(
    state: web::Data<AppState>,
    params: web::Query<StatsQueryParams>,
) -> HttpResponse {
    match state.store.by_owner(&params.owner_id).await {
        Ok(rows) => HttpResponse::Ok().json(ReportStats::from_reports(&rows)),
        Err(e) => {
            log::error!("Failed to query stats for {}: {e}", params.owner_id);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to query stats"
            }))
        }
    }
}
