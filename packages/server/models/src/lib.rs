#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the animal alert server.
//!
//! These types are serialized to JSON for the REST API. They wrap the
//! domain types from `animal_alert_report_models` so the API contract can
//! evolve independently of the engine.

use animal_alert_report_models::{
    CoordinateError, Coordinates, Report, ViewKind, ViewerContext,
};
use animal_alert_submission::ReportDraft;
use animal_alert_visibility::CatalogEntry;
use serde::{Deserialize, Serialize};

/// A visible report as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCatalogEntry {
    /// The report record.
    pub report: Report,
    /// Distance from the viewer in whole kilometers, when known.
    pub distance_km: Option<u32>,
}

impl From<CatalogEntry<'_>> for ApiCatalogEntry {
    fn from(entry: CatalogEntry<'_>) -> Self {
        Self {
            report: entry.report.clone(),
            distance_km: entry.distance_km,
        }
    }
}

/// Query parameters for the reports endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQueryParams {
    /// Which view the list is for (`map`, `nearby` or `owner`).
    pub view: ViewKind,
    /// Viewer latitude. Ignored unless `lng` is also given.
    pub lat: Option<f64>,
    /// Viewer longitude. Ignored unless `lat` is also given.
    pub lng: Option<f64>,
    /// Distance bound in kilometers.
    pub radius_km: Option<u32>,
    /// Signed-in user. Required for the owner view.
    pub owner_id: Option<String>,
}

impl ReportQueryParams {
    /// Builds the engine's viewer context from the query.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] if `lat`/`lng` are both given but are not
    /// a valid position.
    pub fn viewer(&self) -> Result<ViewerContext, CoordinateError> {
        let viewer_coordinates = self
            .lat
            .zip(self.lng)
            .map(|(lat, lng)| Coordinates::new(lat, lng).validate())
            .transpose()?;

        Ok(ViewerContext {
            viewer_coordinates,
            selected_radius_km: self.radius_km,
            owner_id: self.owner_id.clone(),
        })
    }
}

/// Body of `POST /api/reports`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    /// Submitting user.
    pub owner_id: String,
    /// Form contents.
    pub draft: ReportDraft,
    /// URL of the already-uploaded image.
    pub media_url: Option<String>,
}

/// Body of `POST /api/reports/{id}/resolve`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReportRequest {
    /// User asking to resolve the report. Must be its owner.
    pub owner_id: String,
}

/// Query parameters for the stats endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQueryParams {
    /// User whose reports are counted.
    pub owner_id: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_requires_both_coordinates() {
        let params = ReportQueryParams {
            view: ViewKind::NearbyList,
            lat: Some(18.52),
            lng: None,
            radius_km: Some(25),
            owner_id: None,
        };

        let viewer = params.viewer().unwrap();

        assert!(viewer.viewer_coordinates.is_none());
        assert_eq!(viewer.selected_radius_km, Some(25));
    }

    #[test]
    fn viewer_carries_location_and_owner() {
        let params = ReportQueryParams {
            view: ViewKind::OwnerList,
            lat: Some(18.52),
            lng: Some(73.86),
            radius_km: None,
            owner_id: Some("u-1".to_string()),
        };

        let viewer = params.viewer().unwrap();

        assert_eq!(viewer.viewer_coordinates, Some(Coordinates::new(18.52, 73.86)));
        assert_eq!(viewer.owner_id.as_deref(), Some("u-1"));
    }

    #[test]
    fn viewer_rejects_invalid_location() {
        for (lat, lng) in [(f64::NAN, 73.86), (500.0, 73.86), (18.52, 181.0)] {
            let params = ReportQueryParams {
                view: ViewKind::NearbyList,
                lat: Some(lat),
                lng: Some(lng),
                radius_km: Some(25),
                owner_id: None,
            };

            assert!(params.viewer().is_err(), "{lat},{lng}");
        }
    }

    #[test]
    fn catalog_entry_serializes_camel_case() {
        let report: Report = serde_json::from_value(serde_json::json!({
            "id": "r-1",
            "ownerId": "u-1",
            "name": "Cat",
        }))
        .unwrap();
        let entry = ApiCatalogEntry {
            report,
            distance_km: Some(4),
        };

        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["distanceKm"], 4);
        assert_eq!(json["report"]["ownerId"], "u-1");
        assert_eq!(json["report"]["status"], "pending");
    }
}
