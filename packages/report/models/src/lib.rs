#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Animal sighting report types shared across the animal-alert system.
//!
//! A [`Report`] is owned by the persistent store; everything downstream of
//! the store (the visibility engine, the submission flow, the HTTP adapter)
//! works on read-only copies of it. The only mutation defined here is the
//! one-way pending -> resolved transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Radius choices (in kilometers) offered by the nearby-cases view.
pub const DISTANCE_OPTIONS_KM: [u32; 3] = [25, 50, 100];

/// Whether the reported animal appears injured.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum InjuryStatus {
    /// The animal is visibly injured.
    Yes,
    /// The animal looks healthy.
    No,
    /// Injury status could not be determined.
    #[default]
    Unknown,
}

/// Lifecycle status of a report.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportStatus {
    /// Submitted and still awaiting help.
    #[default]
    Pending,
    /// Marked resolved by the owning user. Terminal.
    Resolved,
    /// Removed from active circulation by the store.
    Archived,
}

impl ReportStatus {
    /// Whether reports in this status belong on the live incident map.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// The presentation view a report list is being computed for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum ViewKind {
    /// Live incident map: active reports with coordinates only.
    #[serde(rename = "map")]
    #[strum(serialize = "map")]
    Map,
    /// Nearby-cases table, optionally bounded by a radius.
    #[serde(rename = "nearby")]
    #[strum(serialize = "nearby")]
    NearbyList,
    /// The signed-in user's own reports.
    #[serde(rename = "owner")]
    #[strum(serialize = "owner")]
    OwnerList,
}

impl ViewKind {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Map, Self::NearbyList, Self::OwnerList]
    }
}

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Latitude, expected in `[-90, 90]`.
    pub latitude: f64,
    /// Longitude, expected in `[-180, 180]`.
    pub longitude: f64,
    /// Horizontal accuracy reported by the device, in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl Coordinates {
    /// Creates a position without an accuracy estimate.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
        }
    }

    /// Attaches a device accuracy estimate in meters.
    #[must_use]
    pub const fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Checks that both components are finite and within WGS84 degree
    /// ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::OutOfRange`] otherwise.
    pub fn validate(self) -> Result<Self, CoordinateError> {
        let valid = self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude);

        if valid {
            Ok(self)
        } else {
            Err(CoordinateError::OutOfRange {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Error returned for a position that is not a usable WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    /// A component is NaN, infinite, or outside its degree range.
    #[error("invalid coordinates: latitude {latitude}, longitude {longitude}")]
    OutOfRange {
        /// Submitted latitude.
        latitude: f64,
        /// Submitted longitude.
        longitude: f64,
    },
}

/// A single user-submitted animal sighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Store-assigned identifier.
    pub id: String,
    /// User who submitted the report.
    pub owner_id: String,
    /// Short label, usually the animal's name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Injury status chosen by the user or the vision autofill.
    #[serde(default)]
    pub injury_status: InjuryStatus,
    /// Where the animal was seen.
    pub coordinates: Option<Coordinates>,
    /// Hosted image URL.
    pub media_url: Option<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ReportStatus,
    /// Server-assigned creation time. Absent until the store confirms it.
    pub created_at: Option<DateTime<Utc>>,
    /// Set when the report is resolved.
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Error returned by an invalid lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The report has already been resolved.
    #[error("report {id} is already resolved")]
    AlreadyResolved {
        /// The report ID.
        id: String,
    },
    /// Archived reports cannot be resolved.
    #[error("report {id} is archived")]
    Archived {
        /// The report ID.
        id: String,
    },
}

impl Report {
    /// Marks a pending report as resolved at `now`.
    ///
    /// `resolved_at` never precedes `created_at`: a clock that lags the
    /// store's timestamp is clamped to the creation time.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] if the report is not pending.
    pub fn resolve(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        match self.status {
            ReportStatus::Pending => {}
            ReportStatus::Resolved => {
                return Err(TransitionError::AlreadyResolved {
                    id: self.id.clone(),
                });
            }
            ReportStatus::Archived => {
                return Err(TransitionError::Archived {
                    id: self.id.clone(),
                });
            }
        }

        let resolved_at = self.created_at.map_or(now, |created| created.max(now));
        self.status = ReportStatus::Resolved;
        self.resolved_at = Some(resolved_at);
        Ok(())
    }
}

/// Per-owner report counts shown on the profile page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    /// Every report, regardless of status or age.
    pub total: u64,
    /// Reports still pending.
    pub pending: u64,
    /// Reports marked resolved.
    pub resolved: u64,
}

impl ReportStats {
    /// Tallies reports by status.
    #[must_use]
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a Report>) -> Self {
        reports
            .into_iter()
            .fold(Self::default(), |mut stats, report| {
                stats.total += 1;
                match report.status {
                    ReportStatus::Pending => stats.pending += 1,
                    ReportStatus::Resolved => stats.resolved += 1,
                    ReportStatus::Archived => {}
                }
                stats
            })
    }
}

/// Who is looking at a view, and from where.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerContext {
    /// The viewer's location, absent when geolocation was denied or not
    /// requested.
    pub viewer_coordinates: Option<Coordinates>,
    /// Distance bound chosen by the viewer. Absent means unbounded.
    pub selected_radius_km: Option<u32>,
    /// The signed-in user, used to scope the owner view.
    pub owner_id: Option<String>,
}

impl ViewerContext {
    /// Sets the viewer's location.
    #[must_use]
    pub fn at(mut self, coordinates: Coordinates) -> Self {
        self.viewer_coordinates = Some(coordinates);
        self
    }

    /// Sets the distance bound.
    #[must_use]
    pub fn within_km(mut self, radius_km: u32) -> Self {
        self.selected_radius_km = Some(radius_km);
        self
    }

    /// Sets the signed-in user.
    #[must_use]
    pub fn owned_by(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn validate_accepts_range_bounds() {
        for (lat, lng) in [(90.0, 180.0), (-90.0, -180.0), (18.52, 73.86)] {
            assert!(Coordinates::new(lat, lng).validate().is_ok(), "{lat},{lng}");
        }
    }

    #[test]
    fn validate_rejects_non_finite_and_out_of_range() {
        for (lat, lng) in [
            (f64::NAN, 73.86),
            (18.52, f64::INFINITY),
            (500.0, 73.86),
            (18.52, -180.5),
        ] {
            assert!(
                matches!(
                    Coordinates::new(lat, lng).validate(),
                    Err(CoordinateError::OutOfRange { .. })
                ),
                "{lat},{lng}"
            );
        }
    }

    fn pending_report(id: &str) -> Report {
        Report {
            id: id.to_string(),
            owner_id: "user-1".to_string(),
            name: "Stray dog".to_string(),
            description: None,
            injury_status: InjuryStatus::Unknown,
            coordinates: Some(Coordinates::new(18.5204, 73.8567)),
            media_url: None,
            status: ReportStatus::Pending,
            created_at: Some(DateTime::from_timestamp(1_700_000_000, 0).unwrap()),
            resolved_at: None,
        }
    }

    #[test]
    fn resolve_sets_status_and_timestamp() {
        let mut report = pending_report("r1");
        let now = report.created_at.unwrap() + TimeDelta::hours(2);

        report.resolve(now).unwrap();

        assert_eq!(report.status, ReportStatus::Resolved);
        assert_eq!(report.resolved_at, Some(now));
    }

    #[test]
    fn resolve_is_one_way() {
        let mut report = pending_report("r1");
        let now = report.created_at.unwrap();
        report.resolve(now).unwrap();

        let err = report.resolve(now).unwrap_err();
        assert_eq!(
            err,
            TransitionError::AlreadyResolved {
                id: "r1".to_string()
            }
        );
    }

    #[test]
    fn archived_reports_cannot_be_resolved() {
        let mut report = pending_report("r2");
        report.status = ReportStatus::Archived;

        assert!(matches!(
            report.resolve(Utc::now()),
            Err(TransitionError::Archived { .. })
        ));
        assert!(report.resolved_at.is_none());
    }

    #[test]
    fn resolved_at_never_precedes_created_at() {
        let mut report = pending_report("r3");
        let created = report.created_at.unwrap();

        report.resolve(created - TimeDelta::minutes(5)).unwrap();

        assert_eq!(report.resolved_at, Some(created));
    }

    #[test]
    fn stats_count_by_status() {
        let mut resolved = pending_report("a");
        resolved.resolve(Utc::now()).unwrap();
        let mut archived = pending_report("b");
        archived.status = ReportStatus::Archived;
        let reports = [pending_report("c"), pending_report("d"), resolved, archived];

        let stats = ReportStats::from_reports(&reports);

        assert_eq!(
            stats,
            ReportStats {
                total: 4,
                pending: 2,
                resolved: 1,
            }
        );
    }

    #[test]
    fn view_kind_parses_from_query_names() {
        assert_eq!("map".parse::<ViewKind>().unwrap(), ViewKind::Map);
        assert_eq!("nearby".parse::<ViewKind>().unwrap(), ViewKind::NearbyList);
        assert_eq!("owner".parse::<ViewKind>().unwrap(), ViewKind::OwnerList);
        assert!("everything".parse::<ViewKind>().is_err());
    }

    #[test]
    fn report_deserializes_with_missing_optional_fields() {
        let json = r#"{
            "id": "abc",
            "ownerId": "user-9",
            "name": "Kite",
            "status": "resolved",
            "injuryStatus": "Yes"
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();

        assert_eq!(report.status, ReportStatus::Resolved);
        assert_eq!(report.injury_status, InjuryStatus::Yes);
        assert!(report.coordinates.is_none());
        assert!(report.created_at.is_none());
    }
}
