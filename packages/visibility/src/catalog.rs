//! Filtered, distance-annotated view of a report snapshot.

use animal_alert_report_models::{Report, ViewKind, ViewerContext};
use animal_alert_spatial::round_km;
use chrono::{DateTime, Utc};

use crate::filter::{VisibilityFilter, compute_distance_km};

/// A report that survived filtering, with its display distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry<'a> {
    /// The visible report.
    pub report: &'a Report,
    /// Distance from the viewer rounded to whole kilometers, when both
    /// positions are known.
    pub distance_km: Option<u32>,
}

/// Applies a [`VisibilityFilter`] to report snapshots.
///
/// Holds no state besides the filter configuration: every call to
/// [`ReportCatalog::list`] is a pure function of its arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportCatalog {
    filter: VisibilityFilter,
}

impl ReportCatalog {
    /// Creates a catalog backed by `filter`.
    #[must_use]
    pub const fn new(filter: VisibilityFilter) -> Self {
        Self { filter }
    }

    /// The filter this catalog applies.
    #[must_use]
    pub const fn filter(&self) -> &VisibilityFilter {
        &self.filter
    }

    /// Returns the reports from `reports` that are visible in `view`, in
    /// input order.
    #[must_use]
    pub fn list<'a>(
        &self,
        reports: &'a [Report],
        viewer: &ViewerContext,
        view: ViewKind,
        now: DateTime<Utc>,
    ) -> Vec<CatalogEntry<'a>> {
        let entries: Vec<_> = reports
            .iter()
            .filter(|report| self.filter.is_visible(report, viewer, view, now))
            .map(|report| CatalogEntry {
                report,
                distance_km: compute_distance_km(report, viewer).map(round_km),
            })
            .collect();

        log::debug!(
            "{view} view: {} of {} reports visible",
            entries.len(),
            reports.len()
        );

        entries
    }
}

/// [`ReportCatalog::list`] with the default one-day retention.
#[must_use]
pub fn list<'a>(
    reports: &'a [Report],
    viewer: &ViewerContext,
    view: ViewKind,
    now: DateTime<Utc>,
) -> Vec<CatalogEntry<'a>> {
    ReportCatalog::default().list(reports, viewer, view, now)
}
