//! Per-view visibility rules.
//!
//! One predicate serves every view, selected by [`ViewKind`]. Rules apply
//! in order and short-circuit:
//!
//! 1. Reports past the retention window are hidden from every view.
//! 2. The map shows only active (pending) reports that have coordinates.
//! 3. The nearby list, when a radius is selected, keeps reports whose
//!    rounded distance is within the radius. Without a viewer location the
//!    radius cannot be measured and is ignored; with one, a report without
//!    coordinates counts as out of range.
//! 4. The owner list keeps only the viewer's own reports when the viewer
//!    is known. Callers are still expected to supply an owner-scoped
//!    snapshot.

use animal_alert_report_models::{Report, ViewKind, ViewerContext};
use animal_alert_spatial::{distance_km, round_km};
use chrono::{DateTime, Utc};

use crate::staleness::StalenessPolicy;

/// Visibility predicate parameterized by a [`StalenessPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityFilter {
    staleness: StalenessPolicy,
}

impl VisibilityFilter {
    /// Creates a filter using the given staleness policy.
    #[must_use]
    pub const fn new(staleness: StalenessPolicy) -> Self {
        Self { staleness }
    }

    /// The staleness policy this filter applies.
    #[must_use]
    pub const fn staleness(&self) -> &StalenessPolicy {
        &self.staleness
    }

    /// Whether `report` belongs in `view` for `viewer` at time `now`.
    #[must_use]
    pub fn is_visible(
        &self,
        report: &Report,
        viewer: &ViewerContext,
        view: ViewKind,
        now: DateTime<Utc>,
    ) -> bool {
        if self.staleness.is_expired(report.created_at, now) {
            log::trace!("report {} hidden from {view}: expired", report.id);
            return false;
        }

        match view {
            ViewKind::Map => {
                if !report.status.is_active() {
                    log::trace!("report {} hidden from map: {}", report.id, report.status);
                    return false;
                }
                report.coordinates.is_some()
            }
            ViewKind::NearbyList => within_selected_radius(report, viewer),
            ViewKind::OwnerList => viewer
                .owner_id
                .as_deref()
                .is_none_or(|owner| owner == report.owner_id),
        }
    }
}

fn within_selected_radius(report: &Report, viewer: &ViewerContext) -> bool {
    let Some(radius_km) = viewer.selected_radius_km else {
        return true;
    };
    if viewer.viewer_coordinates.is_none() {
        return true;
    }

    compute_distance_km(report, viewer).is_some_and(|d| round_km(d) <= radius_km)
}

/// Unrounded distance from the viewer to the report, when both positions
/// are known.
#[must_use]
pub fn compute_distance_km(report: &Report, viewer: &ViewerContext) -> Option<f64> {
    let viewer_at = viewer.viewer_coordinates.as_ref()?;
    let report_at = report.coordinates.as_ref()?;
    Some(distance_km(viewer_at, report_at))
}

/// [`VisibilityFilter::is_visible`] with the default one-day retention.
#[must_use]
pub fn is_visible(
    report: &Report,
    viewer: &ViewerContext,
    view: ViewKind,
    now: DateTime<Utc>,
) -> bool {
    VisibilityFilter::default().is_visible(report, viewer, view, now)
}
