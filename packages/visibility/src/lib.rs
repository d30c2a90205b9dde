#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Report visibility engine.
//!
//! Decides which reports from an already-fetched snapshot appear in each
//! presentation view (map, nearby cases, my reports):
//!
//! - [`staleness`] hides reports older than the retention window,
//! - [`filter`] applies the per-view status, ownership and radius rules,
//! - [`catalog`] runs the filter over a snapshot and attaches display
//!   distances.
//!
//! Everything here is synchronous and side-effect free. The current time
//! and the viewer's location are always passed in, never read globally, so
//! any call can be replayed deterministically. Nothing here returns an
//! error: incomplete records degrade visibility instead.

pub mod catalog;
pub mod filter;
pub mod staleness;

pub use catalog::{CatalogEntry, ReportCatalog, list};
pub use filter::{VisibilityFilter, compute_distance_km, is_visible};
pub use staleness::{DEFAULT_RETENTION_MS, StalenessPolicy, is_expired};
