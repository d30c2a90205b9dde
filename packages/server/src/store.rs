//! Report persistence behind the HTTP adapter.
//!
//! The production system keeps reports in a managed document store; the
//! server only needs snapshot reads and single-record writes, expressed by
//! [`ReportStore`]. [`InMemoryReportStore`] implements it for local runs and
//! tests, optionally seeded from a JSON snapshot file.

use std::path::Path;

use animal_alert_report_models::{Report, TransitionError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the snapshot file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot file is not a JSON array of reports.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No report with this ID exists.
    #[error("Report not found: {id}")]
    NotFound {
        /// The missing report ID.
        id: String,
    },

    /// The caller does not own the report.
    #[error("Report {id} is not owned by {owner_id}")]
    NotOwner {
        /// The report ID.
        id: String,
        /// The caller that asked to change it.
        owner_id: String,
    },

    /// The report's status does not allow the requested transition.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// A report with this ID already exists.
    #[error("Duplicate report ID: {id}")]
    Duplicate {
        /// The conflicting report ID.
        id: String,
    },
}

/// Snapshot reads and single-record writes over stored reports.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Every stored report, in insertion order.
    async fn all(&self) -> Result<Vec<Report>, StoreError>;

    /// Reports submitted by `owner_id`, in insertion order.
    async fn by_owner(&self, owner_id: &str) -> Result<Vec<Report>, StoreError>;

    /// A single report by ID.
    async fn get(&self, id: &str) -> Result<Option<Report>, StoreError>;

    /// Stores a new report.
    async fn insert(&self, report: Report) -> Result<(), StoreError>;

    /// Resolves `owner_id`'s report `id` at `now` and returns the updated
    /// record. The ownership check, the transition and the write happen
    /// atomically.
    async fn resolve(
        &self,
        id: &str,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Report, StoreError>;
}

/// A [`ReportStore`] held in memory.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: RwLock<Vec<Report>>,
}

impl InMemoryReportStore {
    /// Creates a store holding `reports`.
    #[must_use]
    pub fn new(reports: Vec<Report>) -> Self {
        Self {
            reports: RwLock::new(reports),
        }
    }

    /// Seeds a store from a JSON array of reports at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let contents = tokio::fs::read_to_string(path).await?;
        let reports: Vec<Report> = serde_json::from_str(&contents)?;
        log::info!("Loaded {} reports from {}", reports.len(), path.display());
        Ok(Self::new(reports))
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn all(&self) -> Result<Vec<Report>, StoreError> {
        Ok(self.reports.read().await.clone())
    }

    async fn by_owner(&self, owner_id: &str) -> Result<Vec<Report>, StoreError> {
        Ok(self
            .reports
            .read()
            .await
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Report>, StoreError> {
        Ok(self.reports.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, report: Report) -> Result<(), StoreError> {
        let mut reports = self.reports.write().await;
        if reports.iter().any(|r| r.id == report.id) {
            return Err(StoreError::Duplicate { id: report.id });
        }
        reports.push(report);
        Ok(())
    }

    async fn resolve(
        &self,
        id: &str,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Report, StoreError> {
        let mut reports = self.reports.write().await;
        let Some(report) = reports.iter_mut().find(|r| r.id == id) else {
            return Err(StoreError::NotFound { id: id.to_string() });
        };
        if report.owner_id != owner_id {
            return Err(StoreError::NotOwner {
                id: id.to_string(),
                owner_id: owner_id.to_string(),
            });
        }
        report.resolve(now)?;
        Ok(report.clone())
    }
}
