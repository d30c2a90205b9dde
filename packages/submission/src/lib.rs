#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Report submission: draft validation and report construction.
//!
//! This is the upstream sanitization step the visibility engine relies on.
//! A [`ReportDraft`] collects form input (optionally pre-filled from an
//! [`AnimalAutofill`]), is validated, and becomes a pending [`Report`]. The
//! image upload and the store write happen outside this crate; only the
//! upload's metadata is checked here.

use animal_alert_report_models::{
    CoordinateError, Coordinates, InjuryStatus, Report, ReportStatus,
};
use animal_alert_vision::AnimalAutofill;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest report name accepted, in characters.
pub const MAX_NAME_CHARS: usize = 16;

/// Largest accepted image upload, in bytes.
pub const MAX_MEDIA_BYTES: u64 = 5 * 1024 * 1024;

/// Reasons a draft cannot be submitted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    /// The name is empty or whitespace.
    #[error("Report name is required")]
    MissingName,

    /// The name exceeds [`MAX_NAME_CHARS`].
    #[error("Report name is {length} characters, maximum is {max}")]
    NameTooLong {
        /// Length of the submitted name.
        length: usize,
        /// The configured maximum.
        max: usize,
    },

    /// The reporter did not confirm the information is genuine.
    #[error("You must confirm the report is genuine")]
    AgreementRequired,

    /// No image was attached.
    #[error("An image is required")]
    MissingMedia,

    /// The upload is not an image.
    #[error("Only image files are allowed, got {content_type}")]
    UnsupportedMedia {
        /// The upload's MIME type.
        content_type: String,
    },

    /// The upload exceeds [`MAX_MEDIA_BYTES`].
    #[error("Image is {size_bytes} bytes, maximum is {max_bytes}")]
    MediaTooLarge {
        /// Size of the upload.
        size_bytes: u64,
        /// The configured maximum.
        max_bytes: u64,
    },

    /// Coordinates are outside WGS84 ranges or not finite.
    #[error(transparent)]
    InvalidCoordinates(#[from] CoordinateError),
}

/// Metadata of the photo attached to a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    /// MIME type reported by the client.
    pub content_type: String,
    /// Upload size in bytes.
    pub size_bytes: u64,
}

/// A report as entered in the submission form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    /// Animal name.
    #[serde(default)]
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Injury status.
    #[serde(default)]
    pub injury_status: InjuryStatus,
    /// Sighting location, if the reporter shared one.
    pub coordinates: Option<Coordinates>,
    /// Attached photo metadata.
    pub media: Option<MediaInfo>,
    /// Reporter confirmed the information is genuine.
    #[serde(default)]
    pub agreement: bool,
}

impl ReportDraft {
    /// Merges vision-model suggestions into the draft.
    ///
    /// Empty suggestions leave the existing name and description alone; the
    /// injury status is always taken from the model.
    pub fn apply_autofill(&mut self, autofill: &AnimalAutofill) {
        if !autofill.animal.is_empty() {
            self.name.clone_from(&autofill.animal);
        }
        if !autofill.description.is_empty() {
            self.description.clone_from(&autofill.description);
        }
        self.injury_status = autofill.injury_status;
    }

    /// Checks the draft against the submission rules.
    ///
    /// # Errors
    ///
    /// Returns the first [`SubmissionError`] found.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SubmissionError::MissingName);
        }
        let length = name.chars().count();
        if length > MAX_NAME_CHARS {
            return Err(SubmissionError::NameTooLong {
                length,
                max: MAX_NAME_CHARS,
            });
        }

        if !self.agreement {
            return Err(SubmissionError::AgreementRequired);
        }

        let media = self.media.as_ref().ok_or(SubmissionError::MissingMedia)?;
        if !media.content_type.starts_with("image/") {
            return Err(SubmissionError::UnsupportedMedia {
                content_type: media.content_type.clone(),
            });
        }
        if media.size_bytes > MAX_MEDIA_BYTES {
            return Err(SubmissionError::MediaTooLarge {
                size_bytes: media.size_bytes,
                max_bytes: MAX_MEDIA_BYTES,
            });
        }

        if let Some(at) = self.coordinates {
            at.validate()?;
        }

        Ok(())
    }

    /// Validates the draft and builds a pending [`Report`].
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError`] if validation fails.
    pub fn into_report(
        self,
        id: String,
        owner_id: String,
        media_url: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Report, SubmissionError> {
        self.validate()?;

        let description = self.description.trim();
        let report = Report {
            id,
            owner_id,
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            injury_status: self.injury_status,
            coordinates: self.coordinates,
            media_url,
            status: ReportStatus::Pending,
            created_at: Some(created_at),
            resolved_at: None,
        };

        log::info!("Accepted report {} from {}", report.id, report.owner_id);
        Ok(report)
    }
}
