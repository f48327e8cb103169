//! Report drafts and the submission flow.
//!
//! A [`ReportDraft`] is the form as the passenger is filling it in. Building
//! it produces an immutable [`Report`]; submitting it writes that report to
//! the document store. The three steps are kept separate so callers decide
//! how a write's completion is ordered against other work:
//!
//! 1. [`ReportForm::prepare`] snapshots the draft into a [`PendingSubmission`].
//! 2. [`PendingSubmission::persist`] performs the write and yields a
//!    [`SubmissionOutcome`].
//! 3. [`ReportForm::settle`] resets the draft on success and keeps it on
//!    failure so the passenger can retry.
//!
//! [`ReportForm::submit`] runs all three in sequence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::error::PersistenceError;
use crate::model::{Category, Location, Priority, Report, ReportStatus, ReportType, UserInfo};
use crate::storage::Storage;

/// A field the form marks as required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredField {
    Category,
    Title,
    Description,
}

/// The draft cannot become a report yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("required fields missing: {0:?}")]
    Incomplete(Vec<RequiredField>),
}

/// In-progress form state.
///
/// `Default` is the state of a freshly opened form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportDraft {
    #[serde(rename = "type")]
    pub report_type: ReportType,

    /// `None` until the passenger picks one. The form sends `""` for that.
    #[serde(deserialize_with = "empty_as_none")]
    pub category: Option<Category>,

    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub station: String,
    pub train_number: String,
    pub platform: String,
    pub coach: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub is_anonymous: bool,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// A single edit to a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Type(ReportType),
    Category(Option<Category>),
    Priority(Priority),
    Title(String),
    Description(String),
    Station(String),
    TrainNumber(String),
    Platform(String),
    Coach(String),
    Name(String),
    Phone(String),
    Email(String),
    Anonymous(bool),
}

fn non_blank(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl ReportDraft {
    /// Apply one field edit.
    pub fn update(&mut self, field: DraftField) {
        match field {
            DraftField::Type(t) => self.report_type = t,
            DraftField::Category(c) => self.category = c,
            DraftField::Priority(p) => self.priority = p,
            DraftField::Title(v) => self.title = v,
            DraftField::Description(v) => self.description = v,
            DraftField::Station(v) => self.station = v,
            DraftField::TrainNumber(v) => self.train_number = v,
            DraftField::Platform(v) => self.platform = v,
            DraftField::Coach(v) => self.coach = v,
            DraftField::Name(v) => self.name = v,
            DraftField::Phone(v) => self.phone = v,
            DraftField::Email(v) => self.email = v,
            DraftField::Anonymous(a) => self.is_anonymous = a,
        }
    }

    /// Required fields that are still empty, in form order.
    ///
    /// Like an HTML `required` input, any character counts as a value,
    /// whitespace included.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.category.is_none() {
            missing.push(RequiredField::Category);
        }
        if self.title.is_empty() {
            missing.push(RequiredField::Title);
        }
        if self.description.is_empty() {
            missing.push(RequiredField::Description);
        }
        missing
    }

    /// Turn the draft into a report submitted at `now`.
    ///
    /// Anonymous drafts lose their contact fields here, whatever was typed.
    /// Non-anonymous drafts keep them, with blank ones recorded as absent.
    pub fn build(&self, now: DateTime<Utc>) -> Result<Report, DraftError> {
        let missing = self.missing_fields();
        let Some(category) = self.category else {
            return Err(DraftError::Incomplete(missing));
        };
        if !missing.is_empty() {
            return Err(DraftError::Incomplete(missing));
        }

        let user_info = if self.is_anonymous {
            UserInfo::anonymous()
        } else {
            UserInfo {
                is_anonymous: false,
                name: non_blank(&self.name),
                phone: non_blank(&self.phone),
                email: non_blank(&self.email),
            }
        };

        Ok(Report {
            id: now.timestamp_millis().to_string(),
            report_type: self.report_type,
            category,
            priority: self.priority,
            title: self.title.clone(),
            description: self.description.clone(),
            location: Location {
                station: self.station.clone(),
                train_number: self.train_number.clone(),
                platform: self.platform.clone(),
                coach: self.coach.clone(),
            },
            user_info,
            photos: Vec::new(),
            status: ReportStatus::Submitted,
            submitted_at: now,
            estimated_resolution: None,
        })
    }
}

/// A report built from a draft, not yet written.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    report: Report,
    draft: ReportDraft,
}

impl PendingSubmission {
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Write the report to `collection`.
    ///
    /// The write cannot be cancelled once started. Its result is delivered
    /// exactly once, as the returned outcome.
    pub async fn persist(self, storage: &Storage, collection: &str) -> SubmissionOutcome {
        match storage.create(collection, &self.report).await {
            Ok(()) => {
                info!(
                    report_id = %self.report.id,
                    report_type = self.report.report_type.as_str(),
                    category = self.report.category.as_str(),
                    priority = self.report.priority.as_str(),
                    anonymous = self.report.user_info.is_anonymous,
                    "Report stored"
                );
                SubmissionOutcome::Accepted(self.report)
            }
            Err(reason) => {
                warn!(report_id = %self.report.id, error = %reason, "Failed to store report");
                SubmissionOutcome::Rejected {
                    draft: self.draft,
                    reason,
                }
            }
        }
    }
}

/// Result of a persistence attempt.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The store accepted the report.
    Accepted(Report),
    /// The store refused it. Carries the draft the report was built from.
    Rejected {
        draft: ReportDraft,
        reason: PersistenceError,
    },
}

/// Why a submit attempt produced no report.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Incomplete(#[from] DraftError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// A form: one draft and the operations on it.
#[derive(Debug, Clone, Default)]
pub struct ReportForm {
    draft: ReportDraft,
}

impl ReportForm {
    pub fn new(draft: ReportDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &ReportDraft {
        &self.draft
    }

    pub fn update(&mut self, field: DraftField) {
        self.draft.update(field);
    }

    /// Snapshot the current draft into a report ready to write.
    pub fn prepare(&self, now: DateTime<Utc>) -> Result<PendingSubmission, DraftError> {
        Ok(PendingSubmission {
            report: self.draft.build(now)?,
            draft: self.draft.clone(),
        })
    }

    /// Apply the outcome of a write to the form.
    ///
    /// On success the draft returns to its initial empty state and the
    /// report is handed back for the caller to publish. On failure the draft
    /// is left untouched.
    pub fn settle(&mut self, outcome: SubmissionOutcome) -> Result<Report, PersistenceError> {
        match outcome {
            SubmissionOutcome::Accepted(report) => {
                self.draft = ReportDraft::default();
                Ok(report)
            }
            SubmissionOutcome::Rejected { reason, .. } => Err(reason),
        }
    }

    /// Prepare, persist and settle in one go.
    pub async fn submit(
        &mut self,
        storage: &Storage,
        collection: &str,
        now: DateTime<Utc>,
    ) -> Result<Report, SubmitError> {
        let pending = self.prepare(now)?;
        let outcome = pending.persist(storage, collection).await;
        Ok(self.settle(outcome)?)
    }
}
