//! Data models for the feedback portal.
//!
//! # Privacy
//!
//! A [`Report`] may carry a passenger's name, phone and email. When the
//! passenger chooses to submit anonymously those fields are cleared at
//! construction time (see [`crate::draft`]), so an anonymous report never
//! holds contact data anywhere: not in memory, not in the document store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;
use crate::i18n::Language;

/// What the report is about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    /// A problem at a station.
    #[default]
    Station,
    /// A problem on board a train.
    Train,
    /// General feedback about the railway.
    General,
    /// Praise for staff or service.
    Appreciation,
}

impl ReportType {
    pub const ALL: [ReportType; 4] = [
        ReportType::Station,
        ReportType::Train,
        ReportType::General,
        ReportType::Appreciation,
    ];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Station => "station",
            ReportType::Train => "train",
            ReportType::General => "general",
            ReportType::Appreciation => "appreciation",
        }
    }

    /// Display label.
    pub fn label(&self, language: Language) -> &'static str {
        match self {
            ReportType::Station => language.pick("Station Issue", "स्टेशन समस्या"),
            ReportType::Train => language.pick("Train Issue", "ट्रेन समस्या"),
            ReportType::General => language.pick("General Feedback", "सामान्य फीडबैक"),
            ReportType::Appreciation => language.pick("Appreciation", "प्रशंसा"),
        }
    }
}

impl FromStr for ReportType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("report type", s))
    }
}

/// Subject area of a report, picked from a fixed list on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cleanliness,
    Safety,
    Infrastructure,
    Staff,
    Technical,
    Food,
    Accessibility,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Cleanliness,
        Category::Safety,
        Category::Infrastructure,
        Category::Staff,
        Category::Technical,
        Category::Food,
        Category::Accessibility,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cleanliness => "cleanliness",
            Category::Safety => "safety",
            Category::Infrastructure => "infrastructure",
            Category::Staff => "staff",
            Category::Technical => "technical",
            Category::Food => "food",
            Category::Accessibility => "accessibility",
            Category::Other => "other",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match self {
            Category::Cleanliness => language.pick("Cleanliness", "स्वच्छता"),
            Category::Safety => language.pick("Safety & Security", "सुरक्षा"),
            Category::Infrastructure => language.pick("Infrastructure", "अवसंरचना"),
            Category::Staff => language.pick("Staff Behavior", "कर्मचारी व्यवहार"),
            Category::Technical => language.pick("Technical Issues", "तकनीकी समस्याएं"),
            Category::Food => language.pick("Food Quality", "भोजन गुणवत्ता"),
            Category::Accessibility => language.pick("Accessibility", "पहुंच"),
            Category::Other => language.pick("Other", "अन्य"),
        }
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("category", s))
    }
}

/// Urgency chosen by the submitter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Emergency,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Emergency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Emergency => "emergency",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match self {
            Priority::Low => language.pick("Low", "कम"),
            Priority::Medium => language.pick("Medium", "मध्यम"),
            Priority::High => language.pick("High", "उच्च"),
            Priority::Emergency => language.pick("Emergency", "आपातकाल"),
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("priority", s))
    }
}

/// Moderation stage of a report.
///
/// The portal only ever creates `Submitted` reports. The other stages are
/// written by an external moderation process and exist here for display
/// and filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    #[default]
    Submitted,
    InProgress,
    Resolved,
    Closed,
}

impl ReportStatus {
    /// All statuses in display order.
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Submitted,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
        ReportStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Submitted => "submitted",
            ReportStatus::InProgress => "in-progress",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Closed => "closed",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match self {
            ReportStatus::Submitted => language.pick("Submitted", "सबमिट की गई"),
            ReportStatus::InProgress => language.pick("In Progress", "प्रगति में"),
            ReportStatus::Resolved => language.pick("Resolved", "हल की गई"),
            ReportStatus::Closed => language.pick("Closed", "बंद की गई"),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("status", s))
    }
}

/// Where the problem was observed.
///
/// Every field is always present on the wire; an empty string means the
/// passenger left it blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub station: String,
    pub train_number: String,
    pub platform: String,
    pub coach: String,
}

/// Which location field a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationField {
    Station,
    TrainNumber,
    Platform,
    Coach,
}

impl LocationField {
    pub fn label(&self, language: Language) -> &'static str {
        match self {
            LocationField::Station => language.pick("Station Name", "स्टेशन का नाम"),
            LocationField::TrainNumber => language.pick("Train Number", "ट्रेन नंबर"),
            LocationField::Platform => language.pick("Platform Number", "प्लेटफॉर्म नंबर"),
            LocationField::Coach => language.pick("Coach Number", "कोच नंबर"),
        }
    }
}

impl Location {
    /// Fields the passenger actually filled in, in form order.
    pub fn present_fields(&self) -> impl Iterator<Item = (LocationField, &str)> {
        [
            (LocationField::Station, self.station.as_str()),
            (LocationField::TrainNumber, self.train_number.as_str()),
            (LocationField::Platform, self.platform.as_str()),
            (LocationField::Coach, self.coach.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
    }
}

/// Submitter contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub is_anonymous: bool,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl UserInfo {
    /// Contact details stripped of everything identifying.
    pub fn anonymous() -> Self {
        Self {
            is_anonymous: true,
            name: None,
            phone: None,
            email: None,
        }
    }

    pub fn has_contact(&self) -> bool {
        self.name.is_some() || self.phone.is_some() || self.email.is_some()
    }
}

/// A single passenger report or piece of feedback.
///
/// Built once by [`crate::draft::ReportDraft::build`] and never mutated by
/// the portal afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Submission time in epoch milliseconds, as a string.
    ///
    /// Best-effort unique only: two reports built in the same millisecond
    /// share an id.
    pub id: String,

    #[serde(rename = "type")]
    pub report_type: ReportType,

    pub category: Category,

    pub priority: Priority,

    pub title: String,

    pub description: String,

    pub location: Location,

    pub user_info: UserInfo,

    /// Photo references. Upload is not supported, so this is always empty
    /// for reports created here.
    pub photos: Vec<String>,

    pub status: ReportStatus,

    pub submitted_at: DateTime<Utc>,

    /// Set by moderators, never by the portal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_resolution: Option<DateTime<Utc>>,
}
