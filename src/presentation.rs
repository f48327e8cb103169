//! Badge styling for statuses and priorities.
//!
//! Status and priority are closed enumerations, but records written by
//! other tools may carry values this build does not know. The `classify`
//! functions accept raw strings and fall back to a default badge for those.

use serde::Serialize;

use crate::model::{Priority, ReportStatus};

/// Colour family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Yellow,
    Blue,
    Green,
    Gray,
    Orange,
    Red,
}

/// Icon shown next to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusIcon {
    Clock,
    AlertTriangle,
    CheckCircle,
    XCircle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub tone: Tone,
    pub icon: StatusIcon,
}

impl StatusBadge {
    pub fn for_status(status: ReportStatus) -> Self {
        let (tone, icon) = match status {
            ReportStatus::Submitted => (Tone::Yellow, StatusIcon::Clock),
            ReportStatus::InProgress => (Tone::Blue, StatusIcon::AlertTriangle),
            ReportStatus::Resolved => (Tone::Green, StatusIcon::CheckCircle),
            ReportStatus::Closed => (Tone::Gray, StatusIcon::XCircle),
        };
        Self { tone, icon }
    }

    /// Badge for a raw status value. Unknown values look like `submitted`.
    pub fn classify(raw: &str) -> Self {
        match raw.parse::<ReportStatus>() {
            Ok(status) => Self::for_status(status),
            Err(_) => Self::for_status(ReportStatus::Submitted),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityBadge {
    pub tone: Tone,
}

impl PriorityBadge {
    pub fn for_priority(priority: Priority) -> Self {
        let tone = match priority {
            Priority::Low => Tone::Green,
            Priority::Medium => Tone::Yellow,
            Priority::High => Tone::Orange,
            Priority::Emergency => Tone::Red,
        };
        Self { tone }
    }

    /// Badge for a raw priority value. Unknown values get the neutral tone.
    pub fn classify(raw: &str) -> Self {
        match raw.parse::<Priority>() {
            Ok(priority) => Self::for_priority(priority),
            Err(_) => Self { tone: Tone::Gray },
        }
    }
}
