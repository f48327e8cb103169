//! Filtering and counting over the in-memory report list.
//!
//! Everything here is pure: the same list and query always give the same
//! answer, and the input list is never reordered.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;
use crate::model::{Report, ReportStatus};

/// Status filter selected on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReportStatus),
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn matches(&self, status: ReportStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            other => other
                .parse()
                .map(StatusFilter::Only)
                .map_err(|_| ParseEnumError::new("status filter", other)),
        }
    }
}

/// Search term plus status filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub search: String,
    pub status: StatusFilter,
}

impl ReportQuery {
    pub fn new(search: &str, status: StatusFilter) -> Self {
        Self {
            search: search.to_string(),
            status,
        }
    }
}

/// Case-insensitive substring match on title or description.
///
/// An empty needle matches everything.
fn matches_search(report: &Report, needle: &str) -> bool {
    needle.is_empty()
        || report.title.to_lowercase().contains(needle)
        || report.description.to_lowercase().contains(needle)
}

/// Reports matching both the search term and the status filter, in list order.
pub fn filter_reports(reports: &[Report], query: &ReportQuery) -> Vec<Report> {
    let needle = query.search.to_lowercase();

    reports
        .iter()
        .filter(|r| matches_search(r, &needle) && query.status.matches(r.status))
        .cloned()
        .collect()
}

/// Per-status counts over the whole list, independent of any filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub total: usize,
    pub submitted: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
}

impl ReportStats {
    pub fn from_reports(reports: &[Report]) -> Self {
        let mut stats = Self {
            total: reports.len(),
            ..Default::default()
        };

        for report in reports {
            match report.status {
                ReportStatus::Submitted => stats.submitted += 1,
                ReportStatus::InProgress => stats.in_progress += 1,
                ReportStatus::Resolved => stats.resolved += 1,
                ReportStatus::Closed => stats.closed += 1,
            }
        }

        stats
    }

    /// Count for a single status.
    pub fn count(&self, status: ReportStatus) -> usize {
        match status {
            ReportStatus::Submitted => self.submitted,
            ReportStatus::InProgress => self.in_progress,
            ReportStatus::Resolved => self.resolved,
            ReportStatus::Closed => self.closed,
        }
    }
}
