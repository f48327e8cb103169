//! Dashboard views over the session's reports.
//!
//! Turns the raw report list into what a passenger sees: summary counts,
//! report cards with localized labels and badges, a details view for a
//! single report, and the option lists the submission form offers.
//!
//! # Usage
//!
//! ```ignore
//! let view = DashboardView::build(portal.reports(), &query, Language::Hi);
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregation::{ReportQuery, ReportStats, filter_reports};
use crate::i18n::{Language, Notice};
use crate::model::{Category, LocationField, Priority, Report, ReportStatus, ReportType};
use crate::presentation::{PriorityBadge, StatusBadge};

/// A report with everything needed to render it in a list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCard {
    #[serde(flatten)]
    pub report: Report,
    pub type_label: &'static str,
    pub category_label: &'static str,
    pub priority_label: &'static str,
    pub status_label: &'static str,
    pub status_badge: StatusBadge,
    pub priority_badge: PriorityBadge,
}

impl ReportCard {
    pub fn new(report: Report, language: Language) -> Self {
        Self {
            type_label: report.report_type.label(language),
            category_label: report.category.label(language),
            priority_label: report.priority.label(language),
            status_label: report.status.label(language),
            status_badge: StatusBadge::for_status(report.status),
            priority_badge: PriorityBadge::for_priority(report.priority),
            report,
        }
    }
}

/// The dashboard page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// When the view was generated.
    pub generated_at: DateTime<Utc>,

    /// Counts over every report, not just the filtered ones.
    pub stats: ReportStats,

    /// Echo of the active search term.
    pub search: String,

    /// Echo of the active status filter.
    pub status: &'static str,

    pub reports: Vec<ReportCard>,

    /// Set when no report matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl DashboardView {
    pub fn build(reports: &[Report], query: &ReportQuery, language: Language) -> Self {
        let cards: Vec<ReportCard> = filter_reports(reports, query)
            .into_iter()
            .map(|r| ReportCard::new(r, language))
            .collect();

        let empty_message = cards
            .is_empty()
            .then(|| Notice::NoReportsFound.render(language));

        Self {
            generated_at: Utc::now(),
            stats: ReportStats::from_reports(reports),
            search: query.search.clone(),
            status: query.status.as_str(),
            reports: cards,
            empty_message,
        }
    }
}

/// One labelled location line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationLine {
    pub field: LocationField,
    pub label: &'static str,
    pub value: String,
}

/// Full details of one report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetails {
    #[serde(flatten)]
    pub card: ReportCard,

    /// Only the location fields the passenger filled in.
    pub location_lines: Vec<LocationLine>,

    /// Submitter as shown to readers: "Anonymous" or the name given.
    pub submitted_by: Option<String>,

    /// Contact details, only for reports that are not anonymous.
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ReportDetails {
    pub fn new(report: Report, language: Language) -> Self {
        let location_lines = report
            .location
            .present_fields()
            .map(|(field, value)| LocationLine {
                field,
                label: field.label(language),
                value: value.to_string(),
            })
            .collect();

        let user = &report.user_info;
        let (submitted_by, phone, email) = if user.is_anonymous {
            (Some(language.pick("Anonymous", "गुमनाम").to_string()), None, None)
        } else {
            (user.name.clone(), user.phone.clone(), user.email.clone())
        };

        Self {
            card: ReportCard::new(report, language),
            location_lines,
            submitted_by,
            phone,
            email,
        }
    }
}

/// A selectable option: wire value plus display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionItem {
    pub value: &'static str,
    pub label: &'static str,
}

/// Option lists for the submission form and the dashboard filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCatalog {
    pub language: Language,
    pub report_types: Vec<OptionItem>,
    pub categories: Vec<OptionItem>,
    pub priorities: Vec<OptionItem>,
    pub status_filters: Vec<OptionItem>,
}

impl FormCatalog {
    pub fn new(language: Language) -> Self {
        let status_filters = std::iter::once(OptionItem {
            value: "all",
            label: language.pick("All Reports", "सभी रिपोर्ट"),
        })
        .chain(ReportStatus::ALL.iter().map(|s| OptionItem {
            value: s.as_str(),
            label: s.label(language),
        }))
        .collect();

        Self {
            language,
            report_types: ReportType::ALL
                .iter()
                .map(|t| OptionItem {
                    value: t.as_str(),
                    label: t.label(language),
                })
                .collect(),
            categories: Category::ALL
                .iter()
                .map(|c| OptionItem {
                    value: c.as_str(),
                    label: c.label(language),
                })
                .collect(),
            priorities: Priority::ALL
                .iter()
                .map(|p| OptionItem {
                    value: p.as_str(),
                    label: p.label(language),
                })
                .collect(),
            status_filters,
        }
    }
}
