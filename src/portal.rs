//! The portal container: owner of the session's report list.
//!
//! New reports are prepended, so the list is always newest-first in the
//! order outcomes were applied. Nothing else mutates it and it is never
//! refreshed from storage.

use crate::aggregation::ReportQuery;
use crate::dashboard::DashboardView;
use crate::i18n::Language;
use crate::model::Report;

#[derive(Debug, Clone, Default)]
pub struct Portal {
    reports: Vec<Report>,
}

impl Portal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a freshly stored report at the top of the list.
    pub fn add_report(&mut self, report: Report) {
        self.reports.insert(0, report);
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Most recently added report with this id.
    pub fn find(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn dashboard(&self, query: &ReportQuery, language: Language) -> DashboardView {
        DashboardView::build(&self.reports, query, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::StatusFilter;
    use crate::draft::{DraftField, ReportDraft, ReportForm, SubmissionOutcome};
    use crate::model::{Category, ReportStatus};
    use crate::storage::{MemoryStore, Storage};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use tokio_test::{assert_err, assert_ok};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn form(title: &str) -> ReportForm {
        let mut form = ReportForm::new(ReportDraft::default());
        form.update(DraftField::Category(Some(Category::Cleanliness)));
        form.update(DraftField::Title(title.to_string()));
        form.update(DraftField::Description("Trash overflowing".to_string()));
        form
    }

    #[tokio::test]
    async fn test_anonymous_submission_lands_on_top() {
        let storage = Storage::Memory(MemoryStore::new());
        let mut portal = Portal::new();

        let mut older = form("Broken bench");
        portal.add_report(assert_ok!(older.submit(&storage, "reports", t0()).await));

        let mut station = form("Dirty Platform 3");
        station.update(DraftField::Station("New Delhi".to_string()));
        station.update(DraftField::Name("typed anyway".to_string()));
        station.update(DraftField::Anonymous(true));
        let report = assert_ok!(
            station
                .submit(&storage, "reports", t0() + Duration::seconds(1))
                .await
        );
        portal.add_report(report);

        let view = portal.dashboard(&ReportQuery::default(), Language::En);
        let first = &view.reports[0].report;
        assert_eq!(first.title, "Dirty Platform 3");
        assert_eq!(first.location.station, "New Delhi");
        assert!(first.user_info.is_anonymous);
        assert!(!first.user_info.has_contact());
        assert_eq!(first.status, ReportStatus::Submitted);
    }

    #[tokio::test]
    async fn test_two_submissions_count_as_submitted() {
        let storage = Storage::Memory(MemoryStore::new());
        let mut portal = Portal::new();

        for (i, title) in ["Leaking roof", "No water"].into_iter().enumerate() {
            let report = form(title)
                .submit(&storage, "reports", t0() + Duration::seconds(i as i64))
                .await
                .unwrap();
            portal.add_report(report);
        }

        let view = portal.dashboard(&ReportQuery::default(), Language::En);
        assert_eq!(view.stats.total, 2);
        assert_eq!(view.stats.submitted, 2);
        assert_eq!(view.stats.resolved, 0);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_list_untouched() {
        let memory = MemoryStore::new();
        memory.fail_with("offline");
        let storage = Storage::Memory(memory);
        let mut portal = Portal::new();

        let mut draft_form = form("Dirty Platform 3");
        let err = assert_err!(draft_form.submit(&storage, "reports", t0()).await);
        assert!(err.to_string().contains("offline"));

        assert!(portal.reports().is_empty());
        assert_eq!(draft_form.draft().title, "Dirty Platform 3");

        // The retained draft can simply be submitted again.
        if let Storage::Memory(memory) = &storage {
            memory.recover();
        }
        portal.add_report(draft_form.submit(&storage, "reports", t0()).await.unwrap());
        assert_eq!(portal.reports().len(), 1);
    }

    async fn two_outcomes(storage: &Storage) -> (SubmissionOutcome, SubmissionOutcome) {
        let first = form("First").prepare(t0()).unwrap();
        let second = form("Second").prepare(t0() + Duration::seconds(1)).unwrap();
        let (a, b) = tokio::join!(
            first.persist(storage, "reports"),
            second.persist(storage, "reports")
        );
        (a, b)
    }

    fn apply(portal: &mut Portal, outcome: SubmissionOutcome) {
        if let SubmissionOutcome::Accepted(report) = outcome {
            portal.add_report(report);
        }
    }

    #[tokio::test]
    async fn test_list_follows_completion_order() {
        let storage = Storage::Memory(MemoryStore::new());

        // First write completes first.
        let (a, b) = two_outcomes(&storage).await;
        let mut portal = Portal::new();
        apply(&mut portal, a);
        apply(&mut portal, b);
        let titles: Vec<_> = portal.reports().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Second", "First"]);

        // Second write completes first.
        let (a, b) = two_outcomes(&storage).await;
        let mut portal = Portal::new();
        apply(&mut portal, b);
        apply(&mut portal, a);
        let titles: Vec<_> = portal.reports().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn test_find_returns_newest_duplicate() {
        let mut portal = Portal::new();
        let older = form("Older").prepare(t0()).unwrap().report().clone();
        let newer = form("Newer").prepare(t0()).unwrap().report().clone();
        assert_eq!(older.id, newer.id);

        portal.add_report(older);
        portal.add_report(newer);

        assert_eq!(portal.find(&t0().timestamp_millis().to_string()).unwrap().title, "Newer");
        assert!(portal.find("missing").is_none());
    }

    #[test]
    fn test_status_filter_on_portal() {
        let mut portal = Portal::new();
        portal.add_report(form("Only one").prepare(t0()).unwrap().report().clone());

        let view = portal.dashboard(
            &ReportQuery::new("", StatusFilter::Only(ReportStatus::Closed)),
            Language::En,
        );
        assert!(view.reports.is_empty());
        assert_eq!(view.stats.total, 1);
    }
}
