//! HTTP API handlers for the feedback portal.
//!
//! # Privacy
//!
//! Handlers log report ids, types, categories and priorities. They never log
//! a submitter's name, phone or email, and never log request headers.
//!
//! # Endpoints
//!
//! - `POST /reports` - Submit a draft
//! - `GET /reports/:id` - Details of one report from this session
//! - `GET /dashboard` - Filtered report list with summary counts
//! - `GET /catalog` - Bilingual option lists for the form
//! - `GET /health` - Health check

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::aggregation::{ReportQuery, StatusFilter};
use crate::dashboard::{DashboardView, FormCatalog, ReportDetails};
use crate::draft::{DraftError, ReportDraft, ReportForm};
use crate::error::{ApiError, ApiResult};
use crate::i18n::{Language, Notice};
use crate::portal::Portal;
use crate::storage::Storage;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub portal: Arc<RwLock<Portal>>,
    /// Collection every report is written into.
    pub collection: String,
    pub default_language: Language,
}

impl AppState {
    pub fn new(storage: Storage, collection: &str, default_language: Language) -> Self {
        Self {
            storage,
            portal: Arc::new(RwLock::new(Portal::new())),
            collection: collection.to_string(),
            default_language,
        }
    }

    fn language(&self, query: Option<&str>, headers: &HeaderMap) -> Language {
        Language::detect(query, headers, self.default_language)
    }
}

/// Build the router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/reports", post(post_report))
        .route("/reports/:id", get(get_report))
        .route("/dashboard", get(get_dashboard))
        .route("/catalog", get(get_catalog))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Query parameter carrying only a language choice.
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

/// POST /reports - Submit a report.
///
/// # Request Body
///
/// The form state, e.g.
///
/// ```json
/// {
///     "type": "station",
///     "category": "cleanliness",
///     "priority": "medium",
///     "title": "Dirty Platform 3",
///     "description": "Trash overflowing",
///     "station": "New Delhi",
///     "isAnonymous": true
/// }
/// ```
///
/// # Response
///
/// - `201 Created` with `{ "report": ..., "message": ... }`
/// - `400` when the body is not a valid draft (malformed JSON, unknown
///   category or priority)
/// - `422` when required fields are empty
/// - `502` when the document store refuses the write; the draft is echoed
///   back unchanged so the client can retry
#[instrument(skip(state, headers, payload), fields(report_type, category))]
pub async fn post_report(
    State(state): State<AppState>,
    Query(lang): Query<LangQuery>,
    headers: HeaderMap,
    payload: Result<Json<ReportDraft>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(draft) = payload.map_err(|rejection| {
        warn!(status = %rejection.status(), "Unreadable report body");
        ApiError::BadRequest(rejection.body_text())
    })?;

    let language = state.language(lang.lang.as_deref(), &headers);

    let span = tracing::Span::current();
    span.record("report_type", draft.report_type.as_str());
    span.record(
        "category",
        draft.category.map(|c| c.as_str()).unwrap_or("none"),
    );

    let mut form = ReportForm::new(draft);
    let pending = form.prepare(Utc::now()).map_err(|err| match err {
        DraftError::Incomplete(missing) => {
            info!(?missing, "Rejected incomplete draft");
            ApiError::Incomplete {
                message: Notice::Incomplete.render(language),
                missing,
            }
        }
    })?;

    match form.settle(pending.persist(&state.storage, &state.collection).await) {
        Ok(report) => {
            state.portal.write().await.add_report(report.clone());
            let body = json!({
                "report": report,
                "message": Notice::Submitted.render(language),
            });
            Ok((StatusCode::CREATED, Json(body)).into_response())
        }
        Err(reason) => {
            let body = json!({
                "error": {
                    "message": Notice::SubmitFailed(reason.detail()).render(language),
                    "detail": reason.to_string(),
                },
                "draft": form.draft(),
            });
            Ok((StatusCode::BAD_GATEWAY, Json(body)).into_response())
        }
    }
}

/// Query parameters for the dashboard endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Free-text search over title and description.
    #[serde(default)]
    pub search: String,
    /// `all` or a status value (submitted, in-progress, resolved, closed).
    pub status: Option<String>,
    pub lang: Option<String>,
}

/// GET /dashboard - Reports from this session, filtered.
///
/// # Query Parameters
///
/// - `search` (optional): Case-insensitive text matched against title and description
/// - `status` (optional): `all` (default) or one status
/// - `lang` (optional): `en` or `hi`
#[instrument(skip(state, headers))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
) -> ApiResult<Json<DashboardView>> {
    let language = state.language(query.lang.as_deref(), &headers);

    let status = match query.status.as_deref() {
        None | Some("") => StatusFilter::All,
        Some(raw) => raw.parse::<StatusFilter>().map_err(|err| {
            warn!(status = %raw, "Invalid status filter");
            ApiError::BadRequest(format!("{err}"))
        })?,
    };

    let view = state
        .portal
        .read()
        .await
        .dashboard(&ReportQuery::new(&query.search, status), language);

    info!(
        shown = view.reports.len(),
        total = view.stats.total,
        status = status.as_str(),
        "Dashboard queried"
    );

    Ok(Json(view))
}

/// GET /reports/:id - Details of one report.
#[instrument(skip(state, headers, lang))]
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(lang): Query<LangQuery>,
    headers: HeaderMap,
) -> ApiResult<Json<ReportDetails>> {
    let language = state.language(lang.lang.as_deref(), &headers);

    let report = state
        .portal
        .read()
        .await
        .find(&id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("report {id}")))?;

    Ok(Json(ReportDetails::new(report, language)))
}

/// GET /catalog - Option lists for the submission form and dashboard filter.
pub async fn get_catalog(
    State(state): State<AppState>,
    Query(lang): Query<LangQuery>,
    headers: HeaderMap,
) -> Json<FormCatalog> {
    Json(FormCatalog::new(state.language(lang.lang.as_deref(), &headers)))
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
