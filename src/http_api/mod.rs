use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::export::{ExportError, ExportFormat, filename_base, render_export, table::format_dates};
use crate::generator::weekday_from_index;
use crate::holidays::HolidayProvider;
use crate::intervals::{SessionInterval, parse_time_of_day};
use crate::persistence::{PersistenceError, SemesterStore};
use crate::plan::{CoursePlan, PlanRequest, plan_course};
use crate::settings::Settings;
use crate::PlanError;

/// Read-only handles shared by all requests. Semester and holiday data are
/// loaded afresh for every request.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<Settings>,
    store: Arc<dyn SemesterStore + Send + Sync>,
    provider: Arc<dyn HolidayProvider + Send + Sync>,
}

impl AppState {
    pub fn new<S, P>(settings: Settings, store: S, provider: P) -> Self
    where
        S: SemesterStore + Send + Sync + 'static,
        P: HolidayProvider + Send + Sync + 'static,
    {
        Self {
            settings: Arc::new(settings),
            store: Arc::new(store),
            provider: Arc::new(provider),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<PlanError> for ApiError {
    fn from(value: PlanError) -> Self {
        match value {
            PlanError::Semester(PersistenceError::SemesterNotFound(_)) => {
                ApiError::NotFound(value.to_string())
            }
            PlanError::Schedule(_) => ApiError::Invalid(value.to_string()),
            PlanError::Semester(_) | PlanError::Holiday(_) => ApiError::Internal(value.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::Invalid(value.body_text())
    }
}

impl From<PersistenceError> for ApiError {
    fn from(value: PersistenceError) -> Self {
        PlanError::from(value).into()
    }
}

impl From<ExportError> for ApiError {
    fn from(value: ExportError) -> Self {
        match value {
            ExportError::UnsupportedFormat(_) | ExportError::EmptyCalendar => {
                ApiError::Invalid(value.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        tracing::warn!(%status, %message, "request failed");
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

/// Course selection as submitted by a front-end. Weekday is Monday-based
/// (0..=6), times are `HH:MM`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanPayload {
    pub semester: String,
    pub weekday: u8,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub course_name: String,
}

impl PlanPayload {
    fn to_request(&self) -> Result<PlanRequest, ApiError> {
        let weekday = weekday_from_index(self.weekday).map_err(|err| ApiError::invalid(err.to_string()))?;
        let start_time = parse_time_of_day(&self.start_time)
            .ok_or_else(|| ApiError::invalid(format!("invalid start_time '{}'", self.start_time)))?;
        let end_time = parse_time_of_day(&self.end_time)
            .ok_or_else(|| ApiError::invalid(format!("invalid end_time '{}'", self.end_time)))?;
        Ok(PlanRequest {
            semester: self.semester.clone(),
            weekday,
            start_time,
            end_time,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRow {
    pub date: NaiveDate,
    pub display_date: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub semester: String,
    pub weekday: u8,
    pub weekday_name: String,
    pub rows: Vec<PlanRow>,
    pub sessions: Vec<SessionInterval>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayOption {
    pub index: u8,
    pub name: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/semesters", get(list_semesters))
        .route("/weekdays", get(list_weekdays))
        .route("/plan", post(create_plan))
        .route("/export/:format", post(export_plan))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_semesters(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.store.list_semesters()?))
}

async fn list_weekdays(State(state): State<AppState>) -> Json<Vec<WeekdayOption>> {
    let locale = state.settings.locale;
    let options = (0..7u8)
        .filter_map(|index| weekday_from_index(index).ok().map(|wd| (index, wd)))
        .map(|(index, weekday)| WeekdayOption {
            index,
            name: locale.weekday_name(weekday).to_string(),
        })
        .collect();
    Json(options)
}

fn build_plan(state: &AppState, payload: &PlanPayload) -> Result<CoursePlan, ApiError> {
    let request = payload.to_request()?;
    let plan = plan_course(
        state.store.as_ref(),
        state.provider.as_ref(),
        &state.settings.region,
        &request,
    )?;
    Ok(plan)
}

async fn create_plan(
    State(state): State<AppState>,
    payload: Result<Json<PlanPayload>, JsonRejection>,
) -> Result<Json<PlanResponse>, ApiError> {
    let Json(payload) = payload?;
    let plan = build_plan(&state, &payload)?;
    let display = format_dates(plan.annotated.iter().map(|entry| entry.date));
    let rows = plan
        .annotated
        .iter()
        .zip(display)
        .map(|(entry, display_date)| PlanRow {
            date: entry.date,
            display_date,
            label: entry.label.clone(),
        })
        .collect();
    Ok(Json(PlanResponse {
        weekday_name: state.settings.locale.weekday_name(plan.weekday).to_string(),
        semester: plan.semester,
        weekday: payload.weekday,
        rows,
        sessions: plan.intervals,
    }))
}

async fn export_plan(
    State(state): State<AppState>,
    Path(format): Path<String>,
    payload: Result<Json<PlanPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let format = ExportFormat::from_extension(&format)?;
    let plan = build_plan(&state, &payload)?;
    let body = render_export(format, &plan, &payload.course_name, state.settings.locale, Utc::now())?;

    let stem = attachment_stem(&payload.course_name);
    let disposition = format!("attachment; filename=\"{stem}.{}\"", format.extension());
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// File name stem safe to place inside a quoted `filename` parameter.
fn attachment_stem(course_name: &str) -> String {
    let stem: String = filename_base(course_name)
        .chars()
        .filter(|ch| !matches!(ch, '"' | '\\') && !ch.is_control())
        .collect();
    if stem.is_empty() {
        "seminarplan".to_string()
    } else {
        stem
    }
}
