//! API route handlers
//!
//! Every handler materializes the record snapshot it needs through the
//! store, then delegates the numeric work to [`crate::aggregate`].

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::aggregate::{self, AggregateShift};
use crate::course::{CourseDraft, CourseRecord, CourseStore, Semester};
use crate::kv::KvStore;

type Store<S> = State<Arc<CourseStore<S>>>;

/// Body returned by course creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Store-assigned course id
    pub id: String,
}

/// Overall weighted average across every stored course.
#[derive(Debug, Serialize, Deserialize)]
pub struct OverallAverageResponse {
    /// Credit-weighted average (0 when no credit-bearing courses exist)
    pub average: f64,
    /// Number of courses in the snapshot
    pub courses: usize,
}

/// One year's weighted average.
#[derive(Debug, Serialize, Deserialize)]
pub struct YearAverageEntry {
    /// Academic year
    pub year: i32,
    /// Credit-weighted average of that year's courses
    pub average: f64,
}

/// One `(year, semester)` group's weighted average.
#[derive(Debug, Serialize, Deserialize)]
pub struct SemesterAverageEntry {
    /// Academic year
    pub year: i32,
    /// Semester within the year
    pub semester: Semester,
    /// Credit-weighted average of the group's courses
    pub average: f64,
}

/// Course-name selection for a subset average.
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionRequest {
    /// Names to include; duplicates are harmless
    pub names: Vec<String>,
}

/// Subset average result.
///
/// `average` is `null` when nothing was computed (empty selection or
/// no matching course) - distinct from a genuine zero average.
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionAverageResponse {
    /// Credit-weighted average of the selection, if one was computed
    pub average: Option<f64>,
}

/// What-if grade for a simulation.
#[derive(Debug, Serialize, Deserialize)]
pub struct SimulateRequest {
    /// Hypothetical replacement grade in [0, 100]
    pub grade: u8,
}

/// Simulation result: the aggregate dimensions the change would move.
#[derive(Debug, Serialize, Deserialize)]
pub struct SimulateResponse {
    /// Non-zero shifts, in overall / semester / year order
    pub shifts: Vec<AggregateShift>,
}

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
}

/// POST /courses
pub async fn create_course<S: KvStore>(
    State(store): Store<S>,
    Json(draft): Json<CourseDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = store.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /courses
pub async fn list_courses<S: KvStore>(
    State(store): Store<S>,
) -> Result<Json<Vec<CourseRecord>>, ApiError> {
    Ok(Json(store.list().await?))
}

/// GET /courses/:id
pub async fn get_course<S: KvStore>(
    State(store): Store<S>,
    Path(id): Path<String>,
) -> Result<Json<CourseRecord>, ApiError> {
    Ok(Json(store.get(&id).await?))
}

/// PUT /courses/:id
pub async fn update_course<S: KvStore>(
    State(store): Store<S>,
    Path(id): Path<String>,
    Json(draft): Json<CourseDraft>,
) -> Result<StatusCode, ApiError> {
    store.update(&id, &draft).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /courses/:id
pub async fn delete_course<S: KvStore>(
    State(store): Store<S>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /averages
pub async fn overall_average<S: KvStore>(
    State(store): Store<S>,
) -> Result<Json<OverallAverageResponse>, ApiError> {
    let records = store.list().await?;
    Ok(Json(OverallAverageResponse {
        average: aggregate::weighted_average(&records),
        courses: records.len(),
    }))
}

/// GET /averages/by-year
pub async fn averages_by_year<S: KvStore>(
    State(store): Store<S>,
) -> Result<Json<Vec<YearAverageEntry>>, ApiError> {
    let records = store.list().await?;
    let entries = aggregate::averages_by_year(&records)
        .into_iter()
        .map(|(year, average)| YearAverageEntry { year, average })
        .collect();
    Ok(Json(entries))
}

/// GET /averages/by-semester
pub async fn averages_by_semester<S: KvStore>(
    State(store): Store<S>,
) -> Result<Json<Vec<SemesterAverageEntry>>, ApiError> {
    let records = store.list().await?;
    let entries = aggregate::averages_by_semester(&records)
        .into_iter()
        .map(|(key, average)| SemesterAverageEntry {
            year: key.year(),
            semester: key.semester(),
            average,
        })
        .collect();
    Ok(Json(entries))
}

/// POST /averages/selection
pub async fn selection_average<S: KvStore>(
    State(store): Store<S>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<SelectionAverageResponse>, ApiError> {
    let records = store.list().await?;
    let names: HashSet<String> = request.names.into_iter().collect();
    Ok(Json(SelectionAverageResponse {
        average: aggregate::selected_average(&records, &names),
    }))
}

/// POST /courses/:id/simulate
pub async fn simulate<S: KvStore>(
    State(store): Store<S>,
    Path(id): Path<String>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let records = store.list().await?;
    let shifts = aggregate::simulate_grade_change(&records, &id, request.grade)?;
    Ok(Json(SimulateResponse { shifts }))
}
