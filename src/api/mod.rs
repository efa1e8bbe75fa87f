//! HTTP API for the course store and aggregation engine
//!
//! A thin axum layer: handlers resolve records through the
//! [`CourseStore`], hand snapshots to the aggregation engine, and map
//! engine errors onto HTTP statuses. No aggregation logic lives here.

pub mod routes;

pub use routes::{
    CreatedResponse, ErrorBody, OverallAverageResponse, SelectionAverageResponse,
    SelectionRequest, SemesterAverageEntry, SimulateRequest, SimulateResponse, YearAverageEntry,
};

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::course::CourseStore;
use crate::kv::KvStore;
use crate::Error;

/// Build the API router over a shared course store.
pub fn router<S: KvStore + 'static>(store: Arc<CourseStore<S>>) -> Router {
    Router::new()
        // CRUD
        .route(
            "/courses",
            post(routes::create_course::<S>).get(routes::list_courses::<S>),
        )
        .route(
            "/courses/:id",
            get(routes::get_course::<S>)
                .put(routes::update_course::<S>)
                .delete(routes::delete_course::<S>),
        )
        // Aggregation
        .route("/averages", get(routes::overall_average::<S>))
        .route("/averages/by-year", get(routes::averages_by_year::<S>))
        .route(
            "/averages/by-semester",
            get(routes::averages_by_semester::<S>),
        )
        .route("/averages/selection", post(routes::selection_average::<S>))
        .route("/courses/:id/simulate", post(routes::simulate::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Error wrapper that renders crate errors as JSON HTTP responses.
///
/// Engine and store errors are explicit values, so the mapping is
/// total: not-found ids become 404, boundary validation failures
/// become 422, and backend faults become 500.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::RecordNotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidGrade(_) | Error::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
