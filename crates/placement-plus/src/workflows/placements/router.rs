use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    Branch, BranchStatistics, CandidateProfile, JobPosting, PlacementSubmission, StudentId,
};
use super::repository::{PlacementRepository, RepositoryError};
use super::service::{PlacementRecordingService, PlacementServiceError};

/// Router builder exposing HTTP endpoints for the placement workflows.
pub fn placement_router<R>(service: Arc<PlacementRecordingService<R>>) -> Router
where
    R: PlacementRepository + 'static,
{
    Router::new()
        .route("/api/v1/candidates", post(register_handler::<R>))
        .route("/api/v1/placements", post(record_handler::<R>))
        .route(
            "/api/v1/placements/statistics",
            get(statistics_overview_handler::<R>),
        )
        .route(
            "/api/v1/placements/statistics/:branch",
            get(branch_statistics_handler::<R>),
        )
        .route(
            "/api/v1/placements/eligibility",
            post(eligibility_handler::<R>),
        )
        .with_state(service)
}

/// Sanitized statistics representation for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchStatisticsView {
    pub branch: &'static str,
    pub avg_package: f64,
    pub median_package: f64,
    pub max_package: f64,
    pub total_students: u32,
    pub placed_students: u32,
}

impl BranchStatisticsView {
    pub fn from_statistics(stats: &BranchStatistics) -> Self {
        Self {
            branch: stats.branch.label(),
            avg_package: stats.avg_package,
            median_package: stats.median_package,
            max_package: stats.max_package,
            total_students: stats.total_students,
            placed_students: stats.placed_students,
        }
    }

    /// Base case for a branch that has not placed anyone yet.
    pub fn empty(branch: Branch) -> Self {
        Self {
            branch: branch.label(),
            avg_package: 0.0,
            median_package: 0.0,
            max_package: 0.0,
            total_students: 0,
            placed_students: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EligibilityRequest {
    pub student_id: StudentId,
    pub posting: JobPosting,
}

#[derive(Debug, Serialize)]
pub struct EligibilityView {
    pub eligible: bool,
    pub rationale: String,
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<PlacementRecordingService<R>>>,
    axum::Json(profile): axum::Json<CandidateProfile>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    match service.register_candidate(profile) {
        Ok(profile) => (StatusCode::CREATED, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn record_handler<R>(
    State(service): State<Arc<PlacementRecordingService<R>>>,
    axum::Json(submission): axum::Json<PlacementSubmission>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    match service.record_placement(submission) {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn statistics_overview_handler<R>(
    State(service): State<Arc<PlacementRecordingService<R>>>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    match service.statistics_overview() {
        Ok(snapshot) => {
            let views: Vec<BranchStatisticsView> = snapshot
                .iter()
                .map(BranchStatisticsView::from_statistics)
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn branch_statistics_handler<R>(
    State(service): State<Arc<PlacementRecordingService<R>>>,
    Path(branch): Path<String>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let Some(branch) = Branch::from_label(&branch) else {
        let payload = json!({ "error": format!("unknown branch '{branch}'") });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    };

    match service.branch_statistics(branch) {
        Ok(Some(stats)) => (
            StatusCode::OK,
            axum::Json(BranchStatisticsView::from_statistics(&stats)),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::OK,
            axum::Json(BranchStatisticsView::empty(branch)),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn eligibility_handler<R>(
    State(service): State<Arc<PlacementRecordingService<R>>>,
    axum::Json(request): axum::Json<EligibilityRequest>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    match service.evaluate_application(&request.student_id, &request.posting) {
        Ok(decision) => {
            let view = EligibilityView {
                eligible: decision.is_eligible(),
                rationale: decision.summary(),
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: PlacementServiceError) -> Response {
    let status = match &error {
        PlacementServiceError::UnknownStudent(_) => StatusCode::NOT_FOUND,
        PlacementServiceError::InvalidMonth(_)
        | PlacementServiceError::InvalidStipend { .. }
        | PlacementServiceError::Statistics(_)
        | PlacementServiceError::Eligibility(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PlacementServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PlacementServiceError::Repository(RepositoryError::Duplicate) => StatusCode::CONFLICT,
        PlacementServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PlacementServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
        "retryable": error.is_retryable(),
    });
    (status, axum::Json(payload)).into_response()
}
