use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use db::models::{JobFilter, JobUpdate, NewJob};
use db::repository::jobs as job_repo;
use serde_json::{json, Value};

use crate::{error::ApiError, validate, AppState};

/// `POST /jobs` (admin) → 201 `{ job }`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewJob>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload?;
    validate::new_job(&input)?;

    let job = job_repo::create_job(&state.pool, input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

/// `GET /jobs[?title=&minSalary=&hasEquity=]` → `{ jobs }`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<JobFilter>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(filter) = query?;

    let jobs = if filter.is_empty() {
        job_repo::find_all(&state.pool).await?
    } else {
        job_repo::find_filter(&state.pool, &filter).await?
    };
    Ok(Json(json!({ "jobs": jobs })))
}

/// `GET /jobs/:id` → `{ job }`
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let job = job_repo::get_job(&state.pool, id).await?;
    Ok(Json(json!({ "job": job })))
}

/// `PATCH /jobs/:id` (admin) → `{ job }`
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<JobUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    validate::job_update(&input)?;

    let job = job_repo::update_job(&state.pool, id, input).await?;
    Ok(Json(json!({ "job": job })))
}

/// `DELETE /jobs/:id` (admin) → `{ deleted: { id, title } }`
pub async fn remove(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let deleted = job_repo::remove_job(&state.pool, id).await?;
    Ok(Json(json!({ "deleted": deleted })))
}
