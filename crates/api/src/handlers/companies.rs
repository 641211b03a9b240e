use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use db::models::{CompanyFilter, CompanyUpdate, NewCompany};
use db::repository::companies as company_repo;
use serde_json::{json, Value};

use crate::{error::ApiError, validate, AppState};

/// `POST /companies` (admin) → 201 `{ company }`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewCompany>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload?;
    validate::new_company(&input)?;

    let company = company_repo::create_company(&state.pool, input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// `GET /companies[?name=&minEmployees=&maxEmployees=]` → `{ companies }`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<CompanyFilter>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(filter) = query?;
    validate::company_filter(&filter)?;

    let companies = if filter.is_empty() {
        company_repo::find_all(&state.pool).await?
    } else {
        company_repo::find_filter(&state.pool, &filter).await?
    };
    Ok(Json(json!({ "companies": companies })))
}

/// `GET /companies/:handle` → `{ company }` including its jobs
pub async fn get(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let company = company_repo::get_company(&state.pool, &handle).await?;
    Ok(Json(json!({ "company": company })))
}

/// `PATCH /companies/:handle` (admin) → `{ company }`
pub async fn update(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    payload: Result<Json<CompanyUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = payload?;
    validate::company_update(&input)?;

    let company = company_repo::update_company(&state.pool, &handle, input).await?;
    Ok(Json(json!({ "company": company })))
}

/// `DELETE /companies/:handle` (admin) → `{ deleted: handle }`
pub async fn remove(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Value>, ApiError> {
    company_repo::remove_company(&state.pool, &handle).await?;
    Ok(Json(json!({ "deleted": handle })))
}
