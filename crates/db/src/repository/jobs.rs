//! Job CRUD operations.

use sqlx::{PgPool, QueryBuilder};
use tracing::debug;

use crate::{
    models::{DeletedJob, JobFilter, JobRow, JobUpdate, NewJob},
    sql::{push_job_filter, sql_for_partial_update, PartialUpdate, JOB_COLUMNS},
    DbError,
};

const JOB_COLUMNS_SQL: &str = "id, title, salary, equity, company_handle";

fn not_found(id: i32) -> DbError {
    DbError::NotFound(format!("No job with id: {id}"))
}

/// Insert a new job and return it with its generated `id`.
///
/// Returns `DbError::BadRequest` if `company_handle` names no company.
pub async fn create_job(pool: &PgPool, job: NewJob) -> Result<JobRow, DbError> {
    let handle = job.company_handle.clone();
    let row = sqlx::query_as::<_, JobRow>(&format!(
        "INSERT INTO jobs (title, salary, equity, company_handle)
         VALUES ($1, $2, $3, $4)
         RETURNING {JOB_COLUMNS_SQL}"
    ))
    .bind(job.title)
    .bind(job.salary)
    .bind(job.equity)
    .bind(job.company_handle)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            DbError::BadRequest(format!("No company: {handle}"))
        }
        other => DbError::Sqlx(other),
    })?;

    debug!(job_id = row.id, "created job");
    Ok(row)
}

/// Return all jobs ordered by title.
pub async fn find_all(pool: &PgPool) -> Result<Vec<JobRow>, DbError> {
    find_filter(pool, &JobFilter::default()).await
}

/// Return the jobs matching `filter`, ordered by title.
pub async fn find_filter(pool: &PgPool, filter: &JobFilter) -> Result<Vec<JobRow>, DbError> {
    let mut qb = QueryBuilder::new(format!("SELECT {JOB_COLUMNS_SQL} FROM jobs"));
    push_job_filter(&mut qb, filter);
    qb.push(" ORDER BY title, id");

    let rows = qb.build_query_as::<JobRow>().fetch_all(pool).await?;
    Ok(rows)
}

/// Fetch a single job by its primary key.
pub async fn get_job(pool: &PgPool, id: i32) -> Result<JobRow, DbError> {
    let row = sqlx::query_as::<_, JobRow>(&format!(
        "SELECT {JOB_COLUMNS_SQL} FROM jobs WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| not_found(id))?;

    Ok(row)
}

/// Apply a partial update and return the updated job.
///
/// Returns `DbError::BadRequest` when `data` carries no fields.
pub async fn update_job(pool: &PgPool, id: i32, data: JobUpdate) -> Result<JobRow, DbError> {
    let PartialUpdate { set_cols, values } =
        sql_for_partial_update(data.into_fields(), JOB_COLUMNS)?;
    let id_idx = values.len() + 1;
    let sql = format!(
        "UPDATE jobs SET {set_cols} WHERE id = ${id_idx} RETURNING {JOB_COLUMNS_SQL}"
    );

    let mut query = sqlx::query_as::<_, JobRow>(&sql);
    for value in values {
        query = value.bind_to(query);
    }
    let row = query
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(row)
}

/// Permanently delete a job, returning its `id` and `title`.
pub async fn remove_job(pool: &PgPool, id: i32) -> Result<DeletedJob, DbError> {
    let deleted = sqlx::query_as::<_, DeletedJob>(
        "DELETE FROM jobs WHERE id = $1 RETURNING id, title",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| not_found(id))?;

    debug!(job_id = id, "removed job");
    Ok(deleted)
}
