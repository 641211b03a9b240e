//! Company CRUD operations.

use sqlx::{PgPool, QueryBuilder};
use tracing::debug;

use crate::{
    models::{
        CompanyDetail, CompanyFilter, CompanyJob, CompanyJobRow, CompanyRow, CompanyUpdate,
        NewCompany,
    },
    sql::{push_company_filter, sql_for_partial_update, PartialUpdate, COMPANY_COLUMNS},
    DbError,
};

const COMPANY_COLUMNS_SQL: &str = "handle, name, description, num_employees, logo_url";

fn not_found(handle: &str) -> DbError {
    DbError::NotFound(format!("No company: {handle}"))
}

/// Unique violations (handle or name) become `BadRequest`.
fn duplicate_or(e: sqlx::Error, what: &str) -> DbError {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DbError::BadRequest(format!("Duplicate company: {what}"))
        }
        other => DbError::Sqlx(other),
    }
}

/// Insert a new company.
///
/// Returns `DbError::BadRequest` if the handle or the name is already taken.
pub async fn create_company(pool: &PgPool, company: NewCompany) -> Result<CompanyRow, DbError> {
    let duplicate = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
        .bind(&company.handle)
        .fetch_optional(pool)
        .await?;
    if duplicate.is_some() {
        return Err(DbError::BadRequest(format!(
            "Duplicate company: {}",
            company.handle
        )));
    }

    let row = sqlx::query_as::<_, CompanyRow>(&format!(
        "INSERT INTO companies (handle, name, description, num_employees, logo_url)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {COMPANY_COLUMNS_SQL}"
    ))
    .bind(&company.handle)
    .bind(&company.name)
    .bind(company.description)
    .bind(company.num_employees)
    .bind(company.logo_url)
    .fetch_one(pool)
    .await
    .map_err(|e| duplicate_or(e, &company.name))?;

    debug!(handle = %row.handle, "created company");
    Ok(row)
}

/// Return all companies ordered by name.
pub async fn find_all(pool: &PgPool) -> Result<Vec<CompanyRow>, DbError> {
    find_filter(pool, &CompanyFilter::default()).await
}

/// Return the companies matching `filter`, ordered by name.
pub async fn find_filter(
    pool: &PgPool,
    filter: &CompanyFilter,
) -> Result<Vec<CompanyRow>, DbError> {
    let mut qb = QueryBuilder::new(format!("SELECT {COMPANY_COLUMNS_SQL} FROM companies"));
    push_company_filter(&mut qb, filter);
    qb.push(" ORDER BY name");

    let rows = qb.build_query_as::<CompanyRow>().fetch_all(pool).await?;
    Ok(rows)
}

/// Fetch a company and every job it owns.
pub async fn get_company(pool: &PgPool, handle: &str) -> Result<CompanyDetail, DbError> {
    let rows = sqlx::query_as::<_, CompanyJobRow>(
        r#"
        SELECT c.handle, c.name, c.description, c.num_employees, c.logo_url,
               j.id AS job_id, j.title, j.salary, j.equity
        FROM companies AS c
        LEFT JOIN jobs AS j ON j.company_handle = c.handle
        WHERE c.handle = $1
        ORDER BY j.id
        "#,
    )
    .bind(handle)
    .fetch_all(pool)
    .await?;

    fold_company_rows(rows).ok_or_else(|| not_found(handle))
}

/// Collapse the rows of `companies LEFT JOIN jobs` for one handle into a
/// single company.  Rows where the join found no job contribute nothing to
/// `jobs`.  Returns `None` for an empty row set.
pub fn fold_company_rows(rows: Vec<CompanyJobRow>) -> Option<CompanyDetail> {
    let first = rows.first()?;
    let company = CompanyRow {
        handle: first.handle.clone(),
        name: first.name.clone(),
        description: first.description.clone(),
        num_employees: first.num_employees,
        logo_url: first.logo_url.clone(),
    };

    let jobs = rows
        .into_iter()
        .filter_map(|row| {
            let id = row.job_id?;
            Some(CompanyJob {
                id,
                title: row.title.unwrap_or_default(),
                salary: row.salary,
                equity: row.equity,
                company_handle: row.handle,
            })
        })
        .collect();

    Some(CompanyDetail { company, jobs })
}

/// Apply a partial update and return the updated company.
///
/// Returns `DbError::BadRequest` when `data` carries no fields or renames the
/// company to a name that is already taken.
pub async fn update_company(
    pool: &PgPool,
    handle: &str,
    data: CompanyUpdate,
) -> Result<CompanyRow, DbError> {
    let new_name = data.name.clone().unwrap_or_default();
    let PartialUpdate { set_cols, values } =
        sql_for_partial_update(data.into_fields(), COMPANY_COLUMNS)?;
    let handle_idx = values.len() + 1;
    let sql = format!(
        "UPDATE companies SET {set_cols} WHERE handle = ${handle_idx} RETURNING {COMPANY_COLUMNS_SQL}"
    );

    let mut query = sqlx::query_as::<_, CompanyRow>(&sql);
    for value in values {
        query = value.bind_to(query);
    }
    let row = query
        .bind(handle)
        .fetch_optional(pool)
        .await
        .map_err(|e| duplicate_or(e, &new_name))?
        .ok_or_else(|| not_found(handle))?;

    Ok(row)
}

/// Permanently delete a company (and, through the foreign key, its jobs).
pub async fn remove_company(pool: &PgPool, handle: &str) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
        .bind(handle)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(handle));
    }

    debug!(handle, "removed company");
    Ok(())
}
