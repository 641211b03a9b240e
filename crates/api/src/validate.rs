//! Field rules applied to request payloads before they reach the database.
//!
//! Shape errors (wrong types, unknown keys, missing required fields) are
//! caught earlier by serde; these checks cover ranges and lengths.

use bigdecimal::{BigDecimal, Zero};
use db::models::{CompanyFilter, CompanyUpdate, JobUpdate, NewCompany, NewJob};
use url::Url;

use crate::error::ApiError;

const HANDLE_MAX: usize = 25;

fn bad(msg: impl Into<String>) -> ApiError {
    ApiError::BadRequest(msg.into())
}

fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), ApiError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(bad(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: Option<i32>) -> Result<(), ApiError> {
    match value {
        Some(v) if v < 0 => Err(bad(format!("{field} must be >= 0"))),
        _ => Ok(()),
    }
}

/// An absolute `http`/`https` URL with a host.
fn check_url(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    let Some(raw) = value else {
        return Ok(());
    };
    match Url::parse(raw) {
        Ok(url)
            if matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|h| !h.is_empty()) =>
        {
            Ok(())
        }
        _ => Err(bad(format!("{field} must be an http(s) URL"))),
    }
}

fn check_equity(value: Option<&BigDecimal>) -> Result<(), ApiError> {
    match value {
        Some(e) if *e < BigDecimal::zero() || *e > BigDecimal::from(1) => {
            Err(bad("equity must be between 0 and 1"))
        }
        _ => Ok(()),
    }
}

pub fn new_company(company: &NewCompany) -> Result<(), ApiError> {
    check_len("handle", &company.handle, 1, HANDLE_MAX)?;
    check_len("name", &company.name, 1, 100)?;
    check_non_negative("numEmployees", company.num_employees)?;
    check_url("logoUrl", company.logo_url.as_deref())
}

pub fn company_update(update: &CompanyUpdate) -> Result<(), ApiError> {
    if let Some(name) = &update.name {
        check_len("name", name, 1, 100)?;
    }
    check_non_negative("numEmployees", update.num_employees)?;
    check_url("logoUrl", update.logo_url.as_deref())
}

pub fn company_filter(filter: &CompanyFilter) -> Result<(), ApiError> {
    if let (Some(min), Some(max)) = (filter.min_employees, filter.max_employees) {
        if min > max {
            return Err(bad("minEmployees cannot be greater than maxEmployees"));
        }
    }
    Ok(())
}

pub fn new_job(job: &NewJob) -> Result<(), ApiError> {
    check_len("title", &job.title, 1, 200)?;
    check_non_negative("salary", job.salary)?;
    check_equity(job.equity.as_ref())?;
    check_len("company_handle", &job.company_handle, 1, HANDLE_MAX)
}

pub fn job_update(update: &JobUpdate) -> Result<(), ApiError> {
    if let Some(title) = &update.title {
        check_len("title", title, 1, 200)?;
    }
    check_non_negative("salary", update.salary)?;
    check_equity(update.equity.as_ref())
}
