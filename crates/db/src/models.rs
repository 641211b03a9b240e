//! Row structs and input payloads for the `companies` and `jobs` tables.
//!
//! Row structs map 1-to-1 onto query results.  Input structs are what the
//! API deserialises request bodies and query strings into; their serde
//! attributes reject unknown keys so a payload can never smuggle in a
//! primary-key change or an unrecognised filter.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Equity as sent by a client: `"0.002"` or `0.002`.
#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalInput {
    Text(String),
    Number(serde_json::Number),
}

/// Parse an optional decimal from its textual form.
///
/// JSON numbers are read back through their shortest round-trip rendering,
/// so `0.1` is stored as `0.1` rather than the nearest binary fraction.
fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<DecimalInput>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(DecimalInput::Text(s)) => s,
        Some(DecimalInput::Number(n)) => n.to_string(),
    };
    BigDecimal::from_str(text.trim())
        .map(Some)
        .map_err(|_| de::Error::custom(format!("invalid decimal: {text}")))
}

// ---------------------------------------------------------------------------
// companies
// ---------------------------------------------------------------------------

/// A persisted company row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRow {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A job as it appears nested under its company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
}

/// A company together with every job it owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: CompanyRow,
    pub jobs: Vec<CompanyJob>,
}

/// One row of `companies LEFT JOIN jobs`.
///
/// The job columns are all `NULL` when the company has no jobs.
#[derive(Debug, Clone, FromRow)]
pub struct CompanyJobRow {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
    pub job_id: Option<i32>,
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
}

/// Payload for creating a company.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// Partial update for a company.  `handle` is deliberately absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// Search parameters accepted by `GET /companies`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

// ---------------------------------------------------------------------------
// jobs
// ---------------------------------------------------------------------------

/// A persisted job row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
}

/// What `DELETE /jobs/:id` reports back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DeletedJob {
    pub id: i32,
    pub title: String,
}

/// Payload for creating a job.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
}

/// Partial update for a job.  Neither `id` nor `company_handle` may change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub salary: Option<i32>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub equity: Option<BigDecimal>,
}

/// Search parameters accepted by `GET /jobs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
}
