//! SQL fragment builders.
//!
//! - [`sql_for_partial_update`] turns an ordered list of changed fields into a
//!   `SET` list with positional placeholders plus the values to bind.
//! - [`push_company_filter`] / [`push_job_filter`] append a `WHERE` clause
//!   for the search parameters to a [`QueryBuilder`], binding every value.
//!
//! Column names only ever come from the typed update structs and the constant
//! override tables below, never from request data.

use bigdecimal::BigDecimal;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{Postgres, QueryBuilder};

use crate::models::{CompanyFilter, CompanyUpdate, JobFilter, JobUpdate};
use crate::DbError;

/// Field → column overrides for companies.
pub const COMPANY_COLUMNS: &[(&str, &str)] = &[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

/// Job fields are named after their columns.
pub const JOB_COLUMNS: &[(&str, &str)] = &[];

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// A value headed for a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i32),
    Numeric(BigDecimal),
}

impl SqlValue {
    /// Bind this value as the next positional parameter of `query`.
    pub fn bind_to<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Numeric(v) => query.bind(v),
        }
    }
}

/// Output of [`sql_for_partial_update`].
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    /// `"col_a"=$1, "col_b"=$2`
    pub set_cols: String,
    /// Values for `$1..=$n`, in placeholder order.
    pub values: Vec<SqlValue>,
}

/// Build the `SET` list for a partial update.
///
/// Placeholders are numbered from `$1` in the order of `data`; a caller that
/// needs a trailing key parameter uses `$n+1` where `n = values.len()`.
///
/// # Errors
/// [`DbError::BadRequest`] when `data` is empty.
pub fn sql_for_partial_update(
    data: Vec<(&str, SqlValue)>,
    js_to_sql: &[(&str, &str)],
) -> Result<PartialUpdate, DbError> {
    if data.is_empty() {
        return Err(DbError::BadRequest("No data".into()));
    }

    let mut cols = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());
    for (idx, (field, value)) in data.into_iter().enumerate() {
        let column = js_to_sql
            .iter()
            .find(|(js, _)| *js == field)
            .map_or(field, |(_, col)| *col);
        cols.push(format!("\"{column}\"=${}", idx + 1));
        values.push(value);
    }

    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        values,
    })
}

impl CompanyUpdate {
    /// The fields present in this update, keyed by their API names.
    pub fn into_fields(self) -> Vec<(&'static str, SqlValue)> {
        let mut fields = Vec::new();
        if let Some(name) = self.name {
            fields.push(("name", SqlValue::Text(name)));
        }
        if let Some(description) = self.description {
            fields.push(("description", SqlValue::Text(description)));
        }
        if let Some(n) = self.num_employees {
            fields.push(("numEmployees", SqlValue::Int(n)));
        }
        if let Some(url) = self.logo_url {
            fields.push(("logoUrl", SqlValue::Text(url)));
        }
        fields
    }
}

impl JobUpdate {
    /// The fields present in this update, keyed by their API names.
    pub fn into_fields(self) -> Vec<(&'static str, SqlValue)> {
        let mut fields = Vec::new();
        if let Some(title) = self.title {
            fields.push(("title", SqlValue::Text(title)));
        }
        if let Some(salary) = self.salary {
            fields.push(("salary", SqlValue::Int(salary)));
        }
        if let Some(equity) = self.equity {
            fields.push(("equity", SqlValue::Numeric(equity)));
        }
        fields
    }
}

// ---------------------------------------------------------------------------
// Search filters
// ---------------------------------------------------------------------------

/// One recognised company search condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyPredicate {
    NameContains(String),
    MinEmployees(i32),
    MaxEmployees(i32),
}

/// One recognised job search condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobPredicate {
    TitleContains(String),
    MinSalary(i32),
    HasEquity,
}

impl CompanyFilter {
    pub fn predicates(&self) -> Vec<CompanyPredicate> {
        let mut out = Vec::new();
        if let Some(name) = &self.name {
            out.push(CompanyPredicate::NameContains(name.clone()));
        }
        if let Some(min) = self.min_employees {
            out.push(CompanyPredicate::MinEmployees(min));
        }
        if let Some(max) = self.max_employees {
            out.push(CompanyPredicate::MaxEmployees(max));
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }
}

impl JobFilter {
    /// `hasEquity=false` is the same as leaving it out.
    pub fn predicates(&self) -> Vec<JobPredicate> {
        let mut out = Vec::new();
        if let Some(title) = &self.title {
            out.push(JobPredicate::TitleContains(title.clone()));
        }
        if let Some(min) = self.min_salary {
            out.push(JobPredicate::MinSalary(min));
        }
        if self.has_equity == Some(true) {
            out.push(JobPredicate::HasEquity);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }
}

/// `%text%` with LIKE wildcards in `text` escaped.
fn contains_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Append ` WHERE …` for `filter`, or nothing when it has no predicates.
pub fn push_company_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &CompanyFilter) {
    let predicates = filter.predicates();
    if predicates.is_empty() {
        return;
    }

    qb.push(" WHERE ");
    let mut clause = qb.separated(" AND ");
    for predicate in predicates {
        match predicate {
            CompanyPredicate::NameContains(name) => {
                clause.push("name ILIKE ");
                clause.push_bind_unseparated(contains_pattern(&name));
            }
            CompanyPredicate::MinEmployees(min) => {
                clause.push("num_employees >= ");
                clause.push_bind_unseparated(min);
            }
            CompanyPredicate::MaxEmployees(max) => {
                clause.push("num_employees <= ");
                clause.push_bind_unseparated(max);
            }
        }
    }
}

/// Append ` WHERE …` for `filter`, or nothing when it has no predicates.
pub fn push_job_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    let predicates = filter.predicates();
    if predicates.is_empty() {
        return;
    }

    qb.push(" WHERE ");
    let mut clause = qb.separated(" AND ");
    for predicate in predicates {
        match predicate {
            JobPredicate::TitleContains(title) => {
                clause.push("title ILIKE ");
                clause.push_bind_unseparated(contains_pattern(&title));
            }
            JobPredicate::MinSalary(min) => {
                clause.push("salary >= ");
                clause.push_bind_unseparated(min);
            }
            JobPredicate::HasEquity => {
                clause.push("equity > 0");
            }
        }
    }
}
