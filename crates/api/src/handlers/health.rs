use axum::extract::State;
use tracing::debug;

use crate::{error::ApiError, AppState};

/// `GET /livez` — the process is up.
pub async fn livez() {
    debug!("service is live");
}

/// `GET /healthz` — the database answers.
pub async fn healthz(State(state): State<AppState>) -> Result<(), ApiError> {
    db::pool::ping(&state.pool).await?;
    debug!("service is healthy");
    Ok(())
}
