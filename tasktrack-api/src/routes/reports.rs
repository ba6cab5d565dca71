/// Reporting endpoints
///
/// # Endpoints
///
/// - `GET /api/reports/summary` - Aggregate counts over the actor's
///   visible task set
///
/// Members get aggregates over their own assigned tasks only; admins and
/// managers see everything. Read-only.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use tasktrack_shared::{
    auth::{
        actor::Actor,
        policy::{self, Action},
    },
    reports::{self, Summary},
};

/// Summary report handler
///
/// Returns counts by status, by priority, by category (uncategorized tasks
/// under the `"uncategorized"` label), and by (category, status).
pub async fn summary(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<Summary>> {
    policy::require(actor.role, actor.id, Action::SummaryReport, None)?;

    let summary = reports::summary(&state.db, &actor).await?;
    Ok(Json(summary))
}
