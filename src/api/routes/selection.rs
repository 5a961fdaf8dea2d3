//! Selection Routes
//!
//! - POST /api/v1/selection - Selection-changed event, answered with the new view

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{SelectionRequest, ViewResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::view::on_selection_changed;

/// POST /api/v1/selection
pub async fn select_region(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SelectionRequest>, JsonRejection>,
) -> ApiResult<Json<ViewResponse>> {
    let Json(req) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    tracing::info!(region = %req.region, "Selection changed");

    let view = on_selection_changed(&state.dataset, &req.region);
    Ok(Json(ViewResponse::new(req.region, view)))
}
