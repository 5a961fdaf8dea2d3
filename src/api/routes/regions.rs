//! Region Routes
//!
//! - GET /api/v1/regions - Region keys for the dropdown
//! - GET /api/v1/regions/:key - Chart and table data for one region

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{RegionsResponse, ViewResponse};
use crate::api::state::AppState;
use crate::view::on_selection_changed;

/// GET /api/v1/regions
pub async fn list_regions(State(state): State<Arc<AppState>>) -> Json<RegionsResponse> {
    let regions = state
        .dataset
        .sorted_region_keys()
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(RegionsResponse {
        regions,
        default: state.dataset.first_region().map(str::to_string),
    })
}

/// GET /api/v1/regions/:key
///
/// Unknown keys return 200 with an empty series and snapshot.
pub async fn region_view(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Json<ViewResponse> {
    let view = on_selection_changed(&state.dataset, &key);
    Json(ViewResponse::new(key, view))
}
