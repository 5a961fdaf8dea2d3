//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::view::{SelectionView, Series, Snapshot};

// ============================================
// REGION DTOs
// ============================================

/// Region list for the dropdown
#[derive(Debug, Serialize)]
pub struct RegionsResponse {
    /// Region keys, sorted for display
    pub regions: Vec<String>,
    /// Initial selection (first region in source order)
    pub default: Option<String>,
}

// ============================================
// SELECTION DTOs
// ============================================

/// Selection-changed event
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    /// Newly selected region key
    pub region: String,
}

/// Chart and table data for one region
#[derive(Debug, Clone, Serialize)]
pub struct ViewResponse {
    /// Region key the view was computed for
    pub region: String,
    /// Chart title
    pub title: String,
    /// Chart points
    pub series: Series,
    /// Table rows, one per latest record
    pub snapshot: Snapshot,
}

impl ViewResponse {
    pub fn new(region: impl Into<String>, view: SelectionView) -> Self {
        let region = region.into();
        Self {
            title: format!("Covid19 Graph in {}", region),
            region,
            series: view.series,
            snapshot: view.snapshot,
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Loaded dataset summary
    pub dataset: DatasetHealth,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

/// Dataset counts reported by the health endpoint
#[derive(Debug, Serialize)]
pub struct DatasetHealth {
    pub records: usize,
    pub regions: usize,
    pub latest_records: usize,
}
