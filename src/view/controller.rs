//! Selection Controller
//!
//! Recomputes the chart and table views whenever the selected region
//! changes. Pure: the result depends only on the dataset and the key.

use serde::Serialize;

use super::filter::filter_by_region;
use super::series::{to_series, Series};
use super::snapshot::{to_snapshot, Snapshot};
use crate::dataset::Dataset;

/// Derived views for one selection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionView {
    pub series: Series,
    pub snapshot: Snapshot,
}

/// Compute series and snapshot for `key`
///
/// An unknown key yields an empty view, never an error.
pub fn on_selection_changed(dataset: &Dataset, key: &str) -> SelectionView {
    let records = filter_by_region(dataset, key);

    if records.is_empty() {
        tracing::debug!(region = %key, "No records for selected region");
        return SelectionView::default();
    }

    tracing::debug!(region = %key, records = records.len(), "Recomputing views");

    SelectionView {
        series: to_series(&records),
        snapshot: to_snapshot(&records, dataset.columns()),
    }
}
