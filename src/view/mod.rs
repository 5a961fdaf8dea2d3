//! Views
//!
//! Filter-and-project logic behind the dashboard. Given the loaded
//! [`Dataset`](crate::dataset::Dataset) and a region key:
//!
//! - [`filter_by_region`]: the region's records, dataset order
//! - [`to_series`]: chart points (date, confirmed, deaths)
//! - [`to_snapshot`]: table rows for the latest-flagged record(s)
//! - [`on_selection_changed`]: both of the above for a new selection
//!
//! Everything here is synchronous and side-effect free apart from logging.

mod controller;
mod filter;
mod series;
mod snapshot;

pub use controller::{on_selection_changed, SelectionView};
pub use filter::filter_by_region;
pub use series::{to_series, Series, SeriesPoint};
pub use snapshot::{to_snapshot, CellValue, Snapshot, SnapshotEntry, SnapshotRow, EXCLUDED_LABELS};
