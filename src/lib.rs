//! # covidash
//!
//! Interactive COVID-19 dashboard for Brazil. Fetches the brasil.io case
//! dataset once, then serves a single page where picking a state redraws
//! a confirmed/deaths chart and a table of the state's latest record.
//!
//! ## Modules
//!
//! - [`dataset`]: typed records and the immutable in-memory store
//! - [`view`]: filter-and-project logic run on every selection change
//! - [`source`]: CSV fetch and decoding
//! - [`api`]: HTTP server with Axum
//! - [`websocket`]: selection events over WebSocket
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covidash::dataset::Dataset;
//! use covidash::source::decode_csv;
//! use covidash::view::on_selection_changed;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let csv = "date,state,confirmed,deaths,is_last\n2020-03-02,SP,15,1,True\n";
//!     let dataset = Dataset::load(decode_csv(csv.as_bytes())?);
//!
//!     let view = on_selection_changed(&dataset, "SP");
//!     println!("{} points, {} latest rows", view.series.len(), view.snapshot.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dataset;
pub mod source;
pub mod view;
pub mod websocket;

// Re-export top-level types for convenience
pub use dataset::{Dataset, DatasetStats, Field, RawTable, Record};

pub use view::{
    filter_by_region, on_selection_changed, to_series, to_snapshot, CellValue, SelectionView,
    Series, SeriesPoint, Snapshot, SnapshotEntry, SnapshotRow,
};

pub use source::{DatasetSource, SourceError, SourceResult};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use websocket::{websocket_handler, ClientMessage, ServerMessage};

pub use config::{Config, ConfigError, LoggingConfig, SourceConfig};
