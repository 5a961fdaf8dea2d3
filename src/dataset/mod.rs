//! Dataset
//!
//! In-memory store for the COVID-19 case records of one session.
//!
//! - [`RawTable`]: header + string rows from the source layer
//! - [`Record`] and [`Field`]: the fixed, typed row shape
//! - [`Dataset`]: immutable, ordered collection built by [`Dataset::load`]

mod store;
mod types;

pub use store::{Dataset, DatasetStats, CORE_COLUMNS, DROPPED_COLUMNS};
pub use types::{parse_flag, Field, RawTable, Record, RECORD_COLUMNS};
