//! Series Projector
//!
//! Chart data: one (date, confirmed, deaths) point per record.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dataset::{Field, Record};

/// A single chart point
///
/// Missing or invalid values stay as markers and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: Field<NaiveDate>,
    pub confirmed: Field<u64>,
    pub deaths: Field<u64>,
}

impl From<&Record> for SeriesPoint {
    fn from(record: &Record) -> Self {
        Self {
            date: record.date.clone(),
            confirmed: record.confirmed.clone(),
            deaths: record.deaths.clone(),
        }
    }
}

/// Ordered chart points for one region
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series(Vec<SeriesPoint>);

impl Series {
    pub fn points(&self) -> &[SeriesPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Project records to chart points, preserving input order
pub fn to_series(records: &[&Record]) -> Series {
    Series(records.iter().map(|r| SeriesPoint::from(*r)).collect())
}
