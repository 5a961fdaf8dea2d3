//! Snapshot Projector
//!
//! Table data for the latest-flagged record(s) of a region. Each latest
//! record becomes one row of (label, value) entries. The region key and
//! the internal identifiers (`state`, `is_last`, `city_ibge_code`) are
//! never projected. Entries follow the source column order.
//!
//! The latest flag comes from upstream and is not assumed unique: no
//! flagged record gives an empty snapshot, several give several rows.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dataset::{Field, Record};

/// Attributes never shown in a snapshot
pub const EXCLUDED_LABELS: [&str; 3] = ["state", "is_last", "city_ibge_code"];

/// A displayable table value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Date(NaiveDate),
    Count(u64),
    Rate(f64),
    /// Missing or unparseable upstream value
    Undefined,
}

impl From<&Field<NaiveDate>> for CellValue {
    fn from(field: &Field<NaiveDate>) -> Self {
        field.value().map_or(CellValue::Undefined, |d| CellValue::Date(*d))
    }
}

impl From<&Field<u64>> for CellValue {
    fn from(field: &Field<u64>) -> Self {
        field.value().map_or(CellValue::Undefined, |v| CellValue::Count(*v))
    }
}

impl From<&Field<f64>> for CellValue {
    fn from(field: &Field<f64>) -> Self {
        field.value().map_or(CellValue::Undefined, |v| CellValue::Rate(*v))
    }
}

/// One (label, value) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotEntry {
    pub label: &'static str,
    pub value: CellValue,
}

impl SnapshotEntry {
    fn new(label: &'static str, value: impl Into<CellValue>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Entries for a single latest record, in source column order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SnapshotRow(Vec<SnapshotEntry>);

impl SnapshotRow {
    /// Project `record` onto the retained source columns
    ///
    /// Excluded identifiers and columns with no `Record` attribute are
    /// skipped, as are auxiliary attributes the record does not carry.
    pub fn project(record: &Record, columns: &[String]) -> Self {
        SnapshotRow(
            columns
                .iter()
                .map(String::as_str)
                .filter(|column| !EXCLUDED_LABELS.contains(column))
                .filter_map(|column| entry_for(record, column))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.0
    }

    /// Look up an entry by label
    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.0.iter().find(|e| e.label == label).map(|e| &e.value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.label)
    }
}

fn entry_for(record: &Record, column: &str) -> Option<SnapshotEntry> {
    let entry = match column {
        "date" => SnapshotEntry::new("date", &record.date),
        "confirmed" => SnapshotEntry::new("confirmed", &record.confirmed),
        "deaths" => SnapshotEntry::new("deaths", &record.deaths),
        "order_for_place" => {
            SnapshotEntry::new("order_for_place", record.order_for_place.as_ref()?)
        }
        "estimated_population_2019" => SnapshotEntry::new(
            "estimated_population_2019",
            record.estimated_population_2019.as_ref()?,
        ),
        "estimated_population" => {
            SnapshotEntry::new("estimated_population", record.estimated_population.as_ref()?)
        }
        "confirmed_per_100k_inhabitants" => SnapshotEntry::new(
            "confirmed_per_100k_inhabitants",
            record.confirmed_per_100k_inhabitants.as_ref()?,
        ),
        "death_rate" => SnapshotEntry::new("death_rate", record.death_rate.as_ref()?),
        _ => return None,
    };
    Some(entry)
}

/// Table rows for the latest record(s) of a region
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot(Vec<SnapshotRow>);

impl Snapshot {
    pub fn rows(&self) -> &[SnapshotRow] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Project the latest-flagged records to table rows
///
/// `columns` is the dataset's retained column list and fixes the entry
/// order of every row.
pub fn to_snapshot(records: &[&Record], columns: &[String]) -> Snapshot {
    let rows: Vec<SnapshotRow> = records
        .iter()
        .filter(|r| r.is_last)
        .map(|r| SnapshotRow::project(r, columns))
        .collect();

    if rows.len() > 1 {
        tracing::warn!(
            region = %records[0].state,
            latest = rows.len(),
            "Region has more than one latest record"
        );
    }

    Snapshot(rows)
}
