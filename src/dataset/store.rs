//! Dataset Store
//!
//! Holds the loaded records in memory. A `Dataset` is built once from a
//! `RawTable` and never mutated afterwards; share it behind an `Arc`.

use std::collections::HashSet;
use std::fmt;

use super::types::{parse_flag, Field, RawTable, Record, RECORD_COLUMNS};

/// Administrative columns removed on load
pub const DROPPED_COLUMNS: [&str; 2] = ["city", "place_type"];

/// Columns every dataset is expected to carry
pub const CORE_COLUMNS: [&str; 5] = ["date", "state", "confirmed", "deaths", "is_last"];

/// Immutable, ordered collection of records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

/// Position of each known column in the source header
#[derive(Debug, Default)]
struct ColumnMap {
    date: Option<usize>,
    state: Option<usize>,
    confirmed: Option<usize>,
    deaths: Option<usize>,
    order_for_place: Option<usize>,
    is_last: Option<usize>,
    estimated_population_2019: Option<usize>,
    estimated_population: Option<usize>,
    city_ibge_code: Option<usize>,
    confirmed_per_100k_inhabitants: Option<usize>,
    death_rate: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Self {
        let mut map = ColumnMap::default();

        for (idx, header) in headers.iter().enumerate() {
            let slot = match header.trim() {
                "date" => &mut map.date,
                "state" => &mut map.state,
                "confirmed" => &mut map.confirmed,
                "deaths" => &mut map.deaths,
                "order_for_place" => &mut map.order_for_place,
                "is_last" => &mut map.is_last,
                "estimated_population_2019" => &mut map.estimated_population_2019,
                "estimated_population" => &mut map.estimated_population,
                "city_ibge_code" => &mut map.city_ibge_code,
                "confirmed_per_100k_inhabitants" => &mut map.confirmed_per_100k_inhabitants,
                "death_rate" => &mut map.death_rate,
                other => {
                    if !DROPPED_COLUMNS.contains(&other) {
                        tracing::debug!(column = %other, "Ignoring unknown column");
                    }
                    continue;
                }
            };
            // First occurrence wins for duplicated headers
            slot.get_or_insert(idx);
        }

        map
    }

    fn build(&self, row: &[String]) -> Record {
        let cell = |idx: Option<usize>| cell_at(row, idx);
        let aux_count = |idx: Option<usize>| idx.map(|_| Field::<u64>::parse(cell(idx)));
        let aux_rate = |idx: Option<usize>| idx.map(|_| Field::<f64>::parse(cell(idx)));

        Record {
            date: Field::parse_date(cell(self.date)),
            state: cell(self.state).trim().to_string(),
            confirmed: Field::parse(cell(self.confirmed)),
            deaths: Field::parse(cell(self.deaths)),
            order_for_place: aux_count(self.order_for_place),
            is_last: parse_flag(cell(self.is_last)),
            estimated_population_2019: aux_count(self.estimated_population_2019),
            estimated_population: aux_count(self.estimated_population),
            city_ibge_code: self
                .city_ibge_code
                .map(|_| cell(self.city_ibge_code).trim().to_string()),
            confirmed_per_100k_inhabitants: aux_rate(self.confirmed_per_100k_inhabitants),
            death_rate: aux_rate(self.death_rate),
        }
    }
}

/// Cell at `idx`, or "" when the column is unknown or the row is short
fn cell_at(row: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
}

impl Dataset {
    /// Build a dataset from raw CSV rows
    ///
    /// Drops the `city` and `place_type` columns and maps the rest onto
    /// `Record`. Never fails: bad numeric cells become `Field::Invalid`.
    pub fn load(raw: RawTable) -> Self {
        let map = ColumnMap::from_headers(&raw.headers);

        for required in CORE_COLUMNS {
            if !raw.headers.iter().any(|h| h.trim() == required) {
                tracing::warn!(column = %required, "Source is missing a core column");
            }
        }

        let mut seen = HashSet::new();
        let columns: Vec<String> = raw
            .headers
            .iter()
            .map(|h| h.trim())
            .filter(|h| !DROPPED_COLUMNS.contains(h) && seen.insert(*h))
            .map(str::to_string)
            .collect();

        let records: Vec<Record> = raw.rows.iter().map(|row| map.build(row)).collect();

        let invalid = records
            .iter()
            .filter(|r| {
                matches!(r.confirmed, Field::Invalid(_)) || matches!(r.deaths, Field::Invalid(_))
            })
            .count();
        if invalid > 0 {
            tracing::warn!(records = invalid, "Records with unparseable counts");
        }

        Self { columns, records }
    }

    /// Build a dataset directly from records, columns in declaration order
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            columns: RECORD_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records,
        }
    }

    /// Distinct region keys, in no particular order
    pub fn region_keys(&self) -> HashSet<&str> {
        self.records.iter().map(|r| r.state.as_str()).collect()
    }

    /// Region keys sorted for display
    pub fn sorted_region_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.region_keys().into_iter().collect();
        keys.sort_unstable();
        keys
    }

    /// First region key in source order, used as the initial selection
    pub fn first_region(&self) -> Option<&str> {
        self.records.first().map(|r| r.state.as_str())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Retained column names: source header order, dropped columns and
    /// repeated headers removed
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            records: self.records.len(),
            regions: self.region_keys().len(),
            latest_records: self.records.iter().filter(|r| r.is_last).count(),
        }
    }
}

/// Summary counts for logging and health checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetStats {
    pub records: usize,
    pub regions: usize,
    pub latest_records: usize,
}

impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records, {} regions, {} latest",
            self.records, self.regions, self.latest_records
        )
    }
}
