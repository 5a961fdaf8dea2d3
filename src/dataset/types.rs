//! Core data types for the dashboard dataset
//!
//! - `RawTable`: header and string cells as decoded from CSV
//! - `Field`: a parsed cell with explicit missing/invalid markers
//! - `Record`: one region/date observation with a fixed shape

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::str::FromStr;

/// Date formats accepted for the `date` column, tried in order
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%Y-%m-%dT%H:%M:%S"];

/// Tabular data as handed over by the source layer
///
/// All cells are kept as strings. Rows may be shorter or longer than
/// the header; the loader treats absent cells as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names in source order
    pub headers: Vec<String>,
    /// Data rows in source order
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }
}

/// A single parsed cell
///
/// Unparseable values are carried as `Invalid` with the original text,
/// never coerced to zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Parsed value
    Value(T),
    /// Empty cell
    Missing,
    /// Cell text that failed to parse
    Invalid(String),
}

impl<T: FromStr> Field<T> {
    /// Parse a numeric cell
    pub fn parse(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() {
            return Field::Missing;
        }
        match cell.parse::<T>() {
            Ok(value) => Field::Value(value),
            Err(_) => Field::Invalid(cell.to_string()),
        }
    }
}

impl Field<NaiveDate> {
    /// Parse a date cell, accepting ISO 8601 and a few source-native formats
    pub fn parse_date(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() {
            return Field::Missing;
        }
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
            .map(Field::Value)
            .unwrap_or_else(|| Field::Invalid(cell.to_string()))
    }
}

impl<T> Field<T> {
    /// Get the parsed value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Missing and invalid cells serialize as `null` so charts render a gap
impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => v.serialize(serializer),
            Field::Missing | Field::Invalid(_) => serializer.serialize_none(),
        }
    }
}

/// Every `Record` attribute, in declaration order
pub const RECORD_COLUMNS: [&str; 11] = [
    "date",
    "state",
    "confirmed",
    "deaths",
    "order_for_place",
    "is_last",
    "estimated_population_2019",
    "estimated_population",
    "city_ibge_code",
    "confirmed_per_100k_inhabitants",
    "death_rate",
];

/// One row of the dataset: a single region/date observation
///
/// Attributes follow the brasil.io `caso` column order. Auxiliary
/// attributes are `None` when the column is absent from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: Field<NaiveDate>,
    /// Region key (state code, e.g. "SP")
    pub state: String,
    pub confirmed: Field<u64>,
    pub deaths: Field<u64>,
    pub order_for_place: Option<Field<u64>>,
    /// Marks the most recent record for its region
    pub is_last: bool,
    pub estimated_population_2019: Option<Field<u64>>,
    pub estimated_population: Option<Field<u64>>,
    /// Internal identifier, never displayed
    pub city_ibge_code: Option<String>,
    pub confirmed_per_100k_inhabitants: Option<Field<f64>>,
    pub death_rate: Option<Field<f64>>,
}

impl Record {
    /// Create a record with only the core attributes set
    pub fn new(state: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            date: Field::Value(date),
            state: state.into(),
            confirmed: Field::Missing,
            deaths: Field::Missing,
            order_for_place: None,
            is_last: false,
            estimated_population_2019: None,
            estimated_population: None,
            city_ibge_code: None,
            confirmed_per_100k_inhabitants: None,
            death_rate: None,
        }
    }

    /// Builder method: set confirmed cases
    pub fn confirmed(mut self, confirmed: u64) -> Self {
        self.confirmed = Field::Value(confirmed);
        self
    }

    /// Builder method: set deaths
    pub fn deaths(mut self, deaths: u64) -> Self {
        self.deaths = Field::Value(deaths);
        self
    }

    /// Builder method: set the latest flag
    pub fn latest(mut self, is_last: bool) -> Self {
        self.is_last = is_last;
        self
    }

    pub fn belongs_to(&self, key: &str) -> bool {
        self.state == key
    }
}

/// Parse a boolean-like cell. Anything other than a recognised "true" is false.
pub fn parse_flag(cell: &str) -> bool {
    matches!(cell.trim(), "true" | "True" | "TRUE" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parse_count() {
        assert_eq!(Field::<u64>::parse("15"), Field::Value(15));
        assert_eq!(Field::<u64>::parse(" 7 "), Field::Value(7));
        assert_eq!(Field::<u64>::parse(""), Field::Missing);
        assert_eq!(Field::<u64>::parse("n/a"), Field::Invalid("n/a".to_string()));
        // Counts are non-negative
        assert_eq!(Field::<u64>::parse("-3"), Field::Invalid("-3".to_string()));
    }

    #[test]
    fn test_field_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2020, 3, 2).unwrap();
        assert_eq!(Field::parse_date("2020-03-02"), Field::Value(expected));
        assert_eq!(Field::parse_date("02/03/2020"), Field::Value(expected));
        assert!(matches!(Field::parse_date("yesterday"), Field::Invalid(_)));
    }

    #[test]
    fn test_field_serializes_gaps_as_null() {
        let json = serde_json::to_string(&vec![
            Field::Value(3u64),
            Field::Missing,
            Field::Invalid("x".to_string()),
        ])
        .unwrap();
        assert_eq!(json, "[3,null,null]");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("True"));
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("False"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("yes"));
    }

    #[test]
    fn test_record_builder() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let record = Record::new("SP", date).confirmed(10).deaths(0).latest(true);

        assert!(record.belongs_to("SP"));
        assert!(!record.belongs_to("RJ"));
        assert_eq!(record.confirmed.value(), Some(&10));
        assert!(record.is_last);
        assert!(record.order_for_place.is_none());
    }
}
