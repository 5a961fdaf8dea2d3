//! State Filter

use crate::dataset::{Dataset, Record};

/// Every record whose region key equals `key`, in dataset order
///
/// Returns an empty vector when nothing matches.
pub fn filter_by_region<'a>(dataset: &'a Dataset, key: &str) -> Vec<&'a Record> {
    dataset
        .records()
        .iter()
        .filter(|r| r.belongs_to(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 4, d).unwrap()
    }

    fn interleaved() -> Dataset {
        Dataset::from_records(vec![
            Record::new("SP", day(1)).confirmed(1),
            Record::new("RJ", day(1)).confirmed(2),
            Record::new("SP", day(2)).confirmed(3),
            Record::new("MG", day(1)).confirmed(4),
            Record::new("SP", day(3)).confirmed(5),
        ])
    }

    #[test]
    fn test_filter_soundness_and_completeness() {
        let dataset = interleaved();

        for key in ["SP", "RJ", "MG"] {
            let filtered = filter_by_region(&dataset, key);
            let expected = dataset.records().iter().filter(|r| r.state == key).count();

            assert!(filtered.iter().all(|r| r.state == key));
            assert_eq!(filtered.len(), expected);
        }
    }

    #[test]
    fn test_filter_preserves_order() {
        let dataset = interleaved();
        let filtered = filter_by_region(&dataset, "SP");

        let confirmed: Vec<u64> = filtered
            .iter()
            .filter_map(|r| r.confirmed.value().copied())
            .collect();
        assert_eq!(confirmed, vec![1, 3, 5]);
    }

    #[test]
    fn test_filter_no_match() {
        let dataset = interleaved();
        assert!(filter_by_region(&dataset, "BA").is_empty());
        assert!(filter_by_region(&dataset, "").is_empty());
        assert!(filter_by_region(&Dataset::default(), "SP").is_empty());
    }
}
