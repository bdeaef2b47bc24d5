//! Filter vocabulary: which tags become checkboxes, and in what order

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Canonical priority list used when no `filter_order` is configured
// One row per group: biomes, tree counts, then objects
#[rustfmt::skip]
pub const DEFAULT_FILTER_ORDER: &[&str] = &[
    "Overworld", "Snow", "Cavern", "Big City",
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    "Tree", "Red Tree", "Trunk", "Grass", "Bush", "Flower", "Water", "Dirt",
    "Sign", "Stone", "Building", "Doorway", "Path", "Boundary", "Fence",
    "Hedge", "Boulder", "Rail", "Mushroom", "Void", "Baddy", "NPC", "Bug", "Other",
];

/// Ordered list of labels eligible to become filters
///
/// Labels are unique and non-empty; the first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FilterOrder {
    labels: Vec<String>,
}

impl FilterOrder {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let labels = labels
            .into_iter()
            .map(|s| s.into().trim().to_string())
            .filter(|s| !s.is_empty() && seen.insert(s.clone()))
            .collect();
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for FilterOrder {
    fn default() -> Self {
        Self::new(DEFAULT_FILTER_ORDER.iter().copied())
    }
}

impl From<Vec<String>> for FilterOrder {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl From<FilterOrder> for Vec<String> {
    fn from(order: FilterOrder) -> Self {
        order.labels
    }
}

fn all_tags(records: &[Record]) -> HashSet<&str> {
    records
        .iter()
        .flat_map(|r| r.tags.iter().map(String::as_str))
        .collect()
}

/// Labels of `order` that occur in at least one record, in canonical order
///
/// Tags missing from `order` never become filters.
pub fn vocabulary(records: &[Record], order: &FilterOrder) -> Vec<String> {
    if records.is_empty() {
        return Vec::new();
    }

    let present = all_tags(records);
    order
        .labels()
        .iter()
        .filter(|label| present.contains(label.as_str()))
        .cloned()
        .collect()
}

/// Tags found in the data that `order` does not list, sorted
pub fn unlisted_tags(records: &[Record], order: &FilterOrder) -> Vec<String> {
    let mut unlisted: Vec<String> = all_tags(records)
        .into_iter()
        .filter(|tag| !order.contains(tag))
        .map(str::to_string)
        .collect();
    unlisted.sort();
    unlisted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_records;

    #[test]
    fn test_vocabulary_follows_canonical_order() {
        let records = parse_records(
            "m1,l1,Cavern,2,Water\n\
             m2,l2,Overworld,7,Tree,Sign\n",
        );
        let vocab = vocabulary(&records, &FilterOrder::default());
        assert_eq!(vocab, vec!["Overworld", "Cavern", "2", "7", "Tree", "Water", "Sign"]);
    }

    #[test]
    fn test_unlisted_tags_excluded() {
        let records = parse_records("m1,l1,Overworld,3,Lava,Tree");
        let order = FilterOrder::default();

        let vocab = vocabulary(&records, &order);
        assert!(!vocab.contains(&"Lava".to_string()));
        assert_eq!(unlisted_tags(&records, &order), vec!["Lava"]);
    }

    #[test]
    fn test_empty_records_give_empty_vocabulary() {
        assert!(vocabulary(&[], &FilterOrder::default()).is_empty());
    }

    #[test]
    fn test_vocabulary_is_sublist_of_order() {
        let records = parse_records("a,b,Snow,9,Bug\nc,d,Big City,0,NPC,Other");
        let order = FilterOrder::default();
        let vocab = vocabulary(&records, &order);

        let mut positions = vocab
            .iter()
            .map(|l| order.labels().iter().position(|o| o == l).unwrap());
        let mut last = positions.next().unwrap();
        for p in positions {
            assert!(p > last);
            last = p;
        }
    }

    #[test]
    fn test_custom_order_deduplicates() {
        let order = FilterOrder::new(["Tree", " Snow ", "Tree", ""]);
        assert_eq!(order.labels(), &["Tree".to_string(), "Snow".to_string()]);

        let records = parse_records("m1,l1,Snow,,Tree");
        assert_eq!(vocabulary(&records, &order), vec!["Tree", "Snow"]);
    }

    #[test]
    fn test_default_order_has_digit_buckets() {
        let order = FilterOrder::default();
        for digit in 0..=9 {
            assert!(order.contains(&digit.to_string()));
        }
        assert_eq!(order.len(), DEFAULT_FILTER_ORDER.len());
    }
}
