//! Active filter state and the AND predicate over records

use std::collections::BTreeSet;

use crate::record::Record;

/// Set of labels the user currently has checked
///
/// Order is irrelevant; iteration is sorted for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilters {
    labels: BTreeSet<String>,
}

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `label`, returning whether it is now active
    pub fn toggle(&mut self, label: &str) -> bool {
        if self.labels.remove(label) {
            false
        } else {
            self.labels.insert(label.to_string());
            true
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Whether `record` carries every active label
    pub fn accepts(&self, record: &Record) -> bool {
        self.labels.iter().all(|label| record.has_tag(label))
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveFilters {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Records carrying all active labels, in their original order
///
/// With no active labels every record matches.
pub fn matching<'a>(records: &'a [Record], active: &ActiveFilters) -> Vec<&'a Record> {
    records.iter().filter(|r| active.accepts(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_records;

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.thumbnail_id.clone()).collect()
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut active = ActiveFilters::new();
        assert!(active.toggle("Snow"));
        assert!(active.contains("Snow"));
        assert!(!active.toggle("Snow"));
        assert!(active.is_empty());
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let records = parse_records("a,1,Snow\nb,2,Cavern\nc,3");
        let matched = matching(&records, &ActiveFilters::new());
        assert_eq!(ids(&matched), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_all_labels_required() {
        let records = parse_records("a,1,Snow\nb,2,Snow,,Tree");

        let mut active = ActiveFilters::new();
        active.toggle("Snow");
        assert_eq!(ids(&matching(&records, &active)), vec!["a", "b"]);

        active.toggle("Tree");
        assert_eq!(ids(&matching(&records, &active)), vec!["b"]);
    }

    #[test]
    fn test_no_match_gives_empty() {
        let records = parse_records("a,1,Snow\nb,2,Cavern");
        let active: ActiveFilters = ["Snow", "Cavern"].into_iter().collect();
        assert!(matching(&records, &active).is_empty());
    }

    #[test]
    fn test_matches_preserve_order() {
        let records = parse_records("z,1,Tree\ny,2,Bush\nx,3,Tree\nw,4,Tree,,Bush");
        let active: ActiveFilters = ["Tree"].into_iter().collect();
        assert_eq!(ids(&matching(&records, &active)), vec!["z", "x", "w"]);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let active: ActiveFilters = ["Tree", "Bush", "3"].into_iter().collect();
        assert_eq!(active.iter().collect::<Vec<_>>(), vec!["3", "Bush", "Tree"]);
        assert_eq!(active.len(), 3);
    }
}
