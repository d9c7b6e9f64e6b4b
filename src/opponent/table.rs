//! Learned action values.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use super::fingerprint::Fingerprint;

/// Fingerprint → pit → value. Missing entries read as 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QTable {
    values: FxHashMap<Fingerprint, FxHashMap<usize, f64>>,
}

impl QTable {
    /// Empty table; every value reads as 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Learned value, 0 when unseen.
    #[must_use]
    pub fn value(&self, fp: &Fingerprint, pit: usize) -> f64 {
        self.values
            .get(fp)
            .and_then(|actions| actions.get(&pit))
            .copied()
            .unwrap_or(0.0)
    }

    /// Best value recorded for a fingerprint, counting unvisited actions as 0.
    #[must_use]
    pub fn max_value(&self, fp: &Fingerprint) -> f64 {
        self.values
            .get(fp)
            .map_or(0.0, |actions| actions.values().copied().fold(0.0, f64::max))
    }

    /// Highest-valued pit among `candidates`; ties go to the first one.
    #[must_use]
    pub fn best(&self, fp: &Fingerprint, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &pit in candidates {
            let value = self.value(fp, pit);
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((pit, value)),
            }
        }
        best.map(|(pit, _)| pit)
    }

    /// Move `Q(fp, pit)` toward `target` by `alpha`. Returns the new value.
    pub fn update(&mut self, fp: &Fingerprint, pit: usize, target: f64, alpha: f64) -> f64 {
        let entry = self
            .values
            .entry(fp.clone())
            .or_default()
            .entry(pit)
            .or_insert(0.0);
        *entry += alpha * (target - *entry);
        *entry
    }

    /// Number of fingerprints seen.
    /// Distinct fingerprints seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True before the first update.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total (fingerprint, pit) entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.values.values().map(|actions| actions.len()).sum()
    }

    /// Copy into sorted maps for serialization.
    #[must_use]
    pub fn to_sorted(&self) -> BTreeMap<String, BTreeMap<usize, f64>> {
        self.values
            .iter()
            .map(|(fp, actions)| {
                let sorted = actions.iter().map(|(&pit, &v)| (pit, v)).collect();
                (fp.as_str().to_owned(), sorted)
            })
            .collect()
    }

    /// Build a table from sorted maps. No validation.
    #[must_use]
    pub fn from_sorted(sorted: &BTreeMap<String, BTreeMap<usize, f64>>) -> Self {
        let values = sorted
            .iter()
            .map(|(key, actions)| {
                let actions = actions.iter().map(|(&pit, &v)| (pit, v)).collect();
                (Fingerprint::from_raw(key.as_str()), actions)
            })
            .collect();
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(key: &str) -> Fingerprint {
        Fingerprint::from_raw(key)
    }

    #[test]
    fn test_unseen_values_are_zero() {
        let table = QTable::new();
        assert_eq!(table.value(&fp("a"), 3), 0.0);
        assert_eq!(table.max_value(&fp("a")), 0.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_update_blends_toward_target() {
        let mut table = QTable::new();
        assert!((table.update(&fp("a"), 8, 10.0, 0.1) - 1.0).abs() < 1e-12);
        assert!((table.update(&fp("a"), 8, 10.0, 0.1) - 1.9).abs() < 1e-12);
        assert_eq!(table.len(), 1);
        assert_eq!(table.entry_count(), 1);
    }

    #[test]
    fn test_max_value_counts_implicit_zero() {
        let mut table = QTable::new();
        table.update(&fp("a"), 7, -10.0, 0.5);
        assert_eq!(table.max_value(&fp("a")), 0.0);

        table.update(&fp("a"), 9, 4.0, 0.5);
        assert_eq!(table.max_value(&fp("a")), 2.0);
    }

    #[test]
    fn test_best_breaks_ties_by_order() {
        let mut table = QTable::new();
        assert_eq!(table.best(&fp("a"), &[8, 9, 10]), Some(8));

        table.update(&fp("a"), 10, 5.0, 1.0);
        assert_eq!(table.best(&fp("a"), &[8, 9, 10]), Some(10));

        table.update(&fp("a"), 9, 5.0, 1.0);
        assert_eq!(table.best(&fp("a"), &[8, 9, 10]), Some(9));

        // Negative values lose to unseen ones.
        table.update(&fp("b"), 7, -1.0, 1.0);
        assert_eq!(table.best(&fp("b"), &[7, 11]), Some(11));
        assert_eq!(table.best(&fp("b"), &[]), None);
    }

    #[test]
    fn test_sorted_round_trip() {
        let mut table = QTable::new();
        table.update(&fp("z"), 12, 3.5, 1.0);
        table.update(&fp("a"), 7, -2.0, 1.0);
        table.update(&fp("a"), 8, 1.25, 1.0);

        let sorted = table.to_sorted();
        assert_eq!(sorted.keys().collect::<Vec<_>>(), vec!["a", "z"]);
        assert_eq!(QTable::from_sorted(&sorted), table);
    }
}
