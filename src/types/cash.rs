//! In-flight cash bundles
//!
//! A [`CashBundle`] is the owned container for cash that is currently held by
//! the payment flow but not yet committed anywhere: units the user has
//! inserted but that are not finalized, or computed change that has not been
//! handed over yet.
//!
//! Bundles move by ownership transfer. Merging into the reserve and handing
//! back to the user both consume the bundle, so a reconciled bundle cannot be
//! accidentally reused and cash cannot silently vanish or double-count.

use super::denomination::{Amount, Denomination, UnitCount};
use std::collections::BTreeMap;

/// Owned mapping of denomination to unit count
///
/// Backed by a `BTreeMap` so iteration order is deterministic for display
/// and report output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CashBundle {
    units: BTreeMap<Denomination, UnitCount>,
}

impl CashBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        CashBundle {
            units: BTreeMap::new(),
        }
    }

    /// Add `count` units of `denomination` to the bundle
    ///
    /// Adding zero units is a no-op and does not create an entry.
    pub fn add(&mut self, denomination: Denomination, count: UnitCount) {
        if count > 0 {
            *self.units.entry(denomination).or_insert(0) += count;
        }
    }

    /// Number of units of one denomination held in the bundle
    pub fn count_of(&self, denomination: Denomination) -> UnitCount {
        self.units.get(&denomination).copied().unwrap_or(0)
    }

    /// Total monetary value of the bundle
    pub fn total_value(&self) -> Amount {
        self.units
            .iter()
            .map(|(d, &count)| d.face_value() * Amount::from(count))
            .sum()
    }

    /// True if the bundle holds no units at all
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Consume another bundle, folding its units into this one
    pub fn merge(&mut self, other: CashBundle) {
        for (denomination, count) in other.units {
            self.add(denomination, count);
        }
    }

    /// Iterate over held entries in descending face-value order
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, UnitCount)> + '_ {
        Denomination::DESCENDING
            .into_iter()
            .filter_map(|d| self.units.get(&d).map(|&count| (d, count)))
    }

    /// Consume the bundle, yielding its entries for final disposal
    ///
    /// This is the reconciliation hand-off: the caller either feeds the
    /// entries into the reserve or reports them as returned to the user.
    pub fn into_units(self) -> impl Iterator<Item = (Denomination, UnitCount)> {
        self.units.into_iter()
    }
}

impl FromIterator<(Denomination, UnitCount)> for CashBundle {
    fn from_iter<I: IntoIterator<Item = (Denomination, UnitCount)>>(iter: I) -> Self {
        let mut bundle = CashBundle::new();
        for (denomination, count) in iter {
            bundle.add(denomination, count);
        }
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bundle_is_empty() {
        let bundle = CashBundle::new();
        assert!(bundle.is_empty());
        assert_eq!(bundle.total_value(), 0);
    }

    #[test]
    fn test_add_accumulates_counts() {
        let mut bundle = CashBundle::new();
        bundle.add(Denomination::Coin100, 3);
        bundle.add(Denomination::Coin100, 2);

        assert_eq!(bundle.count_of(Denomination::Coin100), 5);
        assert_eq!(bundle.total_value(), 500);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut bundle = CashBundle::new();
        bundle.add(Denomination::Bill1000, 0);

        assert!(bundle.is_empty());
        assert_eq!(bundle.count_of(Denomination::Bill1000), 0);
    }

    #[test]
    fn test_total_value_weights_by_face_value() {
        let bundle: CashBundle = [
            (Denomination::Bill5000, 1),
            (Denomination::Bill1000, 2),
            (Denomination::Coin500, 1),
        ]
        .into_iter()
        .collect();

        assert_eq!(bundle.total_value(), 5000 + 2000 + 500);
    }

    #[test]
    fn test_merge_consumes_and_folds() {
        let mut kept: CashBundle = [(Denomination::Coin500, 2)].into_iter().collect();
        let incoming: CashBundle = [
            (Denomination::Coin500, 1),
            (Denomination::Coin100, 4),
        ]
        .into_iter()
        .collect();

        kept.merge(incoming);

        assert_eq!(kept.count_of(Denomination::Coin500), 3);
        assert_eq!(kept.count_of(Denomination::Coin100), 4);
        assert_eq!(kept.total_value(), 1900);
    }

    #[test]
    fn test_iter_is_descending_by_face_value() {
        let bundle: CashBundle = [
            (Denomination::Coin100, 1),
            (Denomination::Bill10000, 1),
            (Denomination::Coin500, 1),
        ]
        .into_iter()
        .collect();

        let order: Vec<Denomination> = bundle.iter().map(|(d, _)| d).collect();
        assert_eq!(
            order,
            vec![
                Denomination::Bill10000,
                Denomination::Coin500,
                Denomination::Coin100
            ]
        );
    }
}
