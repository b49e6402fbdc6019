//! Change reserve management
//!
//! This module provides the `ChangeReserve` struct which owns the count of
//! every denomination physically held by the machine and answers one
//! question: "can I make exactly this amount, and if so, do it."
//!
//! The reserve is responsible for:
//! - Accepting cash into stock (deposits and committed bundles)
//! - Guarded withdrawals with no partial effects
//! - Greedy change computation that mutates stock only on success
//! - Conservation: total held value equals the initial total plus net
//!   deposits minus net committed withdrawals

use crate::types::{Amount, CashBundle, Denomination, UnitCount, VendError};
use std::collections::HashMap;

/// Owns the denomination stock and settles change against it
///
/// Single-writer discipline: the reserve is only ever mutated through one
/// active transaction at a time, so no internal locking exists. If
/// concurrent transactions were ever allowed, `withdraw` and
/// `compute_and_commit_change` would need to become one atomic
/// check-and-mutate section.
///
/// # Examples
///
/// ```
/// use vending_cash_engine::core::ChangeReserve;
/// use vending_cash_engine::types::Denomination;
///
/// let mut reserve = ChangeReserve::with_stock([(Denomination::Coin500, 4)]);
/// let change = reserve.compute_and_commit_change(1000).unwrap();
///
/// assert_eq!(change.count_of(Denomination::Coin500), 2);
/// assert_eq!(reserve.stock_of(Denomination::Coin500), 2);
/// ```
pub struct ChangeReserve {
    /// Units in stock per denomination
    stock: HashMap<Denomination, UnitCount>,
}

impl ChangeReserve {
    /// Create a reserve with the given initial stock
    ///
    /// Entries may appear in any order; missing denominations start at zero.
    pub fn with_stock<I>(initial: I) -> Self
    where
        I: IntoIterator<Item = (Denomination, UnitCount)>,
    {
        let mut reserve = ChangeReserve {
            stock: HashMap::new(),
        };
        for (denomination, count) in initial {
            reserve.deposit(denomination, count);
        }
        reserve
    }

    /// Create a reserve with the standard opening float
    ///
    /// {10000: 5, 5000: 10, 1000: 20, 500: 50, 100: 100}
    pub fn default_float() -> Self {
        Self::with_stock([
            (Denomination::Bill10000, 5),
            (Denomination::Bill5000, 10),
            (Denomination::Bill1000, 20),
            (Denomination::Coin500, 50),
            (Denomination::Coin100, 100),
        ])
    }

    /// Accept `count` units of `denomination` into stock
    ///
    /// Count is expected to be at least 1 by caller contract; positivity of raw
    /// user input is enforced where it enters the payment flow. A zero
    /// count is a no-op rather than a panic.
    pub fn deposit(&mut self, denomination: Denomination, count: UnitCount) {
        if count > 0 {
            *self.stock.entry(denomination).or_insert(0) += count;
        }
    }

    /// Consume a bundle, merging every unit into stock
    ///
    /// This is the commit half of reconciliation: inserted cash becomes
    /// machine stock and the bundle ceases to exist.
    pub fn deposit_bundle(&mut self, bundle: CashBundle) {
        for (denomination, count) in bundle.into_units() {
            self.deposit(denomination, count);
        }
    }

    /// Remove `count` units of `denomination` from stock
    ///
    /// Pure guard: succeeds only if current stock covers the request, in
    /// which case stock is decremented. On failure the stock is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` if fewer than `count` units are held.
    pub fn withdraw(
        &mut self,
        denomination: Denomination,
        count: UnitCount,
    ) -> Result<(), VendError> {
        let available = self.stock_of(denomination);
        if available < count {
            return Err(VendError::insufficient_stock(
                denomination,
                count,
                available,
            ));
        }
        if let Some(held) = self.stock.get_mut(&denomination) {
            *held -= count;
        }
        Ok(())
    }

    /// Compute change for `amount` and, if feasible, commit it
    ///
    /// Greedy over denominations in strictly descending face order: for each
    /// denomination take `min(remaining / face, stock)` units. The planning
    /// pass is side-effect-free; stock is decremented only after the full
    /// amount is covered.
    ///
    /// This is deliberately a greedy, not an optimal, solver. It can report
    /// infeasible even when some other combination of denominations would
    /// cover the amount; that outcome is part of the observable contract
    /// and must not be "fixed" by trying alternate combinations.
    ///
    /// # Returns
    ///
    /// On success, a bundle whose weighted sum is exactly `amount` (empty
    /// for `amount == 0`), with stock decremented by the bundle's counts.
    ///
    /// # Errors
    ///
    /// Returns `ChangeInfeasible` with stock bit-for-bit unchanged when the
    /// greedy pass cannot cover `amount`.
    pub fn compute_and_commit_change(
        &mut self,
        amount: Amount,
    ) -> Result<CashBundle, VendError> {
        let mut remaining = amount;
        let mut plan = CashBundle::new();

        for denomination in Denomination::DESCENDING {
            if remaining == 0 {
                break;
            }
            let face = denomination.face_value();
            let wanted = remaining / face;
            let units = wanted.min(Amount::from(self.stock_of(denomination))) as UnitCount;
            if units > 0 {
                plan.add(denomination, units);
                remaining -= face * Amount::from(units);
            }
        }

        if remaining > 0 {
            // Evaluation only so far; stock untouched.
            return Err(VendError::change_infeasible(amount));
        }

        // Feasibility confirmed: commit the plan. Every count was capped by
        // available stock during planning, so these withdrawals cannot fail.
        for (denomination, count) in plan.iter() {
            self.withdraw(denomination, count)?;
        }

        Ok(plan)
    }

    /// Units currently in stock for one denomination
    pub fn stock_of(&self, denomination: Denomination) -> UnitCount {
        self.stock.get(&denomination).copied().unwrap_or(0)
    }

    /// Total monetary value held by the reserve
    ///
    /// Introspection only; no side effects.
    pub fn total_value(&self) -> Amount {
        self.stock
            .iter()
            .map(|(d, &count)| d.face_value() * Amount::from(count))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(reserve: &ChangeReserve) -> Vec<(Denomination, UnitCount)> {
        Denomination::DESCENDING
            .into_iter()
            .map(|d| (d, reserve.stock_of(d)))
            .collect()
    }

    #[test]
    fn test_with_stock_sets_counts() {
        let reserve = ChangeReserve::with_stock([
            (Denomination::Bill1000, 3),
            (Denomination::Coin100, 7),
        ]);

        assert_eq!(reserve.stock_of(Denomination::Bill1000), 3);
        assert_eq!(reserve.stock_of(Denomination::Coin100), 7);
        assert_eq!(reserve.stock_of(Denomination::Bill10000), 0);
        assert_eq!(reserve.total_value(), 3700);
    }

    #[test]
    fn test_default_float_total() {
        let reserve = ChangeReserve::default_float();
        // 5*10000 + 10*5000 + 20*1000 + 50*500 + 100*100
        assert_eq!(reserve.total_value(), 50000 + 50000 + 20000 + 25000 + 10000);
    }

    #[test]
    fn test_deposit_accumulates() {
        let mut reserve = ChangeReserve::with_stock([]);
        reserve.deposit(Denomination::Coin500, 2);
        reserve.deposit(Denomination::Coin500, 3);

        assert_eq!(reserve.stock_of(Denomination::Coin500), 5);
        assert_eq!(reserve.total_value(), 2500);
    }

    #[test]
    fn test_deposit_bundle_merges_all_units() {
        let mut reserve = ChangeReserve::with_stock([(Denomination::Coin100, 1)]);
        let bundle: CashBundle = [
            (Denomination::Bill1000, 2),
            (Denomination::Coin100, 4),
        ]
        .into_iter()
        .collect();

        reserve.deposit_bundle(bundle);

        assert_eq!(reserve.stock_of(Denomination::Bill1000), 2);
        assert_eq!(reserve.stock_of(Denomination::Coin100), 5);
    }

    #[test]
    fn test_withdraw_decrements_stock() {
        let mut reserve = ChangeReserve::with_stock([(Denomination::Coin500, 4)]);

        reserve.withdraw(Denomination::Coin500, 3).unwrap();

        assert_eq!(reserve.stock_of(Denomination::Coin500), 1);
    }

    #[test]
    fn test_withdraw_insufficient_stock_leaves_stock_untouched() {
        let mut reserve = ChangeReserve::with_stock([(Denomination::Coin500, 2)]);

        let result = reserve.withdraw(Denomination::Coin500, 3);

        assert_eq!(
            result,
            Err(VendError::insufficient_stock(Denomination::Coin500, 3, 2))
        );
        assert_eq!(reserve.stock_of(Denomination::Coin500), 2);
    }

    #[test]
    fn test_withdraw_from_empty_denomination_fails() {
        let mut reserve = ChangeReserve::with_stock([]);

        let result = reserve.withdraw(Denomination::Bill10000, 1);

        assert!(matches!(
            result,
            Err(VendError::InsufficientStock { .. })
        ));
    }

    #[test]
    fn test_change_zero_amount_is_empty_bundle() {
        let mut reserve = ChangeReserve::default_float();
        let before = reserve.total_value();

        let change = reserve.compute_and_commit_change(0).unwrap();

        assert!(change.is_empty());
        assert_eq!(reserve.total_value(), before);
    }

    #[test]
    fn test_change_uses_descending_greedy_with_stock_caps() {
        // Surplus scenario: 8900 against {5000:0, 1000:5, 500:10, 100:20}.
        // 1000x5 = 5000, then 500x7 = 3500, then 100x4 = 400.
        let mut reserve = ChangeReserve::with_stock([
            (Denomination::Bill1000, 5),
            (Denomination::Coin500, 10),
            (Denomination::Coin100, 20),
        ]);

        let change = reserve.compute_and_commit_change(8900).unwrap();

        assert_eq!(change.count_of(Denomination::Bill1000), 5);
        assert_eq!(change.count_of(Denomination::Coin500), 7);
        assert_eq!(change.count_of(Denomination::Coin100), 4);
        assert_eq!(change.total_value(), 8900);

        // Stock decremented exactly by the bundle counts.
        assert_eq!(reserve.stock_of(Denomination::Bill1000), 0);
        assert_eq!(reserve.stock_of(Denomination::Coin500), 3);
        assert_eq!(reserve.stock_of(Denomination::Coin100), 16);
    }

    #[test]
    fn test_change_prefers_largest_denomination_first() {
        let mut reserve = ChangeReserve::default_float();

        let change = reserve.compute_and_commit_change(16600).unwrap();

        assert_eq!(change.count_of(Denomination::Bill10000), 1);
        assert_eq!(change.count_of(Denomination::Bill5000), 1);
        assert_eq!(change.count_of(Denomination::Bill1000), 1);
        assert_eq!(change.count_of(Denomination::Coin500), 1);
        assert_eq!(change.count_of(Denomination::Coin100), 1);
    }

    #[test]
    fn test_infeasible_change_reports_error_without_mutation() {
        let mut reserve = ChangeReserve::with_stock([
            (Denomination::Coin500, 1),
            (Denomination::Coin100, 3),
        ]);
        let before = snapshot(&reserve);

        // 900 needs 500 + 100x4 but only three 100s exist.
        let result = reserve.compute_and_commit_change(900);

        assert_eq!(result, Err(VendError::change_infeasible(900)));
        assert_eq!(snapshot(&reserve), before);
    }

    #[test]
    fn test_amount_below_smallest_coin_is_infeasible() {
        let mut reserve = ChangeReserve::default_float();
        let before = snapshot(&reserve);

        let result = reserve.compute_and_commit_change(50);

        assert_eq!(result, Err(VendError::change_infeasible(50)));
        assert_eq!(snapshot(&reserve), before);
    }

    #[test]
    fn test_greedy_shortfall_is_not_repaired() {
        // The greedy pass commits to the largest denominations it can take
        // and never backtracks. With {500:1, 100:0}, 600 leaves a remainder
        // of 100 after the single 500 and must be reported infeasible, not
        // re-solved some other way.
        let mut reserve = ChangeReserve::with_stock([(Denomination::Coin500, 1)]);
        let before = snapshot(&reserve);

        let result = reserve.compute_and_commit_change(600);

        assert_eq!(result, Err(VendError::change_infeasible(600)));
        assert_eq!(snapshot(&reserve), before);
    }

    #[test]
    fn test_conservation_across_operation_sequence() {
        let mut reserve = ChangeReserve::default_float();
        let initial = reserve.total_value();

        reserve.deposit(Denomination::Bill10000, 1); // +10000
        let change = reserve.compute_and_commit_change(8900).unwrap(); // -8900
        reserve.withdraw(Denomination::Coin100, 2).unwrap(); // -200
        let bundle: CashBundle = [(Denomination::Coin500, 4)].into_iter().collect();
        reserve.deposit_bundle(bundle); // +2000

        assert_eq!(change.total_value(), 8900);
        assert_eq!(
            reserve.total_value(),
            initial + 10000 - 8900 - 200 + 2000
        );
    }

    #[test]
    fn test_failed_operations_do_not_affect_conservation() {
        let mut reserve = ChangeReserve::with_stock([(Denomination::Coin100, 2)]);
        let before = reserve.total_value();

        assert!(reserve.withdraw(Denomination::Coin100, 5).is_err());
        assert!(reserve.compute_and_commit_change(1000).is_err());

        assert_eq!(reserve.total_value(), before);
    }
}
