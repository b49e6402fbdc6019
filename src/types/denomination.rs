//! Currency denominations recognized by the machine
//!
//! The machine handles a closed set of face values fixed at build time. All
//! mutating operations on the reserve and the payment flow validate raw face
//! values through this enum, so an out-of-set value can never reach the stock
//! maps as a key.
//!
//! Monetary amounts are whole minor units (`u64`); there are no fractional
//! amounts anywhere in this domain, so no decimal type is involved.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monetary amount in the machine's smallest currency unit
pub type Amount = u64;

/// Count of physical cash units (bills or coins)
pub type UnitCount = u32;

/// A face value the machine accepts and dispenses
///
/// Variants are declared in strictly descending face-value order; the greedy
/// change algorithm and all user-facing listings rely on [`Denomination::DESCENDING`]
/// preserving that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Denomination {
    /// 10000-unit bill
    Bill10000,
    /// 5000-unit bill
    Bill5000,
    /// 1000-unit bill
    Bill1000,
    /// 500-unit coin
    Coin500,
    /// 100-unit coin
    Coin100,
}

impl Denomination {
    /// Every denomination, sorted strictly descending by face value
    ///
    /// This is the evaluation order of the change algorithm. Do not reorder:
    /// feasible/infeasible outcomes are defined relative to this order.
    pub const DESCENDING: [Denomination; 5] = [
        Denomination::Bill10000,
        Denomination::Bill5000,
        Denomination::Bill1000,
        Denomination::Coin500,
        Denomination::Coin100,
    ];

    /// Face value of this denomination in minor units
    pub const fn face_value(self) -> Amount {
        match self {
            Denomination::Bill10000 => 10000,
            Denomination::Bill5000 => 5000,
            Denomination::Bill1000 => 1000,
            Denomination::Coin500 => 500,
            Denomination::Coin100 => 100,
        }
    }

    /// Membership check: map a raw face value to its denomination
    ///
    /// Returns `None` for any value outside the fixed set. This is the only
    /// way raw user input becomes a [`Denomination`], so every boundary call
    /// goes through an explicit membership check.
    pub fn from_face_value(value: Amount) -> Option<Denomination> {
        Denomination::DESCENDING
            .into_iter()
            .find(|d| d.face_value() == value)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face_value())
    }
}
