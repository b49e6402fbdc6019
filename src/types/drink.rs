//! Drink catalog types
//!
//! The machine sells a closed set of drinks. Prices are whole multiples of
//! the smallest coin so every price is payable with the accepted
//! denominations.

use super::denomination::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Drinks the machine can stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Drink {
    Cola,
    Water,
    Coffee,
}

impl Drink {
    /// Every drink, in menu order
    pub const ALL: [Drink; 3] = [Drink::Cola, Drink::Water, Drink::Coffee];
}

impl fmt::Display for Drink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Drink::Cola => "Cola",
            Drink::Water => "Water",
            Drink::Coffee => "Coffee",
        };
        write!(f, "{}", name)
    }
}

/// How a purchase is paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
        };
        write!(f, "{}", name)
    }
}

/// Catalog entry: one drink with its price and remaining stock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkInfo {
    pub drink: Drink,
    /// Price in minor units; a whole multiple of the smallest coin
    pub price: Amount,
    /// Units remaining in the machine
    pub stock: u32,
}

impl DrinkInfo {
    pub fn new(drink: Drink, price: Amount, stock: u32) -> Self {
        DrinkInfo {
            drink,
            price,
            stock,
        }
    }

    /// True when no units remain
    pub fn sold_out(&self) -> bool {
        self.stock == 0
    }
}
