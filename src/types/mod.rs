//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `denomination`: the fixed denomination set and money aliases
//! - `cash`: in-flight cash bundles
//! - `drink`: drink catalog types
//! - `error`: error types for the vending engine

pub mod cash;
pub mod denomination;
pub mod drink;
pub mod error;

pub use cash::CashBundle;
pub use denomination::{Amount, Denomination, UnitCount};
pub use drink::{Drink, DrinkInfo, PaymentMethod};
pub use error::VendError;
