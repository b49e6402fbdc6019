//! Error types for the vending cash engine
//!
//! Every abnormal condition the engine can encounter is a variant here.
//! Almost all of them are recoverable by design:
//!
//! - **User input errors** (`UnknownDenomination`, `InvalidCount`) are
//!   handled by re-prompting; they never escape the payment flow.
//! - **`ChangeInfeasible`** drives the insufficient-change branch of the
//!   payment state machine, surfaced to the user as a retry/cancel choice.
//! - **`InsufficientStock`** / **`SoldOut`** are guard failures that leave
//!   state untouched.
//! - **`CardDeclined`** is a normal outcome of the card stub.
//! - **`Io`** is the only propagating kind: a host-level port or report
//!   failure. The payment flow reconciles all inserted cash before letting
//!   it escape.
//!
//! User cancellation is NOT an error; it is a normal outcome value.

use super::denomination::{Amount, Denomination, UnitCount};
use super::drink::Drink;
use thiserror::Error;

/// Main error type for the vending cash engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VendError {
    /// A raw face value outside the machine's fixed denomination set
    ///
    /// Recoverable: the insertion is a no-op and the user is re-prompted.
    #[error("Unknown denomination: {value}")]
    UnknownDenomination {
        /// The rejected face value
        value: Amount,
    },

    /// A non-positive unit count in an insertion
    ///
    /// Recoverable: the insertion is a no-op and the user is re-prompted.
    #[error("Invalid unit count: {count}")]
    InvalidCount {
        /// The rejected count
        count: UnitCount,
    },

    /// The reserve cannot represent this amount with current stock
    ///
    /// Produced by the greedy change computation. Recoverable: the payment
    /// flow offers retry-with-exact-cash or cancel.
    #[error("Cannot make change for {amount} with current reserve stock")]
    ChangeInfeasible {
        /// The amount that could not be represented
        amount: Amount,
    },

    /// A withdrawal asked for more units than the reserve holds
    ///
    /// Recoverable: the stock is left untouched.
    #[error("Insufficient stock of {denomination}: requested {requested}, available {available}")]
    InsufficientStock {
        /// The denomination that ran short
        denomination: Denomination,
        /// Units requested
        requested: UnitCount,
        /// Units actually in stock
        available: UnitCount,
    },

    /// The selected drink has no units left
    ///
    /// Recoverable: the selection is rejected and the menu repeats.
    #[error("{drink} is sold out")]
    SoldOut {
        /// The sold-out drink
        drink: Drink,
    },

    /// The card authorization stub declined the payment
    ///
    /// Recoverable: the purchase is abandoned and the menu repeats.
    #[error("Card payment of {amount} was declined")]
    CardDeclined {
        /// The declined amount
        amount: Amount,
    },

    /// Host-level I/O failure on a port or the report writer
    ///
    /// The only fatal kind. The payment flow returns all inserted cash
    /// before propagating it.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O failure
        message: String,
    },
}

impl From<std::io::Error> for VendError {
    fn from(error: std::io::Error) -> Self {
        VendError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for VendError {
    fn from(error: csv::Error) -> Self {
        VendError::Io {
            message: error.to_string(),
        }
    }
}

impl VendError {
    /// Create an UnknownDenomination error
    pub fn unknown_denomination(value: Amount) -> Self {
        VendError::UnknownDenomination { value }
    }

    /// Create an InvalidCount error
    pub fn invalid_count(count: UnitCount) -> Self {
        VendError::InvalidCount { count }
    }

    /// Create a ChangeInfeasible error
    pub fn change_infeasible(amount: Amount) -> Self {
        VendError::ChangeInfeasible { amount }
    }

    /// Create an InsufficientStock error
    pub fn insufficient_stock(
        denomination: Denomination,
        requested: UnitCount,
        available: UnitCount,
    ) -> Self {
        VendError::InsufficientStock {
            denomination,
            requested,
            available,
        }
    }

    /// Create a SoldOut error
    pub fn sold_out(drink: Drink) -> Self {
        VendError::SoldOut { drink }
    }

    /// Create a CardDeclined error
    pub fn card_declined(amount: Amount) -> Self {
        VendError::CardDeclined { amount }
    }

    /// True for the error kinds the engine recovers from locally
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, VendError::Io { .. })
    }
}
