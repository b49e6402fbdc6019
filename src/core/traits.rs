//! Port traits for the interactive boundaries
//!
//! The engine never touches stdin or stdout directly. It talks to two trait
//! seams so console and scripted implementations can be used
//! interchangeably:
//!
//! - [`CashPort`] - the boundary the payment flow suspends on: one
//!   denomination insertion or a binary choice per call, plus the
//!   presentation calls for change and returned cash.
//! - [`SessionPort`] - the menu-level boundary the session controller
//!   drives: drink selection, payment-method selection, notices.
//!
//! Every call is a synchronous request/response; the state machine suspends
//! only at these points and resumes deterministically, so no concurrent
//! mutation is possible in between.

use crate::types::{Amount, CashBundle, Drink, DrinkInfo, PaymentMethod, UnitCount, VendError};

/// One answer to an insertion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertEvent {
    /// The user fed `count` units of the face value `value` into the slot
    ///
    /// The value is raw: membership in the denomination set and count
    /// positivity are re-validated by the payment flow.
    Insert { value: Amount, count: UnitCount },
    /// The user pressed cancel instead of inserting
    Cancel,
}

/// Continue collecting or give up while still under the price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueChoice {
    Continue,
    Cancel,
}

/// The two ways out of the insufficient-change state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryChoice {
    /// Take all inserted cash back and start over with exact cash
    RetryExact,
    Cancel,
}

/// Input and presentation boundary of one cash payment
///
/// Request methods block until the user answers; an `Err` means the host
/// input source itself failed (closed stdin), not that the user answered
/// badly. Presentation methods are fire-and-forget: no engine state depends
/// on their outcome.
pub trait CashPort {
    /// Ask for one denomination + count insertion, or the cancel sentinel
    fn request_insertion(
        &mut self,
        inserted: Amount,
        price: Amount,
    ) -> Result<InsertEvent, VendError>;

    /// Ask whether to keep inserting while the total is below the price
    fn request_continue(
        &mut self,
        inserted: Amount,
        price: Amount,
    ) -> Result<ContinueChoice, VendError>;

    /// Ask how to resolve an insufficient-change situation
    fn request_retry(&mut self) -> Result<RetryChoice, VendError>;

    /// Report that an insertion was rejected and will be re-prompted
    fn insertion_rejected(&mut self, error: &VendError);

    /// Hand the computed change over to the user
    fn change_given(&mut self, change: CashBundle);

    /// Hand all previously inserted cash back to the user
    fn cash_returned(&mut self, returned: CashBundle);
}

/// Menu-level boundary of one vending session
pub trait SessionPort {
    /// Present the menu and ask for a drink; `None` ends the session
    fn select_drink(&mut self, menu: &[DrinkInfo]) -> Result<Option<Drink>, VendError>;

    /// Ask how to pay for the selected drink; `None` returns to the menu
    fn select_payment_method(
        &mut self,
        drink: Drink,
        price: Amount,
    ) -> Result<Option<PaymentMethod>, VendError>;

    /// Ask whether to buy another drink after a finished purchase
    fn another_purchase(&mut self) -> Result<bool, VendError>;

    /// Report that the selected drink is sold out
    fn sold_out(&mut self, drink: Drink);

    /// Report that the paid-for drink was dispensed
    fn dispensed(&mut self, drink: Drink);

    /// Report that the card stub declined the payment
    fn card_declined(&mut self, amount: Amount);
}
