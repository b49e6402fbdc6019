//! Scripted port
//!
//! A port implementation driven by pre-queued answers, used by unit and
//! integration tests to run whole payments and sessions deterministically.
//! Everything the engine presents (change, returned cash, rejections,
//! notices) is recorded for assertions.
//!
//! Request queues that run dry behave like a closed input stream and yield
//! `VendError::Io`, with two deliberate exceptions: an exhausted drink
//! selection ends the session and an exhausted another-purchase question
//! answers no, so scripts only need to spell out the interesting part.

use crate::core::traits::{
    CashPort, ContinueChoice, InsertEvent, RetryChoice, SessionPort,
};
use crate::types::{Amount, CashBundle, Drink, DrinkInfo, PaymentMethod, UnitCount, VendError};
use std::collections::VecDeque;

/// Queue-driven port recording all presented output
#[derive(Debug, Default)]
pub struct ScriptedPort {
    insertions: VecDeque<InsertEvent>,
    continue_choices: VecDeque<ContinueChoice>,
    retry_choices: VecDeque<RetryChoice>,
    drink_selections: VecDeque<Option<Drink>>,
    method_selections: VecDeque<Option<PaymentMethod>>,
    another: VecDeque<bool>,

    /// Change bundles handed over, in order
    pub change_given: Vec<CashBundle>,
    /// Returned-cash bundles handed back, in order
    pub cash_returned: Vec<CashBundle>,
    /// Rejected insertions, in order
    pub rejected: Vec<VendError>,
    /// Drinks dispensed, in order
    pub dispensed: Vec<Drink>,
    /// Sold-out notices, in order
    pub sold_out_notices: Vec<Drink>,
    /// Declined card amounts, in order
    pub declined: Vec<Amount>,
}

impl ScriptedPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one insertion of `count` units of the face value `value`
    pub fn queue_insert(&mut self, value: Amount, count: UnitCount) {
        self.insertions
            .push_back(InsertEvent::Insert { value, count });
    }

    /// Queue a cancel answer to the next insertion request
    pub fn queue_cancel_insert(&mut self) {
        self.insertions.push_back(InsertEvent::Cancel);
    }

    pub fn queue_continue(&mut self, choice: ContinueChoice) {
        self.continue_choices.push_back(choice);
    }

    pub fn queue_retry(&mut self, choice: RetryChoice) {
        self.retry_choices.push_back(choice);
    }

    /// Queue a drink selection; `None` quits the session
    pub fn queue_drink(&mut self, drink: Option<Drink>) {
        self.drink_selections.push_back(drink);
    }

    /// Queue a payment-method selection; `None` backs out to the menu
    pub fn queue_method(&mut self, method: Option<PaymentMethod>) {
        self.method_selections.push_back(method);
    }

    pub fn queue_another(&mut self, again: bool) {
        self.another.push_back(again);
    }

    fn exhausted(what: &str) -> VendError {
        VendError::Io {
            message: format!("script exhausted: no {} queued", what),
        }
    }
}

impl CashPort for ScriptedPort {
    fn request_insertion(
        &mut self,
        _inserted: Amount,
        _price: Amount,
    ) -> Result<InsertEvent, VendError> {
        self.insertions
            .pop_front()
            .ok_or_else(|| Self::exhausted("insertion"))
    }

    fn request_continue(
        &mut self,
        _inserted: Amount,
        _price: Amount,
    ) -> Result<ContinueChoice, VendError> {
        self.continue_choices
            .pop_front()
            .ok_or_else(|| Self::exhausted("continue choice"))
    }

    fn request_retry(&mut self) -> Result<RetryChoice, VendError> {
        self.retry_choices
            .pop_front()
            .ok_or_else(|| Self::exhausted("retry choice"))
    }

    fn insertion_rejected(&mut self, error: &VendError) {
        self.rejected.push(error.clone());
    }

    fn change_given(&mut self, change: CashBundle) {
        self.change_given.push(change);
    }

    fn cash_returned(&mut self, returned: CashBundle) {
        self.cash_returned.push(returned);
    }
}

impl SessionPort for ScriptedPort {
    fn select_drink(&mut self, _menu: &[DrinkInfo]) -> Result<Option<Drink>, VendError> {
        Ok(self.drink_selections.pop_front().unwrap_or(None))
    }

    fn select_payment_method(
        &mut self,
        _drink: Drink,
        _price: Amount,
    ) -> Result<Option<PaymentMethod>, VendError> {
        self.method_selections
            .pop_front()
            .ok_or_else(|| Self::exhausted("payment method"))
    }

    fn another_purchase(&mut self) -> Result<bool, VendError> {
        Ok(self.another.pop_front().unwrap_or(false))
    }

    fn sold_out(&mut self, drink: Drink) {
        self.sold_out_notices.push(drink);
    }

    fn dispensed(&mut self, drink: Drink) {
        self.dispensed.push(drink);
    }

    fn card_declined(&mut self, amount: Amount) {
        self.declined.push(amount);
    }
}
