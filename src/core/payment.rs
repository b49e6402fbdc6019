//! Cash payment flow
//!
//! This module runs one end-to-end cash transaction: repeated insertion,
//! underpayment and overpayment handling, change settlement against the
//! [`ChangeReserve`], and rollback of inserted cash on every failure path.
//!
//! The flow is an explicit state machine:
//!
//! ```text
//! Collecting --cancel--------------------------> Cancelled (cash returned)
//!     |  ^
//!     |  +--invalid insertion (no-op) / continue
//!     |
//!     +-total >= price-> settle surplus -ok----> Completed (cash absorbed,
//!     |                      |                              change given)
//!     |                      +-infeasible-> InsufficientChange
//!     |                                        |          |
//!     |<--retry exact (cash returned)----------+          +-cancel-> Cancelled
//! ```
//!
//! Reconciliation invariant: the inserted bundle is merged into the reserve
//! or handed back to the user before any terminal or looping transition. No
//! path leaves cash in limbo, including a host-level port failure.

use crate::core::reserve::ChangeReserve;
use crate::core::traits::{CashPort, ContinueChoice, InsertEvent, RetryChoice};
use crate::types::{Amount, CashBundle, Denomination, UnitCount, VendError};
use std::mem;

/// Verdict of one payment flow run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Payment settled: inserted cash absorbed, change handed over
    Completed {
        /// Total value the user inserted
        tendered: Amount,
        /// Value of the change handed back (tendered minus price)
        change_value: Amount,
    },
    /// The user backed out; all inserted cash was returned
    Cancelled,
}

impl PaymentOutcome {
    /// True when the payment settled
    pub fn succeeded(&self) -> bool {
        matches!(self, PaymentOutcome::Completed { .. })
    }
}

/// States of the payment machine; `Cancelled` and `Completed` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowState {
    Collecting,
    InsufficientChange,
    Cancelled,
    Completed { tendered: Amount, change_value: Amount },
}

/// Ephemeral record of one payment attempt
///
/// Exclusively owns the inserted bundle until reconciliation. Invariant:
/// `inserted_total` always equals the weighted sum of the bundle.
struct PaymentAttempt {
    price: Amount,
    inserted_total: Amount,
    inserted: CashBundle,
}

impl PaymentAttempt {
    fn new(price: Amount) -> Self {
        PaymentAttempt {
            price,
            inserted_total: 0,
            inserted: CashBundle::new(),
        }
    }

    fn insert(&mut self, denomination: Denomination, count: UnitCount) {
        self.inserted_total += denomination.face_value() * Amount::from(count);
        self.inserted.add(denomination, count);
    }

    fn covers_price(&self) -> bool {
        self.inserted_total >= self.price
    }

    fn surplus(&self) -> Amount {
        self.inserted_total - self.price
    }

    /// Take the bundle out for reconciliation, resetting the running total
    fn take_inserted(&mut self) -> CashBundle {
        self.inserted_total = 0;
        mem::take(&mut self.inserted)
    }
}

/// Runs one cash transaction against a reserve through a port
///
/// One flow value is one transaction: `run` consumes it.
pub struct CashPaymentFlow<'a, P: CashPort> {
    reserve: &'a mut ChangeReserve,
    port: &'a mut P,
}

impl<'a, P: CashPort> CashPaymentFlow<'a, P> {
    pub fn new(reserve: &'a mut ChangeReserve, port: &'a mut P) -> Self {
        CashPaymentFlow { reserve, port }
    }

    /// Run the payment state machine for `price`
    ///
    /// # Returns
    ///
    /// * `Ok(PaymentOutcome::Completed { .. })` - the reserve has absorbed
    ///   the inserted cash and the change has been handed over.
    /// * `Ok(PaymentOutcome::Cancelled)` - all inserted cash has been
    ///   returned.
    ///
    /// # Errors
    ///
    /// Returns `Io` only if the input port itself fails; all inserted cash
    /// is returned through the output port before the error propagates.
    pub fn run(mut self, price: Amount) -> Result<PaymentOutcome, VendError> {
        let mut attempt = PaymentAttempt::new(price);
        let mut state = FlowState::Collecting;

        loop {
            state = match state {
                FlowState::Collecting => self.collect(&mut attempt)?,
                FlowState::InsufficientChange => self.resolve_shortfall(&mut attempt)?,
                FlowState::Cancelled => return Ok(PaymentOutcome::Cancelled),
                FlowState::Completed {
                    tendered,
                    change_value,
                } => {
                    return Ok(PaymentOutcome::Completed {
                        tendered,
                        change_value,
                    })
                }
            };
        }
    }

    /// One Collecting cycle: solicit an insertion and react to the total
    fn collect(&mut self, attempt: &mut PaymentAttempt) -> Result<FlowState, VendError> {
        let event = match self
            .port
            .request_insertion(attempt.inserted_total, attempt.price)
        {
            Ok(event) => event,
            Err(error) => return Err(self.abort(attempt, error)),
        };

        let (value, count) = match event {
            InsertEvent::Cancel => {
                self.return_inserted(attempt);
                return Ok(FlowState::Cancelled);
            }
            InsertEvent::Insert { value, count } => (value, count),
        };

        // Defensive re-validation of the raw input. A rejected insertion is
        // a no-op: the running total stays consistent with the bundle and
        // the state stays Collecting.
        let denomination = match Denomination::from_face_value(value) {
            Some(denomination) => denomination,
            None => {
                self.port
                    .insertion_rejected(&VendError::unknown_denomination(value));
                return Ok(FlowState::Collecting);
            }
        };
        if count == 0 {
            self.port.insertion_rejected(&VendError::invalid_count(count));
            return Ok(FlowState::Collecting);
        }

        attempt.insert(denomination, count);

        if !attempt.covers_price() {
            return match self
                .port
                .request_continue(attempt.inserted_total, attempt.price)
            {
                Ok(ContinueChoice::Continue) => Ok(FlowState::Collecting),
                Ok(ContinueChoice::Cancel) => {
                    self.return_inserted(attempt);
                    Ok(FlowState::Cancelled)
                }
                Err(error) => Err(self.abort(attempt, error)),
            };
        }

        self.settle(attempt)
    }

    /// Settle the surplus once the running total covers the price
    fn settle(&mut self, attempt: &mut PaymentAttempt) -> Result<FlowState, VendError> {
        let tendered = attempt.inserted_total;
        let change_value = attempt.surplus();

        match self.reserve.compute_and_commit_change(change_value) {
            Ok(change) => {
                // Inserted cash becomes machine stock, then the change
                // leaves through the output boundary.
                self.reserve.deposit_bundle(attempt.take_inserted());
                self.port.change_given(change);
                Ok(FlowState::Completed {
                    tendered,
                    change_value,
                })
            }
            Err(VendError::ChangeInfeasible { .. }) => Ok(FlowState::InsufficientChange),
            Err(error) => Err(self.abort(attempt, error)),
        }
    }

    /// InsufficientChange state: exactly two ways out, both return the cash
    fn resolve_shortfall(
        &mut self,
        attempt: &mut PaymentAttempt,
    ) -> Result<FlowState, VendError> {
        match self.port.request_retry() {
            Ok(RetryChoice::RetryExact) => {
                self.return_inserted(attempt);
                Ok(FlowState::Collecting)
            }
            Ok(RetryChoice::Cancel) => {
                self.return_inserted(attempt);
                Ok(FlowState::Cancelled)
            }
            Err(error) => Err(self.abort(attempt, error)),
        }
    }

    /// Hand every inserted unit back to the user
    fn return_inserted(&mut self, attempt: &mut PaymentAttempt) {
        let returned = attempt.take_inserted();
        if !returned.is_empty() {
            self.port.cash_returned(returned);
        }
    }

    /// Reconcile before letting a port failure escape
    fn abort(&mut self, attempt: &mut PaymentAttempt, error: VendError) -> VendError {
        self.return_inserted(attempt);
        error
    }
}
