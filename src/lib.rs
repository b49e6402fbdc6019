//! Vending Cash Engine Library
//! # Overview
//!
//! This library simulates a retail vending machine built around a
//! denomination-constrained cash settlement engine: a finite reserve of
//! currency units, deterministic greedy change computation against that
//! reserve, and a payment state machine that keeps the reserve and the
//! user's inserted cash consistent under every success, retry, and
//! cancellation path.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Denomination, CashBundle, Drink, etc.)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::reserve`] - Denomination stock and greedy change settlement
//!   - [`core::payment`] - The cash payment state machine
//!   - [`core::machine`] - Session controller (catalog, payments, inventory)
//!   - [`core::card`] - Probabilistic card authorization stub
//! - [`io`] - Port implementations (console, scripted) and report output
//!
//! # Payment States
//!
//! A cash payment moves through four states:
//!
//! - **Collecting**: soliciting insertions until the total covers the price
//! - **InsufficientChange**: the reserve cannot represent the surplus;
//!   the user picks retry-with-exact-cash or cancel
//! - **Cancelled**: terminal failure; all inserted cash already returned
//! - **Completed**: terminal success; inserted cash absorbed into the
//!   reserve and change already handed over
//!
//! # Invariants
//!
//! - Conservation: the reserve's total value equals its initial total plus
//!   net deposits minus net committed withdrawals.
//! - Reconciliation: inserted cash ends every payment either merged into
//!   the reserve or returned to the user, never in limbo.
//! - Change exactness: a committed change bundle sums to exactly the
//!   surplus, and an infeasible computation leaves stock untouched.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{
    CardReader, CashPaymentFlow, CashPort, ChangeReserve, PaymentOutcome, SaleRecord,
    SessionPort, VendingMachine,
};
pub use crate::io::{ConsolePort, ScriptedPort};
pub use crate::types::{
    Amount, CashBundle, Denomination, Drink, DrinkInfo, PaymentMethod, VendError,
};
