//! Vending machine session controller
//!
//! Sequences whole purchases: menu presentation, drink selection, payment
//! dispatch (cash flow or card stub), inventory decrement, dispensing, and
//! the repeat-purchase prompt. All cash invariants live below this layer;
//! the controller only decides what to buy and how to pay.
//!
//! Recoverable conditions (sold-out drink, declined card, cancelled
//! payment) are reported and the menu repeats; the session keeps going.

use crate::core::card::CardReader;
use crate::core::payment::{CashPaymentFlow, PaymentOutcome};
use crate::core::reserve::ChangeReserve;
use crate::core::traits::{CashPort, SessionPort};
use crate::types::{Amount, Drink, DrinkInfo, PaymentMethod, VendError};
use serde::Serialize;

/// One completed sale, as recorded for the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRecord {
    pub drink: Drink,
    pub price: Amount,
    pub method: PaymentMethod,
    /// Cash value the user fed in; equals `price` for card payments
    pub tendered: Amount,
    /// Value of the change handed back; zero for card payments
    pub change: Amount,
}

/// The machine: catalog, cash reserve, card reader, and the sales log
pub struct VendingMachine {
    catalog: Vec<DrinkInfo>,
    reserve: ChangeReserve,
    card: CardReader,
    sales: Vec<SaleRecord>,
}

impl VendingMachine {
    /// Create a machine from explicit catalog and reserve stock
    pub fn new(catalog: Vec<DrinkInfo>, reserve: ChangeReserve, card: CardReader) -> Self {
        VendingMachine {
            catalog,
            reserve,
            card,
            sales: Vec::new(),
        }
    }

    /// Create a machine with the standard catalog and opening float
    pub fn with_defaults(card: CardReader) -> Self {
        Self::new(
            vec![
                DrinkInfo::new(Drink::Cola, 200, 10),
                DrinkInfo::new(Drink::Water, 100, 10),
                DrinkInfo::new(Drink::Coffee, 300, 10),
            ],
            ChangeReserve::default_float(),
            card,
        )
    }

    /// Run one interactive session until the user leaves
    ///
    /// One iteration: select a drink (quit ends the session), reject
    /// sold-out selections, pick a payment method (backing out repeats the
    /// menu), run the payment, and on success decrement stock, record the
    /// sale and dispense.
    ///
    /// # Errors
    ///
    /// Propagates only host-level `Io` failures from the port; everything
    /// else is handled inside the loop.
    pub fn run_session<P>(&mut self, port: &mut P) -> Result<(), VendError>
    where
        P: CashPort + SessionPort,
    {
        loop {
            let drink = match port.select_drink(&self.catalog)? {
                Some(drink) => drink,
                None => return Ok(()),
            };

            let (price, sold_out) = match self.catalog_entry(drink) {
                Some(info) => (info.price, info.sold_out()),
                None => continue,
            };
            if sold_out {
                port.sold_out(drink);
                continue;
            }

            let method = match port.select_payment_method(drink, price)? {
                Some(method) => method,
                None => continue,
            };

            let sale = match method {
                PaymentMethod::Cash => {
                    match CashPaymentFlow::new(&mut self.reserve, port).run(price)? {
                        PaymentOutcome::Completed {
                            tendered,
                            change_value,
                        } => Some(SaleRecord {
                            drink,
                            price,
                            method,
                            tendered,
                            change: change_value,
                        }),
                        PaymentOutcome::Cancelled => None,
                    }
                }
                PaymentMethod::Card => match self.card.authorize(price) {
                    Ok(()) => Some(SaleRecord {
                        drink,
                        price,
                        method,
                        tendered: price,
                        change: 0,
                    }),
                    Err(error) => {
                        // Declines are a normal outcome of the stub.
                        eprintln!("Payment error: {}", error);
                        port.card_declined(price);
                        None
                    }
                },
            };

            if let Some(sale) = sale {
                self.take_one(drink);
                port.dispensed(drink);
                self.sales.push(sale);
            }

            if !port.another_purchase()? {
                return Ok(());
            }
        }
    }

    fn catalog_entry(&self, drink: Drink) -> Option<&DrinkInfo> {
        self.catalog.iter().find(|info| info.drink == drink)
    }

    fn take_one(&mut self, drink: Drink) {
        if let Some(info) = self.catalog.iter_mut().find(|info| info.drink == drink) {
            info.stock = info.stock.saturating_sub(1);
        }
    }

    /// Completed sales in purchase order
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    /// The cash reserve, for display and end-of-session reporting
    pub fn reserve(&self) -> &ChangeReserve {
        &self.reserve
    }

    /// Remaining stock of one drink, if it is in the catalog
    pub fn stock_of(&self, drink: Drink) -> Option<u32> {
        self.catalog_entry(drink).map(|info| info.stock)
    }
}
