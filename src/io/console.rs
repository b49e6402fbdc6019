//! Console port
//!
//! Blocking stdin/stdout implementation of the port traits. One prompt per
//! request, one line per answer.
//!
//! # Error Handling
//!
//! - Unparseable answers are handled locally: a short notice is printed and
//!   the same prompt repeats. Whether a parsed face value is actually an
//!   accepted denomination is NOT decided here; that membership check
//!   belongs to the payment flow.
//! - A closed or failing input stream is a host-level failure and surfaces
//!   as `VendError::Io`.

use crate::core::traits::{
    CashPort, ContinueChoice, InsertEvent, RetryChoice, SessionPort,
};
use crate::types::{Amount, CashBundle, Drink, DrinkInfo, PaymentMethod, VendError};
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// Port over any line-oriented input and any writer
///
/// Generic so tests can drive it with in-memory buffers; the binary uses
/// [`ConsolePort::stdio`].
pub struct ConsolePort<R, W> {
    input: R,
    output: W,
}

impl ConsolePort<BufReader<Stdin>, Stdout> {
    /// Port over the process's stdin and stdout
    pub fn stdio() -> Self {
        ConsolePort::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePort<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsolePort { input, output }
    }

    /// Read one trimmed line; EOF or a read failure is a host-level error
    fn read_line(&mut self) -> Result<String, VendError> {
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(VendError::Io {
                message: "input stream closed".to_string(),
            });
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, text: &str) {
        // Presentation only; a broken output pipe is not worth failing a
        // payment over.
        let _ = writeln!(self.output, "{}", text);
    }

    /// Prompt until the user answers yes or no
    fn ask_yes_no(&mut self, prompt: &str) -> Result<bool, VendError> {
        loop {
            self.say(prompt);
            match self.read_line()?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                other => self.say(&format!("Please answer y or n (got '{}').", other)),
            }
        }
    }

    fn print_bundle(&mut self, heading: &str, bundle: &CashBundle) {
        self.say(heading);
        for (denomination, count) in bundle.iter() {
            self.say(&format!("  {} x {}", denomination, count));
        }
    }
}

impl<R: BufRead, W: Write> CashPort for ConsolePort<R, W> {
    fn request_insertion(
        &mut self,
        inserted: Amount,
        price: Amount,
    ) -> Result<InsertEvent, VendError> {
        loop {
            self.say(&format!(
                "Inserted {} of {}. Enter 'VALUE COUNT' (e.g. '500 2'), VALUE alone for one unit, or 0 to cancel:",
                inserted, price
            ));
            let line = self.read_line()?;
            let mut tokens = line.split_whitespace();

            let value = match tokens.next().map(str::parse::<Amount>) {
                Some(Ok(0)) => return Ok(InsertEvent::Cancel),
                Some(Ok(value)) => value,
                _ => {
                    self.say("Could not read a value; try again.");
                    continue;
                }
            };
            let count = match tokens.next() {
                None => 1,
                Some(token) => match token.parse() {
                    Ok(count) => count,
                    Err(_) => {
                        self.say("Could not read a count; try again.");
                        continue;
                    }
                },
            };

            return Ok(InsertEvent::Insert { value, count });
        }
    }

    fn request_continue(
        &mut self,
        inserted: Amount,
        price: Amount,
    ) -> Result<ContinueChoice, VendError> {
        let keep_going = self.ask_yes_no(&format!(
            "Inserted {} of {}. Insert more? [y/n]",
            inserted, price
        ))?;
        Ok(if keep_going {
            ContinueChoice::Continue
        } else {
            ContinueChoice::Cancel
        })
    }

    fn request_retry(&mut self) -> Result<RetryChoice, VendError> {
        loop {
            self.say("The machine cannot make change for that amount. [r]etry with exact cash or [c]ancel?");
            match self.read_line()?.to_lowercase().as_str() {
                "r" | "retry" => return Ok(RetryChoice::RetryExact),
                "c" | "cancel" => return Ok(RetryChoice::Cancel),
                other => self.say(&format!("Please answer r or c (got '{}').", other)),
            }
        }
    }

    fn insertion_rejected(&mut self, error: &VendError) {
        self.say(&format!("Rejected: {}", error));
    }

    fn change_given(&mut self, change: CashBundle) {
        if change.is_empty() {
            self.say("Exact payment, no change due.");
        } else {
            self.print_bundle(
                &format!("Change given ({} total):", change.total_value()),
                &change,
            );
        }
    }

    fn cash_returned(&mut self, returned: CashBundle) {
        self.print_bundle(
            &format!("Cash returned ({} total):", returned.total_value()),
            &returned,
        );
    }
}

impl<R: BufRead, W: Write> SessionPort for ConsolePort<R, W> {
    fn select_drink(&mut self, menu: &[DrinkInfo]) -> Result<Option<Drink>, VendError> {
        loop {
            self.say("");
            self.say("--- Menu ---");
            for (index, info) in menu.iter().enumerate() {
                let availability = if info.sold_out() { "  SOLD OUT" } else { "" };
                self.say(&format!(
                    "  [{}] {} - {}{}",
                    index + 1,
                    info.drink,
                    info.price,
                    availability
                ));
            }
            self.say("Pick a number, or q to leave:");

            let line = self.read_line()?;
            if line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match line.parse::<usize>() {
                Ok(choice) if (1..=menu.len()).contains(&choice) => {
                    return Ok(Some(menu[choice - 1].drink));
                }
                _ => self.say("Not a menu entry; try again."),
            }
        }
    }

    fn select_payment_method(
        &mut self,
        drink: Drink,
        price: Amount,
    ) -> Result<Option<PaymentMethod>, VendError> {
        loop {
            self.say(&format!(
                "{} costs {}. Pay with [1] Cash [2] Card, or b to go back:",
                drink, price
            ));
            match self.read_line()?.to_lowercase().as_str() {
                "1" | "cash" => return Ok(Some(PaymentMethod::Cash)),
                "2" | "card" => return Ok(Some(PaymentMethod::Card)),
                "b" | "back" => return Ok(None),
                other => self.say(&format!("Please answer 1, 2 or b (got '{}').", other)),
            }
        }
    }

    fn another_purchase(&mut self) -> Result<bool, VendError> {
        self.ask_yes_no("Buy another drink? [y/n]")
    }

    fn sold_out(&mut self, drink: Drink) {
        self.say(&format!("{} is sold out.", drink));
    }

    fn dispensed(&mut self, drink: Drink) {
        self.say(&format!("Here is your {}. Enjoy!", drink));
    }

    fn card_declined(&mut self, amount: Amount) {
        self.say(&format!("Card payment of {} was declined.", amount));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Denomination;

    fn port_over(input: &str) -> ConsolePort<&[u8], Vec<u8>> {
        ConsolePort::new(input.as_bytes(), Vec::new())
    }

    fn output_of(port: ConsolePort<&[u8], Vec<u8>>) -> String {
        String::from_utf8(port.output).unwrap()
    }

    #[test]
    fn test_insertion_with_value_and_count() {
        let mut port = port_over("500 2\n");
        let event = port.request_insertion(0, 1000).unwrap();
        assert_eq!(
            event,
            InsertEvent::Insert {
                value: 500,
                count: 2
            }
        );
    }

    #[test]
    fn test_insertion_value_alone_defaults_to_one_unit() {
        let mut port = port_over("1000\n");
        let event = port.request_insertion(0, 1000).unwrap();
        assert_eq!(
            event,
            InsertEvent::Insert {
                value: 1000,
                count: 1
            }
        );
    }

    #[test]
    fn test_insertion_zero_is_cancel_sentinel() {
        let mut port = port_over("0\n");
        assert_eq!(port.request_insertion(0, 1000).unwrap(), InsertEvent::Cancel);
    }

    #[test]
    fn test_insertion_reprompts_on_garbage() {
        let mut port = port_over("abc\n100 xyz\n100 3\n");
        let event = port.request_insertion(0, 1000).unwrap();
        assert_eq!(
            event,
            InsertEvent::Insert {
                value: 100,
                count: 3
            }
        );
    }

    #[test]
    fn test_insertion_passes_unknown_values_through() {
        // Membership is the flow's decision, not the console's.
        let mut port = port_over("250 1\n");
        let event = port.request_insertion(0, 1000).unwrap();
        assert_eq!(
            event,
            InsertEvent::Insert {
                value: 250,
                count: 1
            }
        );
    }

    #[test]
    fn test_closed_input_is_io_error() {
        let mut port = port_over("");
        let result = port.request_insertion(0, 1000);
        assert!(matches!(result, Err(VendError::Io { .. })));
    }

    #[test]
    fn test_continue_choice_parsing() {
        let mut port = port_over("y\n");
        assert_eq!(
            port.request_continue(100, 200).unwrap(),
            ContinueChoice::Continue
        );

        let mut port = port_over("maybe\nn\n");
        assert_eq!(
            port.request_continue(100, 200).unwrap(),
            ContinueChoice::Cancel
        );
    }

    #[test]
    fn test_retry_choice_parsing() {
        let mut port = port_over("r\n");
        assert_eq!(port.request_retry().unwrap(), RetryChoice::RetryExact);

        let mut port = port_over("x\nc\n");
        assert_eq!(port.request_retry().unwrap(), RetryChoice::Cancel);
    }

    #[test]
    fn test_drink_selection_by_number() {
        let menu = vec![
            DrinkInfo::new(Drink::Cola, 200, 1),
            DrinkInfo::new(Drink::Water, 100, 1),
        ];
        let mut port = port_over("2\n");
        assert_eq!(port.select_drink(&menu).unwrap(), Some(Drink::Water));
    }

    #[test]
    fn test_drink_selection_quit() {
        let menu = vec![DrinkInfo::new(Drink::Cola, 200, 1)];
        let mut port = port_over("q\n");
        assert_eq!(port.select_drink(&menu).unwrap(), None);
    }

    #[test]
    fn test_drink_selection_rejects_out_of_range() {
        let menu = vec![DrinkInfo::new(Drink::Cola, 200, 1)];
        let mut port = port_over("5\n1\n");
        assert_eq!(port.select_drink(&menu).unwrap(), Some(Drink::Cola));
    }

    #[test]
    fn test_menu_marks_sold_out_entries() {
        let menu = vec![DrinkInfo::new(Drink::Coffee, 300, 0)];
        let mut port = port_over("q\n");
        port.select_drink(&menu).unwrap();
        assert!(output_of(port).contains("SOLD OUT"));
    }

    #[test]
    fn test_payment_method_selection() {
        let mut port = port_over("2\n");
        assert_eq!(
            port.select_payment_method(Drink::Cola, 200).unwrap(),
            Some(PaymentMethod::Card)
        );

        let mut port = port_over("b\n");
        assert_eq!(port.select_payment_method(Drink::Cola, 200).unwrap(), None);
    }

    #[test]
    fn test_change_given_lists_denominations() {
        let mut port = port_over("");
        let change: CashBundle = [
            (Denomination::Coin500, 7),
            (Denomination::Coin100, 4),
        ]
        .into_iter()
        .collect();

        port.change_given(change);

        let output = output_of(port);
        assert!(output.contains("Change given (3900 total):"));
        assert!(output.contains("500 x 7"));
        assert!(output.contains("100 x 4"));
    }

    #[test]
    fn test_empty_change_reports_exact_payment() {
        let mut port = port_over("");
        port.change_given(CashBundle::new());
        assert!(output_of(port).contains("no change due"));
    }
}
