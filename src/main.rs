//! Vending Cash Engine CLI
//!
//! Interactive vending machine session on stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --card-approval-rate 0.5
//! cargo run -- --seed 42 --report sales.csv
//! ```
//!
//! The program presents a drink menu, takes cash or card payment, dispenses
//! drinks and hands out change until the user quits, then optionally writes
//! a CSV sales report.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (input stream closed, report not writable, etc.)

use std::fs::File;
use std::process;
use vending_cash_engine::cli;
use vending_cash_engine::core::{CardReader, VendingMachine};
use vending_cash_engine::io::{write_sales_csv, ConsolePort};
use vending_cash_engine::types::VendError;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let card = match args.seed {
        Some(seed) => CardReader::with_seed(args.card_approval_rate, seed),
        None => CardReader::new(args.card_approval_rate),
    };

    let mut machine = VendingMachine::with_defaults(card);
    let mut port = ConsolePort::stdio();

    if let Err(e) = machine.run_session(&mut port) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Optional end-of-session sales report
    if let Some(path) = args.report {
        let result = File::create(&path)
            .map_err(VendError::from)
            .and_then(|mut file| write_sales_csv(machine.sales(), &mut file));
        if let Err(e) = result {
            eprintln!("Error writing report '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}
