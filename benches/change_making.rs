//! Benchmarks for the greedy change settlement
//!
//! Measures the plan-and-commit cycle of `compute_and_commit_change` across
//! amounts that exercise different depths of the denomination walk, against
//! a reserve deep enough that the bench never drains it.
//!
//! Run with: `cargo bench`

use divan::Bencher;
use vending_cash_engine::core::ChangeReserve;
use vending_cash_engine::types::Denomination;

fn main() {
    divan::main();
}

fn deep_reserve() -> ChangeReserve {
    ChangeReserve::with_stock([
        (Denomination::Bill10000, 1_000_000),
        (Denomination::Bill5000, 1_000_000),
        (Denomination::Bill1000, 1_000_000),
        (Denomination::Coin500, 1_000_000),
        (Denomination::Coin100, 1_000_000),
    ])
}

#[divan::bench(args = [100, 8900, 16600, 99900])]
fn settle_change(bencher: Bencher, amount: u64) {
    bencher
        .with_inputs(deep_reserve)
        .bench_values(|mut reserve| reserve.compute_and_commit_change(amount));
}

#[divan::bench]
fn settle_infeasible_tail(bencher: Bencher) {
    // Worst case: the full descending walk plus a remainder that cannot be
    // covered, so the call ends in the infeasible branch every time.
    bencher
        .with_inputs(|| ChangeReserve::with_stock([(Denomination::Coin500, 1)]))
        .bench_values(|mut reserve| reserve.compute_and_commit_change(600));
}
