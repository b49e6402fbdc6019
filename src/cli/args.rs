use clap::Parser;
use std::path::PathBuf;

/// Interactive vending machine with cash settlement
#[derive(Parser, Debug)]
#[command(name = "vending-cash-engine")]
#[command(about = "Interactive vending machine with cash settlement", long_about = None)]
pub struct CliArgs {
    /// Probability that the card stub approves a payment
    #[arg(
        long = "card-approval-rate",
        value_name = "RATE",
        default_value_t = 0.8,
        value_parser = parse_rate,
        help = "Card approval probability between 0.0 and 1.0 (default: 0.8)"
    )]
    pub card_approval_rate: f64,

    /// Seed for the card RNG, for reproducible sessions
    #[arg(
        long = "seed",
        value_name = "SEED",
        help = "Fixed RNG seed for the card stub (default: entropy)"
    )]
    pub seed: Option<u64>,

    /// Where to write the sales report CSV at session end
    #[arg(
        long = "report",
        value_name = "PATH",
        help = "Write a CSV sales report to this path on exit"
    )]
    pub report: Option<PathBuf>,
}

/// Parse and range-check an approval rate
fn parse_rate(raw: &str) -> Result<f64, String> {
    let rate: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("rate {} is outside 0.0..=1.0", rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(&["program"], 0.8, None)]
    #[case::custom_rate(&["program", "--card-approval-rate", "0.5"], 0.5, None)]
    #[case::always_approve(&["program", "--card-approval-rate", "1.0"], 1.0, None)]
    #[case::with_seed(&["program", "--seed", "42"], 0.8, Some(42))]
    fn test_parsing(
        #[case] args: &[&str],
        #[case] expected_rate: f64,
        #[case] expected_seed: Option<u64>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.card_approval_rate, expected_rate);
        assert_eq!(parsed.seed, expected_seed);
    }

    #[test]
    fn test_report_path() {
        let parsed =
            CliArgs::try_parse_from(["program", "--report", "sales.csv"]).unwrap();
        assert_eq!(parsed.report, Some(PathBuf::from("sales.csv")));
    }

    #[rstest]
    #[case::above_one(&["program", "--card-approval-rate", "1.5"])]
    #[case::negative(&["program", "--card-approval-rate", "-0.1"])]
    #[case::not_a_number(&["program", "--card-approval-rate", "often"])]
    #[case::unknown_flag(&["program", "--strategy", "sync"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
