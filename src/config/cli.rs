use crate::domain::form::{parse_balance, parse_salary};
use crate::domain::model::{CustomerRecord, Gender, Geography};
use clap::{Args, Parser};

#[derive(Debug, Clone, Parser)]
#[command(name = "churn-predict")]
#[command(about = "Predict customer churn with a hosted model and explain the result")]
pub struct CliConfig {
    #[command(flatten)]
    pub customer: CustomerArgs,

    /// Ask for each field on the terminal instead of using the flags
    #[arg(short, long)]
    pub interactive: bool,

    /// TOML file with endpoint settings; defaults to environment variables
    #[arg(short, long)]
    pub config: Option<String>,

    /// Skip the language-model explanation
    #[arg(long)]
    pub no_explain: bool,

    /// Print the requests that would be sent without sending them
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

/// Form fields. Ranges are checked while parsing, so every accepted value is
/// already in bounds.
#[derive(Debug, Clone, Args)]
pub struct CustomerArgs {
    #[arg(long, default_value_t = 720, value_parser = clap::value_parser!(u16).range(300..=900))]
    pub credit_score: u16,

    #[arg(long, value_enum, default_value_t = Geography::France)]
    pub geography: Geography,

    #[arg(long, value_enum, default_value_t = Gender::Female)]
    pub gender: Gender,

    #[arg(long, default_value_t = 35, value_parser = clap::value_parser!(u8).range(18..=100))]
    pub age: u8,

    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub tenure: u8,

    #[arg(long, default_value_t = 35_000.50, value_parser = parse_balance)]
    pub balance: f64,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub num_products: u8,

    /// 1 = yes, 0 = no
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub has_credit_card: u8,

    /// 1 = yes, 0 = no
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub is_active_member: u8,

    #[arg(long, default_value_t = 55_000.0, value_parser = parse_salary)]
    pub estimated_salary: f64,
}

impl From<&CustomerArgs> for CustomerRecord {
    fn from(args: &CustomerArgs) -> Self {
        Self {
            credit_score: args.credit_score,
            geography: args.geography,
            gender: args.gender,
            age: args.age,
            tenure: args.tenure,
            balance: args.balance,
            num_products: args.num_products,
            has_credit_card: args.has_credit_card == 1,
            is_active_member: args.is_active_member == 1,
            estimated_salary: args.estimated_salary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_record_defaults() {
        let config = CliConfig::try_parse_from(["churn-predict"]).unwrap();
        assert_eq!(CustomerRecord::from(&config.customer), CustomerRecord::default());
        assert!(!config.interactive);
        assert!(!config.no_explain);
    }

    #[test]
    fn test_flags_build_record() {
        let config = CliConfig::try_parse_from([
            "churn-predict",
            "--credit-score",
            "610",
            "--geography",
            "germany",
            "--gender",
            "male",
            "--balance",
            "1234.5",
            "--has-credit-card",
            "0",
            "--no-explain",
        ])
        .unwrap();

        let record = CustomerRecord::from(&config.customer);
        assert_eq!(record.credit_score, 610);
        assert_eq!(record.geography, Geography::Germany);
        assert_eq!(record.gender, Gender::Male);
        assert_eq!(record.balance, 1234.5);
        assert!(!record.has_credit_card);
        assert!(record.is_active_member);
        assert!(config.no_explain);
    }

    #[test]
    fn test_out_of_range_flags_are_rejected() {
        for args in [
            vec!["churn-predict", "--credit-score", "299"],
            vec!["churn-predict", "--age", "101"],
            vec!["churn-predict", "--tenure", "11"],
            vec!["churn-predict", "--num-products", "5"],
            vec!["churn-predict", "--has-credit-card", "2"],
            vec!["churn-predict", "--balance", "500000.5"],
            vec!["churn-predict", "--estimated-salary", "-1"],
            vec!["churn-predict", "--geography", "italy"],
        ] {
            assert!(CliConfig::try_parse_from(args.iter().copied()).is_err(), "accepted {:?}", args);
        }
    }

    #[test]
    fn test_inclusive_bounds_are_accepted() {
        let lower = CliConfig::try_parse_from([
            "churn-predict",
            "--credit-score",
            "300",
            "--age",
            "18",
            "--tenure",
            "0",
            "--num-products",
            "1",
            "--balance",
            "0",
            "--estimated-salary",
            "0",
        ])
        .unwrap();
        let record = CustomerRecord::from(&lower.customer);
        assert_eq!(record.credit_score, 300);
        assert_eq!(record.age, 18);
        assert_eq!(record.tenure, 0);
        assert_eq!(record.num_products, 1);
        assert_eq!(record.balance, 0.0);
        assert_eq!(record.estimated_salary, 0.0);

        let upper = CliConfig::try_parse_from([
            "churn-predict",
            "--credit-score",
            "900",
            "--age",
            "100",
            "--tenure",
            "10",
            "--num-products",
            "4",
            "--balance",
            "500000",
            "--estimated-salary",
            "200000",
        ])
        .unwrap();
        let record = CustomerRecord::from(&upper.customer);
        assert_eq!(record.credit_score, 900);
        assert_eq!(record.age, 100);
        assert_eq!(record.tenure, 10);
        assert_eq!(record.num_products, 4);
        assert_eq!(record.balance, 500_000.0);
        assert_eq!(record.estimated_salary, 200_000.0);
    }
}
