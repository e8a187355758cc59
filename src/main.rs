use anyhow::Context;
use churn_predictor::adapters::explainer::{build_prompt, ChatRequest};
use churn_predictor::adapters::scoring::ScoringRequest;
use churn_predictor::domain::form::prompt_record;
use churn_predictor::domain::model::ExplanationRequest;
use churn_predictor::utils::{logger, validation::Validate};
use churn_predictor::{
    AppConfig, ChatExplainer, ChurnError, ChurnPipeline, CliConfig, CustomerRecord,
    ScoringClient, TerminalPresenter,
};
use clap::Parser;

fn load_config(cli: &CliConfig) -> churn_predictor::Result<AppConfig> {
    match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AppConfig::from_file(path)
        }
        None => Ok(AppConfig::from_env()),
    }
}

fn exit_with(e: &ChurnError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(1);
}

fn print_dry_run(config: &AppConfig, record: &CustomerRecord, explain: bool) -> anyhow::Result<()> {
    let scoring = serde_json::to_string_pretty(&ScoringRequest::from_record(record))?;
    println!("POST {}", config.scoring.endpoint);
    println!("{}", scoring);

    if explain {
        let request = ExplanationRequest::from(record);
        let chat = ChatRequest::new(&config.explainer, &request);
        println!();
        println!(
            "POST {}?api-version={}",
            config.explainer.chat_completions_url(),
            config.explainer.api_version
        );
        println!(
            "temperature={} max_tokens={}",
            chat.temperature, chat.max_tokens
        );
        println!("{}", build_prompt(&request));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting churn-predict");

    let explain = !cli.no_explain;
    let config = load_config(&cli).unwrap_or_else(|e| exit_with(&e));
    if cli.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    let record = if cli.interactive {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        println!("🔍 Customer Churn Prediction");
        println!("Enter customer details below:");
        prompt_record(&mut input, &mut output).context("reading customer details")?
    } else {
        CustomerRecord::from(&cli.customer)
    };
    tracing::debug!("Customer record: {:?}", record);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be sent");
        return print_dry_run(&config, &record, explain);
    }

    let validation = if explain {
        config.validate()
    } else {
        config.validate_for(false)
    };
    if let Err(e) = validation {
        exit_with(&e);
    }

    let scorer = ScoringClient::new(config.scoring.clone()).context("building scoring client")?;
    let explainer = if explain {
        Some(ChatExplainer::new(config.explainer.clone()).context("building chat client")?)
    } else {
        None
    };

    let pipeline = ChurnPipeline::new(scorer, explainer);
    let mut presenter = TerminalPresenter::new(std::io::stdout());
    let report = pipeline.run(&record, &mut presenter).await?;

    if report.scoring_failed() {
        std::process::exit(2);
    }
    Ok(())
}
