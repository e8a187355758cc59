pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{explainer::ChatExplainer, scoring::ScoringClient, terminal::TerminalPresenter};
pub use config::AppConfig;
pub use core::pipeline::{ChurnPipeline, RunReport};
pub use domain::model::{CustomerRecord, Explanation, PredictionResult};
pub use utils::error::{ChurnError, Result};
