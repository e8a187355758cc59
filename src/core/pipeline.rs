use crate::domain::model::{CustomerRecord, Explanation, ExplanationRequest, PredictionResult};
use crate::domain::ports::{ChurnScorer, Explainer, Presenter};
use crate::utils::error::Result;

pub const SCORING_NOTICE: &str = "🔄 Sending data to Azure ML model...";
pub const EXPLAINING_NOTICE: &str = "🧠 Explaining the prediction...";

/// What one submit produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// The error message when scoring failed.
    pub prediction: std::result::Result<PredictionResult, String>,
    /// `None` when scoring failed or explanations are disabled.
    pub explanation: Option<Explanation>,
}

impl RunReport {
    pub fn scoring_failed(&self) -> bool {
        self.prediction.is_err()
    }
}

/// Runs predict → render → explain → render for a single record.
pub struct ChurnPipeline<S: ChurnScorer, E: Explainer> {
    scorer: S,
    explainer: Option<E>,
}

impl<S: ChurnScorer, E: Explainer> ChurnPipeline<S, E> {
    pub fn new(scorer: S, explainer: Option<E>) -> Self {
        Self { scorer, explainer }
    }

    /// Only presenter write failures are returned as errors; remote failures
    /// are rendered and recorded in the report.
    pub async fn run<P: Presenter>(
        &self,
        record: &CustomerRecord,
        presenter: &mut P,
    ) -> Result<RunReport> {
        presenter.notice(SCORING_NOTICE)?;

        let prediction = match self.scorer.predict(record).await {
            Ok(prediction) => prediction,
            Err(e) => {
                tracing::error!("Scoring failed: {}", e);
                presenter.scoring_failed(&e.to_string())?;
                // No outcome to explain.
                return Ok(RunReport {
                    prediction: Err(e.to_string()),
                    explanation: None,
                });
            }
        };
        presenter.prediction(prediction)?;

        let Some(explainer) = &self.explainer else {
            tracing::debug!("Explanations disabled");
            return Ok(RunReport {
                prediction: Ok(prediction),
                explanation: None,
            });
        };

        presenter.notice(EXPLAINING_NOTICE)?;
        let explanation = explainer.explain(&ExplanationRequest::from(record)).await;
        presenter.explanation(&explanation)?;

        Ok(RunReport {
            prediction: Ok(prediction),
            explanation: Some(explanation),
        })
    }
}
