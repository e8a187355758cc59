use crate::domain::model::{CustomerRecord, Explanation, ExplanationRequest, PredictionResult};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ChurnScorer: Send + Sync {
    async fn predict(&self, record: &CustomerRecord) -> Result<PredictionResult>;
}

/// Explanation failures are folded into [`Explanation::Failed`], never raised.
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(&self, request: &ExplanationRequest) -> Explanation;
}

pub trait Presenter {
    fn notice(&mut self, message: &str) -> Result<()>;
    fn prediction(&mut self, result: PredictionResult) -> Result<()>;
    fn scoring_failed(&mut self, message: &str) -> Result<()>;
    fn explanation(&mut self, explanation: &Explanation) -> Result<()>;
}
