pub mod pipeline;

pub use crate::domain::model::{CustomerRecord, Explanation, ExplanationRequest, PredictionResult};
pub use crate::domain::ports::{ChurnScorer, Explainer, Presenter};
pub use crate::utils::error::Result;
