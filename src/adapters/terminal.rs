use crate::domain::model::{Explanation, PredictionResult};
use crate::domain::ports::Presenter;
use crate::utils::error::Result;
use std::io::Write;

pub const CHURN_BANNER: &str = "⚠️ This customer is likely to churn.";
pub const STAY_BANNER: &str = "✅ This customer is likely to stay.";
pub const UNKNOWN_BANNER: &str = "⚠️ Unable to determine prediction result.";
pub const EXPLANATION_HEADING: &str = "### 💡 GPT-4 Explanation";

/// Plain-text presenter for a terminal or any other writer.
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()?;
        Ok(())
    }

    fn prediction(&mut self, result: PredictionResult) -> Result<()> {
        let banner = match result {
            PredictionResult::WillChurn => CHURN_BANNER,
            PredictionResult::WillStay => STAY_BANNER,
            PredictionResult::Indeterminate => UNKNOWN_BANNER,
        };
        writeln!(self.out, "{}", banner)?;
        Ok(())
    }

    fn scoring_failed(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "❌ Azure ML error: {}", message)?;
        Ok(())
    }

    fn explanation(&mut self, explanation: &Explanation) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", EXPLANATION_HEADING)?;
        writeln!(self.out, "{}", explanation.display_text().trim_end())?;
        self.out.flush()?;
        Ok(())
    }
}
