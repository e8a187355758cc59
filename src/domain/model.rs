use std::fmt;

pub const CREDIT_SCORE_RANGE: (u16, u16) = (300, 900);
pub const AGE_RANGE: (u8, u8) = (18, 100);
pub const TENURE_RANGE: (u8, u8) = (0, 10);
pub const NUM_PRODUCTS_RANGE: (u8, u8) = (1, 4);
pub const BALANCE_RANGE: (f64, f64) = (0.0, 500_000.0);
pub const SALARY_RANGE: (f64, f64) = (0.0, 200_000.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Geography {
    France,
    Germany,
    Spain,
}

impl Geography {
    pub const ALL: [Geography; 3] = [Geography::France, Geography::Germany, Geography::Spain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Geography::France => "France",
            Geography::Germany => "Germany",
            Geography::Spain => "Spain",
        }
    }
}

impl fmt::Display for Geography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    /// Encoding expected by the scoring model.
    pub fn code(&self) -> u8 {
        match self {
            Gender::Female => 0,
            Gender::Male => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One form submission. Values are expected to be inside the declared ranges;
/// the input collectors guarantee that before a record is built.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub credit_score: u16,
    pub geography: Geography,
    pub gender: Gender,
    pub age: u8,
    pub tenure: u8,
    pub balance: f64,
    pub num_products: u8,
    pub has_credit_card: bool,
    pub is_active_member: bool,
    pub estimated_salary: f64,
}

impl Default for CustomerRecord {
    fn default() -> Self {
        Self {
            credit_score: 720,
            geography: Geography::France,
            gender: Gender::Female,
            age: 35,
            tenure: 6,
            balance: 35_000.50,
            num_products: 1,
            has_credit_card: true,
            is_active_member: true,
            estimated_salary: 55_000.0,
        }
    }
}

/// The subset of a record that the explanation prompt talks about.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplanationRequest {
    pub credit_score: u16,
    pub age: u8,
    pub balance: f64,
    pub num_products: u8,
    pub has_credit_card: bool,
    pub is_active_member: bool,
    pub estimated_salary: f64,
}

impl From<&CustomerRecord> for ExplanationRequest {
    fn from(record: &CustomerRecord) -> Self {
        Self {
            credit_score: record.credit_score,
            age: record.age,
            balance: record.balance,
            num_products: record.num_products,
            has_credit_card: record.has_credit_card,
            is_active_member: record.is_active_member,
            estimated_salary: record.estimated_salary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionResult {
    WillChurn,
    WillStay,
    Indeterminate,
}

impl PredictionResult {
    /// Maps the raw model output. Booleans count as 1/0.
    pub fn from_raw(value: &serde_json::Value) -> Self {
        let numeric = match value {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        };

        match numeric {
            Some(n) if n == 1.0 => PredictionResult::WillChurn,
            Some(n) if n == 0.0 => PredictionResult::WillStay,
            _ => PredictionResult::Indeterminate,
        }
    }
}

/// Outcome of the explanation step. A failure is kept apart from generated
/// text so the presenter decides how to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    Text(String),
    Failed(String),
}

pub const EXPLANATION_ERROR_MARKER: &str = "⚠️ GPT error:";

impl Explanation {
    pub fn is_failed(&self) -> bool {
        matches!(self, Explanation::Failed(_))
    }

    /// Text shown to the user; failures carry the diagnostic marker.
    pub fn display_text(&self) -> String {
        match self {
            Explanation::Text(text) => text.clone(),
            Explanation::Failed(reason) => format!("{} {}", EXPLANATION_ERROR_MARKER, reason),
        }
    }
}
