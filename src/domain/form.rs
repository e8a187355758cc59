//! Input collection for a [`CustomerRecord`].
//!
//! Numeric entry is clamped into each field's range and empty entry takes the
//! field default, so a record leaving this module is always within bounds.

use crate::domain::model::{
    CustomerRecord, Gender, Geography, AGE_RANGE, BALANCE_RANGE, CREDIT_SCORE_RANGE, SALARY_RANGE,
    TENURE_RANGE,
};
use std::io::{self, BufRead, Write};

pub fn clamp_int(value: i64, (min, max): (i64, i64)) -> i64 {
    value.clamp(min, max)
}

pub fn clamp_float(value: f64, (min, max): (f64, f64)) -> f64 {
    value.clamp(min, max)
}

/// Flag parser for float fields; rejects values outside `range`.
pub fn parse_bounded_f64(input: &str, range: (f64, f64)) -> Result<f64, String> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", input))?;
    if !value.is_finite() || value < range.0 || value > range.1 {
        return Err(format!("{} is not in {}..={}", value, range.0, range.1));
    }
    Ok(value)
}

pub fn parse_balance(input: &str) -> Result<f64, String> {
    parse_bounded_f64(input, BALANCE_RANGE)
}

pub fn parse_salary(input: &str) -> Result<f64, String> {
    parse_bounded_f64(input, SALARY_RANGE)
}

struct FormPrompt<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> FormPrompt<'_, R, W> {
    /// `None` once the input is exhausted.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_int(&mut self, label: &str, range: (i64, i64), default: i64) -> io::Result<i64> {
        let question = format!("{} [{}-{}] (default {})", label, range.0, range.1, default);
        loop {
            let answer = match self.ask(&question)? {
                None => return Ok(default),
                Some(answer) if answer.is_empty() => return Ok(default),
                Some(answer) => answer,
            };

            match answer.parse::<i64>() {
                Ok(value) => {
                    let clamped = clamp_int(value, range);
                    if clamped != value {
                        writeln!(self.output, "  ↳ adjusted to {}", clamped)?;
                    }
                    return Ok(clamped);
                }
                Err(_) => writeln!(self.output, "  ↳ please enter a whole number")?,
            }
        }
    }

    fn ask_float(&mut self, label: &str, range: (f64, f64), default: f64) -> io::Result<f64> {
        let question = format!("{} [{}-{}] (default {})", label, range.0, range.1, default);
        loop {
            let answer = match self.ask(&question)? {
                None => return Ok(default),
                Some(answer) if answer.is_empty() => return Ok(default),
                Some(answer) => answer,
            };

            match answer.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    let clamped = clamp_float(value, range);
                    if clamped != value {
                        writeln!(self.output, "  ↳ adjusted to {}", clamped)?;
                    }
                    return Ok(clamped);
                }
                _ => writeln!(self.output, "  ↳ please enter a number")?,
            }
        }
    }

    /// Each option lists its accepted spellings; the first one is displayed.
    fn ask_choice<T: Copy + PartialEq>(
        &mut self,
        label: &str,
        options: &[(T, &[&str])],
        default: T,
    ) -> io::Result<T> {
        let shown: Vec<&str> = options.iter().map(|(_, names)| names[0]).collect();
        let default_name = options
            .iter()
            .find(|(value, _)| *value == default)
            .map(|(_, names)| names[0])
            .unwrap_or_default();
        let question = format!("{} [{}] (default {})", label, shown.join("/"), default_name);

        loop {
            let answer = match self.ask(&question)? {
                None => return Ok(default),
                Some(answer) if answer.is_empty() => return Ok(default),
                Some(answer) => answer,
            };

            let picked = options.iter().find(|(_, names)| {
                names.iter().any(|name| name.eq_ignore_ascii_case(&answer))
            });
            match picked {
                Some((value, _)) => return Ok(*value),
                None => writeln!(self.output, "  ↳ choose one of: {}", shown.join(", "))?,
            }
        }
    }
}

const YES_NO: [(bool, &[&str]); 2] = [(true, &["1", "yes", "y"]), (false, &["0", "no", "n"])];

/// Collects a record field by field from `input`, echoing prompts to `output`.
pub fn prompt_record<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<CustomerRecord> {
    let defaults = CustomerRecord::default();
    let mut form = FormPrompt { input, output };

    let geographies: Vec<(Geography, &[&str])> = Geography::ALL
        .iter()
        .map(|g| {
            let names: &[&str] = match g {
                Geography::France => &["France"],
                Geography::Germany => &["Germany"],
                Geography::Spain => &["Spain"],
            };
            (*g, names)
        })
        .collect();
    let genders: Vec<(Gender, &[&str])> = Gender::ALL
        .iter()
        .map(|g| {
            let names: &[&str] = match g {
                Gender::Female => &["Female", "f"],
                Gender::Male => &["Male", "m"],
            };
            (*g, names)
        })
        .collect();
    let products: [(u8, &[&str]); 4] = [(1, &["1"]), (2, &["2"]), (3, &["3"]), (4, &["4"])];

    let credit_score = form.ask_int(
        "Credit Score",
        (CREDIT_SCORE_RANGE.0.into(), CREDIT_SCORE_RANGE.1.into()),
        defaults.credit_score.into(),
    )?;
    let geography = form.ask_choice("Geography", &geographies, defaults.geography)?;
    let gender = form.ask_choice("Gender", &genders, defaults.gender)?;
    let age = form.ask_int(
        "Age",
        (AGE_RANGE.0.into(), AGE_RANGE.1.into()),
        defaults.age.into(),
    )?;
    let tenure = form.ask_int(
        "Tenure (Years)",
        (TENURE_RANGE.0.into(), TENURE_RANGE.1.into()),
        defaults.tenure.into(),
    )?;
    let balance = form.ask_float("Account Balance", BALANCE_RANGE, defaults.balance)?;
    let num_products = form.ask_choice("Number of Products", &products, defaults.num_products)?;
    let has_credit_card = form.ask_choice("Has Credit Card", &YES_NO, defaults.has_credit_card)?;
    let is_active_member =
        form.ask_choice("Is Active Member", &YES_NO, defaults.is_active_member)?;
    let estimated_salary =
        form.ask_float("Estimated Salary", SALARY_RANGE, defaults.estimated_salary)?;

    // Values were clamped into u8/u16 ranges above.
    Ok(CustomerRecord {
        credit_score: credit_score as u16,
        geography,
        gender,
        age: age as u8,
        tenure: tenure as u8,
        balance,
        num_products,
        has_credit_card,
        is_active_member,
        estimated_salary,
    })
}
