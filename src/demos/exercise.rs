//! Check-your-answer tasks.
//!
//! An [`Exercise`] pairs a prompt with the quantity a model computes. The
//! student's answer is read in the expected quantity's display unit and scale
//! and compared with a relative tolerance.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Model;
use crate::reactive::Variable;

/// Result of checking one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The answer text did not parse as a number.
    NotANumber,
}

impl Verdict {
    /// Feedback shown to the student.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Correct => "You did it!",
            Self::Incorrect => "That is not the correct answer. Try again!",
            Self::NotANumber => "Please enter a number.",
        }
    }

    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A prompt with a known answer.
#[derive(Debug, Clone)]
pub struct Exercise {
    prompt: String,
    expected: Variable,
    rel_tol: f64,
    attempts: u32,
    solved: bool,
}

impl Exercise {
    #[must_use]
    pub fn new(prompt: impl Into<String>, expected: Variable, rel_tol: f64) -> Self {
        Self {
            prompt: prompt.into(),
            expected,
            rel_tol: rel_tol.abs(),
            attempts: 0,
            solved: false,
        }
    }

    /// Exercise on the quantity `symbol` reported by `model` for its current
    /// parameters. `None` if the outcome is invalid or lacks the symbol.
    #[must_use]
    pub fn for_model(
        prompt: impl Into<String>,
        model: &dyn Model,
        symbol: &str,
        rel_tol: f64,
    ) -> Option<Self> {
        let outcome = model.calculate();
        let expected = outcome.get(symbol)?.clone();
        Some(Self::new(prompt, expected, rel_tol))
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Unit the answer is expected in.
    #[must_use]
    pub fn unit(&self) -> &str {
        self.expected.unit()
    }

    #[must_use]
    pub const fn expected(&self) -> &Variable {
        &self.expected
    }

    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    /// Check a numeric answer given in the expected unit.
    pub fn check(&mut self, answer: f64) -> Verdict {
        self.attempts += 1;
        let given = self.expected.with_value(answer);
        let verdict = if answer.is_finite() && given.approx_eq(&self.expected, self.rel_tol) {
            self.solved = true;
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        debug!(attempt = self.attempts, answer, ?verdict, "exercise checked");
        verdict
    }

    /// Check an answer typed as text. Commas are accepted as decimal separators.
    pub fn check_input(&mut self, text: &str) -> Verdict {
        match text.trim().replace(',', ".").parse::<f64>() {
            Ok(answer) => self.check(answer),
            Err(_) => Verdict::NotANumber,
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.prompt, self.expected.unit())
    }
}
