//! Results of `Model::calculate`.
//!
//! A [`Report`] is a titled list of derived quantities. It renders as plain
//! text for terminals and as LaTeX markup for notebook-style hosts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reactive::Variable;

/// One line of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportEntry {
    /// A computed (or echoed input) quantity.
    Quantity {
        label: String,
        symbol: String,
        value: Variable,
    },
    /// A closed-form expression, such as a time response.
    Expression {
        label: String,
        symbol: String,
        expression: String,
    },
    /// Free text, such as a warning.
    Note { text: String },
}

/// Titled list of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    title: String,
    precision: usize,
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Empty report; quantities are rounded to `precision` decimals.
    #[must_use]
    pub fn new(title: impl Into<String>, precision: usize) -> Self {
        Self {
            title: title.into(),
            precision,
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn quantity(mut self, label: &str, symbol: &str, value: Variable) -> Self {
        self.entries.push(ReportEntry::Quantity {
            label: label.to_string(),
            symbol: symbol.to_string(),
            value,
        });
        self
    }

    #[must_use]
    pub fn expression(mut self, label: &str, symbol: &str, expression: impl Into<String>) -> Self {
        self.entries.push(ReportEntry::Expression {
            label: label.to_string(),
            symbol: symbol.to_string(),
            expression: expression.into(),
        });
        self
    }

    #[must_use]
    pub fn note(mut self, text: impl Into<String>) -> Self {
        self.entries.push(ReportEntry::Note { text: text.into() });
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Quantity reported under `symbol`.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Variable> {
        self.entries.iter().find_map(|e| match e {
            ReportEntry::Quantity {
                symbol: s, value, ..
            } if s == symbol => Some(value),
            _ => None,
        })
    }

    /// Expression reported under `symbol`.
    #[must_use]
    pub fn expression_of(&self, symbol: &str) -> Option<&str> {
        self.entries.iter().find_map(|e| match e {
            ReportEntry::Expression {
                symbol: s,
                expression,
                ..
            } if s == symbol => Some(expression.as_str()),
            _ => None,
        })
    }

    /// Whether any note contains `needle`.
    #[must_use]
    pub fn has_note(&self, needle: &str) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, ReportEntry::Note { text } if text.contains(needle)))
    }

    /// LaTeX markup, one entry per line.
    #[must_use]
    pub fn to_latex(&self) -> String {
        let mut out = format!(r"$\large {}\\ ", latex_words(&self.title));
        for entry in &self.entries {
            match entry {
                ReportEntry::Quantity {
                    label,
                    symbol,
                    value,
                } => {
                    out.push_str(&format!(
                        r"{} ~~ {} = {:.p$} ~[{}]\\ ",
                        latex_words(label),
                        symbol,
                        value.value(),
                        value.unit(),
                        p = self.precision
                    ));
                }
                ReportEntry::Expression {
                    label,
                    symbol,
                    expression,
                } => {
                    out.push_str(&format!(
                        r"{} ~~ {} = {}\\ ",
                        latex_words(label),
                        symbol,
                        expression
                    ));
                }
                ReportEntry::Note { text } => {
                    out.push_str(&format!(r"\textbf{{{}}}\\ ", text));
                }
            }
        }
        out.push('$');
        out
    }
}

fn latex_words(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ~~ ")
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for entry in &self.entries {
            match entry {
                ReportEntry::Quantity {
                    label,
                    symbol,
                    value,
                } => writeln!(
                    f,
                    "  {label} {symbol} = {}",
                    value.rounded_text(self.precision)
                )?,
                ReportEntry::Expression {
                    label,
                    symbol,
                    expression,
                } => writeln!(f, "  {label} {symbol} = {expression}")?,
                ReportEntry::Note { text } => writeln!(f, "  {text}")?,
            }
        }
        Ok(())
    }
}

/// Result of `Model::calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Inputs are physically meaningful.
    Ok(Report),
    /// Inputs do not describe a valid configuration.
    Invalid { reason: String },
}

impl Outcome {
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    #[must_use]
    pub const fn report(&self) -> Option<&Report> {
        match self {
            Self::Ok(report) => Some(report),
            Self::Invalid { .. } => None,
        }
    }

    /// Shortcut for `report().and_then(|r| r.get(symbol))`.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Variable> {
        self.report().and_then(|r| r.get(symbol))
    }

    /// LaTeX markup of the report, or of the rejection reason.
    #[must_use]
    pub fn to_latex(&self) -> String {
        match self {
            Self::Ok(report) => report.to_latex(),
            Self::Invalid { reason } => format!(r"$\textbf{{Invalid:}} ~~ {}$", latex_words(reason)),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(report) => fmt::Display::fmt(report, f),
            Self::Invalid { reason } => writeln!(f, "Invalid: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report::new("Pipe flow", 2)
            .quantity("Outlet velocity", "u2", Variable::si(8.0, "m/s"))
            .expression("Response", "φ(t)", "0.1 * sin(2t)")
            .note("OVERFLOW!")
    }

    #[test]
    fn test_lookup() {
        let report = sample();
        assert_eq!(report.get("u2"), Some(&Variable::si(8.0, "m/s")));
        assert_eq!(report.get("u3"), None);
        assert_eq!(report.expression_of("φ(t)"), Some("0.1 * sin(2t)"));
        assert!(report.has_note("OVERFLOW"));
        assert_eq!(report.entries().len(), 3);
    }

    #[test]
    fn test_display() {
        let text = sample().to_string();
        assert!(text.starts_with("Pipe flow\n"));
        assert!(text.contains("  Outlet velocity u2 = 8.00 [m/s]\n"));
        assert!(text.contains("  Response φ(t) = 0.1 * sin(2t)\n"));
        assert!(text.contains("  OVERFLOW!\n"));
    }

    #[test]
    fn test_latex() {
        let latex = sample().to_latex();
        assert!(latex.starts_with(r"$\large Pipe ~~ flow\\ "));
        assert!(latex.contains(r"Outlet ~~ velocity ~~ u2 = 8.00 ~[m/s]\\ "));
        assert!(latex.ends_with('$'));
    }

    #[test]
    fn test_outcome() {
        let ok = Outcome::Ok(sample());
        assert!(ok.is_ok());
        assert!(ok.get("u2").is_some());

        let invalid = Outcome::invalid("outlet area is zero");
        assert!(!invalid.is_ok());
        assert!(invalid.report().is_none());
        assert_eq!(invalid.to_string(), "Invalid: outlet area is zero\n");
        assert!(invalid.to_latex().contains("outlet ~~ area"));
    }
}
