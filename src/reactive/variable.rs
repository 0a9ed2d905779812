//! Immutable physical quantities with a unit and a power-of-ten scale.
//!
//! A [`Variable`] stores a *nominal* value as shown on a control (for example
//! `2.5` in `cm`) together with the exponent that converts it to SI (`-2`).
//! [`Variable::real`] applies the scale on every call; nothing is cached, so a
//! freshly constructed Variable always reflects its nominal value.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, DemoResult};

/// A value with unit and power-of-ten scale factor.
///
/// # Invariants
///
/// 1. `real() == value * 10^scale_exponent`, recomputed on demand.
/// 2. No mutation after construction; derived quantities are new Variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    value: f64,
    scale_exponent: i32,
    unit: String,
}

impl Variable {
    /// Create a new variable.
    #[must_use]
    pub fn new(value: f64, scale_exponent: i32, unit: impl Into<String>) -> Self {
        Self {
            value,
            scale_exponent,
            unit: unit.into(),
        }
    }

    /// Create an unscaled variable, typically a computed SI quantity.
    #[must_use]
    pub fn si(value: f64, unit: impl Into<String>) -> Self {
        Self::new(value, 0, unit)
    }

    /// Nominal (unscaled) value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Power-of-ten exponent applied by [`Self::real`].
    #[must_use]
    pub const fn scale_exponent(&self) -> i32 {
        self.scale_exponent
    }

    /// Unit label as displayed next to the nominal value.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Real value: `value * 10^scale_exponent`.
    #[must_use]
    pub fn real(&self) -> f64 {
        self.value * 10f64.powi(self.scale_exponent)
    }

    /// Nominal value rounded to `precision` decimal digits.
    #[must_use]
    pub fn rounded(&self, precision: usize) -> f64 {
        let factor = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
        if !factor.is_finite() {
            return self.value;
        }
        (self.value * factor).round() / factor
    }

    /// Nominal value formatted with `precision` decimals and the unit appended.
    #[must_use]
    pub fn rounded_text(&self, precision: usize) -> String {
        format!("{:.precision$} [{}]", self.value, self.unit)
    }

    /// A new variable with the same unit and scale but a different value.
    #[must_use]
    pub fn with_value(&self, value: f64) -> Self {
        Self::new(value, self.scale_exponent, self.unit.clone())
    }

    /// Re-express the same real value under another scale exponent.
    #[must_use]
    pub fn scaled_to(&self, scale_exponent: i32, unit: impl Into<String>) -> Self {
        Self::new(
            self.real() / 10f64.powi(scale_exponent),
            scale_exponent,
            unit,
        )
    }

    /// Sum of two variables sharing a unit, expressed in `self`'s scale.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::UnitMismatch`] if the units differ.
    pub fn checked_add(&self, other: &Self) -> DemoResult<Self> {
        if self.unit != other.unit {
            return Err(DemoError::UnitMismatch {
                left: self.unit.clone(),
                right: other.unit.clone(),
            });
        }
        let other_nominal = other.real() / 10f64.powi(self.scale_exponent);
        Ok(self.with_value(self.value + other_nominal))
    }

    /// Tolerance-based comparison of real values (relative to the larger magnitude).
    ///
    /// Units must match exactly. Two zeros compare equal for any tolerance.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, rel_tol: f64) -> bool {
        if self.unit != other.unit {
            return false;
        }
        let (a, b) = (self.real(), other.real());
        let scale = a.abs().max(b.abs());
        (a - b).abs() <= rel_tol * scale
    }
}

/// Exact comparison of value, real value and unit.
///
/// No epsilon is applied; use [`Variable::approx_eq`] for computed quantities.
impl PartialEq for Variable {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.real() == other.real() && self.unit == other.unit
    }
}

/// Orders by real value; variables with different units are unordered.
impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.unit != other.unit {
            return None;
        }
        match self.real().partial_cmp(&other.real())? {
            Ordering::Equal if self != other => None,
            ordering => Some(ordering),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_applies_scale() {
        let stiffness = Variable::new(3.0, 3, "kN/m");
        assert!((stiffness.real() - 3000.0).abs() < f64::EPSILON);

        let diameter = Variable::new(2.0, -2, "cm");
        assert!((diameter.real() - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_rounded() {
        let v = Variable::si(1.234_567, "m");
        assert!((v.rounded(3) - 1.235).abs() < 1e-12);
        assert!((v.rounded(0) - 1.0).abs() < 1e-12);
        assert_eq!(v.rounded_text(2), "1.23 [m]");
    }

    #[test]
    fn test_display() {
        assert_eq!(Variable::si(2.0, "m/s").to_string(), "2 [m/s]");
        assert_eq!(Variable::new(0.5, -2, "cm").to_string(), "0.5 [cm]");
    }

    #[test]
    fn test_exact_equality() {
        let a = Variable::si(0.1 + 0.2, "m");
        let b = Variable::si(0.3, "m");
        // Exact comparison keeps the floating-point difference visible.
        assert_ne!(a, b);
        assert!(a.approx_eq(&b, 1e-12));
        assert_eq!(Variable::si(1.0, "m"), Variable::si(1.0, "m"));
        assert_ne!(Variable::si(1.0, "m"), Variable::si(1.0, "s"));
    }

    #[test]
    fn test_same_real_different_scale_not_equal() {
        let cm = Variable::new(100.0, -2, "m");
        let m = Variable::si(1.0, "m");
        assert_ne!(cm, m);
        assert!(cm.approx_eq(&m, 1e-12));
        assert_eq!(cm.partial_cmp(&m), None);
    }

    #[test]
    fn test_ordering() {
        let small = Variable::si(1.0, "m");
        let large = Variable::si(2.0, "m");
        assert!(small < large);
        assert!(large > small);
        assert_eq!(small.partial_cmp(&Variable::si(5.0, "s")), None);
    }

    #[test]
    fn test_checked_add() {
        let a = Variable::si(3.0, "m");
        let b = Variable::si(4.0, "m");
        let sum = a.checked_add(&b).expect("same unit");
        assert_eq!(sum, Variable::si(7.0, "m"));

        let err = a.checked_add(&Variable::si(1.0, "s"));
        assert!(matches!(err, Err(DemoError::UnitMismatch { .. })));
    }

    #[test]
    fn test_checked_add_mixed_scale() {
        let a = Variable::new(1.0, 3, "m");
        let b = Variable::si(500.0, "m");
        let sum = a.checked_add(&b).expect("same unit");
        assert_eq!(sum.scale_exponent(), 3);
        assert!((sum.real() - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaled_to() {
        let d = Variable::si(0.02, "m").scaled_to(-2, "cm");
        assert!((d.value() - 2.0).abs() < 1e-12);
        assert_eq!(d.unit(), "cm");
    }

    #[test]
    fn test_serde_roundtrip_preserves_fields() {
        let v = Variable::new(2.5, -2, "cm");
        let json = serde_json::to_string(&v).expect("serialize");
        assert!(json.contains("\"scale_exponent\":-2"));
        let back: Variable = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, v);
    }
}
