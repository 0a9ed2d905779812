//! Closed-form physics behind the demos.
//!
//! Each submodule holds pure functions over SI quantities:
//! - [`fluid`]: continuity, Bernoulli, orifice discharge
//! - [`vibration`]: natural frequency and response of the elastic angle
//!
//! Nothing here knows about controls or variables; models read their
//! Changeables, convert to SI via `real()` and call these functions.

pub mod fluid;
pub mod vibration;

use crate::error::PhysicsError;

/// Standard gravity (m/s²).
pub const G: f64 = 9.81;

/// Density of water (kg/m³).
pub const WATER_DENSITY: f64 = 1000.0;

/// Linear interpolation between `a` and `b` at parameter `t`.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

fn ensure_positive(quantity: &'static str, value: f64) -> Result<(), PhysicsError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::NonPositive { quantity, value })
    }
}

fn ensure_finite(location: &'static str, value: f64) -> Result<f64, PhysicsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PhysicsError::NonFinite(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert!((lerp(1.0, 3.0, 0.0) - 1.0).abs() < f64::EPSILON);
        assert!((lerp(1.0, 3.0, 1.0) - 3.0).abs() < f64::EPSILON);
        assert!((lerp(1.0, 3.0, 0.5) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("x", 1.0).is_ok());
        assert!(ensure_positive("x", 0.0).is_err());
        assert!(ensure_positive("x", f64::NAN).is_err());
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("f", 1.0).is_ok());
        assert_eq!(
            ensure_finite("f", f64::INFINITY),
            Err(PhysicsError::NonFinite("f"))
        );
    }
}
