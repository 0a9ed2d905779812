//! Free vibration of an elastically supported rigid angle.
//!
//! # Governing Equations
//!
//! The angle (two arms of mass `m`) rotates about its hinge against two
//! springs of stiffness `k`. Linearised about the rest position:
//!
//! ```text
//! Natural frequency:  ω₀ = √(2k / ((5/3)·m))
//! Frequency:          f₀ = ω₀ / 2π
//! Period:             T  = 2π / ω₀
//! Response:           φ(t) = (φ̇₀ / ω₀) · sin(ω₀ t)
//! ```

use std::f64::consts::TAU;

use super::{ensure_finite, ensure_positive};
use crate::error::PhysicsError;

/// Natural circular frequency `ω₀` (rad/s) for mass `m` (kg) and stiffness `k` (N/m).
///
/// # Errors
///
/// Returns [`PhysicsError::NonPositive`] unless both `m` and `k` are positive.
pub fn natural_frequency(m: f64, k: f64) -> Result<f64, PhysicsError> {
    ensure_positive("mass", m)?;
    ensure_positive("stiffness", k)?;
    ensure_finite("natural_frequency", ((2.0 * k) / ((5.0 / 3.0) * m)).sqrt())
}

/// Frequency `f₀ = ω₀ / 2π` (Hz).
#[must_use]
pub fn frequency(w0: f64) -> f64 {
    w0 / TAU
}

/// Period `T = 2π / ω₀` (s).
///
/// # Errors
///
/// Returns [`PhysicsError::NonPositive`] if `w0 <= 0`.
pub fn period(w0: f64) -> Result<f64, PhysicsError> {
    ensure_positive("circular frequency", w0)?;
    Ok(TAU / w0)
}

/// Angular displacement `φ(t)` (rad) for initial angular velocity `phi0`.
///
/// # Errors
///
/// Returns [`PhysicsError::NonPositive`] if `w0 <= 0`.
pub fn angle_at(phi0: f64, w0: f64, t: f64) -> Result<f64, PhysicsError> {
    ensure_positive("circular frequency", w0)?;
    Ok((phi0 / w0) * (w0 * t).sin())
}

/// Amplitude `φ̇₀ / ω₀` of the angular response.
///
/// # Errors
///
/// Returns [`PhysicsError::NonPositive`] if `w0 <= 0`.
pub fn amplitude(phi0: f64, w0: f64) -> Result<f64, PhysicsError> {
    ensure_positive("circular frequency", w0)?;
    Ok(phi0 / w0)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// w0 · T == 2π for all positive m, k.
        #[test]
        fn prop_frequency_times_period_is_tau(m in 0.01f64..1.0e4, k in 0.01f64..1.0e7) {
            let w0 = natural_frequency(m, k).expect("positive");
            let t = period(w0).expect("positive");
            prop_assert!((w0 * t - TAU).abs() < 1e-9);
        }

        /// |φ(t)| never exceeds the amplitude.
        #[test]
        fn prop_angle_bounded_by_amplitude(phi0 in 0.0f64..10.0, w0 in 0.1f64..100.0, t in 0.0f64..100.0) {
            let phi = angle_at(phi0, w0, t).expect("positive");
            prop_assert!(phi.abs() <= amplitude(phi0, w0).expect("positive") + 1e-12);
        }
    }
}
