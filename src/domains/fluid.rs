//! Fluid mechanics: continuity, Bernoulli and orifice discharge.
//!
//! # Governing Equations
//!
//! ```text
//! Continuity:        Q = A₁·u₁ = A₂·u₂   ⇒   u₂ = (A₁/A₂)·u₁
//! Bernoulli:         p₁ − p₂ = ρ/2·(u₂² − u₁²) + ρ·g·(z₂ − z₁)
//! Orifice (Torricelli, n equal holes):
//!                    Q = n·(π d²/4)·√(2 g h)   ⇒   h = 1/(2g) · (4Q / (n π d²))²
//! ```

use std::f64::consts::PI;

use super::{ensure_finite, ensure_positive, G};
use crate::error::PhysicsError;

/// Area of a circular cross-section with diameter `d` (m²).
///
/// # Errors
///
/// Returns [`PhysicsError::NonPositive`] if `d <= 0`.
pub fn circle_area(d: f64) -> Result<f64, PhysicsError> {
    ensure_positive("diameter", d)?;
    Ok(PI * d * d / 4.0)
}

/// Area of a rectangular cross-section (m²).
///
/// # Errors
///
/// Returns [`PhysicsError::NonPositive`] if either side is not positive.
pub fn rect_area(width: f64, height: f64) -> Result<f64, PhysicsError> {
    ensure_positive("width", width)?;
    ensure_positive("height", height)?;
    Ok(width * height)
}

/// Outlet velocity from mass conservation: `u₂ = A₁/A₂ · u₁`.
///
/// # Errors
///
/// Returns [`PhysicsError::NonPositive`] if an area is not positive.
pub fn continuity_velocity(a1: f64, a2: f64, u1: f64) -> Result<f64, PhysicsError> {
    ensure_positive("inlet area", a1)?;
    ensure_positive("outlet area", a2)?;
    ensure_finite("continuity_velocity", a1 / a2 * u1)
}

/// Volumetric flow `Q = A·u` (m³/s).
#[must_use]
pub fn volumetric_flow(area: f64, velocity: f64) -> f64 {
    area * velocity
}

/// Static pressure drop `p₁ − p₂` along a streamline (Pa).
///
/// `z1`/`z2` are the elevations of inlet and outlet, `rho` the fluid density.
///
/// # Errors
///
/// Returns [`PhysicsError::NonPositive`] if `rho <= 0`.
pub fn bernoulli_pressure_drop(
    u1: f64,
    u2: f64,
    z1: f64,
    z2: f64,
    rho: f64,
) -> Result<f64, PhysicsError> {
    ensure_positive("density", rho)?;
    let dynamic = 0.5 * rho * (u2 * u2 - u1 * u1);
    let hydrostatic = rho * G * (z2 - z1);
    ensure_finite("bernoulli_pressure_drop", dynamic + hydrostatic)
}

/// Steady water depth above `holes` equal orifices of diameter `d` at inflow `q`.
///
/// # Errors
///
/// Returns [`PhysicsError::NonPositive`] if there are no holes or `d <= 0`.
pub fn orifice_depth(q: f64, holes: u32, d: f64) -> Result<f64, PhysicsError> {
    ensure_positive("number of holes", f64::from(holes))?;
    ensure_positive("hole diameter", d)?;
    let outflow_velocity = (4.0 * q) / (f64::from(holes) * PI * d * d);
    ensure_finite(
        "orifice_depth",
        (1.0 / (2.0 * G)) * outflow_velocity * outflow_velocity,
    )
}

/// Outflow jet velocity for water depth `h`: `√(2 g h)`.
///
/// # Errors
///
/// Returns [`PhysicsError::NonPositive`] if `h < 0`.
pub fn torricelli_velocity(h: f64) -> Result<f64, PhysicsError> {
    if h < 0.0 {
        return Err(PhysicsError::NonPositive {
            quantity: "water depth",
            value: h,
        });
    }
    Ok((2.0 * G * h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_area() {
        let a = circle_area(0.2).expect("positive");
        assert!((a - PI * 0.01).abs() < 1e-15);
        assert!(circle_area(0.0).is_err());
    }

    #[test]
    fn test_rect_area() {
        assert!((rect_area(0.5, 0.2).expect("positive") - 0.1).abs() < 1e-15);
        assert!(rect_area(-1.0, 1.0).is_err());
    }

    #[test]
    fn test_continuity_scenario() {
        // d1 = 0.2 m, d2 = 0.1 m, u1 = 2 m/s ⇒ u2 = 8 m/s
        let a1 = circle_area(0.2).expect("positive");
        let a2 = circle_area(0.1).expect("positive");
        let u2 = continuity_velocity(a1, a2, 2.0).expect("positive areas");
        assert!((u2 - 8.0).abs() < 1e-12);

        let q1 = volumetric_flow(a1, 2.0);
        let q2 = volumetric_flow(a2, u2);
        assert!((q1 - q2).abs() < 1e-12);
    }

    #[test]
    fn test_bernoulli_level_pipe() {
        // Same velocity and elevation: no pressure change.
        let dp = bernoulli_pressure_drop(3.0, 3.0, 1.0, 1.0, 1000.0).expect("valid");
        assert!(dp.abs() < 1e-12);

        // Acceleration lowers downstream pressure.
        let dp = bernoulli_pressure_drop(2.0, 8.0, 0.0, 0.0, 1000.0).expect("valid");
        assert!((dp - 30_000.0).abs() < 1e-9);

        // Rising pipe costs ρ g Δz.
        let dp = bernoulli_pressure_drop(1.0, 1.0, 0.0, 2.0, 1000.0).expect("valid");
        assert!((dp - 2.0 * 1000.0 * G).abs() < 1e-9);
    }

    #[test]
    fn test_orifice_depth_scenario() {
        // Q = 0.06 m³/s through 25 holes of 2 cm
        let h = orifice_depth(0.06, 25, 0.02).expect("valid");
        let reference = (1.0 / (2.0 * 9.81)) * ((4.0 * 0.06) / (25.0 * PI * 0.02 * 0.02)).powi(2);
        assert!(((h - reference) / reference).abs() < 1e-9);
    }

    #[test]
    fn test_orifice_depth_rejects_degenerate_input() {
        assert!(matches!(
            orifice_depth(0.06, 0, 0.02),
            Err(PhysicsError::NonPositive {
                quantity: "number of holes",
                ..
            })
        ));
        assert!(orifice_depth(0.06, 25, 0.0).is_err());
    }

    #[test]
    fn test_torricelli_inverts_orifice_depth() {
        let h = orifice_depth(0.06, 25, 0.02).expect("valid");
        let v = torricelli_velocity(h).expect("non-negative");
        let q = 25.0 * circle_area(0.02).expect("positive") * v;
        assert!((q - 0.06).abs() < 1e-12);
    }
}
