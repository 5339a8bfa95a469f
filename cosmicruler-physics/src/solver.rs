//! Inverting monotonic pieces of cosmological functions.
//!
//! Scales are often specified in a derived quantity (lookback time, distance
//! modulus, ...) and need the redshift at which that quantity takes a given
//! value. Functions that are not monotonic, like the angular diameter distance,
//! are inverted one branch at a time by moving the search bounds to the peak.
use serde::{Deserialize, Serialize};

use crate::error::RulerPhysicsError;

/// Redshift interval and stopping rules for [`find_value_for_target`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBounds {
    pub zmin: f64,
    pub zmax: f64,
    /// Relative width of the final bracket
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            zmin: 1e-8,
            zmax: 1000.0,
            tolerance: 1e-10,
            max_iterations: 200,
        }
    }
}

impl SearchBounds {
    pub fn new(zmin: f64, zmax: f64) -> Self {
        Self {
            zmin,
            zmax,
            ..Default::default()
        }
    }

    /// Search only below `zmax`, e.g. the rising branch before a peak
    pub fn below(zmax: f64) -> Self {
        Self {
            zmax,
            ..Default::default()
        }
    }

    /// Search only above `zmin`, e.g. the falling branch after a peak
    pub fn above(zmin: f64) -> Self {
        Self {
            zmin,
            ..Default::default()
        }
    }
}

/// Redshift `z` within `bounds` with `f(z) == target`, by bisection.
///
/// `f(z) - target` must change sign over the interval; if it changes sign
/// more than once, one of the crossings is returned.
pub fn find_value_for_target(
    f: impl Fn(f64) -> f64,
    target: f64,
    bounds: SearchBounds,
) -> Result<f64, RulerPhysicsError> {
    let SearchBounds {
        zmin,
        zmax,
        tolerance,
        max_iterations,
    } = bounds;
    if !zmin.is_finite() || !zmax.is_finite() || zmin >= zmax {
        return Err(RulerPhysicsError::InvalidBounds { lo: zmin, hi: zmax });
    }

    let residual = |z: f64| f(z) - target;
    let (mut lo, mut hi) = (zmin, zmax);
    let mut f_lo = residual(lo);
    let f_hi = residual(hi);
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if f_lo.is_nan() || f_hi.is_nan() || f_lo.signum() == f_hi.signum() {
        return Err(RulerPhysicsError::NoSignChange { target, zmin, zmax });
    }

    for _ in 0..max_iterations {
        let mid = 0.5 * (lo + hi);
        if hi - lo <= tolerance * mid.abs().max(f64::MIN_POSITIVE) {
            return Ok(mid);
        }
        let f_mid = residual(mid);
        if f_mid == 0.0 {
            return Ok(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Err(RulerPhysicsError::NotConverged {
        target,
        iterations: max_iterations,
    })
}

/// Location and value of the maximum of a unimodal `f` on `[lo, hi]`, by
/// golden-section search
pub fn find_maximum(
    f: impl Fn(f64) -> f64,
    lo: f64,
    hi: f64,
) -> Result<(f64, f64), RulerPhysicsError> {
    if !lo.is_finite() || !hi.is_finite() || lo >= hi {
        return Err(RulerPhysicsError::InvalidBounds { lo, hi });
    }
    let inv_phi = (5f64.sqrt() - 1.0) / 2.0;
    let (mut a, mut b) = (lo, hi);
    let mut c = b - inv_phi * (b - a);
    let mut d = a + inv_phi * (b - a);
    let (mut f_c, mut f_d) = (f(c), f(d));
    while b - a > 1e-10 * (1.0 + a.abs().max(b.abs())) {
        if f_c > f_d {
            b = d;
            d = c;
            f_d = f_c;
            c = b - inv_phi * (b - a);
            f_c = f(c);
        } else {
            a = c;
            c = d;
            f_c = f_d;
            d = a + inv_phi * (b - a);
            f_d = f(d);
        }
    }
    let x = 0.5 * (a + b);
    log::debug!("Maximum at {x} within [{lo}, {hi}]");
    Ok((x, f(x)))
}
