//! Background quantities of a flat ΛCDM universe.
//!
//! Distances are in Mpc, times in Gyr. Line-of-sight integrals are evaluated
//! with composite Simpson quadrature in `x = ln(1 + z)`, which keeps the
//! integrand smooth from the local universe out to the CMB.
use serde::{Deserialize, Serialize};

use crate::error::RulerPhysicsError;

/// Speed of light in km/s
pub const SPEED_OF_LIGHT: f64 = 299_792.458;

/// `1 / (1 km/s/Mpc)` expressed in Gyr
const HUBBLE_TIME_GYR: f64 = 977.792_221_673;

/// Photon density parameter times `h^2`, per `K^4` of CMB temperature
const PHOTON_DENSITY_PER_K4: f64 = 4.481_31e-7;

/// Massless neutrino density per photon density and effective species,
/// `7/8 (4/11)^(4/3)`
const NEUTRINO_PHOTON_RATIO: f64 = 0.227_107_317_66;

const QUADRATURE_INTERVALS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CosmologyParams", into = "CosmologyParams")]
pub struct FlatLambdaCdm {
    h0: f64,
    om0: f64,
    tcmb0: f64,
    neff: f64,
    orad0: f64,
    ode0: f64,
}

/// Serialized parameters of a [`FlatLambdaCdm`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CosmologyParams {
    /// Hubble constant in km/s/Mpc
    pub h0: f64,
    /// Matter density today
    pub om0: f64,
    /// CMB temperature today in K; 0 disables radiation
    pub tcmb0: f64,
    pub neff: f64,
}

impl FlatLambdaCdm {
    pub fn new(h0: f64, om0: f64, tcmb0: f64, neff: f64) -> Result<Self, RulerPhysicsError> {
        if !h0.is_finite() || h0 <= 0.0 {
            return Err(RulerPhysicsError::InvalidCosmology(format!(
                "H0 must be positive, got {h0}"
            )));
        }
        if !(0.0..=1.0).contains(&om0) {
            return Err(RulerPhysicsError::InvalidCosmology(format!(
                "Om0 must be within [0, 1], got {om0}"
            )));
        }
        if tcmb0.is_nan() || neff.is_nan() || tcmb0 < 0.0 || neff < 0.0 {
            return Err(RulerPhysicsError::InvalidCosmology(format!(
                "Tcmb0 and Neff must be non-negative, got {tcmb0} and {neff}"
            )));
        }
        Ok(Self::from_params(h0, om0, tcmb0, neff))
    }

    /// Planck 2015 parameters (TT,TE,EE+lowP+lensing+ext), massless neutrinos
    pub fn planck15() -> Self {
        Self::from_params(67.74, 0.3075, 2.7255, 3.046)
    }

    fn from_params(h0: f64, om0: f64, tcmb0: f64, neff: f64) -> Self {
        let h = h0 / 100.0;
        let ogamma0 = PHOTON_DENSITY_PER_K4 * tcmb0.powi(4) / (h * h);
        let onu0 = NEUTRINO_PHOTON_RATIO * neff * ogamma0;
        let orad0 = ogamma0 + onu0;
        Self {
            h0,
            om0,
            tcmb0,
            neff,
            orad0,
            ode0: 1.0 - om0 - orad0,
        }
    }

    pub fn h0(&self) -> f64 {
        self.h0
    }

    pub fn om0(&self) -> f64 {
        self.om0
    }

    pub fn ode0(&self) -> f64 {
        self.ode0
    }

    /// Photon plus neutrino density today
    pub fn orad0(&self) -> f64 {
        self.orad0
    }

    /// `H(z) / H0`
    pub fn efunc(&self, z: f64) -> f64 {
        let zp1 = 1.0 + z;
        (self.om0 * zp1.powi(3) + self.orad0 * zp1.powi(4) + self.ode0).sqrt()
    }

    /// `c / H0` in Mpc
    pub fn hubble_distance(&self) -> f64 {
        SPEED_OF_LIGHT / self.h0
    }

    /// `1 / H0` in Gyr
    pub fn hubble_time(&self) -> f64 {
        HUBBLE_TIME_GYR / self.h0
    }

    /// Line-of-sight comoving distance in Mpc
    pub fn comoving_distance(&self, z: f64) -> f64 {
        // dz = (1 + z) dx
        self.hubble_distance() * self.integrate_ln1pz(z, |zz| (1.0 + zz) / self.efunc(zz))
    }

    /// Comoving transverse distance; equal to the line-of-sight one when flat
    pub fn comoving_transverse_distance(&self, z: f64) -> f64 {
        self.comoving_distance(z)
    }

    pub fn luminosity_distance(&self, z: f64) -> f64 {
        (1.0 + z) * self.comoving_transverse_distance(z)
    }

    pub fn angular_diameter_distance(&self, z: f64) -> f64 {
        self.comoving_transverse_distance(z) / (1.0 + z)
    }

    /// Distance modulus in magnitudes
    pub fn distmod(&self, z: f64) -> f64 {
        5.0 * self.luminosity_distance(z).log10() + 25.0
    }

    /// Time elapsed since light emitted at `z`, in Gyr
    pub fn lookback_time(&self, z: f64) -> f64 {
        // dt = dz / ((1 + z) H) = dx / H
        self.hubble_time() * self.integrate_ln1pz(z, |zz| 1.0 / self.efunc(zz))
    }

    /// Proper transverse size in kpc subtending one arcminute at `z`
    pub fn kpc_proper_per_arcmin(&self, z: f64) -> f64 {
        self.angular_diameter_distance(z) * 1000.0 * (1.0f64 / 60.0).to_radians()
    }

    /// `∫ g(z) dx` from `x = 0` to `ln(1 + z)`
    fn integrate_ln1pz(&self, z: f64, g: impl Fn(f64) -> f64) -> f64 {
        if z == 0.0 {
            return 0.0;
        }
        simpson(|x| g(x.exp_m1()), 0.0, z.ln_1p(), QUADRATURE_INTERVALS)
    }
}

impl Default for FlatLambdaCdm {
    fn default() -> Self {
        Self::planck15()
    }
}

impl TryFrom<CosmologyParams> for FlatLambdaCdm {
    type Error = RulerPhysicsError;

    fn try_from(params: CosmologyParams) -> Result<Self, Self::Error> {
        Self::new(params.h0, params.om0, params.tcmb0, params.neff)
    }
}

impl From<FlatLambdaCdm> for CosmologyParams {
    fn from(cosmo: FlatLambdaCdm) -> Self {
        Self {
            h0: cosmo.h0,
            om0: cosmo.om0,
            tcmb0: cosmo.tcmb0,
            neff: cosmo.neff,
        }
    }
}

/// Composite Simpson rule over `intervals` (rounded up to even) sub-intervals
pub fn simpson(f: impl Fn(f64) -> f64, a: f64, b: f64, intervals: usize) -> f64 {
    let n = (intervals.max(2) + 1) & !1;
    let h = (b - a) / n as f64;
    let interior: f64 = (1..n)
        .map(|i| {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            weight * f(a + i as f64 * h)
        })
        .sum();
    (f(a) + f(b) + interior) * h / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_simpson_is_exact_for_cubics() {
        let integral = simpson(|x| x * x * x - 2.0 * x, 0.0, 2.0, 4);
        assert_approx_eq!(f64, integral, 0.0, epsilon = 1e-12);
        let integral = simpson(f64::sin, 0.0, std::f64::consts::PI, 3);
        assert_approx_eq!(f64, integral, 2.0, epsilon = 1e-2);
    }

    #[test]
    fn test_planck15_density() {
        let cosmo = FlatLambdaCdm::planck15();
        assert_approx_eq!(f64, cosmo.om0() + cosmo.ode0() + cosmo.orad0(), 1.0, epsilon = 1e-12);
        assert_approx_eq!(f64, cosmo.efunc(0.0), 1.0, epsilon = 1e-12);
        assert_approx_eq!(f64, cosmo.orad0(), 9.12e-5, epsilon = 1e-6);
        assert_eq!(
            FlatLambdaCdm::new(67.74, 0.3075, 2.7255, 3.046).unwrap(),
            cosmo
        );
    }

    #[test]
    fn test_planck15_distances() {
        let cosmo = FlatLambdaCdm::planck15();
        assert_eq!(cosmo.comoving_distance(0.0), 0.0);
        assert_approx_eq!(f64, cosmo.comoving_distance(1.0), 3398.7, epsilon = 1.0);
        assert_approx_eq!(f64, cosmo.luminosity_distance(1.0), 6797.3, epsilon = 2.0);
        assert_approx_eq!(f64, cosmo.angular_diameter_distance(1.0), 1699.3, epsilon = 1.0);
        assert_approx_eq!(f64, cosmo.distmod(1.0), 44.16, epsilon = 0.01);
        assert_approx_eq!(f64, cosmo.distmod(2.0), 46.01, epsilon = 0.01);
        assert_approx_eq!(f64, cosmo.kpc_proper_per_arcmin(1.0), 494.3, epsilon = 0.5);
    }

    #[test]
    fn test_planck15_lookback() {
        let cosmo = FlatLambdaCdm::planck15();
        assert_approx_eq!(f64, cosmo.lookback_time(1.0), 7.94, epsilon = 0.01);
        assert_approx_eq!(f64, cosmo.lookback_time(2.0), 10.52, epsilon = 0.01);
        assert_approx_eq!(f64, cosmo.lookback_time(1000.0), 13.81, epsilon = 0.01);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(FlatLambdaCdm::new(-70.0, 0.3, 2.7255, 3.046).is_err());
        assert!(FlatLambdaCdm::new(70.0, 1.3, 2.7255, 3.046).is_err());
        assert!(FlatLambdaCdm::new(f64::NAN, 0.3, 2.7255, 3.046).is_err());
        assert!(FlatLambdaCdm::new(70.0, 0.3, f64::NAN, 3.046).is_err());
        assert!(FlatLambdaCdm::new(70.0, 0.3, 2.7255, f64::NAN).is_err());
        let no_radiation = FlatLambdaCdm::new(70.0, 0.3, 0.0, 3.046).unwrap();
        assert_eq!(no_radiation.orad0(), 0.0);
        assert_approx_eq!(f64, no_radiation.ode0(), 0.7, epsilon = 1e-12);
    }
}
