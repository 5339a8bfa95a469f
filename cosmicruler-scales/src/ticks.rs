//! Tick synthesis between caller-supplied breakpoints.
//!
//! Ruler scales are not "nice" axes: their breakpoints are chosen by hand, are
//! often non-uniform, and usually live in a source unit (Gyr, magnitudes, Gpc)
//! that is only converted to the ruler's physical domain afterwards. The helpers
//! here subdivide each interval between consecutive breakpoints and optionally
//! push every generated point through a fallible conversion.
use std::convert::Infallible;
use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString, VariantNames};

use crate::error::RulerScaleError;

/// Relative tolerance on `upper / lower == 10` for [`TickPolicy::LogDecade`]
const DECADE_RATIO_TOLERANCE: f64 = 1e-6;

/// How medium and minor ticks are placed between two adjacent breakpoints
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    StrumDisplay,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TickPolicy {
    /// Only the breakpoints themselves, as major ticks
    #[default]
    None,
    /// One medium tick at the midpoint of each interval
    #[strum(to_string = "lin-half", serialize = "lin2")]
    #[serde(alias = "lin2")]
    LinHalf,
    /// Medium ticks at 20/40/60/80% of each interval
    #[strum(to_string = "lin-fifths", serialize = "lin5")]
    #[serde(alias = "lin5")]
    LinFifths,
    /// Medium ticks at 20/40/60/80% and minor ticks at the odd tenths
    #[strum(to_string = "lin-tenths", serialize = "lin10")]
    #[serde(alias = "lin10")]
    LinTenths,
    /// Minor ticks at 2x..9x the lower breakpoint; each interval must span one decade
    #[strum(to_string = "log-decade", serialize = "log10")]
    #[serde(alias = "log10")]
    LogDecade,
}

impl TickPolicy {
    pub fn from_name(name: &str) -> Result<Self, RulerScaleError> {
        name.parse()
            .map_err(|_| RulerScaleError::InvalidTickPolicy(name.to_string()))
    }
}

/// Positions produced by one [`auto_subdivide`] call, to be appended to a scale
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickDeltas {
    pub major: Vec<f64>,
    pub medium: Vec<f64>,
    pub minor: Vec<f64>,
}

/// Interior points of an `count`-way equal subdivision of every interval.
///
/// Breakpoints are sorted first; interval endpoints are never included.
///
/// ```rust
/// use cosmicruler_scales::ticks::subdivide;
///
/// assert_eq!(subdivide(&[1.0, 2.0, 3.0], 2).unwrap(), vec![1.5, 2.5]);
/// ```
pub fn subdivide(breakpoints: &[f64], count: usize) -> Result<Vec<f64>, RulerScaleError> {
    if count == 0 {
        return Err(RulerScaleError::InvalidSubdivision(count));
    }
    if breakpoints.len() < 2 {
        return Err(RulerScaleError::TooFewBreakpoints {
            required: 2,
            actual: breakpoints.len(),
        });
    }
    let sorted = sorted_finite(breakpoints)?;
    let fractions = (1..count).map(|i| (i, count)).collect::<Vec<_>>();
    Ok(sorted
        .iter()
        .tuple_windows()
        .flat_map(|(&lower, &upper)| interpolate(lower, upper, &fractions))
        .collect())
}

/// Major, medium and minor ticks for `breakpoints` under `policy`, in source units
pub fn auto_subdivide(
    breakpoints: &[f64],
    policy: TickPolicy,
) -> Result<TickDeltas, RulerScaleError> {
    auto_subdivide_with(breakpoints, policy, Ok::<f64, Infallible>)
}

/// Like [`auto_subdivide`], converting every generated position with `transform`.
///
/// A point whose conversion fails or is not finite is dropped with a warning;
/// the remaining points are still produced. Configuration problems (non-finite
/// breakpoints, a log-decade interval that is not a decade) fail the whole call
/// before anything is converted.
pub fn auto_subdivide_with<F, E>(
    breakpoints: &[f64],
    policy: TickPolicy,
    transform: F,
) -> Result<TickDeltas, RulerScaleError>
where
    F: Fn(f64) -> Result<f64, E>,
    E: Display,
{
    let sorted = sorted_finite(breakpoints)?;

    if policy == TickPolicy::LogDecade {
        for (&lower, &upper) in sorted.iter().tuple_windows() {
            let ratio = upper / lower;
            let off_decade = ((ratio - 10.0) / 10.0).abs() > DECADE_RATIO_TOLERANCE;
            if lower <= 0.0 || off_decade {
                return Err(RulerScaleError::DecadeRatioMismatch { lower, upper });
            }
        }
    }

    let (medium_fractions, minor_fractions): (Vec<(usize, usize)>, Vec<(usize, usize)>) =
        match policy {
            TickPolicy::None | TickPolicy::LogDecade => (vec![], vec![]),
            TickPolicy::LinHalf => (vec![(1, 2)], vec![]),
            TickPolicy::LinFifths => ((1..5).map(|i| (i, 5)).collect(), vec![]),
            TickPolicy::LinTenths => (
                (1..5).map(|i| (i, 5)).collect(),
                [1, 3, 7, 9].into_iter().map(|i| (i, 10)).collect(),
            ),
        };

    let mut medium = Vec::new();
    let mut minor = Vec::new();
    for (&lower, &upper) in sorted.iter().tuple_windows() {
        medium.extend(interpolate(lower, upper, &medium_fractions));
        if policy == TickPolicy::LogDecade {
            minor.extend((2..=9).map(|k| lower * k as f64));
        } else {
            minor.extend(interpolate(lower, upper, &minor_fractions));
        }
    }

    let convert = |values: &[f64]| {
        values
            .iter()
            .filter_map(|&v| resolve_point(v, &transform))
            .collect::<Vec<_>>()
    };

    Ok(TickDeltas {
        major: convert(&sorted),
        medium: convert(&medium),
        minor: convert(&minor),
    })
}

/// Converts one source value, or logs why it has to be skipped
pub(crate) fn resolve_point<F, E>(value: f64, transform: &F) -> Option<f64>
where
    F: Fn(f64) -> Result<f64, E>,
    E: Display,
{
    match transform(value) {
        Ok(converted) if converted.is_finite() => Some(converted),
        Ok(converted) => {
            log::warn!("Skipping tick at {value}: conversion gave {converted}");
            None
        }
        Err(err) => {
            log::warn!("Skipping tick at {value}: {err}");
            None
        }
    }
}

fn interpolate(
    lower: f64,
    upper: f64,
    fractions: &[(usize, usize)],
) -> impl Iterator<Item = f64> + '_ {
    let span = upper - lower;
    fractions
        .iter()
        .map(move |&(num, den)| lower + span * num as f64 / den as f64)
}

fn sorted_finite(breakpoints: &[f64]) -> Result<Vec<f64>, RulerScaleError> {
    if breakpoints.iter().any(|v| !v.is_finite()) {
        return Err(RulerScaleError::NonFiniteBreakpoint(breakpoints.to_vec()));
    }
    let mut sorted = breakpoints.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_subdivide() {
        assert_eq!(subdivide(&[1.0, 2.0, 3.0], 2).unwrap(), vec![1.5, 2.5]);
        assert_eq!(subdivide(&[3.0, 1.0, 2.0], 2).unwrap(), vec![1.5, 2.5]);

        let ticks = subdivide(&[0.0, 10.0], 10).unwrap();
        assert_eq!(ticks.len(), 9);
        for (i, tick) in ticks.iter().enumerate() {
            assert_approx_eq!(f64, *tick, (i + 1) as f64);
        }
    }

    #[test]
    fn test_subdivide_edge_cases() {
        assert!(subdivide(&[0.0, 1.0], 1).unwrap().is_empty());
        assert_eq!(
            subdivide(&[0.0, 1.0], 0),
            Err(RulerScaleError::InvalidSubdivision(0))
        );
        assert_eq!(
            subdivide(&[1.0], 2),
            Err(RulerScaleError::TooFewBreakpoints {
                required: 2,
                actual: 1
            })
        );
        assert!(matches!(
            subdivide(&[0.0, f64::NAN], 2),
            Err(RulerScaleError::NonFiniteBreakpoint(_))
        ));
    }

    #[test]
    fn test_subdivide_ninths_of_decades() {
        let ticks = subdivide(&[0.1, 1.0, 10.0], 9).unwrap();
        assert_eq!(ticks.len(), 16);
        assert_approx_eq!(f64, ticks[0], 0.2, epsilon = 1e-12);
        assert_approx_eq!(f64, ticks[7], 0.9, epsilon = 1e-12);
        assert_approx_eq!(f64, ticks[8], 2.0, epsilon = 1e-12);
        assert_approx_eq!(f64, ticks[15], 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lin_half() {
        let deltas = auto_subdivide(&[1.0, 2.0, 3.0], TickPolicy::LinHalf).unwrap();
        assert_eq!(deltas.major, vec![1.0, 2.0, 3.0]);
        assert_eq!(deltas.medium, vec![1.5, 2.5]);
        assert!(deltas.minor.is_empty());
    }

    #[test]
    fn test_lin_fifths_and_tenths() {
        let fifths = auto_subdivide(&[0.0, 1.0], TickPolicy::LinFifths).unwrap();
        assert_eq!(fifths.medium, vec![0.2, 0.4, 0.6, 0.8]);
        assert!(fifths.minor.is_empty());

        let tenths = auto_subdivide(&[0.0, 10.0], TickPolicy::LinTenths).unwrap();
        assert_eq!(tenths.major, vec![0.0, 10.0]);
        assert_eq!(tenths.medium, vec![2.0, 4.0, 6.0, 8.0]);
        assert_eq!(tenths.minor, vec![1.0, 3.0, 7.0, 9.0]);
    }

    #[test]
    fn test_none_keeps_single_breakpoint() {
        let deltas = auto_subdivide(&[1.78], TickPolicy::None).unwrap();
        assert_eq!(deltas.major, vec![1.78]);
        assert!(deltas.medium.is_empty());
        assert!(deltas.minor.is_empty());

        assert_eq!(
            auto_subdivide(&[], TickPolicy::LinHalf).unwrap(),
            TickDeltas::default()
        );
    }

    #[test]
    fn test_log_decade() {
        let deltas = auto_subdivide(&[1.0, 10.0, 100.0], TickPolicy::LogDecade).unwrap();
        assert_eq!(deltas.major, vec![1.0, 10.0, 100.0]);
        assert!(deltas.medium.is_empty());
        assert_eq!(deltas.minor.len(), 16);

        let expected = (2..=9)
            .map(|k| k as f64)
            .chain((2..=9).map(|k| 10.0 * k as f64))
            .collect::<Vec<_>>();
        for (tick, expected) in deltas.minor.iter().zip(expected) {
            assert_approx_eq!(f64, *tick, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_log_decade_ratio_mismatch() {
        assert_eq!(
            auto_subdivide(&[1.0, 2.0, 100.0], TickPolicy::LogDecade),
            Err(RulerScaleError::DecadeRatioMismatch {
                lower: 1.0,
                upper: 2.0
            })
        );
        // Floating point decades are accepted
        assert!(auto_subdivide(&[0.01, 0.1], TickPolicy::LogDecade).is_ok());
    }

    #[test]
    fn test_transform_failures_skip_points() {
        let deltas = auto_subdivide_with(&[1.0, 2.0, 3.0], TickPolicy::LinHalf, |v| {
            if v == 2.5 {
                Err("no root")
            } else if v == 3.0 {
                Ok(f64::NAN)
            } else {
                Ok(v * 10.0)
            }
        })
        .unwrap();
        assert_eq!(deltas.major, vec![10.0, 20.0]);
        assert_eq!(deltas.medium, vec![15.0]);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(TickPolicy::from_name("lin2").unwrap(), TickPolicy::LinHalf);
        assert_eq!(
            TickPolicy::from_name("lin-fifths").unwrap(),
            TickPolicy::LinFifths
        );
        assert_eq!(TickPolicy::from_name("log10").unwrap(), TickPolicy::LogDecade);
        assert_eq!(TickPolicy::LinTenths.to_string(), "lin-tenths");
        assert_eq!(
            TickPolicy::from_name("lin3"),
            Err(RulerScaleError::InvalidTickPolicy("lin3".to_string()))
        );
    }
}
