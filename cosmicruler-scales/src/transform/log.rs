use super::{check_domain, PositionTransform, TransformShape};
use crate::error::RulerScaleError;

/// Logarithmic map: `p = ln(value / min) / ln(max / min)`.
///
/// The base cancels out of the ratio, so natural logarithms are used throughout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogTransform {
    domain_start: f64,
    domain_end: f64,
    ln_start: f64,
    ln_span: f64,
}

impl LogTransform {
    pub fn new(min: f64, max: f64) -> Result<Self, RulerScaleError> {
        check_domain(min, max)?;
        if min <= 0.0 {
            return Err(RulerScaleError::InvalidDomain {
                min,
                max,
                reason: "logarithmic domain must be strictly positive",
            });
        }
        let ln_start = min.ln();
        Ok(Self {
            domain_start: min,
            domain_end: max,
            ln_start,
            ln_span: max.ln() - ln_start,
        })
    }
}

impl PositionTransform for LogTransform {
    fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    fn shape(&self) -> TransformShape {
        TransformShape::Logarithmic
    }

    fn position(&self, value: f64) -> Result<f64, RulerScaleError> {
        if value.is_nan() || value <= 0.0 {
            return Err(RulerScaleError::InvalidValue {
                value,
                shape: "log",
            });
        }
        Ok((value.ln() - self.ln_start) / self.ln_span)
    }

    fn value(&self, position: f64) -> Result<f64, RulerScaleError> {
        Ok((self.ln_start + position * self.ln_span).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_decades_are_evenly_spaced() -> Result<(), RulerScaleError> {
        let transform = LogTransform::new(1.0, 1000.0)?;
        let values = vec![1.0, 10.0, 100.0, 1000.0, 10000.0];
        let result = transform.to_position(&values)?.as_vec(values.len(), None);

        assert_approx_eq!(f64, result[0], 0.0);
        assert_approx_eq!(f64, result[1], 1.0 / 3.0, epsilon = 1e-12);
        assert_approx_eq!(f64, result[2], 2.0 / 3.0, epsilon = 1e-12);
        assert_approx_eq!(f64, result[3], 1.0, epsilon = 1e-12);
        assert_approx_eq!(f64, result[4], 4.0 / 3.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_non_positive_value() -> Result<(), RulerScaleError> {
        let transform = LogTransform::new(0.01, 100.0)?;
        assert_eq!(
            transform.position(0.0),
            Err(RulerScaleError::InvalidValue {
                value: 0.0,
                shape: "log"
            })
        );
        assert!(transform.position(-1.0).is_err());
        assert!(transform.position(f64::NAN).is_err());

        let values = vec![1.0, -1.0];
        assert!(transform.to_position(&values).is_err());
        Ok(())
    }

    #[test]
    fn test_non_positive_domain() {
        assert!(matches!(
            LogTransform::new(0.0, 2.0),
            Err(RulerScaleError::InvalidDomain { .. })
        ));
    }
}
