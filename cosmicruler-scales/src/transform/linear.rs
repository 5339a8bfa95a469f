use super::{check_domain, PositionTransform, TransformShape};
use crate::error::RulerScaleError;

/// Affine map: `p = (value - min) / (max - min)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearTransform {
    domain_start: f64,
    domain_end: f64,
}

impl LinearTransform {
    pub fn new(min: f64, max: f64) -> Result<Self, RulerScaleError> {
        check_domain(min, max)?;
        Ok(Self {
            domain_start: min,
            domain_end: max,
        })
    }

    fn span(&self) -> f64 {
        self.domain_end - self.domain_start
    }
}

impl PositionTransform for LinearTransform {
    fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    fn shape(&self) -> TransformShape {
        TransformShape::Linear
    }

    fn position(&self, value: f64) -> Result<f64, RulerScaleError> {
        Ok((value - self.domain_start) / self.span())
    }

    fn value(&self, position: f64) -> Result<f64, RulerScaleError> {
        Ok(self.domain_start + position * self.span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_scale() -> Result<(), RulerScaleError> {
        let transform = LinearTransform::new(10.0, 30.0)?;
        let values = vec![0.0, 10.0, 20.0, 30.0, 40.0];
        let result = transform.to_position(&values)?.as_vec(values.len(), None);

        assert_approx_eq!(f64, result[0], -0.5); // not clamped
        assert_approx_eq!(f64, result[1], 0.0);
        assert_approx_eq!(f64, result[2], 0.5);
        assert_approx_eq!(f64, result[3], 1.0);
        assert_approx_eq!(f64, result[4], 1.5); // not clamped
        Ok(())
    }

    #[test]
    fn test_invert() -> Result<(), RulerScaleError> {
        let transform = LinearTransform::new(50.0, 950.0)?;
        let positions = vec![0.0, 0.5, 1.0];
        let result = transform.to_value(&positions)?.as_vec(positions.len(), None);
        assert_eq!(result, vec![50.0, 500.0, 950.0]);
        Ok(())
    }

    #[test]
    fn test_reversed_domain_rejected() {
        assert!(matches!(
            LinearTransform::new(2.0, 0.0),
            Err(RulerScaleError::InvalidDomain { .. })
        ));
        assert!(LinearTransform::new(f64::NAN, 1.0).is_err());
    }
}
