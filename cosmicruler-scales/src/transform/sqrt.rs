use super::{check_domain, PositionTransform, TransformShape};
use crate::error::RulerScaleError;

/// Square-root map: `p = (sqrt(value) - sqrt(min)) / (sqrt(max) - sqrt(min))`.
///
/// Stretches the low end of the domain, which is why the cosmic ruler uses it
/// for redshift: most of the interesting labels sit below `z = 0.5`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtTransform {
    domain_start: f64,
    domain_end: f64,
    sqrt_start: f64,
    sqrt_span: f64,
}

impl SqrtTransform {
    pub fn new(min: f64, max: f64) -> Result<Self, RulerScaleError> {
        check_domain(min, max)?;
        if min < 0.0 {
            return Err(RulerScaleError::InvalidDomain {
                min,
                max,
                reason: "square-root domain must be non-negative",
            });
        }
        let sqrt_start = min.sqrt();
        Ok(Self {
            domain_start: min,
            domain_end: max,
            sqrt_start,
            sqrt_span: max.sqrt() - sqrt_start,
        })
    }
}

impl PositionTransform for SqrtTransform {
    fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    fn shape(&self) -> TransformShape {
        TransformShape::Sqrt
    }

    fn position(&self, value: f64) -> Result<f64, RulerScaleError> {
        if value.is_nan() || value < 0.0 {
            return Err(RulerScaleError::InvalidValue {
                value,
                shape: "sqrt",
            });
        }
        Ok((value.sqrt() - self.sqrt_start) / self.sqrt_span)
    }

    fn value(&self, position: f64) -> Result<f64, RulerScaleError> {
        let root = self.sqrt_start + position * self.sqrt_span;
        // A negative root has no preimage: squaring it would not invert `position`
        if root < 0.0 {
            return Err(RulerScaleError::InvalidValue {
                value: position,
                shape: "sqrt",
            });
        }
        Ok(root * root)
    }
}
