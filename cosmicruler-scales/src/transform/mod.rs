//! Monotonic maps between a physical domain and the normalized position `p`.
//!
//! Every scale on a ruler shares one parameterization: a physical value (redshift,
//! for the cosmic ruler) is mapped to `p`, where `p = 0` and `p = 1` are the two
//! ends of the printed scale. Values outside the domain are not clamped and land
//! outside `[0, 1]`.
pub mod linear;
pub mod log;
pub mod sqrt;

use cosmicruler_common::value::{ScalarOrArray, ScalarOrArrayRef};
use linear::LinearTransform;
use log::LogTransform;
use serde::{Deserialize, Serialize};
use sqrt::SqrtTransform;
use strum::{Display, EnumString, VariantNames};

use crate::error::RulerScaleError;

/// Shared contract of the per-shape transforms
pub trait PositionTransform {
    /// The `(min, max)` physical bounds, mapped to `p = 0` and `p = 1`
    fn domain(&self) -> (f64, f64);

    fn shape(&self) -> TransformShape;

    /// Maps one physical value to its normalized position
    fn position(&self, value: f64) -> Result<f64, RulerScaleError>;

    /// Maps one normalized position back to its physical value
    fn value(&self, position: f64) -> Result<f64, RulerScaleError>;

    /// Element-wise [`PositionTransform::position`], preserving input order
    fn to_position<'a>(
        &self,
        values: impl Into<ScalarOrArrayRef<'a, f64>>,
    ) -> Result<ScalarOrArray<f64>, RulerScaleError> {
        values.into().try_map(|v| self.position(*v))
    }

    /// Element-wise [`PositionTransform::value`], preserving input order
    fn to_value<'a>(
        &self,
        positions: impl Into<ScalarOrArrayRef<'a, f64>>,
    ) -> Result<ScalarOrArray<f64>, RulerScaleError> {
        positions.into().try_map(|p| self.value(*p))
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransformShape {
    #[strum(to_string = "linear", serialize = "lin")]
    #[serde(alias = "lin")]
    Linear,
    #[strum(to_string = "log", serialize = "logarithmic")]
    #[serde(rename = "log", alias = "logarithmic")]
    Logarithmic,
    Sqrt,
}

impl TransformShape {
    pub fn from_name(name: &str) -> Result<Self, RulerScaleError> {
        name.parse()
            .map_err(|_| RulerScaleError::InvalidShape(name.to_string()))
    }
}

/// Serialized form of a [`CoordinateTransform`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTransformConfig {
    pub domain: (f64, f64),
    pub shape: TransformShape,
}

/// The transform shared by every scale of a ruler.
///
/// Built once, never mutated; scales borrow it when they are converted to
/// normalized positions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "CoordinateTransformConfig",
    into = "CoordinateTransformConfig"
)]
pub enum CoordinateTransform {
    Linear(LinearTransform),
    Logarithmic(LogTransform),
    Sqrt(SqrtTransform),
}

impl CoordinateTransform {
    pub fn new(min: f64, max: f64, shape: TransformShape) -> Result<Self, RulerScaleError> {
        Ok(match shape {
            TransformShape::Linear => LinearTransform::new(min, max)?.into(),
            TransformShape::Logarithmic => LogTransform::new(min, max)?.into(),
            TransformShape::Sqrt => SqrtTransform::new(min, max)?.into(),
        })
    }

    /// Builds a transform from a shape name such as `"sqrt"` or `"log"`
    pub fn from_shape_name(min: f64, max: f64, shape: &str) -> Result<Self, RulerScaleError> {
        Self::new(min, max, TransformShape::from_name(shape)?)
    }
}

impl PositionTransform for CoordinateTransform {
    fn domain(&self) -> (f64, f64) {
        match self {
            CoordinateTransform::Linear(t) => t.domain(),
            CoordinateTransform::Logarithmic(t) => t.domain(),
            CoordinateTransform::Sqrt(t) => t.domain(),
        }
    }

    fn shape(&self) -> TransformShape {
        match self {
            CoordinateTransform::Linear(t) => t.shape(),
            CoordinateTransform::Logarithmic(t) => t.shape(),
            CoordinateTransform::Sqrt(t) => t.shape(),
        }
    }

    fn position(&self, value: f64) -> Result<f64, RulerScaleError> {
        match self {
            CoordinateTransform::Linear(t) => t.position(value),
            CoordinateTransform::Logarithmic(t) => t.position(value),
            CoordinateTransform::Sqrt(t) => t.position(value),
        }
    }

    fn value(&self, position: f64) -> Result<f64, RulerScaleError> {
        match self {
            CoordinateTransform::Linear(t) => t.value(position),
            CoordinateTransform::Logarithmic(t) => t.value(position),
            CoordinateTransform::Sqrt(t) => t.value(position),
        }
    }
}

impl TryFrom<CoordinateTransformConfig> for CoordinateTransform {
    type Error = RulerScaleError;

    fn try_from(config: CoordinateTransformConfig) -> Result<Self, Self::Error> {
        Self::new(config.domain.0, config.domain.1, config.shape)
    }
}

impl From<CoordinateTransform> for CoordinateTransformConfig {
    fn from(transform: CoordinateTransform) -> Self {
        Self {
            domain: transform.domain(),
            shape: transform.shape(),
        }
    }
}

impl From<LinearTransform> for CoordinateTransform {
    fn from(transform: LinearTransform) -> Self {
        CoordinateTransform::Linear(transform)
    }
}

impl From<LogTransform> for CoordinateTransform {
    fn from(transform: LogTransform) -> Self {
        CoordinateTransform::Logarithmic(transform)
    }
}

impl From<SqrtTransform> for CoordinateTransform {
    fn from(transform: SqrtTransform) -> Self {
        CoordinateTransform::Sqrt(transform)
    }
}

/// Rejects NaN/infinite bounds and `min >= max`
pub(crate) fn check_domain(min: f64, max: f64) -> Result<(), RulerScaleError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(RulerScaleError::InvalidDomain {
            min,
            max,
            reason: "bounds must be finite",
        });
    }
    if min >= max {
        return Err(RulerScaleError::InvalidDomain {
            min,
            max,
            reason: "min must be strictly less than max",
        });
    }
    Ok(())
}
