#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RulerScaleError {
    #[error("Invalid domain [{min}, {max}]: {reason}")]
    InvalidDomain {
        min: f64,
        max: f64,
        reason: &'static str,
    },

    #[error("Value {value} is outside the domain of the {shape} transform")]
    InvalidValue { value: f64, shape: &'static str },

    #[error("Unknown transform shape: {0}")]
    InvalidShape(String),

    #[error("Unknown tick policy: {0}")]
    InvalidTickPolicy(String),

    #[error("Log-decade ticks need upper = 10 x lower, got [{lower}, {upper}]")]
    DecadeRatioMismatch { lower: f64, upper: f64 },

    #[error("At least {required} breakpoints are required, got {actual}")]
    TooFewBreakpoints { required: usize, actual: usize },

    #[error("Subdivision count must be at least 1, got {0}")]
    InvalidSubdivision(usize),

    #[error("Breakpoints must be finite: {0:?}")]
    NonFiniteBreakpoint(Vec<f64>),
}
