use cosmicruler_scales::error::RulerScaleError;
use cosmicruler_scenegraph::error::RulerSceneGraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulerGuidesError {
    #[error("Invalid scale: {0}")]
    InvalidScale(#[from] RulerScaleError),

    #[error("Scene graph error: {0}")]
    SceneGraph(#[from] RulerSceneGraphError),

    #[error("Scale length must be positive and finite, got {0}")]
    InvalidLength(f32),

    #[error("Scale origin must be finite, got {0:?}")]
    InvalidOrigin([f32; 2]),

    #[error("Non-finite position {position} in scale {scale:?}")]
    NonFinitePosition { scale: String, position: f64 },

    #[error("Unknown tick shape variant {0}, expected 1 or 2")]
    InvalidTickShape(u8),

    #[error("Invalid text style {0:?}")]
    InvalidStyle(String),
}
