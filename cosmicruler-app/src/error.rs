use cosmicruler_guides::error::RulerGuidesError;
use cosmicruler_physics::error::RulerPhysicsError;
use cosmicruler_scales::error::RulerScaleError;
use cosmicruler_scenegraph::error::RulerSceneGraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulerAppError {
    #[error("Scale error: {0}")]
    Scale(#[from] RulerScaleError),

    #[error("Rendering error: {0}")]
    Guides(#[from] RulerGuidesError),

    #[error("Scene graph error: {0}")]
    SceneGraph(#[from] RulerSceneGraphError),

    #[error("Physics error: {0}")]
    Physics(#[from] RulerPhysicsError),

    #[error("Invalid layout: {0}")]
    Layout(#[from] serde_json::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
