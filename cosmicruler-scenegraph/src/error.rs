use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulerSceneGraphError {
    #[error("No group at path {0:?}")]
    MissingGroup(Vec<usize>),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error formatting SVG")]
    Format(#[from] std::fmt::Error),

    #[cfg(feature = "png")]
    #[error("usvg error: {0}")]
    UsvgError(#[from] usvg::Error),

    #[cfg(feature = "png")]
    #[error("roxml Error: {0}")]
    RoxmlError(#[from] usvg::roxmltree::Error),

    #[error("Invalid raster size {width}x{height}")]
    InvalidRasterSize { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    PngEncoding(String),

    #[error("Rasterizer panicked: {0}")]
    RasterizerPanic(String),
}
