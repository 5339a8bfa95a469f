use cosmicruler_scales::error::RulerScaleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulerPhysicsError {
    #[error("Target {target} is not bracketed by f({zmin}) and f({zmax})")]
    NoSignChange { target: f64, zmin: f64, zmax: f64 },

    #[error("No convergence for target {target} after {iterations} iterations")]
    NotConverged { target: f64, iterations: usize },

    #[error("Invalid search interval [{lo}, {hi}]")]
    InvalidBounds { lo: f64, hi: f64 },

    #[error("Invalid cosmology: {0}")]
    InvalidCosmology(String),

    #[error("Count {count} maps to catalog rank {rank}, outside [{min_rank}, {len}) with an upper neighbour")]
    CountOutOfRange {
        count: f64,
        rank: i64,
        min_rank: usize,
        len: usize,
    },

    #[error("Failed to read catalog {path}: {source}")]
    Catalog {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid scale: {0}")]
    InvalidScale(#[from] RulerScaleError),
}
