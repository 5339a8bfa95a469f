pub mod catalog;
pub mod cosmology;
pub mod error;
pub mod solver;
