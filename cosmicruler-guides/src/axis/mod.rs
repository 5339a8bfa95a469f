pub mod opts;
pub mod ruler;
