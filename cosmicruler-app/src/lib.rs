pub mod error;
pub mod layout;
pub mod ruler;
pub mod scales;
