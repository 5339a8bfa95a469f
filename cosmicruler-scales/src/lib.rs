pub mod error;
pub mod scale;
pub mod ticks;
pub mod transform;
