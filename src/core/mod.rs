//! Core building blocks: errors, configuration, and input validation.
//!
//! It also re-exports the commonly used types for convenience.

pub mod config;
pub mod errors;
pub mod validation;

pub use config::{ParallelPolicy, TextSnakeConfig};
pub use errors::{TargetError, TargetResult};
pub use validation::{
    validate_half_open_range, validate_image_dimensions, validate_polygon, validate_positive,
    validate_same_length,
};
