//! Dense supervision-map generation for curved-text detection training.
//!
//! This crate turns polygon text annotations into the pixel-level target maps
//! a TextSnake-style detector is trained against: a text region mask, an
//! effective (non-ignored) mask, a center-region mask, and per-pixel
//! radius/sin/cos maps describing the local stroke geometry.
//!
//! The pipeline for each instance:
//!
//! 1. classify the polygon's head and tail cap edges and split the boundary
//!    into top and bottom sidelines ([`processors::orientation`]);
//! 2. resample both sidelines to a shared point count at equal arc-length
//!    steps ([`processors::resample`]);
//! 3. pair the sidelines point-wise into a centerline, orient it
//!    canonically, and trim the unreliable cap ends;
//! 4. rasterize per-segment quads into the output maps
//!    ([`processors::rasterize`]).
//!
//! # Example
//!
//! ```
//! use textsnake_targets::core::TextSnakeConfig;
//! use textsnake_targets::targets::{TargetImage, TextSnakeTargets};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = TextSnakeTargets::new(TextSnakeConfig::default())?;
//! let image = TargetImage::new(
//!     64,
//!     128,
//!     vec![vec![10.0, 10.0, 90.0, 10.0, 90.0, 30.0, 10.0, 30.0]],
//! );
//! let maps = generator.generate_targets(&image)?;
//! assert_eq!(maps.shape(), (64, 128));
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod processors;
pub mod targets;
pub mod utils;

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::core::{ParallelPolicy, TargetError, TargetResult, TextSnakeConfig};
    pub use crate::targets::{
        TargetGenerator, TargetGeneratorConfig, TargetGeneratorKind, TargetImage, TargetMaps,
        TextSnakeTargets,
    };
    pub use crate::utils::init_tracing;
}
