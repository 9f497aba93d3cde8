//! Supervision-map generation.

pub mod generator;
pub mod maps;
pub mod textsnake;

pub use generator::{TargetGenerator, TargetGeneratorConfig, TargetGeneratorKind};
pub use maps::{TargetImage, TargetMaps};
pub use textsnake::TextSnakeTargets;
