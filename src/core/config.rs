//! Configuration types for target generation.
//!
//! All parameters are fixed at construction time and never mutated afterwards;
//! a generator built from a validated config carries no other state.

use serde::{Deserialize, Serialize};

use crate::core::errors::{TargetError, TargetResult};

/// Configuration for TextSnake-style target generation.
///
/// The defaults match the values commonly used for training on curved-text
/// datasets (CTW1500, Total-Text).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSnakeConfig {
    /// Threshold for distinguishing head/tail edges from sidelines among the
    /// four edges of a quadrangle. Must be positive.
    #[serde(default = "TextSnakeConfig::default_orientation_thr")]
    pub orientation_thr: f32,

    /// Arc-length step (in pixels) used when resampling the two sidelines to
    /// a common point count. Must be positive.
    #[serde(default = "TextSnakeConfig::default_resample_step")]
    pub resample_step: f32,

    /// How far each center-region quad corner is pulled from the centerline
    /// back toward the sideline, in `[0, 1)`. Smaller values shrink the
    /// positive-label band harder.
    #[serde(default = "TextSnakeConfig::default_center_region_shrink_ratio")]
    pub center_region_shrink_ratio: f32,
}

impl TextSnakeConfig {
    /// Creates a config with the default parameter values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the orientation threshold.
    pub fn with_orientation_thr(mut self, orientation_thr: f32) -> Self {
        self.orientation_thr = orientation_thr;
        self
    }

    /// Sets the sideline resample step.
    pub fn with_resample_step(mut self, resample_step: f32) -> Self {
        self.resample_step = resample_step;
        self
    }

    /// Sets the center-region shrink ratio.
    pub fn with_center_region_shrink_ratio(mut self, ratio: f32) -> Self {
        self.center_region_shrink_ratio = ratio;
        self
    }

    /// Checks every parameter against its valid range.
    pub fn validate(&self) -> TargetResult<()> {
        if !self.orientation_thr.is_finite() || self.orientation_thr <= 0.0 {
            return Err(TargetError::config_error_detailed(
                "orientation_thr",
                format!(
                    "must be a positive finite number, got {}",
                    self.orientation_thr
                ),
            ));
        }
        if !self.resample_step.is_finite() || self.resample_step <= 0.0 {
            return Err(TargetError::config_error_detailed(
                "resample_step",
                format!("must be a positive finite number, got {}", self.resample_step),
            ));
        }
        if !(self.center_region_shrink_ratio >= 0.0 && self.center_region_shrink_ratio < 1.0) {
            return Err(TargetError::config_error_detailed(
                "center_region_shrink_ratio",
                format!("must be in [0, 1), got {}", self.center_region_shrink_ratio),
            ));
        }
        Ok(())
    }

    fn default_orientation_thr() -> f32 {
        2.0
    }

    fn default_resample_step() -> f32 {
        4.0
    }

    fn default_center_region_shrink_ratio() -> f32 {
        0.3
    }
}

impl Default for TextSnakeConfig {
    fn default() -> Self {
        Self {
            orientation_thr: Self::default_orientation_thr(),
            resample_step: Self::default_resample_step(),
            center_region_shrink_ratio: Self::default_center_region_shrink_ratio(),
        }
    }
}

/// Configuration for the batch entry point's parallelism.
///
/// Per-image generation is strictly single threaded; rayon is only used to
/// spread independent images across workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// Maximum number of threads for the global rayon pool.
    /// If `None`, rayon's default pool size is used.
    #[serde(default)]
    pub max_threads: Option<usize>,

    /// Batches with at most this many images are processed sequentially.
    #[serde(default = "ParallelPolicy::default_sequential_threshold")]
    pub sequential_threshold: usize,
}

impl ParallelPolicy {
    /// Creates a policy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of threads.
    pub fn with_max_threads(mut self, max_threads: Option<usize>) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Sets the sequential/parallel cutover threshold.
    pub fn with_sequential_threshold(mut self, threshold: usize) -> Self {
        self.sequential_threshold = threshold;
        self
    }

    /// Installs the global rayon thread pool with the configured thread count.
    ///
    /// Call once at application startup. Returns `Ok(false)` when
    /// `max_threads` is `None` (nothing to configure), `Ok(true)` when the
    /// pool was installed, and an error if the pool already exists.
    pub fn install_global_thread_pool(&self) -> Result<bool, rayon::ThreadPoolBuildError> {
        if let Some(num_threads) = self.max_threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn default_sequential_threshold() -> usize {
        4
    }
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            max_threads: None,
            sequential_threshold: Self::default_sequential_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TextSnakeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.orientation_thr, 2.0);
        assert_eq!(config.resample_step, 4.0);
        assert_eq!(config.center_region_shrink_ratio, 0.3);
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        assert!(
            TextSnakeConfig::new()
                .with_orientation_thr(0.0)
                .validate()
                .is_err()
        );
        assert!(
            TextSnakeConfig::new()
                .with_resample_step(-1.0)
                .validate()
                .is_err()
        );
        assert!(
            TextSnakeConfig::new()
                .with_center_region_shrink_ratio(1.0)
                .validate()
                .is_err()
        );
        assert!(
            TextSnakeConfig::new()
                .with_orientation_thr(f32::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn thread_pool_is_not_installed_without_a_thread_cap() {
        let installed = ParallelPolicy::new()
            .install_global_thread_pool()
            .expect("no-op install should succeed");
        assert!(!installed);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: TextSnakeConfig =
            serde_json::from_str(r#"{ "resample_step": 8.0 }"#).expect("config should parse");
        assert_eq!(config.resample_step, 8.0);
        assert_eq!(config.orientation_thr, 2.0);
        assert_eq!(config.center_region_shrink_ratio, 0.3);
    }
}
