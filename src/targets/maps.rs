//! Input and output data types for target generation.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// One annotated image: dimensions plus polygon annotations.
///
/// Each polygon is a flat coordinate list `[x0, y0, ..., xk-1, yk-1]` with at
/// least four vertices. `ignored_polygons` mark regions excluded from
/// supervision (unreadable or do-not-care text).
///
/// This struct is immutable input; generation never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetImage {
    /// Image height in pixels.
    pub height: u32,
    /// Image width in pixels.
    pub width: u32,
    /// Valid text instances.
    pub polygons: Vec<Vec<f32>>,
    /// Instances excluded from the loss.
    #[serde(default)]
    pub ignored_polygons: Vec<Vec<f32>>,
}

impl TargetImage {
    /// Creates an input with no ignored instances.
    pub fn new(height: u32, width: u32, polygons: Vec<Vec<f32>>) -> Self {
        Self {
            height,
            width,
            polygons,
            ignored_polygons: Vec::new(),
        }
    }

    /// Sets the ignored polygon list.
    pub fn with_ignored_polygons(mut self, ignored_polygons: Vec<Vec<f32>>) -> Self {
        self.ignored_polygons = ignored_polygons;
        self
    }
}

/// The six dense supervision maps produced for one image.
///
/// All maps share the shape `height x width`. Masks hold only 0/1; the radius
/// map is non-negative; sin/cos maps lie in `[-1, 1]`. Where instances
/// overlap, the later-processed instance's values stand.
#[derive(Debug, Clone)]
pub struct TargetMaps {
    /// 1 inside any valid text polygon.
    pub text_region_mask: Array2<u8>,
    /// 1 where the loss applies; 0 inside ignored polygons.
    pub effective_mask: Array2<u8>,
    /// 1 inside the shrunken center band of any instance.
    pub center_region_mask: Array2<u8>,
    /// Local half-thickness of the text stroke, on the center region.
    pub radius_map: Array2<f32>,
    /// Sine of the local tangent direction, on the center region.
    pub sin_map: Array2<f32>,
    /// Cosine of the local tangent direction, on the center region.
    pub cos_map: Array2<f32>,
}

impl TargetMaps {
    /// The common `(height, width)` shape of all maps.
    pub fn shape(&self) -> (usize, usize) {
        self.text_region_mask.dim()
    }
}
