//! Geometric processing stages.
//!
//! The stages compose into the target-generation pipeline: polygon geometry
//! primitives, head/tail classification and sideline reordering, arc-length
//! resampling, and scanline rasterization into dense maps.

pub mod geometry;
pub mod orientation;
pub mod rasterize;
pub mod resample;

pub use geometry::{
    EPS, Point, centroid, polyline_length, vector_angle, vector_cos, vector_sin, vector_slope,
};
pub use orientation::{SidelineSplit, find_head_tail, reorder_poly_edge};
pub use rasterize::{draw_center_region_maps, fill_polygon};
pub use resample::{resample_line, resample_sidelines};
