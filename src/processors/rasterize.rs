//! Scanline rasterization of polygons into dense maps.
//!
//! All supervision maps are painted with the same even-odd scanline fill, so
//! a quad that is geometrically inside a polygon also rasterizes inside it.
//! Fills overwrite: later polygons and later segments win on overlapping
//! pixels, matching the instance-order contract of the orchestrator.

use ndarray::Array2;

use crate::core::errors::{TargetError, TargetResult};
use crate::core::validation::{validate_half_open_range, validate_same_length};
use crate::processors::geometry::{Point, vector_cos, vector_sin};

/// Reusable scanline buffer for polygon filling.
pub(crate) struct ScanlineFiller {
    /// Intersections of the current scanline with polygon edges.
    intersections: Vec<f32>,
}

impl ScanlineFiller {
    /// Creates a filler with capacity for the given polygon vertex count.
    pub(crate) fn new(max_polygon_points: usize) -> Self {
        Self {
            intersections: Vec::with_capacity(max_polygon_points),
        }
    }

    /// Fills `polygon` (integer pixel vertices, implicitly closed) into `map`
    /// with `value`, overwriting whatever was there.
    pub(crate) fn fill<T: Copy>(
        &mut self,
        map: &mut Array2<T>,
        polygon: &[(i32, i32)],
        value: T,
    ) {
        if polygon.len() < 3 {
            return;
        }
        let (height, width) = map.dim();

        let y_lo = polygon.iter().map(|p| p.1).min().unwrap_or(0).max(0);
        let y_hi = polygon
            .iter()
            .map(|p| p.1)
            .max()
            .unwrap_or(-1)
            .min(height as i32 - 1);

        let n = polygon.len();
        for y in y_lo..=y_hi {
            let yf = y as f32;
            self.intersections.clear();

            for i in 0..n {
                let (x1, y1) = (polygon[i].0 as f32, polygon[i].1 as f32);
                let j = (i + 1) % n;
                let (x2, y2) = (polygon[j].0 as f32, polygon[j].1 as f32);

                if ((y1 <= yf && yf < y2) || (y2 <= yf && yf < y1))
                    && (y2 - y1).abs() > f32::EPSILON
                {
                    self.intersections.push(x1 + (yf - y1) * (x2 - x1) / (y2 - y1));
                }
            }

            self.intersections
                .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            for chunk in self.intersections.chunks(2) {
                if chunk.len() == 2 {
                    let x_start = chunk[0].max(0.0) as usize;
                    let x_end = chunk[1].clamp(0.0, width as f32) as usize;
                    for x in x_start..x_end {
                        map[[y as usize, x]] = value;
                    }
                }
            }
        }
    }
}

/// Fills a closed polygon into a map with a constant value.
pub fn fill_polygon<T: Copy>(map: &mut Array2<T>, polygon: &[(i32, i32)], value: T) {
    ScanlineFiller::new(polygon.len()).fill(map, polygon, value);
}

/// Paints per-segment center-region attributes along an aligned
/// top/bottom/center curve triple.
///
/// For each consecutive index pair along the curves, the segment's local
/// half-thickness (radius) and tangent direction (sin/cos) are computed, and
/// a quad shrunken toward the centerline by `region_shrink_ratio` is filled
/// into all four maps. Shrinking pulls the label region away from the noisy
/// true sidelines.
#[allow(clippy::too_many_arguments)]
pub fn draw_center_region_maps(
    top_line: &[Point],
    bot_line: &[Point],
    center_line: &[Point],
    center_region_mask: &mut Array2<u8>,
    radius_map: &mut Array2<f32>,
    sin_map: &mut Array2<f32>,
    cos_map: &mut Array2<f32>,
    region_shrink_ratio: f32,
) -> TargetResult<()> {
    validate_same_length(top_line, bot_line, "top_line", "bot_line")?;
    validate_same_length(top_line, center_line, "top_line", "center_line")?;
    validate_half_open_range(region_shrink_ratio, 0.0, 1.0, "region_shrink_ratio")?;

    let shape = center_region_mask.dim();
    for (name, map_shape) in [
        ("radius_map", radius_map.dim()),
        ("sin_map", sin_map.dim()),
        ("cos_map", cos_map.dim()),
    ] {
        if map_shape != shape {
            return Err(TargetError::shape_mismatch(
                vec![shape.0, shape.1],
                vec![map_shape.0, map_shape.1],
                name,
            ));
        }
    }

    let mut filler = ScanlineFiller::new(4);

    for i in 0..center_line.len().saturating_sub(1) {
        let top_mid = top_line[i].midpoint(top_line[i + 1]);
        let bot_mid = bot_line[i].midpoint(bot_line[i + 1]);
        let radius = top_mid.distance(bot_mid) / 2.0;

        let text_direction = center_line[i + 1] - center_line[i];
        let sin_theta = vector_sin(text_direction);
        let cos_theta = vector_cos(text_direction);

        let tl = center_line[i] + (top_line[i] - center_line[i]) * region_shrink_ratio;
        let tr = center_line[i + 1] + (top_line[i + 1] - center_line[i + 1]) * region_shrink_ratio;
        let br = center_line[i + 1] + (bot_line[i + 1] - center_line[i + 1]) * region_shrink_ratio;
        let bl = center_line[i] + (bot_line[i] - center_line[i]) * region_shrink_ratio;
        let quad = [tl.trunc(), tr.trunc(), br.trunc(), bl.trunc()];

        filler.fill(center_region_mask, &quad, 1u8);
        filler.fill(radius_map, &quad, radius);
        filler.fill(sin_map, &quad, sin_theta);
        filler.fill(cos_map, &quad, cos_theta);
    }

    Ok(())
}
