//! TextSnake supervision-map generation.
//!
//! [`TextSnakeTargets`] turns polygon annotations for one image into the six
//! dense maps used to train a TextSnake-style curved-text detector: text
//! region mask, effective (non-ignored) mask, center-region mask, and
//! per-pixel radius/sin/cos orientation maps.
//!
//! Instances are processed strictly in input order, and every fill
//! overwrites: where instances or segments overlap, the later one wins. This
//! ordering is part of the contract, not an accident of implementation.

use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

use crate::core::config::{ParallelPolicy, TextSnakeConfig};
use crate::core::errors::TargetResult;
use crate::core::validation::{validate_image_dimensions, validate_polygon};
use crate::processors::geometry::{Point, vector_slope};
use crate::processors::orientation::reorder_poly_edge;
use crate::processors::rasterize::{draw_center_region_maps, fill_polygon};
use crate::processors::resample::resample_sidelines;
use crate::targets::maps::{TargetImage, TargetMaps};

/// Generator for TextSnake training targets.
///
/// Configuration is fixed at construction; each generation call allocates
/// only its own output maps and shares no state, so one generator may be
/// used from many threads for different images at once.
#[derive(Debug, Clone)]
pub struct TextSnakeTargets {
    orientation_thr: f32,
    resample_step: f32,
    center_region_shrink_ratio: f32,
}

impl TextSnakeTargets {
    /// Creates a generator from a validated configuration.
    pub fn new(config: TextSnakeConfig) -> TargetResult<Self> {
        config.validate()?;
        Ok(Self {
            orientation_thr: config.orientation_thr,
            resample_step: config.resample_step,
            center_region_shrink_ratio: config.center_region_shrink_ratio,
        })
    }

    /// Converts a flat coordinate list into polygon points.
    ///
    /// Coordinates are truncated to integer pixels up front, so every later
    /// geometric step sees the same pixel-grid polygon the masks are filled
    /// from.
    fn polygon_points(coords: &[f32]) -> Vec<Point> {
        coords
            .chunks_exact(2)
            .map(|c| Point::new(c[0] as i32 as f32, c[1] as i32 as f32))
            .collect()
    }

    fn polygon_pixels(points: &[Point]) -> Vec<(i32, i32)> {
        points.iter().map(|p| p.trunc()).collect()
    }

    /// Rasterizes all valid polygons into a 0/1 text-region mask.
    pub fn generate_text_region_mask(
        &self,
        height: u32,
        width: u32,
        polygons: &[Vec<f32>],
    ) -> TargetResult<Array2<u8>> {
        validate_image_dimensions(height, width, "text region mask")?;

        let mut mask = Array2::<u8>::zeros((height as usize, width as usize));
        for (index, coords) in polygons.iter().enumerate() {
            validate_polygon(coords, index)?;
            let pixels = Self::polygon_pixels(&Self::polygon_points(coords));
            fill_polygon(&mut mask, &pixels, 1u8);
        }
        Ok(mask)
    }

    /// Builds the effective mask: ones everywhere, zero inside every ignored
    /// polygon. Pixels at zero are excluded from the training loss.
    pub fn generate_effective_mask(
        &self,
        height: u32,
        width: u32,
        ignored_polygons: &[Vec<f32>],
    ) -> TargetResult<Array2<u8>> {
        validate_image_dimensions(height, width, "effective mask")?;

        let mut mask = Array2::<u8>::ones((height as usize, width as usize));
        for (index, coords) in ignored_polygons.iter().enumerate() {
            validate_polygon(coords, index)?;
            let pixels = Self::polygon_pixels(&Self::polygon_points(coords));
            fill_polygon(&mut mask, &pixels, 0u8);
        }
        Ok(mask)
    }

    /// Generates the center-region mask and the radius/sin/cos attribute
    /// maps for all valid polygons, in input order.
    pub fn generate_center_mask_attrib_maps(
        &self,
        height: u32,
        width: u32,
        polygons: &[Vec<f32>],
    ) -> TargetResult<(Array2<u8>, Array2<f32>, Array2<f32>, Array2<f32>)> {
        validate_image_dimensions(height, width, "center region maps")?;

        let shape = (height as usize, width as usize);
        let mut center_region_mask = Array2::<u8>::zeros(shape);
        let mut radius_map = Array2::<f32>::zeros(shape);
        let mut sin_map = Array2::<f32>::zeros(shape);
        let mut cos_map = Array2::<f32>::zeros(shape);

        for (index, coords) in polygons.iter().enumerate() {
            validate_polygon(coords, index)?;
            let points = Self::polygon_points(coords);

            let split = reorder_poly_edge(&points, self.orientation_thr)?;
            let (mut top_line, mut bot_line) = resample_sidelines(
                &split.top_sideline,
                &split.bot_sideline,
                self.resample_step,
            )?;
            // The bottom sideline was traversed in the opposite rotational
            // direction around the boundary; reverse it so index i of both
            // lines belongs to the same cross-section.
            bot_line.reverse();

            let mut center_line: Vec<Point> = top_line
                .iter()
                .zip(&bot_line)
                .map(|(t, b)| t.midpoint(*b))
                .collect();

            // Canonical direction: steep curves run downward, others run
            // rightward. All three lines flip together to stay aligned.
            let displacement = center_line[center_line.len() - 1] - center_line[0];
            let flip = if vector_slope(displacement) > 0.9 {
                displacement.y < 0.0
            } else {
                displacement.x < 0.0
            };
            if flip {
                center_line.reverse();
                top_line.reverse();
                bot_line.reverse();
            }

            // Drop the cap regions near both text ends, where the local
            // orientation estimate is least reliable.
            let head_shrink_len = top_line[0].distance(bot_line[0]) / 4.0;
            let tail_shrink_len =
                top_line[top_line.len() - 1].distance(bot_line[bot_line.len() - 1]) / 4.0;
            let head_shrink_num = (head_shrink_len / self.resample_step).floor() as usize;
            let tail_shrink_num = (tail_shrink_len / self.resample_step).floor() as usize;

            if center_line.len() > head_shrink_num + tail_shrink_num + 2 {
                for line in [&mut center_line, &mut top_line, &mut bot_line] {
                    line.drain(..head_shrink_num);
                    line.truncate(line.len() - tail_shrink_num);
                }
            }

            debug!(
                instance = index,
                vertices = points.len(),
                segments = center_line.len().saturating_sub(1),
                "rasterizing center region"
            );

            draw_center_region_maps(
                &top_line,
                &bot_line,
                &center_line,
                &mut center_region_mask,
                &mut radius_map,
                &mut sin_map,
                &mut cos_map,
                self.center_region_shrink_ratio,
            )?;
        }

        Ok((center_region_mask, radius_map, sin_map, cos_map))
    }

    /// Generates all six supervision maps for one image.
    ///
    /// Inputs are validated up front; any malformed polygon or dimension
    /// fails the whole call before a single map is produced.
    pub fn generate_targets(&self, image: &TargetImage) -> TargetResult<TargetMaps> {
        validate_image_dimensions(image.height, image.width, "target generation")?;
        for (index, coords) in image.polygons.iter().enumerate() {
            validate_polygon(coords, index)?;
        }
        for (index, coords) in image.ignored_polygons.iter().enumerate() {
            validate_polygon(coords, index)?;
        }

        let text_region_mask =
            self.generate_text_region_mask(image.height, image.width, &image.polygons)?;
        let effective_mask =
            self.generate_effective_mask(image.height, image.width, &image.ignored_polygons)?;
        let (center_region_mask, radius_map, sin_map, cos_map) =
            self.generate_center_mask_attrib_maps(image.height, image.width, &image.polygons)?;

        Ok(TargetMaps {
            text_region_mask,
            effective_mask,
            center_region_mask,
            radius_map,
            sin_map,
            cos_map,
        })
    }

    /// Generates targets for a batch of independent images.
    ///
    /// Small batches run sequentially; larger ones are spread across the
    /// rayon pool. Per-image computation is unchanged either way, and the
    /// output order matches the input order.
    pub fn generate_targets_batch(
        &self,
        images: &[TargetImage],
        policy: &ParallelPolicy,
    ) -> TargetResult<Vec<TargetMaps>> {
        if images.len() <= policy.sequential_threshold {
            images.iter().map(|img| self.generate_targets(img)).collect()
        } else {
            images
                .par_iter()
                .map(|img| self.generate_targets(img))
                .collect()
        }
    }
}

impl Default for TextSnakeTargets {
    fn default() -> Self {
        Self::new(TextSnakeConfig::default()).expect("default configuration is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_poly(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<f32> {
        vec![x0, y0, x1, y0, x1, y1, x0, y1]
    }

    fn generator() -> TextSnakeTargets {
        TextSnakeTargets::default()
    }

    #[test]
    fn text_region_mask_is_binary_with_exact_shape() {
        let mask = generator()
            .generate_text_region_mask(24, 48, &[rect_poly(2.0, 3.0, 40.0, 12.0)])
            .expect("mask generation should succeed");

        assert_eq!(mask.dim(), (24, 48));
        assert!(mask.iter().all(|&v| v == 0 || v == 1));
        assert!(mask.iter().any(|&v| v == 1));
        assert_eq!(mask[[5, 10]], 1);
        assert_eq!(mask[[20, 10]], 0);
    }

    #[test]
    fn effective_mask_zeroes_ignored_regions() {
        let mask = generator()
            .generate_effective_mask(16, 32, &[rect_poly(4.0, 4.0, 12.0, 10.0)])
            .expect("mask generation should succeed");

        assert_eq!(mask[[0, 0]], 1);
        assert_eq!(mask[[6, 8]], 0);
        assert!(mask.iter().all(|&v| v == 0 || v == 1));
    }

    #[test]
    fn center_region_lies_inside_text_region() {
        let tgen = generator();
        let polys = vec![rect_poly(2.0, 3.0, 50.0, 13.0)];

        let text = tgen
            .generate_text_region_mask(32, 64, &polys)
            .expect("text mask should succeed");
        let (center, _, _, _) = tgen
            .generate_center_mask_attrib_maps(32, 64, &polys)
            .expect("center maps should succeed");

        assert!(center.iter().any(|&v| v == 1));
        for ((r, c), &v) in center.indexed_iter() {
            if v == 1 {
                assert_eq!(text[[r, c]], 1, "center pixel ({r},{c}) outside text");
            }
        }
    }

    #[test]
    fn horizontal_instance_has_rightward_orientation() {
        let (center, radius, sin, cos) = generator()
            .generate_center_mask_attrib_maps(32, 64, &[rect_poly(0.0, 4.0, 60.0, 14.0)])
            .expect("center maps should succeed");

        let mut checked = 0;
        for ((r, c), &v) in center.indexed_iter() {
            if v == 1 {
                assert!((radius[[r, c]] - 5.0).abs() < 1e-3);
                assert!(sin[[r, c]].abs() < 1e-3);
                assert!((cos[[r, c]] - 1.0).abs() < 1e-3);
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn reversed_vertex_order_still_yields_rightward_orientation() {
        // Same rectangle, boundary listed in the opposite rotational order.
        let poly = vec![0.0, 4.0, 0.0, 14.0, 60.0, 14.0, 60.0, 4.0];
        let (center, _, _, cos) = generator()
            .generate_center_mask_attrib_maps(32, 64, &[poly])
            .expect("center maps should succeed");

        let mut checked = 0;
        for ((r, c), &v) in center.indexed_iter() {
            if v == 1 {
                assert!(cos[[r, c]] > 0.9, "cos at ({r},{c}) = {}", cos[[r, c]]);
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn vertical_instance_has_downward_orientation() {
        let (center, _, sin, cos) = generator()
            .generate_center_mask_attrib_maps(64, 32, &[rect_poly(4.0, 0.0, 12.0, 60.0)])
            .expect("center maps should succeed");

        let mut checked = 0;
        for ((r, c), &v) in center.indexed_iter() {
            if v == 1 {
                assert!((sin[[r, c]] - 1.0).abs() < 1e-3);
                assert!(cos[[r, c]].abs() < 1e-3);
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn later_instances_overwrite_earlier_ones() {
        let config = TextSnakeConfig::new().with_center_region_shrink_ratio(0.5);
        let tgen = TextSnakeTargets::new(config).expect("config should be valid");

        // Thick band then a thinner band overlapping its lower half.
        let first = rect_poly(0.0, 0.0, 60.0, 20.0);
        let second = rect_poly(0.0, 8.0, 60.0, 24.0);

        let (_, radius, _, _) = tgen
            .generate_center_mask_attrib_maps(32, 64, &[first.clone(), second.clone()])
            .expect("center maps should succeed");
        // Row 13, col 30 is inside both center regions; the second
        // instance's half-thickness (8) must stand.
        assert!((radius[[13, 30]] - 8.0).abs() < 1e-3, "{}", radius[[13, 30]]);

        let (_, radius_flipped, _, _) = tgen
            .generate_center_mask_attrib_maps(32, 64, &[second, first])
            .expect("center maps should succeed");
        assert!(
            (radius_flipped[[13, 30]] - 10.0).abs() < 1e-3,
            "{}",
            radius_flipped[[13, 30]]
        );
    }

    #[test]
    fn generate_targets_produces_consistent_maps() {
        let image = TargetImage::new(
            48,
            96,
            vec![
                rect_poly(4.0, 6.0, 70.0, 16.0),
                rect_poly(10.0, 24.0, 80.0, 36.0),
            ],
        )
        .with_ignored_polygons(vec![rect_poly(84.0, 2.0, 94.0, 10.0)]);

        let maps = generator()
            .generate_targets(&image)
            .expect("target generation should succeed");

        assert_eq!(maps.shape(), (48, 96));
        assert_eq!(maps.effective_mask.dim(), (48, 96));
        assert_eq!(maps.effective_mask[[5, 88]], 0);
        assert!(maps.radius_map.iter().all(|&v| v >= 0.0));
        for ((r, c), &v) in maps.center_region_mask.indexed_iter() {
            if v == 1 {
                let s = maps.sin_map[[r, c]];
                let co = maps.cos_map[[r, c]];
                assert!((-1.0..=1.0).contains(&s));
                assert!((-1.0..=1.0).contains(&co));
                assert!((s * s + co * co - 1.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn malformed_inputs_fail_without_partial_output() {
        let tgen = generator();

        // Odd coordinate count
        let image = TargetImage::new(32, 32, vec![vec![0.0, 0.0, 10.0, 0.0, 10.0]]);
        assert!(tgen.generate_targets(&image).is_err());

        // Too few vertices
        let image = TargetImage::new(32, 32, vec![vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0]]);
        assert!(tgen.generate_targets(&image).is_err());

        // Malformed ignored polygon also fails the whole call
        let image = TargetImage::new(32, 32, vec![rect_poly(0.0, 0.0, 10.0, 5.0)])
            .with_ignored_polygons(vec![vec![1.0, 1.0, 2.0]]);
        assert!(tgen.generate_targets(&image).is_err());

        // Zero-sized image
        let image = TargetImage::new(0, 32, vec![rect_poly(0.0, 0.0, 10.0, 5.0)]);
        assert!(tgen.generate_targets(&image).is_err());
    }

    #[test]
    fn default_generator_matches_default_config() {
        let image = TargetImage::new(24, 48, vec![rect_poly(2.0, 2.0, 40.0, 10.0)]);
        let from_config = TextSnakeTargets::new(TextSnakeConfig::default())
            .expect("default config should be valid");

        let a = TextSnakeTargets::default()
            .generate_targets(&image)
            .expect("generation should succeed");
        let b = from_config
            .generate_targets(&image)
            .expect("generation should succeed");
        assert_eq!(a.center_region_mask, b.center_region_mask);
        assert_eq!(a.radius_map, b.radius_map);
    }

    #[test]
    fn parallel_batches_preserve_input_order() {
        let tgen = generator();
        // Distinct widths per image so any ordering mix-up changes the maps.
        let images: Vec<TargetImage> = (0..6)
            .map(|i| {
                let width = 20.0 + 4.0 * i as f32;
                TargetImage::new(24, 64, vec![rect_poly(2.0, 2.0, width, 10.0)])
            })
            .collect();

        // Threshold 0 forces every batch through the parallel path.
        let policy = ParallelPolicy::new().with_sequential_threshold(0);
        let batched = tgen
            .generate_targets_batch(&images, &policy)
            .expect("batch generation should succeed");
        assert_eq!(batched.len(), images.len());

        for (image, maps) in images.iter().zip(&batched) {
            let single = tgen
                .generate_targets(image)
                .expect("single generation should succeed");
            assert_eq!(single.text_region_mask, maps.text_region_mask);
            assert_eq!(single.center_region_mask, maps.center_region_mask);
            assert_eq!(single.radius_map, maps.radius_map);
        }
    }

    #[test]
    fn batch_results_match_single_image_results() {
        let tgen = generator();
        let images = vec![
            TargetImage::new(24, 48, vec![rect_poly(2.0, 2.0, 40.0, 10.0)]),
            TargetImage::new(32, 32, vec![rect_poly(4.0, 4.0, 12.0, 28.0)]),
        ];

        let batched = tgen
            .generate_targets_batch(&images, &ParallelPolicy::default())
            .expect("batch generation should succeed");
        assert_eq!(batched.len(), 2);

        for (image, maps) in images.iter().zip(&batched) {
            let single = tgen
                .generate_targets(image)
                .expect("single generation should succeed");
            assert_eq!(single.text_region_mask, maps.text_region_mask);
            assert_eq!(single.center_region_mask, maps.center_region_mask);
            assert_eq!(single.radius_map, maps.radius_map);
            assert_eq!(single.sin_map, maps.sin_map);
            assert_eq!(single.cos_map, maps.cos_map);
        }
    }
}
