//! Example generating TextSnake supervision maps from a JSON annotation file.
//!
//! The annotation file holds one serialized `TargetImage`:
//!
//! ```json
//! {
//!   "height": 64,
//!   "width": 128,
//!   "polygons": [[10.0, 10.0, 90.0, 10.0, 90.0, 30.0, 10.0, 30.0]],
//!   "ignored_polygons": []
//! }
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run --example generate_targets -- [OPTIONS] <ANNOTATIONS>...
//! ```
//!
//! # Arguments
//!
//! * `<ANNOTATIONS>...` - Paths to JSON annotation files
//! * `--resample-step` - Arc-length step for sideline resampling
//! * `--shrink-ratio` - Center-region shrink ratio
//! * `-o, --output-dir` - Directory to save mask visualizations (PNG)

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use textsnake_targets::prelude::*;
use tracing::info;

#[cfg(feature = "visualization")]
use image::GrayImage;

/// Command-line arguments for the target generation example.
#[derive(Parser, Debug)]
#[command(name = "generate_targets")]
#[command(about = "Generate TextSnake training targets from polygon annotations")]
struct Args {
    /// Paths to JSON annotation files
    #[arg(required = true)]
    annotations: Vec<PathBuf>,

    /// Arc-length step for sideline resampling
    #[arg(long, default_value = "4.0")]
    resample_step: f32,

    /// Center-region shrink ratio
    #[arg(long, default_value = "0.3")]
    shrink_ratio: f32,

    /// Maximum number of threads for batch generation
    #[arg(long)]
    max_threads: Option<usize>,

    /// Directory to save mask visualizations (if the visualization feature is enabled)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();

    let config = TextSnakeConfig::new()
        .with_resample_step(args.resample_step)
        .with_center_region_shrink_ratio(args.shrink_ratio);
    let generator = TextSnakeTargets::new(config)?;

    let policy = ParallelPolicy::new().with_max_threads(args.max_threads);
    if policy.install_global_thread_pool()? {
        info!("Installed global thread pool with {:?} threads", args.max_threads);
    }

    let mut images = Vec::with_capacity(args.annotations.len());
    for path in &args.annotations {
        let raw = fs::read_to_string(path)?;
        let image: TargetImage = serde_json::from_str(&raw)?;
        images.push(image);
    }

    let start = Instant::now();
    let all_maps = generator.generate_targets_batch(&images, &policy)?;
    info!(
        "Generated targets for {} image(s) in {:?}",
        all_maps.len(),
        start.elapsed()
    );

    for (path, maps) in args.annotations.iter().zip(&all_maps) {
        let (height, width) = maps.shape();
        let text_pixels = maps.text_region_mask.iter().filter(|&&v| v == 1).count();
        let center_pixels = maps
            .center_region_mask
            .iter()
            .filter(|&&v| v == 1)
            .count();
        let max_radius = maps.radius_map.iter().cloned().fold(0.0f32, f32::max);
        info!(
            "{}: {}x{}, {} text pixels, {} center pixels, max radius {:.1}",
            path.display(),
            width,
            height,
            text_pixels,
            center_pixels,
            max_radius
        );

        #[cfg(feature = "visualization")]
        if let Some(output_dir) = &args.output_dir {
            fs::create_dir_all(output_dir)?;
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "annotation".to_string());
            save_mask(
                &maps.text_region_mask,
                &output_dir.join(format!("{stem}_text_region.png")),
            )?;
            save_mask(
                &maps.center_region_mask,
                &output_dir.join(format!("{stem}_center_region.png")),
            )?;
            info!("Saved mask visualizations to {:?}", output_dir);
        }
    }

    #[cfg(not(feature = "visualization"))]
    if args.output_dir.is_some() {
        info!("Visualization feature not enabled; skipping PNG output");
    }

    Ok(())
}

#[cfg(feature = "visualization")]
fn save_mask(
    mask: &ndarray::Array2<u8>,
    path: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let (height, width) = mask.dim();
    let mut image = GrayImage::new(width as u32, height as u32);
    for ((y, x), &v) in mask.indexed_iter() {
        image.put_pixel(x as u32, y as u32, image::Luma([v * 255]));
    }
    image.save(path)?;
    Ok(())
}
