//! Arc-length resampling of sidelines.
//!
//! The two sidelines of a polygon usually carry different vertex counts and
//! spacings. Resampling both at equal arc-length steps to a shared point
//! count makes them pairable index by index.

use crate::core::errors::{TargetError, TargetResult};
use crate::core::validation::validate_positive;
use crate::processors::geometry::{EPS, Point, polyline_length};

/// Resamples a polyline to exactly `n + 1` points at equal arc-length
/// spacing.
///
/// Interior points are placed at `i * (total_length / n)` by linear
/// interpolation within the enclosing original segment. The first and last
/// output points are copied from the input endpoints rather than
/// interpolated, so no floating drift accumulates at the boundary.
pub fn resample_line(line: &[Point], n: usize) -> TargetResult<Vec<Point>> {
    if line.len() < 2 {
        return Err(TargetError::invalid_input(format!(
            "line needs at least 2 points to resample, got {}",
            line.len()
        )));
    }
    if n == 0 {
        return Err(TargetError::invalid_input(
            "resample point count must be positive",
        ));
    }

    let segment_lengths: Vec<f32> = line.windows(2).map(|w| w[0].distance(w[1])).collect();
    let total_length: f32 = segment_lengths.iter().sum();

    let mut cumulative = Vec::with_capacity(line.len());
    cumulative.push(0.0f32);
    for &len in &segment_lengths {
        let last = *cumulative.last().unwrap_or(&0.0);
        cumulative.push(last + len);
    }

    let delta = total_length / (n as f32 + EPS);

    let mut resampled = Vec::with_capacity(n + 1);
    resampled.push(line[0]);

    let mut edge = 0usize;
    for i in 1..n {
        let target = i as f32 * delta;
        while edge + 2 < cumulative.len() && target >= cumulative[edge + 1] {
            edge += 1;
        }
        let shift = target - cumulative[edge];
        let ratio = shift / (segment_lengths[edge] + EPS);
        resampled.push(line[edge] + (line[edge + 1] - line[edge]) * ratio);
    }

    resampled.push(line[line.len() - 1]);
    Ok(resampled)
}

/// Resamples two sidelines to the same point count chosen from their mean
/// arc length and the given step size.
///
/// The shared count is `max(trunc(mean_length / step), 1)`, so both outputs
/// always have equal cardinality regardless of how different the two input
/// curves are.
pub fn resample_sidelines(
    sideline1: &[Point],
    sideline2: &[Point],
    resample_step: f32,
) -> TargetResult<(Vec<Point>, Vec<Point>)> {
    validate_positive(resample_step, "resample_step")?;
    if sideline1.len() < 2 || sideline2.len() < 2 {
        return Err(TargetError::invalid_input(format!(
            "sidelines need at least 2 points each, got {} and {}",
            sideline1.len(),
            sideline2.len()
        )));
    }

    let mean_length = (polyline_length(sideline1) + polyline_length(sideline2)) / 2.0;
    let n = ((mean_length / resample_step) as usize).max(1);

    let resampled1 = resample_line(sideline1, n)?;
    let resampled2 = resample_line(sideline2, n)?;
    Ok((resampled1, resampled2))
}
