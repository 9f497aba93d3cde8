//! Input validation utilities.
//!
//! Shared precondition checks used at the public entry points. Callers are
//! responsible for filtering invalid annotations; these helpers turn anything
//! that slips through into an immediate [`TargetError`] instead of a panic or
//! a silently wrong map.

use crate::core::errors::{TargetError, TargetResult};

/// Reasonable upper bound on map dimensions to prevent runaway allocations.
const MAX_DIMENSION: u32 = 32_768;

/// Validates that a value is positive (> 0).
#[inline]
pub fn validate_positive<T: PartialOrd + std::fmt::Display + Default>(
    value: T,
    param_name: &str,
) -> TargetResult<()> {
    if value <= T::default() {
        return Err(TargetError::invalid_input(format!(
            "parameter '{}' must be positive, got: {}",
            param_name, value
        )));
    }
    Ok(())
}

/// Validates that a value lies in the half-open range `[min, max)`.
#[inline]
pub fn validate_half_open_range(
    value: f32,
    min: f32,
    max: f32,
    param_name: &str,
) -> TargetResult<()> {
    if !(value >= min && value < max) {
        return Err(TargetError::invalid_input(format!(
            "parameter '{}' must be in [{}, {}), got: {}",
            param_name, min, max, value
        )));
    }
    Ok(())
}

/// Validates map dimensions.
pub fn validate_image_dimensions(height: u32, width: u32, context: &str) -> TargetResult<()> {
    if height == 0 || width == 0 {
        return Err(TargetError::invalid_input(format!(
            "{}: image dimensions must be positive, got {}x{}",
            context, height, width
        )));
    }

    if height > MAX_DIMENSION || width > MAX_DIMENSION {
        return Err(TargetError::invalid_input(format!(
            "{}: image dimensions exceed maximum of {}x{}, got {}x{}",
            context, MAX_DIMENSION, MAX_DIMENSION, height, width
        )));
    }

    Ok(())
}

/// Validates that two slices have the same length.
#[inline]
pub fn validate_same_length<T, U>(
    items1: &[T],
    items2: &[U],
    name1: &str,
    name2: &str,
) -> TargetResult<()> {
    if items1.len() != items2.len() {
        return Err(TargetError::invalid_input(format!(
            "length mismatch: {} has {} elements, but {} has {} elements",
            name1,
            items1.len(),
            name2,
            items2.len()
        )));
    }
    Ok(())
}

/// Validates a flat polygon annotation: `[x0, y0, ..., xk-1, yk-1]`.
///
/// A polygon must carry an even number of finite coordinates and at least
/// four vertices. `index` is the polygon's position in the caller's list.
pub fn validate_polygon(coords: &[f32], index: usize) -> TargetResult<()> {
    if coords.len() % 2 != 0 {
        return Err(TargetError::invalid_polygon(
            index,
            format!("odd number of coordinates: {}", coords.len()),
        ));
    }
    if coords.len() < 8 {
        return Err(TargetError::invalid_polygon(
            index,
            format!(
                "at least 4 vertices required, got {} coordinates",
                coords.len()
            ),
        ));
    }
    for (i, &c) in coords.iter().enumerate() {
        if !c.is_finite() {
            return Err(TargetError::invalid_polygon(
                index,
                format!("non-finite coordinate at position {}: {}", i, c),
            ));
        }
    }
    Ok(())
}
