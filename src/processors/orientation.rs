//! Head/tail edge classification and sideline reordering.
//!
//! A curved text polygon has two short "cap" edges (head and tail) and two
//! long boundary curves (top and bottom sidelines). This module locates the
//! caps and splits the boundary into the two sidelines so the downstream
//! stages can pair them point-wise.

use std::cmp::Ordering;

use crate::core::errors::{TargetError, TargetResult};
use crate::core::validation::validate_positive;
use crate::processors::geometry::{Point, centroid, vector_angle, vector_slope};

/// A polygon boundary split into cap edges and sidelines.
#[derive(Debug, Clone)]
pub struct SidelineSplit {
    /// The two vertices of the head edge.
    pub head_edge: [Point; 2],
    /// The two vertices of the tail edge.
    pub tail_edge: [Point; 2],
    /// The boundary run closer to the top of the image (smaller mean y).
    pub top_sideline: Vec<Point>,
    /// The boundary run closer to the bottom of the image (larger mean y).
    pub bot_sideline: Vec<Point>,
}

/// Finds the head and tail edges of a text polygon.
///
/// Returns `[start, end]` vertex index pairs for the head edge and the tail
/// edge, with `end == (start + 1) % n`. The pairs are ordered so the head
/// edge's end index never exceeds the tail edge's end index.
///
/// For polygons with more than four vertices, each edge is scored by the sum
/// of its angular deviations from its two neighbors; the two highest-bending
/// edges are the cap candidates. If the candidates are fewer than 2 or more
/// than 12 positions apart the tail pick is discarded and forced to the edge
/// half the polygon away from the head, so the caps stay roughly opposite
/// when the bending heuristic is ambiguous.
///
/// For quadrangles, the edge pair with the smaller total absolute slope is
/// "horizontal" and the other "vertical"; the caps are the horizontal pair
/// only when the vertical pair is longer than `orientation_thr` times the
/// horizontal pair (a tall, narrow instance).
pub fn find_head_tail(
    points: &[Point],
    orientation_thr: f32,
) -> TargetResult<([usize; 2], [usize; 2])> {
    if points.len() < 4 {
        return Err(TargetError::invalid_input(format!(
            "polygon needs at least 4 vertices, got {}",
            points.len()
        )));
    }
    validate_positive(orientation_thr, "orientation_thr")?;

    let n = points.len();

    if n > 4 {
        let edge_vec: Vec<Point> = (0..n).map(|i| points[(i + 1) % n] - points[i]).collect();

        let theta_sum: Vec<f32> = (0..n)
            .map(|i| {
                let prev = edge_vec[(i + n - 1) % n];
                let next = edge_vec[(i + 1) % n];
                vector_angle(edge_vec[i], prev) + vector_angle(edge_vec[i], next)
            })
            .collect();

        // Two sharpest-bending edges, ties resolved toward the later index.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            theta_sum[b]
                .partial_cmp(&theta_sum[a])
                .unwrap_or(Ordering::Equal)
                .then(b.cmp(&a))
        });
        let head_start = order[0];
        let mut tail_start = order[1];

        let separation = head_start.abs_diff(tail_start);
        if separation < 2 || separation > 12 {
            tail_start = (head_start + n / 2) % n;
        }

        let head_end = (head_start + 1) % n;
        let tail_end = (tail_start + 1) % n;

        if head_end > tail_end {
            Ok(([tail_start, tail_end], [head_start, head_end]))
        } else {
            Ok(([head_start, head_end], [tail_start, tail_end]))
        }
    } else {
        let slope_01_23 =
            vector_slope(points[1] - points[0]) + vector_slope(points[3] - points[2]);
        let slope_12_30 =
            vector_slope(points[2] - points[1]) + vector_slope(points[0] - points[3]);

        let (horizontal_edges, vertical_edges) = if slope_01_23 < slope_12_30 {
            ([[0, 1], [2, 3]], [[3, 0], [1, 2]])
        } else {
            ([[3, 0], [1, 2]], [[0, 1], [2, 3]])
        };

        let vertical_len_sum = points[vertical_edges[0][0]].distance(points[vertical_edges[0][1]])
            + points[vertical_edges[1][0]].distance(points[vertical_edges[1][1]]);
        let horizontal_len_sum = points[horizontal_edges[0][0]]
            .distance(points[horizontal_edges[0][1]])
            + points[horizontal_edges[1][0]].distance(points[horizontal_edges[1][1]]);

        if vertical_len_sum > horizontal_len_sum * orientation_thr {
            Ok((horizontal_edges[0], horizontal_edges[1]))
        } else {
            Ok((vertical_edges[0], vertical_edges[1]))
        }
    }
}

/// Splits a polygon boundary into head edge, tail edge, and top/bottom
/// sidelines.
///
/// Sideline A runs from the head edge's second vertex to the tail edge's
/// second vertex along the boundary (through a doubled copy of the vertex
/// sequence when the run wraps); sideline B is the complement. The sideline
/// whose mean y is larger sits further down in image coordinates and becomes
/// the bottom sideline.
pub fn reorder_poly_edge(points: &[Point], orientation_thr: f32) -> TargetResult<SidelineSplit> {
    let (head_inds, tail_inds) = find_head_tail(points, orientation_thr)?;
    let n = points.len();

    let head_edge = [points[head_inds[0]], points[head_inds[1]]];
    let tail_edge = [points[tail_inds[0]], points[tail_inds[1]]];

    let head_end = head_inds[1];
    // A tail edge ending on vertex 0 closes the boundary at index n.
    let tail_end = if tail_inds[1] < 1 { n } else { tail_inds[1] };

    if head_end > tail_end {
        return Err(TargetError::invalid_input(format!(
            "degenerate head/tail ordering: head ends at {}, tail at {}",
            head_end, tail_end
        )));
    }

    let padded: Vec<Point> = points.iter().chain(points.iter()).copied().collect();
    let sideline1 = padded[head_end..tail_end].to_vec();
    let sideline2 = padded[tail_end..head_end + n].to_vec();

    if sideline1.len() < 2 || sideline2.len() < 2 {
        return Err(TargetError::invalid_input(format!(
            "sidelines too short ({} and {} points); head and tail edges are adjacent",
            sideline1.len(),
            sideline2.len()
        )));
    }

    let mean_shift_y = centroid(&sideline1).y - centroid(&sideline2).y;
    let (top_sideline, bot_sideline) = if mean_shift_y > 0.0 {
        (sideline2, sideline1)
    } else {
        (sideline1, sideline2)
    };

    Ok(SidelineSplit {
        head_edge,
        tail_edge,
        top_sideline,
        bot_sideline,
    })
}
