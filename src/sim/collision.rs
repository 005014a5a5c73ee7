//! Axis-aligned rectangle vs circle overlap test
//!
//! The one geometric predicate the game needs: does a falling item's circle
//! overlap the catcher's bounding box. Exact and side-effect-free so catch
//! behavior replays identically from a seed.

use glam::Vec2;

/// Clamp the circle center onto the rectangle to find the nearest point,
/// then compare squared distance against the squared radius.
///
/// Strict inequality: a circle exactly touching the rectangle edge does
/// not count as overlap.
pub fn rect_circle_overlap(rect_min: Vec2, rect_size: Vec2, center: Vec2, radius: f32) -> bool {
    let closest = center.clamp(rect_min, rect_min + rect_size);
    center.distance_squared(closest) < radius * radius
}
