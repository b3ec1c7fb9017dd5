//! Distance and overlap tests shared by every system.

use glam::DVec2;

/// Euclidean distance between two points.
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Whether a circle touches a square grid tile.
///
/// Compares the per-axis offset from the tile centre against
/// `half + radius` independently, so the effective hit-box is the tile
/// grown by `radius` with square corners. Push-back and targeting near tile
/// corners depend on this shape.
pub fn overlaps_circle_tile(center: DVec2, radius: f64, tile_origin: DVec2, tile_size: f64) -> bool {
    let half = tile_size / 2.0;
    let offset = center - (tile_origin + DVec2::splat(half));
    offset.x.abs() < half + radius && offset.y.abs() < half + radius
}

/// Whether two circles intersect (touching does not count).
pub fn circles_overlap(a: DVec2, radius_a: f64, b: DVec2, radius_b: f64) -> bool {
    distance(a, b) < radius_a + radius_b
}

/// Unit vector from `from` toward `to`, or zero when the points coincide.
pub fn direction(from: DVec2, to: DVec2) -> DVec2 {
    (to - from).normalize_or_zero()
}
