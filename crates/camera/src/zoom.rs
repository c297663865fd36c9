use foundation::math::{LonLat, MapProjection};
use tracing::trace;

use crate::view::MapView;

/// Zoom level at which the segment `a`–`b`, padded by `buffer`, spans the
/// viewport width exactly.
///
/// `buffer` is a fraction of the distance: 0.0 puts both points on the
/// viewport edges, 0.2 adds a 20% margin. Only the horizontal extent is
/// fitted; a viewport shorter than it is wide can still clip the points
/// vertically.
///
/// Coincident points have no finite enclosing zoom and yield
/// `f32::INFINITY`. No clamping is applied.
pub fn minimum_enclosing_zoom<V: MapView>(a: LonLat, b: LonLat, view: &V, buffer: f32) -> f32 {
    let projection = view.projection();
    let a_m = projection.lon_lat_to_meters(a);
    let b_m = projection.lon_lat_to_meters(b);

    let distance = a_m.distance(b_m) * (1.0 + buffer as f64);
    let focus_scale = distance / (2.0 * <V::Projection as MapProjection>::HALF_CIRCUMFERENCE);
    let view_scale = view.width_px() / projection.tile_size();

    trace!(distance, focus_scale, view_scale, "minimum enclosing zoom");

    // log2(0) would give -inf; report the limit directly.
    if focus_scale == 0.0 {
        return f32::INFINITY;
    }

    (-(focus_scale / view_scale).log2()) as f32
}
