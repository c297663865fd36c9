use foundation::bounds::Aabb2;
use foundation::math::{LonLat, MapProjection, Vec2, Vec3, WebMercator};
use serde::{Deserialize, Serialize};

/// Camera state: position in projected meters plus a log2 zoom level.
///
/// Zoom increases as the viewport footprint narrows; one step halves it.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl ViewState {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    pub fn from_lon_lat<P: MapProjection>(projection: &P, lon_lat: LonLat, zoom: f64) -> Self {
        let m = projection.lon_lat_to_meters(lon_lat);
        Self::new(m.x, m.y, zoom)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Componentwise linear mix of position and zoom. Not clamped.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Vec3::from(self).lerp(Vec3::from(other), t).into()
    }
}

impl From<ViewState> for Vec3 {
    fn from(v: ViewState) -> Self {
        Vec3::new(v.x, v.y, v.zoom)
    }
}

impl From<Vec3> for ViewState {
    fn from(v: Vec3) -> Self {
        ViewState::new(v.x, v.y, v.z)
    }
}

/// What camera math needs from the live map view.
pub trait MapView {
    type Projection: MapProjection;

    fn projection(&self) -> &Self::Projection;

    /// Viewport width in pixels.
    fn width_px(&self) -> f64;

    /// Current viewport footprint in projected meters.
    fn bounds_rect(&self) -> Aabb2;
}

/// Plain viewport: a center, a zoom level and a pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport<P = WebMercator> {
    projection: P,
    pub center: Vec2,
    pub zoom: f64,
    /// Viewport size in pixels [width, height].
    pub size_px: [f64; 2],
}

impl Viewport<WebMercator> {
    pub fn new(center: Vec2, zoom: f64, size_px: [f64; 2]) -> Self {
        Self::with_projection(WebMercator::default(), center, zoom, size_px)
    }
}

impl<P: MapProjection> Viewport<P> {
    pub fn with_projection(projection: P, center: Vec2, zoom: f64, size_px: [f64; 2]) -> Self {
        Self {
            projection,
            center,
            zoom,
            size_px,
        }
    }

    /// Projected meters covered by one pixel at the current zoom.
    pub fn meters_per_pixel(&self) -> f64 {
        2.0 * P::HALF_CIRCUMFERENCE / (self.projection.tile_size() * self.zoom.exp2())
    }

    pub fn view_state(&self) -> ViewState {
        ViewState::new(self.center.x, self.center.y, self.zoom)
    }

    /// Move the camera to a sampled state (e.g. one fly-to frame).
    pub fn set_view_state(&mut self, state: ViewState) {
        self.center = state.position();
        self.zoom = state.zoom;
    }
}

impl<P: MapProjection> MapView for Viewport<P> {
    type Projection = P;

    fn projection(&self) -> &P {
        &self.projection
    }

    fn width_px(&self) -> f64 {
        self.size_px[0]
    }

    fn bounds_rect(&self) -> Aabb2 {
        let mpp = self.meters_per_pixel();
        Aabb2::from_center_size(
            [self.center.x, self.center.y],
            [self.size_px[0] * mpp, self.size_px[1] * mpp],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{MapView, ViewState, Viewport};
    use foundation::math::{LonLat, MapProjection, Vec2, WebMercator};
    use pretty_assertions::assert_eq;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn zoom_zero_tile_covers_the_world() {
        let v = Viewport::new(Vec2::new(0.0, 0.0), 0.0, [256.0, 256.0]);
        let b = v.bounds_rect();
        assert_close(b.width(), 2.0 * WebMercator::HALF_CIRCUMFERENCE, 1e-6);
        assert_close(b.height(), 2.0 * WebMercator::HALF_CIRCUMFERENCE, 1e-6);
        assert_eq!(v.width_px(), 256.0);
    }

    #[test]
    fn each_zoom_step_halves_the_footprint() {
        let mut v = Viewport::new(Vec2::new(1000.0, -500.0), 3.0, [800.0, 600.0]);
        let w3 = v.bounds_rect().width();
        v.zoom = 4.0;
        let w4 = v.bounds_rect().width();
        assert_close(w3 / w4, 2.0, 1e-12);
    }

    #[test]
    fn set_view_state_round_trips() {
        let mut v = Viewport::new(Vec2::new(0.0, 0.0), 1.0, [640.0, 480.0]);
        let s = ViewState::new(12.5, -7.25, 6.5);
        v.set_view_state(s);
        assert_eq!(v.view_state(), s);
        let b = v.bounds_rect();
        assert_close(0.5 * (b.min[0] + b.max[0]), 12.5, 1e-9);
    }

    #[test]
    fn view_state_from_lon_lat_projects() {
        let p = WebMercator::default();
        let s = ViewState::from_lon_lat(&p, LonLat::new(180.0, 0.0), 4.0);
        assert_close(s.x, WebMercator::HALF_CIRCUMFERENCE, 1e-6);
        assert_close(s.y, 0.0, 1e-9);
        assert_eq!(s.zoom, 4.0);
    }

    #[test]
    fn size_is_taken_as_given() {
        let v = Viewport::new(Vec2::new(0.0, 0.0), 3.0, [0.0, 0.5]);
        assert_eq!(v.size_px, [0.0, 0.5]);
        assert_eq!(v.width_px(), 0.0);
        assert_eq!(v.bounds_rect().width(), 0.0);
    }

    #[test]
    fn view_state_lerp_mixes_zoom_too() {
        let a = ViewState::new(0.0, 0.0, 2.0);
        let b = ViewState::new(100.0, 50.0, 6.0);
        assert_eq!(a.lerp(b, 0.5), ViewState::new(50.0, 25.0, 4.0));
        assert_eq!(a.lerp(b, 0.0), a);
    }
}
