//! Map projection seam.
//!
//! Camera math only needs three things from a projection: a way to turn
//! lon/lat into planar meters, the tile size in pixels, and the fixed
//! half-circumference used to normalize zoom levels. `WebMercator` is the
//! spherical reference implementation used by slippy-map tiles.

use super::Vec2;

/// Spherical Mercator radius (WGS84 semi-major axis, meters).
pub const MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Latitude at which Web Mercator becomes square (degrees).
pub const MERCATOR_MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Default raster tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Geographic coordinates in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

pub trait MapProjection {
    /// Half the width of the projected plane, in meters.
    const HALF_CIRCUMFERENCE: f64;

    fn lon_lat_to_meters(&self, lon_lat: LonLat) -> Vec2;

    /// Tile edge length in pixels.
    fn tile_size(&self) -> f64;
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WebMercator {
    tile_size: u32,
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE)
    }
}

impl WebMercator {
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size: tile_size.max(1),
        }
    }

    pub fn meters_to_lon_lat(&self, meters: Vec2) -> LonLat {
        let lon = (meters.x / MERCATOR_RADIUS).to_degrees();
        let lat = (2.0 * (meters.y / MERCATOR_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2)
            .to_degrees();
        LonLat::new(lon, lat)
    }
}

impl MapProjection for WebMercator {
    const HALF_CIRCUMFERENCE: f64 = std::f64::consts::PI * MERCATOR_RADIUS;

    fn lon_lat_to_meters(&self, lon_lat: LonLat) -> Vec2 {
        let lat = lon_lat
            .lat_deg
            .clamp(-MERCATOR_MAX_LATITUDE, MERCATOR_MAX_LATITUDE);
        let x = lon_lat.lon_deg.to_radians() * MERCATOR_RADIUS;
        let y = (std::f64::consts::FRAC_PI_4 + 0.5 * lat.to_radians())
            .tan()
            .ln()
            * MERCATOR_RADIUS;
        Vec2::new(x, y)
    }

    fn tile_size(&self) -> f64 {
        self.tile_size as f64
    }
}

#[cfg(test)]
mod tests {
    use super::{LonLat, MERCATOR_MAX_LATITUDE, MapProjection, WebMercator};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn origin_maps_to_origin() {
        let m = WebMercator::default().lon_lat_to_meters(LonLat::new(0.0, 0.0));
        assert_close(m.x, 0.0, 1e-9);
        assert_close(m.y, 0.0, 1e-9);
    }

    #[test]
    fn antimeridian_is_half_circumference() {
        let m = WebMercator::default().lon_lat_to_meters(LonLat::new(180.0, 0.0));
        assert_close(m.x, WebMercator::HALF_CIRCUMFERENCE, 1e-6);
    }

    #[test]
    fn max_latitude_is_square() {
        let p = WebMercator::default();
        let m = p.lon_lat_to_meters(LonLat::new(0.0, MERCATOR_MAX_LATITUDE));
        assert_close(m.y, WebMercator::HALF_CIRCUMFERENCE, 1e-3);

        // Poles clamp instead of diverging.
        let pole = p.lon_lat_to_meters(LonLat::new(0.0, 90.0));
        assert_close(pole.y, m.y, 1e-9);
    }

    #[test]
    fn meters_round_trip() {
        let p = WebMercator::default();
        let geo = LonLat::new(-122.4194, 37.7749);
        let rt = p.meters_to_lon_lat(p.lon_lat_to_meters(geo));
        assert_close(rt.lon_deg, geo.lon_deg, 1e-9);
        assert_close(rt.lat_deg, geo.lat_deg, 1e-9);
    }

    #[test]
    fn tile_size_defaults_to_256() {
        assert_eq!(WebMercator::default().tile_size(), 256.0);
        assert_eq!(WebMercator::new(0).tile_size(), 1.0);
        assert_eq!(WebMercator::new(512).tile_size(), 512.0);
    }
}
