/// Axis-aligned bounding rectangle in projected meters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    /// Rectangle of `size` centered on `center`.
    pub fn from_center_size(center: [f64; 2], size: [f64; 2]) -> Self {
        let hx = 0.5 * size[0];
        let hy = 0.5 * size[1];
        Aabb2 {
            min: [center[0] - hx, center[1] - hy],
            max: [center[0] + hx, center[1] + hy],
        }
    }

    /// Extent along x. Corner order does not matter.
    pub fn width(&self) -> f64 {
        (self.max[0] - self.min[0]).abs()
    }

    /// Extent along y. Corner order does not matter.
    pub fn height(&self) -> f64 {
        (self.max[1] - self.min[1]).abs()
    }
}
