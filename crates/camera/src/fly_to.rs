//! Optimal pan/zoom curves (van Wijk & Nuij, "Smooth and efficient zooming
//! and panning").
//!
//! A fly-to between two distant camera states zooms out while it travels so
//! that both ends stay in context, then zooms back in. The path is solved
//! once into a [`FlyToCurve`]; evaluating it is a pure function of progress.
//!
//! Notation follows the paper:
//! - `w0`, `w1`: viewport footprint width at the start and end zoom.
//! - `u1`: planar distance between the two centers.
//! - `rho`: curvature preference, see [`DEFAULT_RHO`](crate::DEFAULT_RHO).
//! - `S`: total path length in curve units, used as the duration.

use foundation::math::Vec2;
use tracing::{debug, trace};

use crate::config::FlyToConfig;
use crate::view::{MapView, ViewState};

/// Planar distance below which a fly-to is treated as zoom-only.
///
/// The hyperbolic solve divides by `u1`; below machine epsilon the
/// coefficients are meaningless.
pub const MIN_PAN_DISTANCE: f64 = f64::EPSILON;

/// Solved coefficients of a fly-to path.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlyToCoefficients {
    pub w0: f64,
    pub w1: f64,
    pub rho: f64,
    pub r0: f64,
    pub r1: f64,
    pub u1: f64,
    pub c0: Vec2,
    pub c1: Vec2,
    /// Whether the curve pans at all. `false` means linear interpolation.
    pub is_move: bool,
}

impl FlyToCoefficients {
    /// Distance covered along the pan after `s` curve units.
    ///
    /// `cosh r0 * tanh(rho*s + r0) - sinh r0` rewritten as
    /// `sinh(rho*s) / cosh(rho*s + r0)`; the difference form cancels badly
    /// once `|r0|` is large (short pans with big zoom changes).
    fn u(&self, s: f64) -> f64 {
        let a = self.w0 / (self.rho * self.rho);
        a * (self.rho * s).sinh() / (self.rho * s + self.r0).cosh()
    }

    /// Footprint width after `s` curve units, relative to `w0`.
    fn w(&self, s: f64) -> f64 {
        self.r0.cosh() / (self.rho * s + self.r0).cosh()
    }
}

/// An immutable fly-to path between two camera states.
///
/// Built once per request and sampled by the animation loop; evaluation
/// never mutates the curve, so a single value can be shared across frames
/// and threads.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlyToCurve {
    start: ViewState,
    end: ViewState,
    coefficients: FlyToCoefficients,
    duration: f64,
}

/// Build a fly-to curve with the default [`FlyToConfig`].
pub fn build_fly_to<V: MapView>(view: &V, start: ViewState, end: ViewState) -> FlyToCurve {
    FlyToCurve::with_config(view, start, end, &FlyToConfig::default())
}

impl FlyToCurve {
    pub fn with_config<V: MapView>(
        view: &V,
        start: ViewState,
        end: ViewState,
        config: &FlyToConfig,
    ) -> Self {
        let rho = config.rho;
        let scale = (end.zoom - start.zoom).exp2();

        let rect = view.bounds_rect();
        let w0 = rect.width().max(rect.height());
        let w1 = w0 / scale;

        let c0 = start.position();
        let c1 = end.position();
        let u1 = c0.distance(c1);

        let mut coefficients = FlyToCoefficients {
            w0,
            w1,
            rho,
            r0: 0.0,
            r1: 0.0,
            u1,
            c0,
            c1,
            is_move: u1 > MIN_PAN_DISTANCE,
        };

        let linear_duration = (start.zoom - end.zoom).abs();

        if !coefficients.is_move {
            debug!(
                reason = "no_pan",
                duration = linear_duration,
                "fly-to falls back to linear interpolation"
            );
            return Self {
                start,
                end,
                coefficients,
                duration: linear_duration,
            };
        }

        let rho2 = rho * rho;
        let b = |w: f64, sign: f64| {
            (w1 * w1 - w0 * w0 + sign * rho2 * rho2 * u1 * u1) / (2.0 * w * rho2 * u1)
        };
        // ln(-b + sqrt(b^2 + 1)) == -asinh(b), without the cancellation for large b.
        let r = |b: f64| -b.asinh();

        let r0 = r(b(w0, 1.0));
        let r1 = r(b(w1, -1.0));
        let s = (r1 - r0) / rho;

        trace!(w0, w1, u1, rho, r0, r1, s, "fly-to coefficients");

        if !s.is_finite() {
            debug!(
                reason = "non_finite_duration",
                duration = linear_duration,
                "fly-to falls back to linear interpolation"
            );
            coefficients.is_move = false;
            return Self {
                start,
                end,
                coefficients,
                duration: linear_duration,
            };
        }

        coefficients.r0 = r0;
        coefficients.r1 = r1;

        Self {
            start,
            end,
            coefficients,
            duration: s,
        }
    }

    /// Path length in curve units.
    ///
    /// Proportional to the perceived travel cost; callers scale it into
    /// seconds. Zoom-only curves report the absolute zoom change.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn start(&self) -> ViewState {
        self.start
    }

    pub fn end(&self) -> ViewState {
        self.end
    }

    pub fn is_move(&self) -> bool {
        self.coefficients.is_move
    }

    pub fn coefficients(&self) -> &FlyToCoefficients {
        &self.coefficients
    }

    /// Camera state at normalized progress `t`.
    ///
    /// `t >= 1` returns the end state exactly.
    pub fn evaluate(&self, t: f32) -> ViewState {
        if t >= 1.0 {
            return self.end;
        }

        let c = &self.coefficients;
        if c.is_move {
            let s = self.duration * t as f64;
            let pos = c.c0.lerp(c.c1, c.u(s) / c.u1);
            let zoom = self.start.zoom - c.w(s).log2();
            ViewState::new(pos.x, pos.y, zoom)
        } else {
            self.start.lerp(self.end, t as f64)
        }
    }

    /// Fraction of the pan covered after `s` curve units, `u(s) / u1`.
    ///
    /// `None` for zoom-only curves.
    pub fn progress_fraction(&self, s: f64) -> Option<f64> {
        let c = &self.coefficients;
        c.is_move.then(|| c.u(s) / c.u1)
    }

    /// `frames + 1` evenly spaced states from start to end inclusive.
    pub fn samples(&self, frames: usize) -> Vec<ViewState> {
        let frames = frames.max(1);
        (0..=frames)
            .map(|i| self.evaluate(i as f32 / frames as f32))
            .collect()
    }
}
