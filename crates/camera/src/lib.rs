//! Camera framing and fly-to animation curves for the 2D map view.
//!
//! Everything here is closed-form math over a [`MapView`]; nothing is
//! scheduled or rendered. The animation loop that drives a fly-to samples
//! [`FlyToCurve::evaluate`] once per frame and owns its own timing.

pub mod config;
pub mod fly_to;
pub mod view;
pub mod zoom;

pub use config::*;
pub use fly_to::*;
pub use view::*;
pub use zoom::*;
