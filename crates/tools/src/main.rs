use std::env;
use std::path::PathBuf;

use camera::{FlyToConfig, FlyToCurve, ViewState, Viewport, minimum_enclosing_zoom};
use clap::{Parser, Subcommand};
use foundation::math::{LonLat, Vec2};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flyto", about = "Camera framing and fly-to curve inspection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Smallest zoom that fits two lon/lat points across the viewport width.
    Zoom {
        /// First point as LON,LAT (degrees).
        #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
        a: [f64; 2],
        /// Second point as LON,LAT (degrees).
        #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
        b: [f64; 2],
        /// Fractional padding around the two points.
        #[arg(long, default_value_t = 0.0)]
        buffer: f32,
        /// Viewport width in pixels.
        #[arg(long, default_value_t = 1024.0)]
        width: f64,
    },
    /// Sample a fly-to curve between two camera states.
    Curve {
        /// Start state as X,Y,ZOOM (projected meters).
        #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
        from: [f64; 3],
        /// End state as X,Y,ZOOM (projected meters).
        #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
        to: [f64; 3],
        #[arg(long, default_value_t = 1024.0)]
        width: f64,
        #[arg(long, default_value_t = 768.0)]
        height: f64,
        /// Number of frame intervals to sample.
        #[arg(long, default_value_t = 60)]
        frames: usize,
        /// JSON fly-to config; falls back to $FLYTO_CONFIG.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct ZoomReport {
    a: [f64; 2],
    b: [f64; 2],
    buffer: f32,
    width_px: f64,
    /// `None` when the points coincide and no finite zoom exists.
    zoom: Option<f32>,
}

#[derive(Serialize)]
struct CurveReport {
    rho: f64,
    duration: f64,
    is_move: bool,
    frames: Vec<ViewState>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    match Cli::parse().command {
        Command::Zoom {
            a,
            b,
            buffer,
            width,
        } => cmd_zoom(a, b, buffer, width),
        Command::Curve {
            from,
            to,
            width,
            height,
            frames,
            config,
        } => cmd_curve(from, to, [width, height], frames, config),
    }
}

fn cmd_zoom(a: [f64; 2], b: [f64; 2], buffer: f32, width: f64) -> Result<(), String> {
    if buffer < 0.0 {
        return Err(format!("--buffer must be >= 0, got {buffer}"));
    }
    check_size("--width", width)?;

    let view = Viewport::new(Vec2::new(0.0, 0.0), 0.0, [width, width]);
    let zoom = minimum_enclosing_zoom(
        LonLat::new(a[0], a[1]),
        LonLat::new(b[0], b[1]),
        &view,
        buffer,
    );
    info!(zoom, "computed minimum enclosing zoom");

    let report = ZoomReport {
        a,
        b,
        buffer,
        width_px: view.size_px[0],
        zoom: zoom.is_finite().then_some(zoom),
    };
    print_json(&report)
}

fn cmd_curve(
    from: [f64; 3],
    to: [f64; 3],
    size_px: [f64; 2],
    frames: usize,
    config: Option<PathBuf>,
) -> Result<(), String> {
    check_size("--width", size_px[0])?;
    check_size("--height", size_px[1])?;

    let config_path = config.or_else(|| env::var("FLYTO_CONFIG").ok().map(PathBuf::from));
    let config = match &config_path {
        Some(path) => FlyToConfig::load(path).map_err(|e| format!("config {path:?}: {e}"))?,
        None => FlyToConfig::default(),
    };

    let start = ViewState::new(from[0], from[1], from[2]);
    let end = ViewState::new(to[0], to[1], to[2]);
    let view = Viewport::new(start.position(), start.zoom, size_px);

    let curve = FlyToCurve::with_config(&view, start, end, &config);
    info!(
        duration = curve.duration(),
        is_move = curve.is_move(),
        rho = config.rho,
        "built fly-to curve"
    );

    let report = CurveReport {
        rho: config.rho,
        duration: curve.duration(),
        is_move: curve.is_move(),
        frames: curve.samples(frames),
    };
    print_json(&report)
}

/// Viewport sizes must be real pixel counts; the camera math takes them as given.
fn check_size(flag: &str, px: f64) -> Result<(), String> {
    if !px.is_finite() || px <= 0.0 {
        return Err(format!("{flag} must be a positive pixel count, got {px}"));
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated numbers, got {s:?}"));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|e| format!("invalid number {part:?}: {e}"))?;
    }
    Ok(out)
}

fn parse_pair(s: &str) -> Result<[f64; 2], String> {
    parse_numbers::<2>(s)
}

fn parse_triple(s: &str) -> Result<[f64; 3], String> {
    parse_numbers::<3>(s)
}
