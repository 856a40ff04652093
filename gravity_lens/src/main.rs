//! Terminal Gravitational Lensing
//!
//! Draws light rays, the warped spacetime grid and a lensed star field as
//! text, frame by frame, while the lens drifts along a slow orbit.
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=gravity_lens=debug`).

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use common::Viewport;
use glam::Vec2;
use gravity_lens::equations::{format_equations, LENSING_EQUATIONS, LENSING_VARIABLES};
use gravity_lens::renderer::TerminalRenderer;
use gravity_lens::stars::EinsteinDisplacement;
use gravity_lens::{compute_frame, generate_source_field, FrameInput, LensConfig, LensState, MappingMode};
use log::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Direct,
    Einstein,
}

#[derive(Debug, Parser)]
#[command(name = "gravity_lens", about = "Point-mass gravitational lensing in the terminal")]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to draw
    #[arg(short, long, default_value_t = 120)]
    frames: usize,

    /// Lens mass
    #[arg(long, default_value_t = 80.0)]
    mass: f32,

    /// Warp intensity
    #[arg(long, default_value_t = 1.5)]
    intensity: f32,

    /// Light rays per canvas edge
    #[arg(long, default_value_t = 12)]
    rays: usize,

    /// Starting lens x (defaults to canvas center)
    #[arg(long)]
    lens_x: Option<f32>,

    /// Starting lens y (defaults to canvas center)
    #[arg(long)]
    lens_y: Option<f32>,

    /// Radius of the lens drift orbit, 0 keeps the lens still
    #[arg(long, default_value_t = 120.0)]
    orbit: f32,

    #[arg(long, default_value_t = 100)]
    cols: usize,

    #[arg(long, default_value_t = 36)]
    rows: usize,

    /// Hide the spacetime grid
    #[arg(long)]
    no_grid: bool,

    /// Hide the photon sphere
    #[arg(long)]
    no_photon_sphere: bool,

    /// Draw the lensed star field
    #[arg(long)]
    stars: bool,

    /// Draw the Einstein ring of a source behind the lens
    #[arg(long)]
    einstein: bool,

    /// Star field mapping, overrides the configuration
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Print the equations legend before the first frame
    #[arg(long)]
    equations: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = LensConfig::load_or_default(args.config.as_deref()).context("loading configuration")?;
    config.validate().context("validating configuration")?;

    match args.mode {
        Some(Mode::Direct) if !matches!(config.mapping, MappingMode::Direct { .. }) => {
            config.mapping = MappingMode::default();
        }
        Some(Mode::Einstein) if !matches!(config.mapping, MappingMode::Einstein(_)) => {
            config.mapping = MappingMode::Einstein(EinsteinDisplacement::default());
        }
        _ => {}
    }

    let bounds = config.display.canvas;
    let anchor = Vec2::new(
        args.lens_x.unwrap_or(bounds.width * 0.5),
        args.lens_y.unwrap_or(bounds.height * 0.5),
    );

    let stars = if args.stars {
        generate_source_field(&config.stars, &bounds, anchor)
    } else {
        Vec::new()
    };

    if args.equations {
        println!("{}", format_equations("Gravitational Lensing", LENSING_EQUATIONS, LENSING_VARIABLES));
    }

    info!(
        "drawing {} frames: mass {}, intensity {}, {} rays per edge, mapping {:?}",
        args.frames, args.mass, args.intensity, args.rays, config.mapping
    );

    let mut renderer = TerminalRenderer::new(Viewport::new(bounds, args.cols, args.rows));
    let frame_interval =
        Duration::try_from_secs_f32(1.0 / config.display.frame_rate).context("computing frame interval")?;

    print!("\x1b[2J");
    for index in 0..args.frames {
        let started = Instant::now();

        let angle = index as f32 * 0.05;
        let position = bounds.clamp(anchor + Vec2::new(angle.cos(), angle.sin()) * args.orbit - Vec2::X * args.orbit);

        let input = FrameInput {
            lens: LensState::new(position, args.mass, args.intensity),
            ray_count: args.rays,
            bounds,
            show_grid: !args.no_grid,
            show_photon_sphere: !args.no_photon_sphere,
            show_stars: args.stars,
            show_einstein_ring: args.einstein,
        };

        let frame = compute_frame(&config, &input, &stars).with_context(|| format!("computing frame {index}"))?;
        let text = renderer.render(&frame);

        // Home the cursor so frames overwrite each other
        print!("\x1b[H{text}");
        println!(
            "frame {index:>4}  lens ({:>6.1}, {:>6.1})  mass {:.0}  intensity {:.1}",
            position.x, position.y, args.mass, args.intensity
        );

        if let Some(rest) = frame_interval.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    Ok(())
}
