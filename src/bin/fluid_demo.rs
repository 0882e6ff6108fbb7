//! Headless fluid surface driver
//!
//! Usage: fluid_demo [config.toml|config.json] [--steps N] [--seed N]

use anyhow::{bail, Context, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

use surface_fluid::fluid::{drop_splash, FluidPerformanceMonitor};
use surface_fluid::{FluidConfig, SurfaceSimulation};

const DEFAULT_STEPS: usize = 600;
const SPLASH_INTERVAL: usize = 30;

struct DemoArgs {
    config_path: Option<String>,
    steps: usize,
    seed: u64,
}

fn parse_args() -> Result<DemoArgs> {
    let mut args = DemoArgs {
        config_path: None,
        steps: DEFAULT_STEPS,
        seed: 42,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--steps" => {
                let value = iter.next().context("--steps needs a value")?;
                args.steps = value.parse().with_context(|| format!("invalid step count: {}", value))?;
            }
            "--seed" => {
                let value = iter.next().context("--seed needs a value")?;
                args.seed = value.parse().with_context(|| format!("invalid seed: {}", value))?;
            }
            other if other.starts_with("--") => bail!("unknown flag: {}", other),
            path => args.config_path = Some(path.to_string()),
        }
    }

    Ok(args)
}

fn surface_stats(sim: &SurfaceSimulation) -> (f32, f32, f32) {
    let heights = sim.height_map();
    let min = heights.iter().copied().fold(f32::INFINITY, f32::min);
    let max = heights.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mean = heights.iter().sum::<f32>() / heights.len() as f32;
    (min, max, mean)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = parse_args()?;

    let config = match &args.config_path {
        Some(path) => FluidConfig::load(path).with_context(|| format!("loading {}", path))?,
        None => FluidConfig::default(),
    };
    let mut sim = config.build().context("building simulation")?;
    log::info!(
        "Running {} steps on a {}x{} grid",
        args.steps,
        sim.width(),
        sim.height()
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut monitor = FluidPerformanceMonitor::new();
    monitor.set_warnings_enabled(false);

    for step in 0..args.steps {
        if step % SPLASH_INTERVAL == 0 {
            let cx = rng.gen_range(0.0..sim.width() as f32);
            let cy = rng.gen_range(0.0..sim.height() as f32);
            let radius = rng.gen_range(2.0..6.0);
            drop_splash(&mut sim, cx, cy, radius, 1.0);
            log::debug!("Splash at ({:.1}, {:.1}) r={:.1}", cx, cy, radius);
        }

        sim.step_profiled(&mut monitor);

        if (step + 1) % 120 == 0 {
            let (min, max, mean) = surface_stats(&sim);
            log::info!(
                "step {}: height min={:.4} max={:.4} mean={:.4}",
                step + 1,
                min,
                max,
                mean
            );
        }
    }

    log::info!("{}", monitor.summary());
    log::info!("Performance: {:?}", monitor.check_performance());
    Ok(())
}
