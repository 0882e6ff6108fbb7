/// Height-field fluid surface simulation
///
/// Plain data on the CPU: a `FluidGrid` holds the height, velocity and
/// pressure fields and each stage of a step is a free function over it.
/// `SurfaceSimulation` runs the stages in order and is the host-facing API.

pub mod fluid_data;
pub mod advection;
pub mod forces;
pub mod pressure_solver;
pub mod viscosity;
pub mod surface_tension;
pub mod simulation;
pub mod interaction;
pub mod performance;

pub use fluid_data::{FluidGrid, FluidParams};
pub use advection::advect;
pub use forces::{apply_gravity, apply_point_force};
pub use pressure_solver::{solve_pressure, relax_pressure, apply_pressure_gradient};
pub use viscosity::diffuse_velocity;
pub use surface_tension::apply_surface_tension;
pub use simulation::SurfaceSimulation;
pub use interaction::{PointerMapper, apply_pointer_drag, drop_splash};
pub use performance::{FluidPerformanceMonitor, FluidPerformanceMetrics, PerformanceStatus, StageTimings, Stage};

/// Fluid simulation time step
pub const FLUID_TIME_STEP: f32 = 0.016; // 60 FPS

/// Number of pressure solver iterations
pub const PRESSURE_ITERATIONS: u32 = 20;

/// Default velocity diffusion coefficient (water)
pub const DEFAULT_VISCOSITY: f32 = 0.001;

/// Default surface tension coefficient (water-air, N/m)
pub const DEFAULT_SURFACE_TENSION: f32 = 0.0728;

/// Default gravitational acceleration magnitude
pub const DEFAULT_GRAVITY: f32 = 9.81;

/// Fluid simulation error type
#[derive(Debug, thiserror::Error)]
pub enum FluidError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid of {width}x{height} cells is too large to allocate")]
    GridTooLarge { width: usize, height: usize },

    #[error("parameter `{name}` must be finite, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to parse JSON config: {0}")]
    JsonParse(#[from] serde_json::Error),
}
