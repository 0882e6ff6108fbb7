pub mod config;
pub mod fluid;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use config::{ConfigFormat, FluidConfig, GridConfig};
pub use fluid::{FluidError, FluidGrid, FluidParams, SurfaceSimulation};
