use glam::Vec2;

use crate::fluid::{
    advect, apply_gravity, apply_point_force, apply_surface_tension, diffuse_velocity,
    solve_pressure, FluidError, FluidGrid, FluidParams,
};
#[cfg(not(target_arch = "wasm32"))]
use crate::fluid::{performance, FluidPerformanceMonitor, Stage, StageTimings};

/// Grid fluid surface simulation.
///
/// Owns all three fields for its whole lifetime. `step` advances by exactly
/// one `dt`; every other call is a cheap accessor or a single-cell edit.
/// Coordinates passed by a host are signed and may be off-grid: writes there
/// are ignored and reads return `0.0`.
#[derive(Debug, Clone)]
pub struct SurfaceSimulation {
    grid: FluidGrid,
    params: FluidParams,
}

impl SurfaceSimulation {
    /// Create a zeroed simulation with default parameters
    pub fn new(width: usize, height: usize) -> Result<Self, FluidError> {
        Self::with_params(width, height, FluidParams::default())
    }

    /// Create a zeroed simulation with explicit parameters
    pub fn with_params(width: usize, height: usize, params: FluidParams) -> Result<Self, FluidError> {
        let grid = FluidGrid::new(width, height)?;
        log::debug!(
            "Created {}x{} fluid surface (dt={}, viscosity={}, surface_tension={}, gravity={})",
            width, height, params.dt, params.viscosity, params.surface_tension, params.gravity
        );
        Ok(Self { grid, params })
    }

    /// Advance the simulation by one time step
    pub fn step(&mut self) {
        let FluidParams { dt, viscosity, surface_tension, gravity } = self.params;

        advect(&mut self.grid, dt);
        apply_gravity(&mut self.grid, gravity, dt);
        solve_pressure(&mut self.grid, dt);
        diffuse_velocity(&mut self.grid, viscosity, dt);
        apply_surface_tension(&mut self.grid, surface_tension, dt);

        log::trace!("Fluid step complete ({} cells)", self.grid.cell_count());
    }

    /// Advance one step and record per-stage timings
    #[cfg(not(target_arch = "wasm32"))]
    pub fn step_profiled(&mut self, monitor: &mut FluidPerformanceMonitor) {
        use std::time::Instant;

        let FluidParams { dt, viscosity, surface_tension, gravity } = self.params;
        let mut timings = StageTimings::default();

        let start = Instant::now();
        advect(&mut self.grid, dt);
        timings.record(Stage::Advect, start.elapsed());

        let t = Instant::now();
        apply_gravity(&mut self.grid, gravity, dt);
        timings.record(Stage::Forces, t.elapsed());

        let t = Instant::now();
        solve_pressure(&mut self.grid, dt);
        timings.record(Stage::Pressure, t.elapsed());

        let t = Instant::now();
        diffuse_velocity(&mut self.grid, viscosity, dt);
        timings.record(Stage::Viscosity, t.elapsed());

        let t = Instant::now();
        apply_surface_tension(&mut self.grid, surface_tension, dt);
        timings.record(Stage::SurfaceTension, t.elapsed());

        performance::record_step(monitor, start.elapsed(), timings);
    }

    /// Add `(fx, fy) * dt` to one cell's velocity
    pub fn add_force(&mut self, x: i32, y: i32, fx: f32, fy: f32) {
        apply_point_force(&mut self.grid, x, y, fx, fy, self.params.dt);
    }

    /// Overwrite one cell's height
    pub fn set_height(&mut self, x: i32, y: i32, h: f32) {
        if let Some((x, y)) = self.grid.checked_cell(x, y) {
            let idx = self.grid.cell_index(x, y);
            self.grid.heights[idx] = h;
        }
    }

    /// Height at a cell, `0.0` off-grid
    pub fn get_height(&self, x: i32, y: i32) -> f32 {
        self.grid
            .checked_cell(x, y)
            .map_or(0.0, |(x, y)| self.grid.heights[self.grid.cell_index(x, y)])
    }

    /// Velocity at a cell, zero off-grid
    pub fn velocity_at(&self, x: i32, y: i32) -> Vec2 {
        self.grid.checked_cell(x, y).map_or(Vec2::ZERO, |(x, y)| {
            let idx = self.grid.velocity_index(x, y);
            Vec2::new(self.grid.velocities[idx], self.grid.velocities[idx + 1])
        })
    }

    /// Live height field, row-major, `width * height` values
    pub fn height_map(&self) -> &[f32] {
        &self.grid.heights
    }

    /// Writable view of the live height field.
    ///
    /// Writes bypass the bounds checks of `set_height`; the slice length is
    /// fixed so the field can never be resized through it.
    pub fn height_map_mut(&mut self) -> &mut [f32] {
        &mut self.grid.heights
    }

    /// Live velocity field, interleaved `(vx, vy)`, `2 * width * height` values
    pub fn velocity_map(&self) -> &[f32] {
        &self.grid.velocities
    }

    /// Writable view of the live velocity field
    pub fn velocity_map_mut(&mut self) -> &mut [f32] {
        &mut self.grid.velocities
    }

    /// Pressure carried between steps as the relaxation seed
    pub fn pressure_map(&self) -> &[f32] {
        &self.grid.pressure
    }

    pub fn pressure_map_mut(&mut self) -> &mut [f32] {
        &mut self.grid.pressure
    }

    /// Height field as raw bytes for GPU upload
    pub fn height_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.grid.heights)
    }

    /// Velocity field as raw bytes for GPU upload
    pub fn velocity_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.grid.velocities)
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn grid(&self) -> &FluidGrid {
        &self.grid
    }

    pub fn params(&self) -> &FluidParams {
        &self.params
    }

    pub fn set_params(&mut self, params: FluidParams) {
        self.params = params;
    }

    pub fn set_dt(&mut self, dt: f32) {
        self.params.dt = dt;
    }

    pub fn set_viscosity(&mut self, viscosity: f32) {
        self.params.viscosity = viscosity;
    }

    pub fn set_surface_tension(&mut self, surface_tension: f32) {
        self.params.surface_tension = surface_tension;
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.params.gravity = gravity;
    }
}
