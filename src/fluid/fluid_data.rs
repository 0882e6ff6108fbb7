use serde::{Deserialize, Serialize};

use crate::fluid::{
    FluidError, DEFAULT_GRAVITY, DEFAULT_SURFACE_TENSION, DEFAULT_VISCOSITY, FLUID_TIME_STEP,
};

/// Simulation parameters, fixed at construction unless a setter is called
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidParams {
    /// Time step (seconds per step)
    pub dt: f32,

    /// Velocity diffusion coefficient
    pub viscosity: f32,

    /// Surface tension coefficient
    pub surface_tension: f32,

    /// Downward acceleration magnitude
    pub gravity: f32,
}

impl Default for FluidParams {
    fn default() -> Self {
        Self {
            dt: FLUID_TIME_STEP,
            viscosity: DEFAULT_VISCOSITY,
            surface_tension: DEFAULT_SURFACE_TENSION,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl FluidParams {
    /// Reject NaN and infinite values
    pub fn validate(&self) -> Result<(), FluidError> {
        let fields = [
            ("dt", self.dt),
            ("viscosity", self.viscosity),
            ("surface_tension", self.surface_tension),
            ("gravity", self.gravity),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(FluidError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}

/// Grid state: three parallel fields plus the scratch buffers used for
/// double buffering.
///
/// Heights and pressure hold one scalar per cell, row-major at `y * width + x`.
/// Velocities are interleaved `(vx, vy)` at `(y * width + x) * 2`. None of the
/// buffers is ever resized after construction; outside the crate they are
/// only reachable as fixed-length slices.
#[derive(Debug, Clone)]
pub struct FluidGrid {
    pub(crate) width: usize,
    pub(crate) height: usize,

    /// Surface elevation per cell
    pub(crate) heights: Vec<f32>,

    /// Interleaved velocity per cell
    pub(crate) velocities: Vec<f32>,

    /// Jacobi pressure, kept across steps as the warm-start seed
    pub(crate) pressure: Vec<f32>,

    /// Scratch for height-sized passes (advection, pressure relaxation)
    pub(crate) scalar_scratch: Vec<f32>,

    /// Scratch for velocity-sized passes (viscosity)
    pub(crate) vector_scratch: Vec<f32>,
}

impl FluidGrid {
    /// Allocate zeroed fields for a `width x height` grid
    pub fn new(width: usize, height: usize) -> Result<Self, FluidError> {
        if width == 0 || height == 0 {
            return Err(FluidError::EmptyGrid { width, height });
        }

        let (cells, vector_len) = width
            .checked_mul(height)
            .and_then(|cells| Some((cells, cells.checked_mul(2)?)))
            .ok_or(FluidError::GridTooLarge { width, height })?;

        Ok(Self {
            width,
            height,
            heights: vec![0.0; cells],
            velocities: vec![0.0; vector_len],
            pressure: vec![0.0; cells],
            scalar_scratch: vec![0.0; cells],
            vector_scratch: vec![0.0; vector_len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Height field, row-major
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn heights_mut(&mut self) -> &mut [f32] {
        &mut self.heights
    }

    /// Velocity field, interleaved `(vx, vy)`
    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    pub fn velocities_mut(&mut self) -> &mut [f32] {
        &mut self.velocities
    }

    pub fn pressure(&self) -> &[f32] {
        &self.pressure
    }

    pub fn pressure_mut(&mut self) -> &mut [f32] {
        &mut self.pressure
    }

    /// Total cell count
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Row-major index of an in-bounds cell
    #[inline]
    pub fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Index of the `vx` component of an in-bounds cell; `vy` follows it
    #[inline]
    pub fn velocity_index(&self, x: usize, y: usize) -> usize {
        self.cell_index(x, y) * 2
    }

    /// Map signed host coordinates to a cell, `None` when off-grid
    #[inline]
    pub fn checked_cell(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Install the scalar scratch as the new height field
    pub(crate) fn swap_heights(&mut self) {
        std::mem::swap(&mut self.heights, &mut self.scalar_scratch);
    }

    /// Install the scalar scratch as the new pressure field
    pub(crate) fn swap_pressure(&mut self) {
        std::mem::swap(&mut self.pressure, &mut self.scalar_scratch);
    }

    /// Install the vector scratch as the new velocity field
    pub(crate) fn swap_velocities(&mut self) {
        std::mem::swap(&mut self.velocities, &mut self.vector_scratch);
    }
}
