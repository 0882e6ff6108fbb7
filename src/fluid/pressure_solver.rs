use crate::fluid::{FluidGrid, PRESSURE_ITERATIONS};

/// Pressure stage: fixed-count Jacobi relaxation followed by the gradient
/// correction of velocity.
///
/// There is no divergence source term. The relaxation only smooths whatever
/// pressure the field already holds, so a zero field stays zero forever.
pub fn solve_pressure(grid: &mut FluidGrid, dt: f32) {
    for _ in 0..PRESSURE_ITERATIONS {
        relax_pressure(grid);
    }
    apply_pressure_gradient(grid, dt);
}

/// One Jacobi iteration: each cell becomes the mean of its in-bounds
/// 4-neighbours from the previous iteration.
pub fn relax_pressure(grid: &mut FluidGrid) {
    let width = grid.width;
    let height = grid.height;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;

            let mut sum = 0.0f32;
            let mut count = 0u32;

            if x > 0 {
                sum += grid.pressure[idx - 1];
                count += 1;
            }
            if x < width - 1 {
                sum += grid.pressure[idx + 1];
                count += 1;
            }
            if y > 0 {
                sum += grid.pressure[idx - width];
                count += 1;
            }
            if y < height - 1 {
                sum += grid.pressure[idx + width];
                count += 1;
            }

            // A 1x1 grid has no neighbours; its pressure carries over.
            grid.scalar_scratch[idx] = if count > 0 {
                sum / count as f32
            } else {
                grid.pressure[idx]
            };
        }
    }

    grid.swap_pressure();
}

/// Subtract the one-sided pressure differences (times `dt`) from velocity.
/// Missing neighbours at the boundary simply drop their term.
pub fn apply_pressure_gradient(grid: &mut FluidGrid, dt: f32) {
    let width = grid.width;
    let height = grid.height;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let vel_idx = idx * 2;
            let p = grid.pressure[idx];

            let mut px = 0.0f32;
            let mut py = 0.0f32;

            if x > 0 {
                px += p - grid.pressure[idx - 1];
            }
            if x < width - 1 {
                px += grid.pressure[idx + 1] - p;
            }
            if y > 0 {
                py += p - grid.pressure[idx - width];
            }
            if y < height - 1 {
                py += grid.pressure[idx + width] - p;
            }

            grid.velocities[vel_idx] -= px * dt;
            grid.velocities[vel_idx + 1] -= py * dt;
        }
    }
}
