use crate::fluid::FluidGrid;

/// Semi-Lagrangian height advection.
///
/// Each cell traces back along its own velocity by `dt` and bilinearly
/// resamples the previous height field there. Only the corner indices are
/// clamped to the grid; the fractional offsets are taken from the unclamped
/// backtrace position.
pub fn advect(grid: &mut FluidGrid, dt: f32) {
    let width = grid.width;
    let height = grid.height;
    let max_x = (width - 1) as i32;
    let max_y = (height - 1) as i32;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let vel_idx = idx * 2;

            let vx = grid.velocities[vel_idx];
            let vy = grid.velocities[vel_idx + 1];

            let back_x = x as f32 - vx * dt;
            let back_y = y as f32 - vy * dt;

            let x0 = (back_x as i32).clamp(0, max_x);
            let y0 = (back_y as i32).clamp(0, max_y);
            let x1 = (x0 + 1).min(max_x);
            let y1 = (y0 + 1).min(max_y);

            let fx = back_x - x0 as f32;
            let fy = back_y - y0 as f32;

            let (x0, y0, x1, y1) = (x0 as usize, y0 as usize, x1 as usize, y1 as usize);
            let h00 = grid.heights[y0 * width + x0];
            let h10 = grid.heights[y0 * width + x1];
            let h01 = grid.heights[y1 * width + x0];
            let h11 = grid.heights[y1 * width + x1];

            grid.scalar_scratch[idx] = (1.0 - fx) * (1.0 - fy) * h00
                + fx * (1.0 - fy) * h10
                + (1.0 - fx) * fy * h01
                + fx * fy * h11;
        }
    }

    grid.swap_heights();
}
