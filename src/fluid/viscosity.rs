use crate::fluid::FluidGrid;

/// Explicit viscous diffusion of velocity.
///
/// The Laplacian is the plain sum of neighbour differences over the in-bounds
/// 4-neighbours. Boundary cells sum fewer terms and are not renormalised, so
/// they diffuse more weakly than interior cells.
pub fn diffuse_velocity(grid: &mut FluidGrid, viscosity: f32, dt: f32) {
    let width = grid.width;
    let height = grid.height;
    let row = width * 2;
    let vel = &grid.velocities;
    let out = &mut grid.vector_scratch;

    for y in 0..height {
        for x in 0..width {
            let vel_idx = (y * width + x) * 2;

            let vx = vel[vel_idx];
            let vy = vel[vel_idx + 1];

            let mut lap_x = 0.0f32;
            let mut lap_y = 0.0f32;

            if x > 0 {
                lap_x += vel[vel_idx - 2] - vx;
                lap_y += vel[vel_idx - 1] - vy;
            }
            if x < width - 1 {
                lap_x += vel[vel_idx + 2] - vx;
                lap_y += vel[vel_idx + 3] - vy;
            }
            if y > 0 {
                lap_x += vel[vel_idx - row] - vx;
                lap_y += vel[vel_idx - row + 1] - vy;
            }
            if y < height - 1 {
                lap_x += vel[vel_idx + row] - vx;
                lap_y += vel[vel_idx + row + 1] - vy;
            }

            // With no neighbours both sums are zero and this is a plain copy.
            out[vel_idx] = vx + viscosity * lap_x * dt;
            out[vel_idx + 1] = vy + viscosity * lap_y * dt;
        }
    }

    grid.swap_velocities();
}
