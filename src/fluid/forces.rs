use crate::fluid::FluidGrid;

/// Apply gravity to every cell's vertical velocity (in place)
pub fn apply_gravity(grid: &mut FluidGrid, gravity: f32, dt: f32) {
    let dv = gravity * dt;
    for vel in grid.velocities.chunks_exact_mut(2) {
        vel[1] -= dv;
    }
}

/// Add an impulse `force * dt` to one cell. Off-grid coordinates are ignored.
pub fn apply_point_force(grid: &mut FluidGrid, x: i32, y: i32, fx: f32, fy: f32, dt: f32) {
    if let Some((x, y)) = grid.checked_cell(x, y) {
        let idx = grid.velocity_index(x, y);
        grid.velocities[idx] += fx * dt;
        grid.velocities[idx + 1] += fy * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_only_touches_vertical_component() {
        let mut grid = FluidGrid::new(3, 3).unwrap();

        apply_gravity(&mut grid, 9.81, 0.016);

        for vel in grid.velocities.chunks_exact(2) {
            assert_eq!(vel[0], 0.0);
            assert_eq!(vel[1], -(9.81f32 * 0.016));
        }
    }

    #[test]
    fn test_point_force_scaled_by_dt() {
        let mut grid = FluidGrid::new(4, 4).unwrap();

        apply_point_force(&mut grid, 2, 1, 10.0, -5.0, 0.5);

        let idx = grid.velocity_index(2, 1);
        assert_eq!(grid.velocities[idx], 5.0);
        assert_eq!(grid.velocities[idx + 1], -2.5);
        assert_eq!(grid.velocities.iter().filter(|v| **v != 0.0).count(), 2);
    }

    #[test]
    fn test_off_grid_point_force_ignored() {
        let mut grid = FluidGrid::new(4, 4).unwrap();

        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MAX, i32::MIN)] {
            apply_point_force(&mut grid, x, y, 100.0, 100.0, 0.016);
        }

        assert!(grid.velocities.iter().all(|v| *v == 0.0));
    }
}
