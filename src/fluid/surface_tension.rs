use crate::fluid::FluidGrid;

/// Add a restoring vertical velocity proportional to height curvature.
///
/// Each axis contributes its second difference only where both neighbours on
/// that axis exist, so edge cells still get the term of the other axis.
/// Heights are only read, so velocity is updated in place.
pub fn apply_surface_tension(grid: &mut FluidGrid, surface_tension: f32, dt: f32) {
    let width = grid.width;
    let height = grid.height;
    let h = &grid.heights;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;

            let mut curvature = 0.0f32;
            if x > 0 && x < width - 1 {
                curvature += h[idx + 1] - 2.0 * h[idx] + h[idx - 1];
            }
            if y > 0 && y < height - 1 {
                curvature += h[idx + width] - 2.0 * h[idx] + h[idx - width];
            }

            grid.velocities[idx * 2 + 1] += surface_tension * curvature * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_surface_adds_nothing() {
        let mut grid = FluidGrid::new(4, 4).unwrap();
        grid.heights.fill(3.0);

        apply_surface_tension(&mut grid, 0.0728, 0.016);

        assert!(grid.velocities.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_peak_pulled_down_axis_edges_unchanged() {
        let mut grid = FluidGrid::new(3, 3).unwrap();
        grid.heights[4] = 1.0;

        apply_surface_tension(&mut grid, 1.0, 1.0);

        assert_eq!(grid.velocities[4 * 2 + 1], -4.0);
        // (1,0) is interior along x only and sees no x-curvature
        assert_eq!(grid.velocities[1 * 2 + 1], 0.0);
        // (0,1) is interior along y only and sees no y-curvature
        assert_eq!(grid.velocities[3 * 2 + 1], 0.0);
        // horizontal components never change
        assert!(grid.velocities.iter().step_by(2).all(|v| *v == 0.0));
    }

    #[test]
    fn test_edge_cell_uses_interior_axis() {
        let mut grid = FluidGrid::new(3, 3).unwrap();
        // Column 0 bends along y; cell (0,1) is on the x edge
        grid.heights[0] = 1.0;
        grid.heights[6] = 1.0;

        apply_surface_tension(&mut grid, 1.0, 1.0);

        assert_eq!(grid.velocities[3 * 2 + 1], 2.0);
    }
}
