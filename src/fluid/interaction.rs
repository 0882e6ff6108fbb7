use glam::Vec2;

use crate::fluid::SurfaceSimulation;

/// Maps normalized device coordinates onto grid cells.
///
/// NDC runs from -1 to 1 on both axes with +y up; grid rows run downward
/// from y = 0, so the y axis is flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapper {
    pub width: usize,
    pub height: usize,
}

impl PointerMapper {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn for_simulation(sim: &SurfaceSimulation) -> Self {
        Self::new(sim.width(), sim.height())
    }

    /// Continuous grid position of an NDC point (may lie off-grid)
    pub fn ndc_to_grid(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
        )
    }

    /// Cell under an NDC point, `None` when outside the grid
    pub fn ndc_to_cell(&self, ndc: Vec2) -> Option<(i32, i32)> {
        let pos = self.ndc_to_grid(ndc);
        if !pos.is_finite() || pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let (x, y) = (pos.x.floor() as usize, pos.y.floor() as usize);
        (x < self.width && y < self.height).then_some((x as i32, y as i32))
    }
}

/// Turn a pointer drag into a force at the cell under the pointer.
///
/// The force is the pointer displacement in cells scaled by `strength`.
/// Returns whether the pointer was over the grid.
pub fn apply_pointer_drag(sim: &mut SurfaceSimulation, from_ndc: Vec2, to_ndc: Vec2, strength: f32) -> bool {
    let mapper = PointerMapper::for_simulation(sim);
    let Some((x, y)) = mapper.ndc_to_cell(to_ndc) else {
        return false;
    };

    let delta = (mapper.ndc_to_grid(to_ndc) - mapper.ndc_to_grid(from_ndc)) * strength;
    sim.add_force(x, y, delta.x, delta.y);
    true
}

/// Raise the surface around `(cx, cy)` with a smoothstep falloff.
///
/// Cells within `radius` get `amplitude * smoothstep(radius, 0, d)` added to
/// their height. Cells outside the grid are skipped, so the cost is bounded
/// by the grid size whatever the radius.
pub fn drop_splash(sim: &mut SurfaceSimulation, cx: f32, cy: f32, radius: f32, amplitude: f32) {
    if radius.is_nan() || radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
        return;
    }

    // Only visit the part of the footprint that lies on the grid
    let max_x = sim.width() as f32 - 1.0;
    let max_y = sim.height() as f32 - 1.0;
    let x_min = (cx - radius).floor().max(0.0);
    let x_max = (cx + radius).ceil().min(max_x);
    let y_min = (cy - radius).floor().max(0.0);
    let y_max = (cy + radius).ceil().min(max_y);
    if x_min > x_max || y_min > y_max {
        return;
    }

    for y in y_min as i32..=y_max as i32 {
        for x in x_min as i32..=x_max as i32 {
            let d = Vec2::new(x as f32 - cx, y as f32 - cy).length();
            if d >= radius {
                continue;
            }
            let t = 1.0 - d / radius;
            let falloff = t * t * (3.0 - 2.0 * t);
            let h = sim.get_height(x, y);
            sim.set_height(x, y, h + amplitude * falloff);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_corners() {
        let mapper = PointerMapper::new(10, 20);

        assert_eq!(mapper.ndc_to_cell(Vec2::new(-1.0, 1.0)), Some((0, 0)));
        assert_eq!(mapper.ndc_to_cell(Vec2::new(0.99, -0.99)), Some((9, 19)));
        assert_eq!(mapper.ndc_to_cell(Vec2::new(1.0, 0.0)), None);
        assert_eq!(mapper.ndc_to_cell(Vec2::new(-1.5, 0.0)), None);
        assert_eq!(mapper.ndc_to_cell(Vec2::new(f32::NAN, 0.0)), None);
    }

    #[test]
    fn test_drag_adds_force_at_pointer() {
        let mut sim = SurfaceSimulation::new(10, 10).unwrap();
        sim.set_dt(1.0);

        // Move right by 0.2 NDC = 1 cell
        let hit = apply_pointer_drag(&mut sim, Vec2::new(-0.2, 0.05), Vec2::new(0.0, 0.05), 2.0);

        assert!(hit);
        let v = sim.velocity_at(5, 4);
        assert!((v.x - 2.0).abs() < 1e-5);
        assert!(v.y.abs() < 1e-5);
    }

    #[test]
    fn test_drag_off_grid_ignored() {
        let mut sim = SurfaceSimulation::new(4, 4).unwrap();

        let hit = apply_pointer_drag(&mut sim, Vec2::ZERO, Vec2::new(3.0, 3.0), 1.0);

        assert!(!hit);
        assert!(sim.velocity_map().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_splash_peaks_at_centre() {
        let mut sim = SurfaceSimulation::new(9, 9).unwrap();

        drop_splash(&mut sim, 4.0, 4.0, 3.0, 1.0);

        assert_eq!(sim.get_height(4, 4), 1.0);
        assert!(sim.get_height(5, 4) > 0.0 && sim.get_height(5, 4) < 1.0);
        assert_eq!(sim.get_height(0, 0), 0.0);
    }

    #[test]
    fn test_huge_splash_radius_touches_whole_grid_once() {
        let mut sim = SurfaceSimulation::new(4, 4).unwrap();

        drop_splash(&mut sim, 2.0, 2.0, 20000.0, 1.0);

        assert_eq!(sim.height_map().len(), 16);
        assert!(sim.height_map().iter().all(|h| *h > 0.99 && *h <= 1.0));
    }

    #[test]
    fn test_infinite_splash_radius_covers_grid() {
        let mut sim = SurfaceSimulation::new(4, 4).unwrap();

        // d / inf = 0 puts every cell at the full amplitude
        drop_splash(&mut sim, 2.0, 2.0, f32::INFINITY, 1.0);

        assert!(sim.height_map().iter().all(|h| *h == 1.0));
    }

    #[test]
    fn test_splash_entirely_off_grid() {
        let mut sim = SurfaceSimulation::new(4, 4).unwrap();

        drop_splash(&mut sim, -50.0, 2.0, 3.0, 1.0);
        drop_splash(&mut sim, 2.0, 1.0e9, 3.0, 1.0);

        assert!(sim.height_map().iter().all(|h| *h == 0.0));
    }

    #[test]
    fn test_splash_near_edge_is_clipped() {
        let mut sim = SurfaceSimulation::new(4, 4).unwrap();

        drop_splash(&mut sim, 0.0, 0.0, 2.0, 0.5);

        assert_eq!(sim.get_height(0, 0), 0.5);
        assert_eq!(sim.height_map().len(), 16);
    }
}
