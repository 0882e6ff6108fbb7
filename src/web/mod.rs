//! Browser binding for the fluid surface
//!
//! Exposes `SurfaceSimulation` to JavaScript under the `FluidSimulation`
//! class. Height and velocity maps are handed out as `Float32Array` views
//! straight into wasm memory, so the page can read them every frame without
//! a copy.

use wasm_bindgen::prelude::*;

use crate::fluid::SurfaceSimulation;

/// Install the panic hook and console logger once per page
fn init_web_runtime() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct FluidSimulation {
    sim: SurfaceSimulation,
}

#[wasm_bindgen]
impl FluidSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<FluidSimulation, JsValue> {
        init_web_runtime();

        let sim = SurfaceSimulation::new(width as usize, height as usize)
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;

        log::info!("Fluid surface ready: {}x{}", width, height);
        Ok(FluidSimulation { sim })
    }

    pub fn step(&mut self) {
        self.sim.step();
    }

    #[wasm_bindgen(js_name = addForce)]
    pub fn add_force(&mut self, x: i32, y: i32, fx: f32, fy: f32) {
        self.sim.add_force(x, y, fx, fy);
    }

    #[wasm_bindgen(js_name = setHeight)]
    pub fn set_height(&mut self, x: i32, y: i32, h: f32) {
        self.sim.set_height(x, y, h);
    }

    #[wasm_bindgen(js_name = getHeight)]
    pub fn get_height(&self, x: i32, y: i32) -> f32 {
        self.sim.get_height(x, y)
    }

    /// Live view of the height field (`width * height` floats, row-major).
    ///
    /// The view aliases wasm memory: it is invalidated when memory grows
    /// (re-fetch it each frame) and must not be touched while `step` runs.
    #[wasm_bindgen(js_name = getHeightMap)]
    pub fn get_height_map(&self) -> js_sys::Float32Array {
        // SAFETY: the view is only valid until the next wasm allocation; the
        // host contract above forbids holding it across calls.
        unsafe { js_sys::Float32Array::view(self.sim.height_map()) }
    }

    /// Live view of the velocity field (`2 * width * height` floats,
    /// interleaved `vx, vy`). Same aliasing contract as `getHeightMap`.
    #[wasm_bindgen(js_name = getVelocityMap)]
    pub fn get_velocity_map(&self) -> js_sys::Float32Array {
        // SAFETY: see `get_height_map`.
        unsafe { js_sys::Float32Array::view(self.sim.velocity_map()) }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.sim.width() as u32
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.sim.height() as u32
    }
}
