use std::collections::VecDeque;
use std::time::Duration;

/// Target step rate (one step per 60 Hz frame)
const TARGET_STEPS_PER_SECOND: f32 = 60.0;

/// Stages of a simulation step, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Advect,
    Forces,
    Pressure,
    Viscosity,
    SurfaceTension,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Advect,
        Stage::Forces,
        Stage::Pressure,
        Stage::Viscosity,
        Stage::SurfaceTension,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Advect => "advect",
            Stage::Forces => "forces",
            Stage::Pressure => "pressure",
            Stage::Viscosity => "viscosity",
            Stage::SurfaceTension => "surface_tension",
        }
    }
}

/// Wall-clock time spent in each stage of one step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StageTimings {
    pub advect: Duration,
    pub forces: Duration,
    pub pressure: Duration,
    pub viscosity: Duration,
    pub surface_tension: Duration,
}

impl StageTimings {
    pub fn record(&mut self, stage: Stage, duration: Duration) {
        *self.slot_mut(stage) = duration;
    }

    pub fn get(&self, stage: Stage) -> Duration {
        match stage {
            Stage::Advect => self.advect,
            Stage::Forces => self.forces,
            Stage::Pressure => self.pressure,
            Stage::Viscosity => self.viscosity,
            Stage::SurfaceTension => self.surface_tension,
        }
    }

    fn slot_mut(&mut self, stage: Stage) -> &mut Duration {
        match stage {
            Stage::Advect => &mut self.advect,
            Stage::Forces => &mut self.forces,
            Stage::Pressure => &mut self.pressure,
            Stage::Viscosity => &mut self.viscosity,
            Stage::SurfaceTension => &mut self.surface_tension,
        }
    }
}

/// Performance metrics for the fluid simulation
#[derive(Debug, Clone)]
pub struct FluidPerformanceMetrics {
    /// Average whole-step time in milliseconds
    pub step_time_ms: f32,

    /// Steps per second achievable at the average step time
    pub steps_per_second: f32,

    /// Average time per stage in milliseconds, in `Stage::ALL` order
    pub stage_ms: [f32; 5],

    /// Stage with the largest average time
    pub slowest_stage: Option<Stage>,

    /// Total steps recorded since creation or reset
    pub total_steps: u64,
}

impl Default for FluidPerformanceMetrics {
    fn default() -> Self {
        Self {
            step_time_ms: 0.0,
            steps_per_second: 0.0,
            stage_ms: [0.0; 5],
            slowest_stage: None,
            total_steps: 0,
        }
    }
}

/// Rolling step timing history
pub struct FluidPerformanceMonitor {
    /// Whole-step time history
    step_times: VecDeque<Duration>,

    /// Per-stage time history
    stage_times: VecDeque<StageTimings>,

    /// History size
    history_size: usize,

    /// Current metrics
    current_metrics: FluidPerformanceMetrics,

    /// Performance warnings enabled
    warnings_enabled: bool,
}

impl Default for FluidPerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl FluidPerformanceMonitor {
    /// Create new performance monitor
    pub fn new() -> Self {
        Self::with_history(120) // 2 seconds at 60 steps per second
    }

    pub fn with_history(history_size: usize) -> Self {
        let history_size = history_size.max(1);
        Self {
            step_times: VecDeque::with_capacity(history_size),
            stage_times: VecDeque::with_capacity(history_size),
            history_size,
            current_metrics: FluidPerformanceMetrics::default(),
            warnings_enabled: true,
        }
    }

    /// Get current metrics
    pub fn get_metrics(&self) -> &FluidPerformanceMetrics {
        &self.current_metrics
    }

    pub fn set_warnings_enabled(&mut self, enabled: bool) {
        self.warnings_enabled = enabled;
    }

    /// Samples currently held
    pub fn sample_count(&self) -> usize {
        self.step_times.len()
    }

    /// Check whether a step fits the frame budget
    pub fn check_performance(&self) -> PerformanceStatus {
        let rate = self.current_metrics.steps_per_second;
        if rate >= TARGET_STEPS_PER_SECOND {
            PerformanceStatus::Good
        } else if rate >= TARGET_STEPS_PER_SECOND / 2.0 {
            PerformanceStatus::Acceptable
        } else {
            PerformanceStatus::Poor
        }
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        let m = &self.current_metrics;
        let stages = Stage::ALL
            .iter()
            .zip(m.stage_ms.iter())
            .map(|(stage, ms)| format!("{}={:.3}ms", stage.name(), ms))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{} steps, avg {:.3}ms ({:.0} steps/s) [{}]",
            m.total_steps, m.step_time_ms, m.steps_per_second, stages
        )
    }

    pub fn reset(&mut self) {
        self.step_times.clear();
        self.stage_times.clear();
        self.current_metrics = FluidPerformanceMetrics::default();
    }
}

/// Record one step's total and per-stage time (DOP)
pub fn record_step(monitor: &mut FluidPerformanceMonitor, total: Duration, stages: StageTimings) {
    monitor.step_times.push_back(total);
    if monitor.step_times.len() > monitor.history_size {
        monitor.step_times.pop_front();
    }

    monitor.stage_times.push_back(stages);
    if monitor.stage_times.len() > monitor.history_size {
        monitor.stage_times.pop_front();
    }

    monitor.current_metrics.total_steps += 1;
    update_metrics(monitor);
}

/// Update internal metrics (DOP)
fn update_metrics(monitor: &mut FluidPerformanceMonitor) {
    if monitor.step_times.is_empty() {
        return;
    }

    let samples = monitor.step_times.len() as u32;
    let avg_step: Duration = monitor.step_times.iter().sum::<Duration>() / samples;
    let metrics = &mut monitor.current_metrics;
    metrics.step_time_ms = avg_step.as_secs_f32() * 1000.0;
    metrics.steps_per_second = if metrics.step_time_ms > 0.0 {
        1000.0 / metrics.step_time_ms
    } else {
        f32::INFINITY
    };

    let stage_samples = monitor.stage_times.len() as u32;
    for (slot, stage) in metrics.stage_ms.iter_mut().zip(Stage::ALL) {
        let total: Duration = monitor.stage_times.iter().map(|t| t.get(stage)).sum();
        *slot = (total / stage_samples).as_secs_f32() * 1000.0;
    }

    metrics.slowest_stage = Stage::ALL
        .iter()
        .zip(metrics.stage_ms.iter())
        .filter(|(_, ms)| **ms > 0.0)
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(stage, _)| *stage);

    if monitor.warnings_enabled && metrics.steps_per_second < TARGET_STEPS_PER_SECOND {
        log::warn!("Fluid step below target: {:.1} steps/s", metrics.steps_per_second);
    }
}

/// Performance status
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerformanceStatus {
    Good,       // 60+ steps/s
    Acceptable, // 30-60 steps/s
    Poor,       // <30 steps/s
}
