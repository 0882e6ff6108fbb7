use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::fluid::{FluidError, FluidParams, SurfaceSimulation};

/// Default grid edge length
pub const DEFAULT_GRID_SIZE: usize = 128;

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(ConfigFormat::Json),
            Some("toml") => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
        }
    }
}

/// Simulation configuration file contents.
///
/// ```toml
/// [grid]
/// width = 256
/// height = 128
///
/// [params]
/// viscosity = 0.002
/// ```
///
/// Missing tables and keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidConfig {
    pub grid: GridConfig,
    pub params: FluidParams,
}

impl FluidConfig {
    /// Load and validate a TOML or JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FluidError> {
        let path = path.as_ref();

        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| FluidError::UnsupportedFormat(path.display().to_string()))?;

        let raw = std::fs::read_to_string(path)?;
        let config = match format {
            ConfigFormat::Json => Self::from_json_str(&raw)?,
            ConfigFormat::Toml => Self::from_toml_str(&raw)?,
        };

        log::debug!("Loaded fluid config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, FluidError> {
        let config: Self = toml::from_str(raw)?;
        config.checked()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, FluidError> {
        let config: Self = serde_json::from_str(raw)?;
        config.checked()
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reject empty grids and non-finite parameters
    pub fn validate(&self) -> Result<(), FluidError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(FluidError::EmptyGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }
        self.params.validate()
    }

    /// Build a simulation from this config
    pub fn build(&self) -> Result<SurfaceSimulation, FluidError> {
        self.validate()?;
        SurfaceSimulation::with_params(self.grid.width, self.grid.height, self.params)
    }

    fn checked(self) -> Result<Self, FluidError> {
        if let Err(e) = self.validate() {
            log::warn!("Rejected fluid config: {}", e);
            return Err(e);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = FluidConfig::from_toml_str(
            r#"
            [grid]
            width = 32

            [params]
            viscosity = 0.01
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.width, 32);
        assert_eq!(config.grid.height, DEFAULT_GRID_SIZE);
        assert_eq!(config.params.viscosity, 0.01);
        assert_eq!(config.params.dt, 0.016);
        assert_eq!(config.params.gravity, 9.81);
    }

    #[test]
    fn test_json_config() {
        let config = FluidConfig::from_json_str(
            r#"{ "grid": { "width": 8, "height": 4 }, "params": { "gravity": 0.0 } }"#,
        )
        .unwrap();

        let sim = config.build().unwrap();
        assert_eq!(sim.width(), 8);
        assert_eq!(sim.height(), 4);
        assert_eq!(sim.params().gravity, 0.0);
    }

    #[test]
    fn test_zero_grid_rejected() {
        let err = FluidConfig::from_toml_str("[grid]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, FluidError::EmptyGrid { width: 0, .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let err = FluidConfig::from_toml_str("[grid\nwidth = 4").unwrap_err();
        assert!(matches!(err, FluidError::TomlParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[grid]\nwidth = 16\nheight = 16").unwrap();

        let config = FluidConfig::load(file.path()).unwrap();

        assert_eq!(config.grid, GridConfig { width: 16, height: 16 });
    }

    #[test]
    fn test_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();

        let err = FluidConfig::load(file.path()).unwrap_err();

        assert!(matches!(err, FluidError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = FluidConfig::default();
        let raw = config.to_toml_string().unwrap();

        assert_eq!(FluidConfig::from_toml_str(&raw).unwrap(), config);
    }
}
