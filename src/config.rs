use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::chart::ChartSize;
use crate::error::{GanttError, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub workbook: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    pub dir: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ChartConfig {
    /// Configured image size, with defaults for unset dimensions.
    pub fn size(&self) -> ChartSize {
        let default = ChartSize::default();
        ChartSize {
            width: self.width.unwrap_or(default.width),
            height: self.height.unwrap_or(default.height),
        }
    }
}

impl Config {
    /// Load config from `path`. Returns the default config if the file
    /// doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| {
                GanttError::validation(format!("failed to parse {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e.into()),
        };
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        for (key, value) in [("width", self.chart.width), ("height", self.chart.height)] {
            if value == Some(0) {
                return Err(GanttError::validation(format!(
                    "failed to parse {}: chart.{key} must be positive",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}
