//! Default locations and the chart file-naming convention.
//!
//! Everything lives under `$HOME/.gantt` unless overridden by flags,
//! environment variables or the config file.

use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into())).join(".gantt")
}

/// `$HOME/.gantt/config.toml`
pub fn config_path() -> PathBuf {
    home_dir().join("config.toml")
}

/// `$HOME/.gantt/gantt.xlsx`
pub fn default_workbook() -> PathBuf {
    home_dir().join("gantt.xlsx")
}

/// `$HOME/.gantt/charts`
pub fn default_chart_dir() -> PathBuf {
    home_dir().join("charts")
}

/// Chart file name for a person filter.
/// `Some("Anna Rossi")` → `gantt_Anna_Rossi.png`, `None` → `gantt_completo.png`
pub fn chart_file_name(person: Option<&str>) -> String {
    match person.filter(|p| !p.trim().is_empty()) {
        Some(p) => format!("gantt_{}.png", p.replace(' ', "_")),
        None => "gantt_completo.png".to_string(),
    }
}
