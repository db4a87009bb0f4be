//! Configuration loading and parsing.
//!
//! Reads `hexnav.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [grid]
//! row_width = 16     # bytes per row, 1..=256
//! split_column = 8   # column before which a wider gap is drawn; 0 disables
//!
//! [scroll]
//! wheel_rows = 3     # rows per wheel notch, 1..=100
//!
//! [status]
//! message_ms = 3000  # how long transient status messages stay visible
//! ```
//!
//! Missing files and parse errors fall back to defaults. Out of range values
//! are clamped by `Config::apply_limits` and each clamp is logged under the
//! `config` target. The raw parsed values are kept alongside the effective
//! ones so the log can report both.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "hexnav.toml";
pub const MAX_ROW_WIDTH: u32 = 256;
pub const MAX_WHEEL_ROWS: u16 = 100;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GridSection {
    #[serde(default = "GridSection::default_row_width")]
    pub row_width: u32,
    #[serde(default = "GridSection::default_split_column")]
    pub split_column: u32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            row_width: Self::default_row_width(),
            split_column: Self::default_split_column(),
        }
    }
}

impl GridSection {
    const fn default_row_width() -> u32 {
        16
    }
    const fn default_split_column() -> u32 {
        8
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ScrollSection {
    #[serde(default = "ScrollSection::default_wheel_rows")]
    pub wheel_rows: u16,
}

impl Default for ScrollSection {
    fn default() -> Self {
        Self {
            wheel_rows: Self::default_wheel_rows(),
        }
    }
}

impl ScrollSection {
    const fn default_wheel_rows() -> u16 {
        3
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusSection {
    #[serde(default = "StatusSection::default_message_ms")]
    pub message_ms: u64,
}

impl Default for StatusSection {
    fn default() -> Self {
        Self {
            message_ms: Self::default_message_ms(),
        }
    }
}

impl StatusSection {
    const fn default_message_ms() -> u64 {
        3000
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub grid: GridSection,
    #[serde(default)]
    pub scroll: ScrollSection,
    #[serde(default)]
    pub status: StatusSection,
}

/// Values after clamping; what the rest of the program reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effective {
    pub row_width: u32,
    pub split_column: u32,
    pub wheel_rows: u16,
    pub message_ms: u64,
}

impl Default for Effective {
    fn default() -> Self {
        Self::from_file(&ConfigFile::default())
    }
}

impl Effective {
    fn from_file(file: &ConfigFile) -> Self {
        Self {
            row_width: file.grid.row_width,
            split_column: file.grid.split_column,
            wheel_rows: file.scroll.wheel_rows,
            message_ms: file.status.message_ms,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub path: Option<PathBuf>,
    pub file: ConfigFile,
    pub effective: Effective,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("hexnav").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let mut cfg = match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => {
                info!(target: "config", path = %path.display(), "config_loaded");
                Config {
                    raw: Some(content),
                    path: Some(path),
                    file,
                    effective: Effective::default(),
                }
            }
            Err(e) => {
                warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
                Config::default()
            }
        },
        Err(_) => Config::default(),
    };
    cfg.apply_limits();
    Ok(cfg)
}

impl Config {
    /// Clamp raw values into their valid ranges. Returns the effective values.
    pub fn apply_limits(&mut self) -> Effective {
        let raw = Effective::from_file(&self.file);
        let row_width = raw.row_width.clamp(1, MAX_ROW_WIDTH);
        if row_width != raw.row_width {
            info!(
                target: "config",
                raw = raw.row_width,
                clamped = row_width,
                max = MAX_ROW_WIDTH,
                "grid_row_width_clamped"
            );
        }
        let split_column = raw.split_column.min(row_width);
        if split_column != raw.split_column {
            info!(
                target: "config",
                raw = raw.split_column,
                clamped = split_column,
                row_width,
                "grid_split_column_clamped"
            );
        }
        let wheel_rows = raw.wheel_rows.clamp(1, MAX_WHEEL_ROWS);
        if wheel_rows != raw.wheel_rows {
            info!(
                target: "config",
                raw = raw.wheel_rows,
                clamped = wheel_rows,
                max = MAX_WHEEL_ROWS,
                "scroll_wheel_rows_clamped"
            );
        }
        self.effective = Effective {
            row_width,
            split_column,
            wheel_rows,
            message_ms: raw.message_ms,
        };
        self.effective
    }
}
