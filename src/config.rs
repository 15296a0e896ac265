//! Configuration for curves and the cursor readout.
//!
//! All types implement `Default` and serde, so a host can keep a plot layout
//! in a JSON or YAML file. egui types are mirrored by serializable shadows.

use std::collections::BTreeMap;
use std::path::Path;

use egui_plot::LineStyle;
use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Guide line look
// ─────────────────────────────────────────────────────────────────────────────

/// Serializable version of egui_plot::LineStyle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SerLineStyle {
    Solid,
    Dashed { length: f32 },
    Dotted { spacing: f32 },
}

impl From<SerLineStyle> for LineStyle {
    fn from(s: SerLineStyle) -> Self {
        match s {
            SerLineStyle::Solid => LineStyle::Solid,
            SerLineStyle::Dashed { length } => LineStyle::Dashed { length },
            SerLineStyle::Dotted { spacing } => LineStyle::Dotted { spacing },
        }
    }
}

impl From<LineStyle> for SerLineStyle {
    fn from(s: LineStyle) -> Self {
        match s {
            LineStyle::Solid => SerLineStyle::Solid,
            LineStyle::Dashed { length } => SerLineStyle::Dashed { length },
            LineStyle::Dotted { spacing } => SerLineStyle::Dotted { spacing },
        }
    }
}

/// Pen used for the cursor guide lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideLook {
    pub color_rgb: [u8; 3],
    pub width: f32,
    pub style: SerLineStyle,
}

impl Default for GuideLook {
    fn default() -> Self {
        Self {
            color_rgb: [0xAA, 0xAA, 0xAA],
            width: 1.0,
            style: SerLineStyle::Dashed { length: 6.0 },
        }
    }
}

impl GuideLook {
    pub fn color(&self) -> egui::Color32 {
        let [r, g, b] = self.color_rgb;
        egui::Color32::from_rgb(r, g, b)
    }

    pub fn line_style(&self) -> LineStyle {
        self.style.into()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cursor
// ─────────────────────────────────────────────────────────────────────────────

/// Settings for [`CursorTracker`](crate::cursor::CursorTracker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Maximum processed pointer updates per second. Default: `60.0`.
    pub rate_limit_hz: f64,
    /// Whether the guide lines start visible. Default: `true`.
    pub visible: bool,
    pub look: GuideLook,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            rate_limit_hz: 60.0,
            visible: true,
            look: GuideLook::default(),
        }
    }
}

impl CursorConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.rate_limit_hz.is_finite() && self.rate_limit_hz > 0.0) {
            return Err(PlotError::Configuration(format!(
                "cursor rate limit must be a positive number of events per second, got {}",
                self.rate_limit_hz
            )));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Curves
// ─────────────────────────────────────────────────────────────────────────────

/// Column binding for a [`PolledCurve`](crate::data::polled::PolledCurve).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolledCurveConfig {
    pub x: String,
    pub y: String,
    pub x_err: Option<String>,
    pub y_err: Option<String>,
    /// Reload the source before every update. Default: `false`.
    pub force_reload: bool,
}

impl PolledCurveConfig {
    pub fn new<S: Into<String>>(x: S, y: S) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.x.is_empty() || self.y.is_empty() {
            return Err(PlotError::Configuration(
                "polled curve needs both an x and a y column".into(),
            ));
        }
        Ok(())
    }
}

/// Setup for a [`StreamingBuffer`](crate::data::buffer::StreamingBuffer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    pub capacity: usize,
    pub errors: bool,
}

impl BufferConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(PlotError::Configuration(
                "streaming buffer capacity must be at least one record".into(),
            ));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plot layout
// ─────────────────────────────────────────────────────────────────────────────

/// A complete plot: cursor settings plus named curves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub cursor: CursorConfig,
    pub polled: BTreeMap<String, PolledCurveConfig>,
    pub buffers: BTreeMap<String, BufferConfig>,
}

impl PlotConfig {
    pub fn validate(&self) -> Result<()> {
        self.cursor.validate()?;
        for curve in self.polled.values() {
            curve.validate()?;
        }
        for buffer in self.buffers.values() {
            buffer.validate()?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save as YAML for `.yaml`/`.yml` paths, JSON otherwise.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let txt = if is_yaml(path) {
            self.to_yaml()?
        } else {
            self.to_json()?
        };
        std::fs::write(path, txt)?;
        Ok(())
    }

    /// Load from a file, picking the format from its extension.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)?;
        if is_yaml(path) {
            Self::from_yaml(&txt)
        } else {
            Self::from_json(&txt)
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
