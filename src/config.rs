//! Configuration records for a multiview instance.
//!
//! Everything here is plain data owned by the instance that uses it. Colors and meter constants
//! are not process-wide statics, so two multiview windows can be styled independently.

use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::core::Argb,
    foundation::error::{MultiviewError, MultiviewResult},
    layout::table::LayoutKind,
};

/// User-facing toggles; changing any of them triggers a full rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MultiviewConfig {
    pub layout: LayoutKind,
    pub show_labels: bool,
    pub show_safe_area: bool,
    pub show_meter: bool,
    /// Bitmask of output mixes; the lowest set bit selects the metered mix.
    pub selected_tracks: u32,
}

impl Default for MultiviewConfig {
    fn default() -> Self {
        Self {
            layout: LayoutKind::HorizontalTop8Scenes,
            show_labels: true,
            show_safe_area: false,
            show_meter: false,
            selected_tracks: 1,
        }
    }
}

impl MultiviewConfig {
    pub fn load_json(path: &Path) -> MultiviewResult<Self> {
        load_json(path)
    }
}

/// Highlight and meter colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub outer: Argb,
    pub label: Argb,
    pub background: Argb,
    pub preview: Argb,
    pub program: Argb,
    pub nominal_dark: Argb,
    pub warning_dark: Argb,
    pub error_dark: Argb,
    pub nominal_bright: Argb,
    pub warning_bright: Argb,
    pub error_bright: Argb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            outer: Argb::new(0xFFD0_D0D0),
            label: Argb::new(0xD91F_1F1F),
            background: Argb::new(0xFF00_0000),
            preview: Argb::new(0xFF00_D000),
            program: Argb::new(0xFFD0_0000),
            nominal_dark: Argb::new(0xFF26_7F26),
            warning_dark: Argb::new(0xFF7F_7F26),
            error_dark: Argb::new(0xFF7F_2626),
            nominal_bright: Argb::new(0xFF4C_FF4C),
            warning_bright: Argb::new(0xFFFF_FF4C),
            error_bright: Argb::new(0xFFFF_4C4C),
        }
    }
}

/// Audio meter scale and banding constants, in dB.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    /// Lowest displayable level; must be negative.
    pub floor_db: f32,
    /// Spacing between scale labels.
    pub scale_step_db: f32,
    /// Bar cells per channel column, spanning `floor_db..=0`.
    pub cells: u32,
    /// Cells above this level use the warning band.
    pub warning_db: f32,
    /// Cells above this level use the error band.
    pub error_db: f32,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            floor_db: -60.0,
            scale_step_db: 5.0,
            cells: 36,
            warning_db: -20.0,
            error_db: -6.0,
        }
    }
}

impl MeterConfig {
    pub fn validate(&self) -> MultiviewResult<()> {
        if !self.floor_db.is_finite() || self.floor_db >= 0.0 {
            return Err(MultiviewError::config(format!(
                "meter floor must be a negative dB value, got {}",
                self.floor_db
            )));
        }
        if !self.scale_step_db.is_finite() || self.scale_step_db <= 0.0 {
            return Err(MultiviewError::config("meter scale step must be > 0"));
        }
        if self.cells == 0 {
            return Err(MultiviewError::config("meter needs at least one cell"));
        }
        Ok(())
    }

    /// Number of scale labels: `floor(|floor| / step) + 1`.
    pub fn scale_label_count(&self) -> usize {
        (self.floor_db.abs() / self.scale_step_db).floor() as usize + 1
    }

    /// Scale label values from 0 dB downward: `0, -step, -2*step, ...`.
    pub fn scale_values(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.scale_label_count()).map(|i| -(i as f32) * self.scale_step_db)
    }
}

/// Instance styling: border thickness plus colors and meter constants.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Style {
    /// Tile border thickness in canvas units (subtracted once per side).
    pub thickness: f32,
    pub palette: Palette,
    pub meter: MeterConfig,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            thickness: 4.0,
            palette: Palette::default(),
            meter: MeterConfig::default(),
        }
    }
}

impl Style {
    pub fn load_json(path: &Path) -> MultiviewResult<Self> {
        let style: Self = load_json(path)?;
        style.meter.validate()?;
        Ok(style)
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> MultiviewResult<T> {
    let f = File::open(path).map_err(|e| {
        MultiviewError::config(format!("failed to open '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(BufReader::new(f))
        .map_err(|e| MultiviewError::serde(format!("invalid JSON in '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
