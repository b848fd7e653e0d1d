//! Block RMS to decibel conversion and the level-to-cell math of the meter.

use crate::config::MeterConfig;

/// Channel slots carried per audio block.
pub const MAX_AUDIO_CHANNELS: usize = 8;
/// Selectable physical output mixes.
pub const MAX_AUDIO_MIXES: usize = 6;

/// Per-channel level in dB; non-finite entries mean "no signal, do not draw".
pub type Levels = [f32; MAX_AUDIO_CHANNELS];

/// Levels before any audio has been delivered.
pub const SILENT: Levels = [f32::NEG_INFINITY; MAX_AUDIO_CHANNELS];

/// One delivered block of planar samples.
#[derive(Clone, Copy, Debug)]
pub struct AudioBlock<'a> {
    /// Samples per plane in this block.
    pub frames: usize,
    /// One optional plane per channel slot; missing or `None` planes carry no data.
    pub planes: &'a [Option<&'a [f32]>],
}

/// Root-mean-square of `samples`; `0.0` for an empty slice.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    (sum / samples.len() as f64).sqrt() as f32
}

/// Linear magnitude to dB. Zero maps to negative infinity.
pub fn mul_to_db(mul: f32) -> f32 {
    20.0 * mul.log10()
}

/// RMS level of every channel slot in `block`, converted to dB.
pub fn block_levels(block: &AudioBlock<'_>) -> Levels {
    let mut out = [0.0f32; MAX_AUDIO_CHANNELS];
    for (ch, level) in out.iter_mut().enumerate() {
        let magnitude = match block.planes.get(ch).copied().flatten() {
            Some(plane) if block.frames > 0 => rms(&plane[..block.frames.min(plane.len())]),
            _ => 0.0,
        };
        *level = mul_to_db(magnitude);
    }
    out
}

/// Float to `i32`, saturating at the representable bounds; NaN maps to 0.
pub fn saturating_i32(x: f32) -> i32 {
    if x.is_nan() {
        0
    } else if x >= i32::MAX as f32 {
        i32::MAX
    } else if x < i32::MIN as f32 {
        i32::MIN
    } else {
        x as i32
    }
}

/// Number of lit cells, counted from the bottom, for a level in dB.
pub fn lit_cells(level_db: f32, cfg: &MeterConfig) -> u32 {
    let cells = i64::from(cfg.cells);
    let per_db = cfg.cells as f32 / cfg.floor_db;
    let dark = i64::from(saturating_i32(level_db * per_db));
    (cells - dark).clamp(0, cells) as u32
}

/// Level represented by cell `index` (0 is the bottom cell).
pub fn cell_level(index: u32, cfg: &MeterConfig) -> f32 {
    cfg.floor_db + (index + 1) as f32 * (-cfg.floor_db / cfg.cells as f32)
}

/// Color band of a meter cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Band {
    Nominal,
    Warning,
    Error,
}

pub fn band_for(level_db: f32, cfg: &MeterConfig) -> Band {
    if level_db > cfg.error_db {
        Band::Error
    } else if level_db > cfg.warning_db {
        Band::Warning
    } else {
        Band::Nominal
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/levels.rs"]
mod tests;
