//! Audio Meter Engine: mix subscription, level handoff and bar/scale geometry.
//!
//! The audio thread converts each delivered block to dB and stores every channel as raw float
//! bits in a shared slot array. The render thread loads the slots once per frame. Neither side
//! blocks and the newest block always wins; a torn read across channels only mixes levels from
//! two adjacent blocks.

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use crate::{
    audio::levels::{
        AudioBlock, Band, Levels, MAX_AUDIO_CHANNELS, MAX_AUDIO_MIXES, SILENT, band_for,
        block_levels, cell_level, lit_cells,
    },
    audio::output::{AudioOutput, SubscriptionId},
    config::{MeterConfig, Palette},
    foundation::core::{Argb, Point, Rect, Size},
    foundation::error::MultiviewResult,
    scene::labels::{LabelFactory, LabelObject, create_label},
};

/// Gap between cells, as a fraction of a cell.
const CELL_GAP: f64 = 0.25;
/// Cells' worth of padding shared by the top and bottom ends of a column.
const END_PADDING_CELLS: f64 = 4.0;
/// Columns shown when no channel carries signal.
const FALLBACK_COLUMNS: usize = 2;

/// Subscription state of the meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeterState {
    Unsubscribed,
    Subscribed { mix: usize },
}

/// Latest published level per channel, as `f32` bits.
struct LevelSlots([AtomicU32; MAX_AUDIO_CHANNELS]);

impl LevelSlots {
    fn new() -> Self {
        Self(std::array::from_fn(|_| {
            AtomicU32::new(f32::NEG_INFINITY.to_bits())
        }))
    }

    fn store(&self, levels: &Levels) {
        for (slot, level) in self.0.iter().zip(levels) {
            slot.store(level.to_bits(), Ordering::Relaxed);
        }
    }

    fn load(&self) -> Levels {
        std::array::from_fn(|ch| f32::from_bits(self.0[ch].load(Ordering::Relaxed)))
    }
}

struct Subscription {
    id: SubscriptionId,
    mix: usize,
    levels: Arc<LevelSlots>,
}

/// Per-instance meter state; survives layout rebuilds.
pub struct AudioMeter {
    audio: Arc<dyn AudioOutput>,
    config: MeterConfig,
    selected_tracks: u32,
    subscription: Option<Subscription>,
    current: Levels,
    scale_labels: Vec<Box<dyn LabelObject>>,
}

/// Physical mix metered for a track bitmask: the lowest selected bit, or mix 0 when empty.
pub fn mix_for_mask(mask: u32) -> usize {
    let mask = mask & ((1 << MAX_AUDIO_MIXES) - 1);
    if mask == 0 {
        0
    } else {
        mask.trailing_zeros() as usize
    }
}

/// Scale label text: whole dB values without decimals, fractional steps with one.
pub fn scale_label_text(db: f32) -> String {
    if db.fract() == 0.0 {
        format!("{}", db as i32)
    } else {
        format!("{db:.1}")
    }
}

impl AudioMeter {
    pub fn new(audio: Arc<dyn AudioOutput>, config: MeterConfig) -> Self {
        Self {
            audio,
            config,
            selected_tracks: 1,
            subscription: None,
            current: SILENT,
            scale_labels: Vec::new(),
        }
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    pub fn state(&self) -> MeterState {
        match &self.subscription {
            Some(sub) => MeterState::Subscribed { mix: sub.mix },
            None => MeterState::Unsubscribed,
        }
    }

    pub fn selected_tracks(&self) -> u32 {
        self.selected_tracks
    }

    /// Change the track selection; an active subscription moves to the new mix.
    pub fn select_tracks(&mut self, mask: u32) -> MultiviewResult<()> {
        if mask & ((1 << MAX_AUDIO_MIXES) - 1) == 0 {
            tracing::warn!(mask, "no output track selected, metering mix 0");
        }
        if mask == self.selected_tracks {
            return Ok(());
        }
        self.selected_tracks = mask;
        if self.subscription.is_some() {
            self.subscribe()?;
        }
        Ok(())
    }

    /// Subscribe if not already subscribed.
    pub fn ensure_subscribed(&mut self) -> MultiviewResult<()> {
        if self.subscription.is_none() {
            self.subscribe()?;
        }
        Ok(())
    }

    fn subscribe(&mut self) -> MultiviewResult<()> {
        // Old callback detached first; every subscription owns fresh slots.
        self.unsubscribe();

        let mix = mix_for_mask(self.selected_tracks);
        let levels = Arc::new(LevelSlots::new());
        let published = Arc::clone(&levels);
        let id = self.audio.subscribe(
            mix,
            Box::new(move |block: &AudioBlock<'_>| {
                published.store(&block_levels(block));
            }),
        )?;
        tracing::debug!(mix, ?id, "audio meter subscribed");
        self.subscription = Some(Subscription {
            id,
            mix,
            levels,
        });
        Ok(())
    }

    /// Detach from the audio output and forget the last levels.
    pub fn unsubscribe(&mut self) {
        if let Some(sub) = self.subscription.take() {
            self.audio.unsubscribe(sub.id);
            tracing::debug!(mix = sub.mix, id = ?sub.id, "audio meter unsubscribed");
            self.current = SILENT;
        }
    }

    /// Pick up the levels of the most recently delivered block.
    pub fn poll(&mut self) {
        if let Some(sub) = self.subscription.as_ref() {
            self.current = sub.levels.load();
        }
    }

    pub fn levels(&self) -> &Levels {
        &self.current
    }

    /// Regenerate the dB scale labels (`0, -step, ..., floor`).
    pub fn rebuild_scale_labels(&mut self, factory: &dyn LabelFactory, output_height: u32) {
        self.scale_labels.clear();
        let basis = output_height / 10;
        self.scale_labels = self
            .config
            .scale_values()
            .map(|db| create_label(factory, &scale_label_text(db), basis))
            .collect();
    }

    pub fn release_scale_labels(&mut self) {
        self.scale_labels.clear();
    }

    pub fn scale_labels(&self) -> &[Box<dyn LabelObject>] {
        &self.scale_labels
    }

    /// Meter geometry inside the program tile's inset rectangle.
    pub fn layout(&self, program_inset: Rect) -> MeterLayout {
        let widest = self
            .scale_labels
            .iter()
            .map(|l| l.size())
            .fold(Size::ZERO, |a, b| Size::new(a.width.max(b.width), a.height.max(b.height)));
        meter_layout(&self.config, &self.current, program_inset, widest)
    }
}

impl Drop for AudioMeter {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for AudioMeter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioMeter")
            .field("state", &self.state())
            .field("selected_tracks", &self.selected_tracks)
            .field("current", &self.current)
            .finish()
    }
}

/// One bar cell of a channel column.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MeterCell {
    pub rect: Rect,
    pub level_db: f32,
    pub lit: bool,
    pub band: Band,
}

impl MeterCell {
    pub fn color(&self, palette: &Palette) -> Argb {
        match (self.band, self.lit) {
            (Band::Nominal, true) => palette.nominal_bright,
            (Band::Warning, true) => palette.warning_bright,
            (Band::Error, true) => palette.error_bright,
            (Band::Nominal, false) => palette.nominal_dark,
            (Band::Warning, false) => palette.warning_dark,
            (Band::Error, false) => palette.error_dark,
        }
    }
}

/// A scale label (index into the scale label list) and where to draw it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScaleMark {
    pub label: usize,
    pub origin: Point,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MeterColumn {
    /// Source channel slot; `None` for the empty fallback columns.
    pub channel: Option<usize>,
    pub lit: u32,
    pub cells: Vec<MeterCell>,
    pub scale: Vec<ScaleMark>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MeterLayout {
    pub background: Rect,
    pub columns: Vec<MeterColumn>,
}

/// Bar and scale geometry for `levels`, anchored inside `inset`.
///
/// `label_size` is the extent of the widest scale label; it becomes the spacing between
/// columns so every channel gets its own scale beside it.
pub fn meter_layout(
    cfg: &MeterConfig,
    levels: &Levels,
    inset: Rect,
    label_size: Size,
) -> MeterLayout {
    let mut channels: Vec<Option<usize>> = levels
        .iter()
        .enumerate()
        .filter(|(_, l)| l.is_finite())
        .map(|(ch, _)| Some(ch))
        .collect();
    if channels.is_empty() {
        channels = vec![None; FALLBACK_COLUMNS];
    }

    let cells = cfg.cells;
    let units = f64::from(cells) * (1.0 + CELL_GAP) + END_PADDING_CELLS;
    let cell = Size::new(inset.width() / units, inset.height() / units);
    let gap = cell.height * CELL_GAP;
    let label_gap = cell.width * CELL_GAP;
    let spacing = label_size.width + 2.0 * label_gap;

    let bars_left = inset.x0 + 2.0 * cell.width;
    let bars_bottom = inset.y1 - 2.0 * cell.height;
    let bars_span = f64::from(cells) * cell.height + f64::from(cells.saturating_sub(1)) * gap;
    let stride = cell.width + spacing;

    let n = channels.len() as f64;
    let background = Rect::new(
        bars_left - cell.width,
        inset.y0 + cell.height,
        bars_left + n * stride + cell.width,
        inset.y1 - cell.height,
    );

    let columns = channels
        .iter()
        .enumerate()
        .map(|(c, &channel)| {
            let x = bars_left + c as f64 * stride;
            let level = channel.map_or(f32::NEG_INFINITY, |ch| levels[ch]);
            let lit = if level.is_finite() {
                lit_cells(level, cfg)
            } else {
                0
            };

            let cells_out = (0..cells)
                .map(|k| {
                    let y1 = bars_bottom - f64::from(k) * (cell.height + gap);
                    let level_db = cell_level(k, cfg);
                    MeterCell {
                        rect: Rect::new(x, y1 - cell.height, x + cell.width, y1),
                        level_db,
                        lit: k < lit,
                        band: band_for(level_db, cfg),
                    }
                })
                .collect();

            let scale = cfg
                .scale_values()
                .enumerate()
                .map(|(label, db)| {
                    let frac = f64::from((db - cfg.floor_db) / -cfg.floor_db);
                    let y = bars_bottom - frac * bars_span;
                    ScaleMark {
                        label,
                        origin: Point::new(x + cell.width + label_gap, y - label_size.height / 2.0),
                    }
                })
                .collect();

            MeterColumn {
                channel,
                lit,
                cells: cells_out,
                scale,
            }
        })
        .collect();

    MeterLayout {
        background,
        columns,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/meter.rs"]
mod tests;
