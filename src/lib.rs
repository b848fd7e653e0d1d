//! Multiview is a layout and overlay engine for broadcast-style monitoring walls.
//!
//! It places many scene tiles plus a preview/program pair on one canvas, decides what each
//! frame draws, maps pointer positions back to scenes and drives a per-channel audio level
//! meter over the program cell. Pixels are someone else's job: a frame is compiled into a
//! [`FramePlan`] of solid fills and delegated draws, which a [`DrawBackend`] executes.
//!
//! - Build a [`Multiview`] from a [`SceneHost`], a [`LabelFactory`] and an [`AudioOutput`]
//! - [`Multiview::configure`] with a [`MultiviewConfig`]
//! - Call [`Multiview::render_frame`] once per output frame and [`Multiview::locate_in`] on clicks
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod audio;
pub(crate) mod config;
pub(crate) mod layout;
pub(crate) mod multiview;
pub(crate) mod render;
pub(crate) mod scene;

pub use crate::foundation::core::{
    Argb, Canvas, Letterbox, PixelRect, Point, Rect, Size, Vec2,
};
pub use crate::foundation::error::{MultiviewError, MultiviewResult};

pub use crate::audio::levels::{
    AudioBlock, Band, Levels, MAX_AUDIO_CHANNELS, MAX_AUDIO_MIXES, SILENT, block_levels,
    lit_cells,
};
pub use crate::audio::meter::{
    AudioMeter, MeterCell, MeterColumn, MeterLayout, MeterState, ScaleMark, meter_layout,
    mix_for_mask, scale_label_text,
};
pub use crate::audio::output::{AudioCallback, AudioOutput, MemoryAudioOutput, SubscriptionId};
pub use crate::config::{MeterConfig, MultiviewConfig, Palette, Style};
pub use crate::layout::geometry::{LabelPlacement, TileGeometry, ViewGeometry};
pub use crate::layout::hit_test::{locate, tile_region_in_window};
pub use crate::layout::table::{LayoutKind, LayoutSpec, PairPlacement};
pub use crate::multiview::{Multiview, WindowSystem};
pub use crate::render::backend::{DrawBackend, FrameRGBA, execute_plan};
pub use crate::render::cpu::{CpuBackend, CpuSettings};
pub use crate::render::orchestrator::{FrameInputs, compile_frame, highlight_color};
pub use crate::render::plan::{DrawOp, FramePlan, VideoSource};
pub use crate::scene::host::{SceneHost, SceneId, WeakScene};
pub use crate::scene::labels::{LabelFactory, LabelId, LabelObject};
pub use crate::scene::memory::{MemoryLabelFactory, MemorySceneHost};
pub use crate::scene::visibility::{ShowingGuard, filter_candidates, select_visible};
