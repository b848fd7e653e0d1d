//! Render Orchestrator: turns the current view state into a [`FramePlan`].
//!
//! Order of operations per frame:
//! 1. fit the canvas into the window (letterbox)
//! 2. canvas background
//! 3. every tile slot up to the layout capacity, each followed by its label
//! 4. preview and program cells with their labels (not in scenes-only layouts)
//! 5. meter overlay on the program cell, then reserved info panels
//! 6. safe-area guides on the preview cell

use crate::{
    audio::meter::AudioMeter,
    config::Palette,
    foundation::core::{Argb, Letterbox, Rect, Vec2},
    layout::geometry::{TileGeometry, ViewGeometry},
    render::plan::{DrawOp, FramePlan, VideoSource},
    scene::host::{SceneHost, SceneId, WeakScene},
    scene::labels::LabelObject,
};

/// Label slot of the preview cell.
pub const PREVIEW_LABEL: usize = 0;
/// Label slot of the program cell.
pub const PROGRAM_LABEL: usize = 1;
/// Label slot of the first scene tile.
pub const FIRST_SCENE_LABEL: usize = 2;

/// Everything a frame is compiled from. Borrowed from the owning multiview for one frame.
pub struct FrameInputs<'a> {
    pub geometry: &'a ViewGeometry,
    pub host: &'a dyn SceneHost,
    /// Visible scenes in tile order.
    pub scenes: &'a [WeakScene],
    /// `[preview, program, scene 0, scene 1, ...]`; empty when labels are off.
    pub labels: &'a [Box<dyn LabelObject>],
    pub meter: Option<&'a AudioMeter>,
    pub palette: &'a Palette,
    pub show_safe_area: bool,
}

/// Tile highlight: program wins, then preview (program-colored outside split mode), else outer.
pub fn highlight_color(
    palette: &Palette,
    is_program: bool,
    is_preview: bool,
    preview_program_mode: bool,
) -> Argb {
    if is_program {
        palette.program
    } else if is_preview {
        if preview_program_mode {
            palette.preview
        } else {
            palette.program
        }
    } else {
        palette.outer
    }
}

struct Compiler<'a> {
    inputs: &'a FrameInputs<'a>,
    letterbox: Letterbox,
    ops: Vec<DrawOp>,
}

impl Compiler<'_> {
    fn fill(&mut self, rect: Rect, color: Argb) {
        self.ops.push(DrawOp::fill(rect, color));
    }

    fn video(&mut self, source: VideoSource, dest: Rect) {
        self.ops.push(DrawOp::Video {
            source,
            dest,
            viewport: self.letterbox.viewport(dest),
        });
    }

    fn label(&mut self, slot: usize, cell: Rect, pad_basis: f64) {
        let Some(label) = self.inputs.labels.get(slot) else {
            return;
        };
        let placement = self
            .inputs
            .geometry
            .label_at(cell, label.size(), pad_basis);
        self.fill(placement.backing, self.inputs.palette.label);
        self.ops.push(DrawOp::Label {
            label: label.id(),
            origin: placement.origin,
            scale: placement.scale,
        });
    }

    fn tiles(&mut self, program: Option<SceneId>, preview: Option<SceneId>, split: bool) {
        let palette = self.inputs.palette;
        let capacity = self.inputs.geometry.spec().capacity;
        for index in 0..capacity {
            let Some(tile) = self.inputs.geometry.tile_at(index) else {
                break;
            };

            let Some(weak) = self.inputs.scenes.get(index) else {
                self.fill(tile.rect, palette.outer);
                self.fill(tile.inset, palette.background);
                continue;
            };

            match weak.upgrade(self.inputs.host) {
                Some(scene) => {
                    let color = highlight_color(
                        palette,
                        program == Some(scene),
                        preview == Some(scene),
                        split,
                    );
                    self.fill(tile.rect, color);
                    self.fill(tile.inset, palette.background);
                    self.video(VideoSource::Scene(scene), tile.inset);
                }
                None => {
                    tracing::warn!(index, scene = ?weak.id(), "visible scene no longer exists");
                    self.fill(tile.rect, palette.outer);
                    self.fill(tile.inset, palette.background);
                }
            }

            self.label(FIRST_SCENE_LABEL + index, tile.rect, tile.rect.y0);
        }
    }

    fn pair_cell(&mut self, cell: TileGeometry, source: Option<VideoSource>, slot: usize) {
        let pad_basis = self.inputs.geometry.pair_size().width;
        self.fill(cell.inset, self.inputs.palette.background);
        if let Some(source) = source {
            self.video(source, cell.inset);
        }
        self.label(slot, cell.rect, pad_basis);
    }

    fn meter(&mut self, meter: &AudioMeter, program: TileGeometry) {
        let layout = meter.layout(program.inset);
        self.fill(layout.background, self.inputs.palette.label);
        for column in &layout.columns {
            for cell in &column.cells {
                self.fill(cell.rect, cell.color(self.inputs.palette));
            }
        }
        let scale_labels = meter.scale_labels();
        for mark in layout.columns.iter().flat_map(|c| &c.scale) {
            if let Some(label) = scale_labels.get(mark.label) {
                self.ops.push(DrawOp::Label {
                    label: label.id(),
                    origin: mark.origin,
                    scale: Vec2::new(1.0, 1.0),
                });
            }
        }
    }
}

/// Compile one frame for a window of `window_width` x `window_height` pixels.
#[tracing::instrument(skip(inputs), fields(layout = ?inputs.geometry.layout()))]
pub fn compile_frame(inputs: &FrameInputs<'_>, window_width: u32, window_height: u32) -> FramePlan {
    let geometry = inputs.geometry;
    let canvas = geometry.canvas();
    let letterbox = Letterbox::fit(canvas, window_width, window_height);
    if letterbox.is_empty() {
        tracing::debug!("window has no drawable area");
        return FramePlan::empty(canvas, letterbox);
    }

    let host = inputs.host;
    let program = host.program_scene();
    let preview = host.preview_scene();
    let split = host.preview_program_mode();

    let mut c = Compiler {
        inputs,
        letterbox,
        ops: Vec::new(),
    };

    c.fill(canvas.rect(), inputs.palette.outer);
    c.tiles(program, preview, split);

    if let (Some(pvw), Some(pgm)) = (geometry.preview(), geometry.program()) {
        let preview_source = if split {
            preview
                .filter(|&s| host.is_alive(s))
                .map(VideoSource::Scene)
        } else {
            Some(VideoSource::ProgramTexture)
        };
        c.pair_cell(pvw, preview_source, PREVIEW_LABEL);
        c.pair_cell(pgm, Some(VideoSource::ProgramTexture), PROGRAM_LABEL);

        if let Some(meter) = inputs.meter {
            c.meter(meter, pgm);
        }
        for panel in geometry.info_panels() {
            c.fill(panel, inputs.palette.background);
        }
        if inputs.show_safe_area {
            let viewport = letterbox.viewport(pvw.inset);
            c.ops.push(DrawOp::SafeAreas {
                dest: pvw.inset,
                viewport,
            });
        }
    }

    FramePlan {
        canvas,
        letterbox,
        ops: c.ops,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/orchestrator.rs"]
mod tests;
