use crate::{
    foundation::core::{Argb, Canvas, Letterbox, PixelRect, Point, Rect, Vec2},
    scene::host::SceneId,
    scene::labels::LabelId,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Backend-agnostic draw list for one multiview frame.
///
/// All rectangles are in canvas units. Delegated draws (video, labels, safe areas) also carry
/// the window-pixel viewport the backend should clip them to, derived from `letterbox`.
pub struct FramePlan {
    pub canvas: Canvas,
    pub letterbox: Letterbox,
    pub ops: Vec<DrawOp>,
}

impl FramePlan {
    /// A plan that draws nothing; used when the window has no drawable area.
    pub fn empty(canvas: Canvas, letterbox: Letterbox) -> Self {
        Self {
            canvas,
            letterbox,
            ops: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// What a delegated video draw shows.
pub enum VideoSource {
    /// A single scene's video, rendered by the composition engine.
    Scene(SceneId),
    /// The composited program output texture.
    ProgramTexture,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
/// Draw operation emitted by the orchestrator.
pub enum DrawOp {
    /// Solid-color rectangle.
    FillRect { rect: Rect, color: Argb },
    /// Video frame drawn into `dest`, scaled from the full canvas.
    Video {
        source: VideoSource,
        dest: Rect,
        viewport: PixelRect,
    },
    /// Label render object drawn at `origin`, scaled from label units.
    Label {
        label: LabelId,
        origin: Point,
        scale: Vec2,
    },
    /// Fixed safe-area guide overlay over `dest`.
    SafeAreas { dest: Rect, viewport: PixelRect },
}

impl DrawOp {
    pub fn fill(rect: Rect, color: Argb) -> Self {
        Self::FillRect { rect, color }
    }
}
