use crate::{
    foundation::core::{Argb, Canvas, Letterbox, PixelRect, Point, Rect, Vec2},
    foundation::error::MultiviewResult,
    render::plan::{DrawOp, FramePlan, VideoSource},
    scene::labels::LabelId,
};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// The graphics backend. Solid fills are drawn directly; everything else is delegated.
pub trait DrawBackend {
    fn begin_frame(&mut self, canvas: Canvas, letterbox: &Letterbox) -> MultiviewResult<()>;

    fn fill_rect(&mut self, rect: Rect, color: Argb) -> MultiviewResult<()>;

    fn draw_video(
        &mut self,
        source: VideoSource,
        dest: Rect,
        viewport: PixelRect,
    ) -> MultiviewResult<()>;

    fn draw_label(&mut self, label: LabelId, origin: Point, scale: Vec2) -> MultiviewResult<()>;

    fn draw_safe_areas(&mut self, dest: Rect, viewport: PixelRect) -> MultiviewResult<()>;

    fn finish(&mut self, plan: &FramePlan) -> MultiviewResult<FrameRGBA>;
}

pub fn execute_plan<B: DrawBackend + ?Sized>(
    backend: &mut B,
    plan: &FramePlan,
) -> MultiviewResult<FrameRGBA> {
    backend.begin_frame(plan.canvas, &plan.letterbox)?;

    for op in &plan.ops {
        match *op {
            DrawOp::FillRect { rect, color } => backend.fill_rect(rect, color)?,
            DrawOp::Video {
                source,
                dest,
                viewport,
            } => backend.draw_video(source, dest, viewport)?,
            DrawOp::Label {
                label,
                origin,
                scale,
            } => backend.draw_label(label, origin, scale)?,
            DrawOp::SafeAreas { dest, viewport } => backend.draw_safe_areas(dest, viewport)?,
        }
    }

    backend.finish(plan)
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
