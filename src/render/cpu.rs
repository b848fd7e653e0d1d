use crate::{
    foundation::core::{Argb, Canvas, Letterbox, PixelRect, Point, Rect, Vec2},
    foundation::error::{MultiviewError, MultiviewResult},
    render::backend::{DrawBackend, FrameRGBA},
    render::plan::{FramePlan, VideoSource},
    scene::labels::LabelId,
};

/// Action-safe margin, as a fraction of each axis.
const ACTION_SAFE: f64 = 0.035;
/// Graphics-safe margin, as a fraction of each axis.
const GRAPHICS_SAFE: f64 = 0.05;

/// Stand-in colors for content the CPU backend cannot produce itself.
#[derive(Clone, Debug)]
pub struct CpuSettings {
    /// Cycled by scene id for scene video.
    pub scene_placeholders: Vec<Argb>,
    pub program_placeholder: Argb,
    pub safe_area: Argb,
}

impl Default for CpuSettings {
    fn default() -> Self {
        Self {
            scene_placeholders: vec![
                Argb::new(0xFF2B_3A55),
                Argb::new(0xFF3F_5A3A),
                Argb::new(0xFF5A_3F3A),
                Argb::new(0xFF4A_3A5A),
                Argb::new(0xFF3A_5454),
                Argb::new(0xFF55_4E2B),
            ],
            program_placeholder: Argb::new(0xFF30_3030),
            safe_area: Argb::new(0xFFFF_FFFF),
        }
    }
}

/// Rasterizes a [`FramePlan`] at canvas resolution with `vello_cpu`.
///
/// Video draws become flat placeholder fills. Label render objects belong to the host and are
/// not rasterized here; their backing boxes are ordinary fills and do show up.
pub struct CpuBackend {
    settings: CpuSettings,
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl CpuBackend {
    pub fn new(settings: CpuSettings) -> Self {
        Self {
            settings,
            surface: None,
        }
    }

    fn surface(&mut self) -> MultiviewResult<&mut CpuSurface> {
        self.surface
            .as_mut()
            .ok_or_else(|| MultiviewError::validation("draw issued outside begin_frame/finish"))
    }

    fn paint(&mut self, rect: Rect, color: Argb) -> MultiviewResult<()> {
        if color.alpha() == 0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Ok(());
        }
        let [r, g, b, a] = color.to_rgba8();
        let s = self.surface()?;
        s.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        s.ctx.fill_rect(&rect_to_cpu(rect));
        Ok(())
    }

    fn outline(&mut self, rect: Rect, width: f64, color: Argb) -> MultiviewResult<()> {
        self.paint(Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + width), color)?;
        self.paint(Rect::new(rect.x0, rect.y1 - width, rect.x1, rect.y1), color)?;
        self.paint(Rect::new(rect.x0, rect.y0, rect.x0 + width, rect.y1), color)?;
        self.paint(Rect::new(rect.x1 - width, rect.y0, rect.x1, rect.y1), color)
    }
}

impl DrawBackend for CpuBackend {
    fn begin_frame(&mut self, canvas: Canvas, _letterbox: &Letterbox) -> MultiviewResult<()> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| MultiviewError::validation("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| MultiviewError::validation("canvas height exceeds u16"))?;
        self.surface = Some(CpuSurface {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Argb) -> MultiviewResult<()> {
        self.paint(rect, color)
    }

    fn draw_video(
        &mut self,
        source: VideoSource,
        dest: Rect,
        _viewport: PixelRect,
    ) -> MultiviewResult<()> {
        let color = match source {
            VideoSource::Scene(id) => {
                let n = self.settings.scene_placeholders.len().max(1) as u64;
                self.settings
                    .scene_placeholders
                    .get((id.0 % n) as usize)
                    .copied()
                    .unwrap_or(self.settings.program_placeholder)
            }
            VideoSource::ProgramTexture => self.settings.program_placeholder,
        };
        self.paint(dest, color)
    }

    fn draw_label(&mut self, label: LabelId, _origin: Point, _scale: Vec2) -> MultiviewResult<()> {
        tracing::trace!(?label, "label raster left to the host");
        Ok(())
    }

    fn draw_safe_areas(&mut self, dest: Rect, _viewport: PixelRect) -> MultiviewResult<()> {
        let color = self.settings.safe_area;
        let line = (dest.height() / 270.0).max(1.0);
        let (w, h) = (dest.width(), dest.height());

        let action = dest.inset((-w * ACTION_SAFE, -h * ACTION_SAFE));
        let graphics = dest.inset((-w * GRAPHICS_SAFE, -h * GRAPHICS_SAFE));
        let four_by_three_w = (h * 4.0 / 3.0).min(w);
        let cx = dest.center().x;
        let four_by_three = Rect::new(
            cx - four_by_three_w / 2.0,
            graphics.y0,
            cx + four_by_three_w / 2.0,
            graphics.y1,
        );

        self.outline(action, line, color)?;
        self.outline(graphics, line, color)?;
        self.outline(four_by_three, line, color)
    }

    fn finish(&mut self, plan: &FramePlan) -> MultiviewResult<FrameRGBA> {
        let mut s = self
            .surface
            .take()
            .ok_or_else(|| MultiviewError::validation("finish called without begin_frame"))?;
        let mut pixmap = vello_cpu::Pixmap::new(s.width, s.height);
        s.ctx.flush();
        s.ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
