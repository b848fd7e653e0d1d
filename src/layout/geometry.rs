use crate::{
    foundation::core::{Canvas, Point, Rect, Size, Vec2},
    foundation::error::{MultiviewError, MultiviewResult},
    layout::table::{LayoutKind, LayoutSpec},
};

/// Vertical position of a label inside its cell, as a fraction of the cell height.
const LABEL_Y_FRACTION: f64 = 0.85;
/// Extra label backing height, as a fraction of the basis passed to [`ViewGeometry::label_at`].
const LABEL_PAD_FRACTION: f64 = 0.015;

/// A cell rectangle and the inset rectangle the video is drawn into.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TileGeometry {
    pub rect: Rect,
    pub inset: Rect,
}

/// Where a label is drawn and the backing box behind it, in canvas units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LabelPlacement {
    pub origin: Point,
    /// Label-local units to canvas units.
    pub scale: Vec2,
    pub backing: Rect,
}

/// Geometry constants derived once per configuration from the layout and output size.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewGeometry {
    spec: &'static LayoutSpec,
    canvas: Canvas,
    thickness: f64,
    pvw: Size,
    tile: Size,
}

impl ViewGeometry {
    /// Derive all cell sizes for `layout` at the given output resolution.
    ///
    /// Fails when the output is empty or when a border would leave a non-positive inset.
    pub fn new(layout: LayoutKind, canvas: Canvas, thickness: f32) -> MultiviewResult<Self> {
        if canvas.is_empty() {
            return Err(MultiviewError::validation(format!(
                "output size must be non-empty, got {}x{}",
                canvas.width, canvas.height
            )));
        }
        if !thickness.is_finite() || thickness < 0.0 {
            return Err(MultiviewError::validation(format!(
                "border thickness must be finite and >= 0, got {thickness}"
            )));
        }

        let spec = layout.spec();
        let fw = f64::from(canvas.width);
        let fh = f64::from(canvas.height);
        let pvw = Size::new(
            fw / f64::from(spec.pvw_divisor),
            fh / f64::from(spec.pvw_divisor),
        );
        let tile = Size::new(
            pvw.width / f64::from(spec.tile_divisor),
            pvw.height / f64::from(spec.tile_divisor),
        );

        let thickness = f64::from(thickness);
        let min_side = tile.width.min(tile.height).min(pvw.width).min(pvw.height);
        if min_side - 2.0 * thickness <= 0.0 {
            return Err(MultiviewError::validation(format!(
                "{}x{} output is too small for {layout:?} with border {thickness}",
                canvas.width, canvas.height
            )));
        }

        Ok(Self {
            spec,
            canvas,
            thickness,
            pvw,
            tile,
        })
    }

    pub fn layout(&self) -> LayoutKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &'static LayoutSpec {
        self.spec
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Preview/program cell size.
    pub fn pair_size(&self) -> Size {
        self.pvw
    }

    /// Scene tile size.
    pub fn tile_size(&self) -> Size {
        self.tile
    }

    /// Canvas-to-cell scale for the preview/program inset.
    pub fn pair_scale(&self) -> Vec2 {
        self.inset_scale(self.pvw)
    }

    /// Canvas-to-cell scale for a scene tile inset.
    pub fn tile_scale(&self) -> Vec2 {
        self.inset_scale(self.tile)
    }

    fn inset_scale(&self, cell: Size) -> Vec2 {
        Vec2::new(
            (cell.width - 2.0 * self.thickness) / f64::from(self.canvas.width),
            (cell.height - 2.0 * self.thickness) / f64::from(self.canvas.height),
        )
    }

    fn cell(&self, origin: Point, size: Size) -> TileGeometry {
        let rect = Rect::from_origin_size(origin, size);
        TileGeometry {
            rect,
            inset: rect.inset(-self.thickness),
        }
    }

    /// Rectangle of scene tile `index`; `None` beyond the layout capacity.
    pub fn tile_at(&self, index: usize) -> Option<TileGeometry> {
        let (col, row) = self.spec.cell_of(index)?;
        let origin = Point::new(
            self.spec.grid_origin.0 * self.pvw.width + col as f64 * self.tile.width,
            self.spec.grid_origin.1 * self.pvw.height + row as f64 * self.tile.height,
        );
        Some(self.cell(origin, self.tile))
    }

    fn pair_cell(&self, at: (f64, f64)) -> TileGeometry {
        let origin = Point::new(at.0 * self.pvw.width, at.1 * self.pvw.height);
        self.cell(origin, self.pvw)
    }

    /// Dedicated preview cell; `None` for scenes-only layouts.
    pub fn preview(&self) -> Option<TileGeometry> {
        self.spec.pair.map(|p| self.pair_cell(p.preview))
    }

    /// Dedicated program cell; `None` for scenes-only layouts.
    pub fn program(&self) -> Option<TileGeometry> {
        self.spec.pair.map(|p| self.pair_cell(p.program))
    }

    /// Union of all scene tiles in canvas units.
    pub fn tile_region(&self) -> Rect {
        let norm = self.spec.tile_region();
        let fw = f64::from(self.canvas.width);
        let fh = f64::from(self.canvas.height);
        Rect::new(norm.x0 * fw, norm.y0 * fh, norm.x1 * fw, norm.y1 * fh)
    }

    /// Place a label of `label_size` (label-local units) near the bottom of `cell`.
    ///
    /// `pad_basis` feeds the extra backing height: scene tiles pass their top edge, the
    /// preview/program pair passes its cell width.
    pub fn label_at(&self, cell: Rect, label_size: Size, pad_basis: f64) -> LabelPlacement {
        let scale = self.pair_scale();
        let half = (label_size.width / f64::from(self.spec.label_divisor())).trunc();
        let origin = Point::new(
            cell.x0 + cell.width() / 2.0 - half,
            cell.y0 + cell.height() * LABEL_Y_FRACTION,
        );
        let backing = Rect::from_origin_size(
            origin,
            Size::new(
                label_size.width * scale.x,
                (label_size.height + (pad_basis * LABEL_PAD_FRACTION).trunc()) * scale.y,
            ),
        );
        LabelPlacement {
            origin,
            scale,
            backing,
        }
    }

    /// Reserved background panels flanking the preview/program pair (24-scene layout only).
    pub fn info_panels(&self) -> Vec<Rect> {
        if !self.spec.info_panels {
            return Vec::new();
        }
        let t = self.thickness;
        let inset_tile = Size::new(self.tile.width - 2.0 * t, self.tile.height - 2.0 * t);
        let size = Size::new(inset_tile.width, inset_tile.height * 2.0 + 2.0 * t);
        let right_x = t + 2.5 * self.pvw.width;
        vec![
            Rect::from_origin_size(Point::new(t, t), size),
            Rect::from_origin_size(Point::new(right_x, t), size),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
