//! Layout Table: one record per grid configuration.
//!
//! Capacity, divisors, the index <-> cell mapping, preview/program placement and the hit-test
//! region all come from the same [`LayoutSpec`], so the forward and inverse mappings cannot
//! drift apart.

use std::str::FromStr;

use crate::{
    foundation::core::Rect,
    foundation::error::{MultiviewError, MultiviewResult},
};

/// Closed set of multiview grid configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LayoutKind {
    /// Preview/program on top, 2x4 scene tiles below.
    #[serde(rename = "horizontal_top_8_scenes")]
    HorizontalTop8Scenes,
    /// 2x4 scene tiles on top, preview/program below.
    #[serde(rename = "horizontal_bottom_8_scenes")]
    HorizontalBottom8Scenes,
    /// Preview/program stacked on the left, 4x2 scene tiles on the right.
    #[serde(rename = "vertical_left_8_scenes")]
    VerticalLeft8Scenes,
    /// Preview/program stacked on the right, 4x2 scene tiles on the left.
    #[serde(rename = "vertical_right_8_scenes")]
    VerticalRight8Scenes,
    /// Centered preview/program on the top third, 4x6 scene tiles below.
    #[serde(rename = "horizontal_top_24_scenes")]
    HorizontalTop24Scenes,
    /// Preview/program on top, 3x6 scene tiles below.
    #[serde(rename = "horizontal_top_18_scenes")]
    HorizontalTop18Scenes,
    #[serde(rename = "scenes_only_4_scenes")]
    ScenesOnly4Scenes,
    #[serde(rename = "scenes_only_9_scenes")]
    ScenesOnly9Scenes,
    #[serde(rename = "scenes_only_16_scenes")]
    ScenesOnly16Scenes,
    #[serde(rename = "scenes_only_25_scenes")]
    ScenesOnly25Scenes,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 10] = [
        LayoutKind::HorizontalTop8Scenes,
        LayoutKind::HorizontalBottom8Scenes,
        LayoutKind::VerticalLeft8Scenes,
        LayoutKind::VerticalRight8Scenes,
        LayoutKind::HorizontalTop24Scenes,
        LayoutKind::HorizontalTop18Scenes,
        LayoutKind::ScenesOnly4Scenes,
        LayoutKind::ScenesOnly9Scenes,
        LayoutKind::ScenesOnly16Scenes,
        LayoutKind::ScenesOnly25Scenes,
    ];

    pub fn spec(self) -> &'static LayoutSpec {
        &LAYOUTS[self as usize]
    }

    pub fn capacity(self) -> usize {
        self.spec().capacity
    }

    /// Scenes-only grids have no dedicated preview/program pair.
    pub fn is_scenes_only(self) -> bool {
        self.spec().pair.is_none()
    }

    /// Configuration name, as used in JSON and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::HorizontalTop8Scenes => "horizontal_top_8_scenes",
            LayoutKind::HorizontalBottom8Scenes => "horizontal_bottom_8_scenes",
            LayoutKind::VerticalLeft8Scenes => "vertical_left_8_scenes",
            LayoutKind::VerticalRight8Scenes => "vertical_right_8_scenes",
            LayoutKind::HorizontalTop24Scenes => "horizontal_top_24_scenes",
            LayoutKind::HorizontalTop18Scenes => "horizontal_top_18_scenes",
            LayoutKind::ScenesOnly4Scenes => "scenes_only_4_scenes",
            LayoutKind::ScenesOnly9Scenes => "scenes_only_9_scenes",
            LayoutKind::ScenesOnly16Scenes => "scenes_only_16_scenes",
            LayoutKind::ScenesOnly25Scenes => "scenes_only_25_scenes",
        }
    }
}

impl FromStr for LayoutKind {
    type Err = MultiviewError;

    fn from_str(s: &str) -> MultiviewResult<Self> {
        LayoutKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| MultiviewError::config(format!("unknown layout '{s}'")))
    }
}

/// Where the preview and program cells sit, in preview/program cell units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairPlacement {
    pub preview: (f64, f64),
    pub program: (f64, f64),
}

/// Per-layout constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSpec {
    pub kind: LayoutKind,
    /// Maximum number of scene tiles.
    pub capacity: usize,
    /// Output size divided by this (per axis) gives the preview/program cell size.
    pub pvw_divisor: u32,
    /// Preview/program cell size divided by this (per axis) gives the scene tile size.
    pub tile_divisor: u32,
    pub columns: usize,
    pub rows: usize,
    /// Top-left of the tile grid, in preview/program cell units.
    pub grid_origin: (f64, f64),
    pub pair: Option<PairPlacement>,
    /// Two reserved background panels flank the centered preview/program pair.
    pub info_panels: bool,
}

impl LayoutSpec {
    /// Forward mapping: linear tile index to `(column, row)`, row-major.
    pub fn cell_of(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.capacity {
            return None;
        }
        Some((index % self.columns, index / self.columns))
    }

    /// Inverse of [`LayoutSpec::cell_of`].
    pub fn index_of(&self, column: usize, row: usize) -> Option<usize> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let index = row * self.columns + column;
        (index < self.capacity).then_some(index)
    }

    /// Tile region as a fraction of the canvas (unit square coordinates).
    pub fn tile_region(&self) -> Rect {
        let pvw = f64::from(self.pvw_divisor);
        let tile = pvw * f64::from(self.tile_divisor);
        let x0 = self.grid_origin.0 / pvw;
        let y0 = self.grid_origin.1 / pvw;
        Rect::new(
            x0,
            y0,
            x0 + self.columns as f64 / tile,
            y0 + self.rows as f64 / tile,
        )
    }

    /// Label widths are divided by this when centering a label in its cell.
    ///
    /// Labels are drawn at the preview/program scale (`1 / pvw_divisor`), so half of the
    /// scaled width is `width / (2 * pvw_divisor)`.
    pub fn label_divisor(&self) -> u32 {
        2 * self.pvw_divisor
    }
}

const HORIZONTAL_TOP: PairPlacement = PairPlacement {
    preview: (0.0, 0.0),
    program: (1.0, 0.0),
};

const LAYOUTS: [LayoutSpec; 10] = [
    LayoutSpec {
        kind: LayoutKind::HorizontalTop8Scenes,
        capacity: 8,
        pvw_divisor: 2,
        tile_divisor: 2,
        columns: 4,
        rows: 2,
        grid_origin: (0.0, 1.0),
        pair: Some(HORIZONTAL_TOP),
        info_panels: false,
    },
    LayoutSpec {
        kind: LayoutKind::HorizontalBottom8Scenes,
        capacity: 8,
        pvw_divisor: 2,
        tile_divisor: 2,
        columns: 4,
        rows: 2,
        grid_origin: (0.0, 0.0),
        pair: Some(PairPlacement {
            preview: (0.0, 1.0),
            program: (1.0, 1.0),
        }),
        info_panels: false,
    },
    LayoutSpec {
        kind: LayoutKind::VerticalLeft8Scenes,
        capacity: 8,
        pvw_divisor: 2,
        tile_divisor: 2,
        columns: 2,
        rows: 4,
        grid_origin: (1.0, 0.0),
        pair: Some(PairPlacement {
            preview: (0.0, 1.0),
            program: (0.0, 0.0),
        }),
        info_panels: false,
    },
    LayoutSpec {
        kind: LayoutKind::VerticalRight8Scenes,
        capacity: 8,
        pvw_divisor: 2,
        tile_divisor: 2,
        columns: 2,
        rows: 4,
        grid_origin: (0.0, 0.0),
        pair: Some(PairPlacement {
            preview: (1.0, 1.0),
            program: (1.0, 0.0),
        }),
        info_panels: false,
    },
    LayoutSpec {
        kind: LayoutKind::HorizontalTop24Scenes,
        capacity: 24,
        pvw_divisor: 3,
        tile_divisor: 2,
        columns: 6,
        rows: 4,
        grid_origin: (0.0, 1.0),
        pair: Some(PairPlacement {
            preview: (0.5, 0.0),
            program: (1.5, 0.0),
        }),
        info_panels: true,
    },
    LayoutSpec {
        kind: LayoutKind::HorizontalTop18Scenes,
        capacity: 18,
        pvw_divisor: 2,
        tile_divisor: 3,
        columns: 6,
        rows: 3,
        grid_origin: (0.0, 1.0),
        pair: Some(HORIZONTAL_TOP),
        info_panels: false,
    },
    scenes_only(LayoutKind::ScenesOnly4Scenes, 2),
    scenes_only(LayoutKind::ScenesOnly9Scenes, 3),
    scenes_only(LayoutKind::ScenesOnly16Scenes, 4),
    scenes_only(LayoutKind::ScenesOnly25Scenes, 5),
];

const fn scenes_only(kind: LayoutKind, side: u32) -> LayoutSpec {
    LayoutSpec {
        kind,
        capacity: (side * side) as usize,
        pvw_divisor: side,
        tile_divisor: 1,
        columns: side as usize,
        rows: side as usize,
        grid_origin: (0.0, 0.0),
        pair: None,
        info_panels: false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/table.rs"]
mod tests;
