use super::*;

fn hd() -> Canvas {
    Canvas::new(1920, 1080).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn horizontal_top_8_places_tiles_below_pair() {
    let g = ViewGeometry::new(LayoutKind::HorizontalTop8Scenes, hd(), 4.0).unwrap();
    assert_eq!(g.pair_size(), Size::new(960.0, 540.0));
    assert_eq!(g.tile_size(), Size::new(480.0, 270.0));

    let t0 = g.tile_at(0).unwrap();
    assert_eq!(t0.rect, Rect::new(0.0, 540.0, 480.0, 810.0));
    assert_eq!(t0.inset, Rect::new(4.0, 544.0, 476.0, 806.0));

    let t5 = g.tile_at(5).unwrap();
    assert_eq!(t5.rect.origin(), Point::new(480.0, 810.0));
    assert!(g.tile_at(8).is_none());

    assert_eq!(g.preview().unwrap().rect.origin(), Point::new(0.0, 0.0));
    assert_eq!(g.program().unwrap().rect.origin(), Point::new(960.0, 0.0));
    assert_eq!(
        g.program().unwrap().inset,
        Rect::new(964.0, 4.0, 1916.0, 536.0)
    );
}

#[test]
fn vertical_layouts_mirror_each_other() {
    let left = ViewGeometry::new(LayoutKind::VerticalLeft8Scenes, hd(), 4.0).unwrap();
    let right = ViewGeometry::new(LayoutKind::VerticalRight8Scenes, hd(), 4.0).unwrap();

    assert_eq!(left.tile_at(0).unwrap().rect.origin(), Point::new(960.0, 0.0));
    assert_eq!(left.tile_at(3).unwrap().rect.origin(), Point::new(1440.0, 270.0));
    assert_eq!(right.tile_at(0).unwrap().rect.origin(), Point::new(0.0, 0.0));
    assert_eq!(right.tile_at(7).unwrap().rect.origin(), Point::new(480.0, 810.0));

    assert_eq!(left.program().unwrap().rect.origin(), Point::new(0.0, 0.0));
    assert_eq!(left.preview().unwrap().rect.origin(), Point::new(0.0, 540.0));
    assert_eq!(right.program().unwrap().rect.origin(), Point::new(960.0, 0.0));
    assert_eq!(right.preview().unwrap().rect.origin(), Point::new(960.0, 540.0));
}

#[test]
fn horizontal_bottom_puts_pair_on_lower_half() {
    let g = ViewGeometry::new(LayoutKind::HorizontalBottom8Scenes, hd(), 4.0).unwrap();
    assert_eq!(g.tile_at(4).unwrap().rect.origin(), Point::new(0.0, 270.0));
    assert_eq!(g.preview().unwrap().rect.origin(), Point::new(0.0, 540.0));
    assert_eq!(g.program().unwrap().rect.origin(), Point::new(960.0, 540.0));
}

#[test]
fn twenty_four_centers_pair_and_reserves_panels() {
    let g = ViewGeometry::new(LayoutKind::HorizontalTop24Scenes, hd(), 4.0).unwrap();
    assert_eq!(g.pair_size(), Size::new(640.0, 360.0));
    assert_eq!(g.tile_size(), Size::new(320.0, 180.0));
    assert_eq!(g.preview().unwrap().rect.origin(), Point::new(320.0, 0.0));
    assert_eq!(g.program().unwrap().rect.origin(), Point::new(960.0, 0.0));
    assert_eq!(g.tile_at(6).unwrap().rect.origin(), Point::new(0.0, 540.0));
    assert_eq!(g.tile_at(23).unwrap().rect, Rect::new(1600.0, 900.0, 1920.0, 1080.0));

    let panels = g.info_panels();
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[0], Rect::new(4.0, 4.0, 316.0, 356.0));
    assert!(approx(panels[1].x0, 1604.0));
    assert!(approx(panels[1].x1, 1916.0));

    let other = ViewGeometry::new(LayoutKind::HorizontalTop8Scenes, hd(), 4.0).unwrap();
    assert!(other.info_panels().is_empty());
}

#[test]
fn eighteen_uses_six_columns_of_thirds() {
    let g = ViewGeometry::new(LayoutKind::HorizontalTop18Scenes, hd(), 4.0).unwrap();
    assert_eq!(g.tile_size(), Size::new(320.0, 180.0));
    assert_eq!(g.tile_at(17).unwrap().rect, Rect::new(1600.0, 900.0, 1920.0, 1080.0));
}

#[test]
fn scenes_only_fill_whole_canvas() {
    for (kind, side) in [
        (LayoutKind::ScenesOnly4Scenes, 2.0),
        (LayoutKind::ScenesOnly9Scenes, 3.0),
        (LayoutKind::ScenesOnly16Scenes, 4.0),
        (LayoutKind::ScenesOnly25Scenes, 5.0),
    ] {
        let g = ViewGeometry::new(kind, hd(), 4.0).unwrap();
        assert!(g.preview().is_none());
        assert!(g.program().is_none());
        let last = g.tile_at(kind.capacity() - 1).unwrap().rect;
        assert!(approx(last.x1, 1920.0), "{kind:?}");
        assert!(approx(last.y1, 1080.0), "{kind:?}");
        assert!(approx(g.tile_size().width, 1920.0 / side));
        assert_eq!(g.tile_region(), Rect::new(0.0, 0.0, 1920.0, 1080.0));
    }
}

#[test]
fn tiles_never_overlap_and_stay_in_region() {
    for kind in LayoutKind::ALL {
        let g = ViewGeometry::new(kind, hd(), 4.0).unwrap();
        let region = g.tile_region();
        let tiles: Vec<Rect> = (0..kind.capacity())
            .map(|i| g.tile_at(i).unwrap().rect)
            .collect();
        for (i, a) in tiles.iter().enumerate() {
            assert!(a.x0 >= region.x0 - 1e-9 && a.x1 <= region.x1 + 1e-9, "{kind:?}");
            assert!(a.y0 >= region.y0 - 1e-9 && a.y1 <= region.y1 + 1e-9, "{kind:?}");
            for b in &tiles[i + 1..] {
                assert!(a.intersect(*b).area() < 1e-6, "{kind:?}");
            }
        }
    }
}

#[test]
fn degenerate_outputs_are_rejected() {
    let tiny = Canvas {
        width: 40,
        height: 20,
    };
    assert!(ViewGeometry::new(LayoutKind::ScenesOnly25Scenes, tiny, 4.0).is_err());
    let empty = Canvas {
        width: 1920,
        height: 0,
    };
    assert!(ViewGeometry::new(LayoutKind::HorizontalTop8Scenes, empty, 4.0).is_err());
    assert!(ViewGeometry::new(LayoutKind::HorizontalTop8Scenes, hd(), -1.0).is_err());
    assert!(ViewGeometry::new(LayoutKind::HorizontalTop8Scenes, hd(), f32::NAN).is_err());
}

#[test]
fn scales_map_canvas_into_insets() {
    let g = ViewGeometry::new(LayoutKind::HorizontalTop8Scenes, hd(), 4.0).unwrap();
    let s = g.tile_scale();
    assert!(approx(s.x, 472.0 / 1920.0));
    assert!(approx(s.y, 262.0 / 1080.0));
    let p = g.pair_scale();
    assert!(approx(p.x, 952.0 / 1920.0));
}

#[test]
fn labels_center_horizontally_near_bottom() {
    let g = ViewGeometry::new(LayoutKind::HorizontalTop8Scenes, hd(), 4.0).unwrap();
    let tile = g.tile_at(0).unwrap().rect;
    let placed = g.label_at(tile, Size::new(200.0, 40.0), tile.y0);
    assert!(approx(placed.origin.x, 240.0 - 50.0));
    assert!(approx(placed.origin.y, 540.0 + 270.0 * 0.85));
    assert!(approx(placed.backing.width(), 200.0 * g.pair_scale().x));
    assert!(approx(
        placed.backing.height(),
        (40.0 + (540.0f64 * 0.015).trunc()) * g.pair_scale().y
    ));
}
