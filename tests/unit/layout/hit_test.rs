use super::*;
use crate::{foundation::core::Canvas, layout::table::LayoutKind};

fn geometry(kind: LayoutKind) -> ViewGeometry {
    ViewGeometry::new(kind, Canvas::new(1920, 1080).unwrap(), 4.0).unwrap()
}

#[test]
fn tile_centers_round_trip_at_native_size() {
    for kind in LayoutKind::ALL {
        let g = geometry(kind);
        for i in 0..kind.capacity() {
            let center = g.tile_at(i).unwrap().rect.center();
            assert_eq!(locate(&g, center, 1920, 1080), Some(i), "{kind:?} tile {i}");
        }
    }
}

#[test]
fn tile_centers_round_trip_through_letterbox() {
    for kind in LayoutKind::ALL {
        let g = geometry(kind);
        for (ww, wh) in [(960u32, 540u32), (1280, 1024), (2560, 1080)] {
            let lb = Letterbox::fit(g.canvas(), ww, wh);
            for i in 0..kind.capacity() {
                let c = g.tile_at(i).unwrap().rect.center();
                let p = Point::new(
                    f64::from(lb.x) + c.x * lb.scale,
                    f64::from(lb.y) + c.y * lb.scale,
                );
                assert_eq!(locate(&g, p, ww, wh), Some(i), "{kind:?} {ww}x{wh} tile {i}");
            }
        }
    }
}

#[test]
fn pair_area_is_not_hit_testable() {
    let g = geometry(LayoutKind::HorizontalTop8Scenes);
    let program_center = g.program().unwrap().rect.center();
    assert_eq!(locate(&g, program_center, 1920, 1080), None);

    let g = geometry(LayoutKind::VerticalLeft8Scenes);
    assert_eq!(locate(&g, Point::new(100.0, 100.0), 1920, 1080), None);
    assert_eq!(locate(&g, Point::new(1000.0, 100.0), 1920, 1080), Some(0));
    assert_eq!(locate(&g, Point::new(1500.0, 100.0), 1920, 1080), Some(1));
}

#[test]
fn letterbox_bars_miss() {
    let g = geometry(LayoutKind::ScenesOnly4Scenes);
    // 1920x1400 window: canvas fills 1920x1080 centered vertically at y=160.
    assert_eq!(locate(&g, Point::new(10.0, 50.0), 1920, 1400), None);
    assert_eq!(locate(&g, Point::new(10.0, 170.0), 1920, 1400), Some(0));
    assert_eq!(locate(&g, Point::new(1910.0, 1230.0), 1920, 1400), Some(3));
    assert_eq!(locate(&g, Point::new(10.0, 1300.0), 1920, 1400), None);
}

#[test]
fn max_edge_pins_to_last_cell() {
    let g = geometry(LayoutKind::ScenesOnly9Scenes);
    assert_eq!(locate(&g, Point::new(1920.0, 1080.0), 1920, 1080), Some(8));
    assert_eq!(locate(&g, Point::new(1920.0, 0.0), 1920, 1080), Some(2));
}

#[test]
fn degenerate_inputs_miss() {
    let g = geometry(LayoutKind::ScenesOnly4Scenes);
    assert_eq!(locate(&g, Point::new(10.0, 10.0), 0, 1080), None);
    assert_eq!(locate(&g, Point::new(f64::NAN, 10.0), 1920, 1080), None);
    assert_eq!(locate(&g, Point::new(-1.0, 10.0), 1920, 1080), None);
}
