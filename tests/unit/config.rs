use super::*;

#[test]
fn defaults_match_reference_palette() {
    let p = Palette::default();
    assert_eq!(p.program, Argb::new(0xFFD0_0000));
    assert_eq!(p.preview, Argb::new(0xFF00_D000));
    assert_eq!(p.outer, Argb::new(0xFFD0_D0D0));
}

#[test]
fn scale_labels_cover_floor_to_zero() {
    let m = MeterConfig::default();
    assert_eq!(m.scale_label_count(), 13);
    let values: Vec<f32> = m.scale_values().collect();
    assert_eq!(values.first().copied(), Some(0.0));
    assert_eq!(values.last().copied(), Some(-60.0));

    let odd = MeterConfig {
        floor_db: -42.0,
        scale_step_db: 10.0,
        ..MeterConfig::default()
    };
    assert_eq!(odd.scale_label_count(), 5);
}

#[test]
fn meter_validation_rejects_non_negative_floor() {
    let bad = MeterConfig {
        floor_db: 0.0,
        ..MeterConfig::default()
    };
    assert!(bad.validate().is_err());
    assert!(
        MeterConfig {
            cells: 0,
            ..MeterConfig::default()
        }
        .validate()
        .is_err()
    );
    assert!(MeterConfig::default().validate().is_ok());
}

#[test]
fn config_json_uses_snake_case_layouts_and_defaults() {
    let cfg: MultiviewConfig =
        serde_json::from_str(r#"{ "layout": "scenes_only_9_scenes", "show_meter": true }"#)
            .unwrap();
    assert_eq!(cfg.layout, LayoutKind::ScenesOnly9Scenes);
    assert!(cfg.show_meter);
    assert!(cfg.show_labels);
    assert_eq!(cfg.selected_tracks, 1);
}

#[test]
fn load_json_reports_missing_file() {
    let err = MultiviewConfig::load_json(Path::new("target/definitely/missing.json")).unwrap_err();
    assert!(err.to_string().contains("config error:"));
}
