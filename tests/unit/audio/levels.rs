use super::*;

fn cfg() -> MeterConfig {
    MeterConfig::default()
}

#[test]
fn full_scale_dc_block_reads_zero_db() {
    let samples = vec![1.0f32; 100];
    assert!((rms(&samples) - 1.0).abs() < 1e-6);
    let planes = [Some(samples.as_slice())];
    let levels = block_levels(&AudioBlock {
        frames: 100,
        planes: &planes,
    });
    assert!(levels[0].abs() < 1e-5);
    assert_eq!(lit_cells(levels[0], &cfg()), cfg().cells);
}

#[test]
fn silent_and_missing_channels_are_not_finite() {
    let zeros = vec![0.0f32; 64];
    let planes = [Some(zeros.as_slice()), None];
    let levels = block_levels(&AudioBlock {
        frames: 64,
        planes: &planes,
    });
    assert!(levels.iter().all(|l| !l.is_finite()));
}

#[test]
fn zero_frames_yield_no_signal() {
    let samples = vec![0.5f32; 16];
    let planes = [Some(samples.as_slice())];
    let levels = block_levels(&AudioBlock {
        frames: 0,
        planes: &planes,
    });
    assert!(!levels[0].is_finite());
}

#[test]
fn frame_count_bounds_the_plane() {
    let mut samples = vec![1.0f32; 10];
    samples.extend(std::iter::repeat_n(0.0, 10));
    let planes = [Some(samples.as_slice())];
    let levels = block_levels(&AudioBlock {
        frames: 10,
        planes: &planes,
    });
    assert!(levels[0].abs() < 1e-5);
}

#[test]
fn full_scale_sine_matches_rms_formula() {
    let n = 4800;
    let samples: Vec<f32> = (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * 1000.0 * i as f64 / 48_000.0).sin() as f32)
        .collect();
    let planes = [Some(samples.as_slice())];
    let levels = block_levels(&AudioBlock {
        frames: n,
        planes: &planes,
    });
    let expected_db = 20.0 * std::f32::consts::FRAC_1_SQRT_2.log10();
    assert!((levels[0] - expected_db).abs() < 0.01);

    let expected_lit = cfg().cells as i32 - (expected_db * (36.0 / -60.0)) as i32;
    let lit = lit_cells(levels[0], &cfg()) as i32;
    assert!((lit - expected_lit).abs() <= 1);
    assert_eq!(lit, 35);
}

#[test]
fn lit_cells_clamp_at_both_ends() {
    assert_eq!(lit_cells(0.0, &cfg()), 36);
    assert_eq!(lit_cells(6.0, &cfg()), 36);
    assert_eq!(lit_cells(-60.0, &cfg()), 0);
    assert_eq!(lit_cells(-120.0, &cfg()), 0);
    assert_eq!(lit_cells(-10.0, &cfg()), 30);
    assert_eq!(lit_cells(f32::MAX, &cfg()), 36);
    assert_eq!(lit_cells(f32::MIN, &cfg()), 0);
}

#[test]
fn saturating_conversion_never_wraps() {
    assert_eq!(saturating_i32(1e20), i32::MAX);
    assert_eq!(saturating_i32(-1e20), i32::MIN);
    assert_eq!(saturating_i32(f32::NAN), 0);
    assert_eq!(saturating_i32(-2.7), -2);
    assert_eq!(saturating_i32(2.7), 2);
}

#[test]
fn bands_follow_thresholds() {
    assert_eq!(band_for(0.0, &cfg()), Band::Error);
    assert_eq!(band_for(-5.9, &cfg()), Band::Error);
    assert_eq!(band_for(-6.0, &cfg()), Band::Warning);
    assert_eq!(band_for(-10.0, &cfg()), Band::Warning);
    assert_eq!(band_for(-20.0, &cfg()), Band::Nominal);
    assert_eq!(band_for(-59.0, &cfg()), Band::Nominal);
}

#[test]
fn top_lit_cell_at_minus_ten_is_warning() {
    let lit = lit_cells(-10.0, &cfg());
    let top = cell_level(lit - 1, &cfg());
    assert!((top - -10.0).abs() < 1e-3);
    assert_eq!(band_for(top, &cfg()), Band::Warning);
    assert!((cell_level(cfg().cells - 1, &cfg())).abs() < 1e-4);
}
