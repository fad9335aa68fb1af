use approx::assert_abs_diff_eq;

use retouch_core::enhance::adaptive::{
    clahe_params, denoise_for, gamma_for, saturation_scale, unsharp_params, white_balance_gains,
    Denoise, GAIN_RANGE, GAMMA_RANGE, SATURATION_RANGE, SHARPEN_AMOUNT_RANGE,
    SHARPEN_RADIUS_RANGE,
};

const WIDE: usize = 200;
const NARROW: usize = 50;

// ---------------------------------------------------------------------------
// Gamma
// ---------------------------------------------------------------------------

#[test]
fn test_gamma_tiers() {
    assert_eq!(gamma_for(50.0, WIDE), Some(0.6));
    assert_eq!(gamma_for(90.0, WIDE), Some(0.8));
    assert_eq!(gamma_for(120.0, WIDE), None);
    assert_eq!(gamma_for(150.0, WIDE), Some(1.2));
    assert_eq!(gamma_for(200.0, WIDE), Some(1.4));
}

#[test]
fn test_gamma_boundaries_are_skipped() {
    assert_eq!(gamma_for(100.0, WIDE), None);
    assert_eq!(gamma_for(140.0, WIDE), None);
}

#[test]
fn test_gamma_narrow_range_adjustment() {
    // 0.6 * 0.9 falls below the floor.
    assert_eq!(gamma_for(50.0, NARROW), Some(0.6));
    assert_abs_diff_eq!(gamma_for(90.0, NARROW).unwrap(), 0.72, epsilon = 1e-12);
    assert_abs_diff_eq!(gamma_for(150.0, NARROW).unwrap(), 1.08, epsilon = 1e-12);
    assert_abs_diff_eq!(gamma_for(200.0, NARROW).unwrap(), 1.26, epsilon = 1e-12);
}

// ---------------------------------------------------------------------------
// Denoise
// ---------------------------------------------------------------------------

#[test]
fn test_denoise_skipped_at_or_below_threshold() {
    assert_eq!(denoise_for(0.0, 8.0, 25.0), None);
    assert_eq!(denoise_for(8.0, 8.0, 25.0), None);
}

#[test]
fn test_denoise_light_bilateral() {
    match denoise_for(10.0, 8.0, 25.0) {
        Some(Denoise::Bilateral(p)) => {
            assert_eq!(p.diameter, 7);
            assert_abs_diff_eq!(p.sigma_space, 50.0);
            assert_abs_diff_eq!(p.sigma_color, 20.0);
        }
        other => panic!("expected bilateral, got {other:?}"),
    }
}

#[test]
fn test_denoise_medium_bilateral() {
    for noise in [15.0, 20.0, 25.0] {
        match denoise_for(noise, 8.0, 25.0) {
            Some(Denoise::Bilateral(p)) => {
                assert_eq!(p.diameter, 9);
                assert_abs_diff_eq!(p.sigma_space, 70.0);
                assert_abs_diff_eq!(p.sigma_color, 2.0 * noise);
            }
            other => panic!("noise {noise}: expected bilateral, got {other:?}"),
        }
    }
}

#[test]
fn test_denoise_heavy_uses_nl_means() {
    match denoise_for(30.0, 8.0, 25.0) {
        Some(Denoise::NlMeans(p)) => {
            assert_abs_diff_eq!(p.strength, 12.0);
            assert_eq!(p.template_window, 7);
            assert_eq!(p.search_window, 21);
            assert_abs_diff_eq!(p.sigma, 30.0);
        }
        other => panic!("expected nl-means, got {other:?}"),
    }
    match denoise_for(40.0, 8.0, 25.0) {
        Some(Denoise::NlMeans(p)) => {
            assert_abs_diff_eq!(p.strength, 15.0);
            assert_eq!(p.template_window, 9);
            assert_eq!(p.search_window, 25);
        }
        other => panic!("expected nl-means, got {other:?}"),
    }
}

#[test]
fn test_denoise_thresholds_are_configurable() {
    assert_eq!(denoise_for(10.0, 12.0, 25.0), None);
    assert!(matches!(
        denoise_for(20.0, 8.0, 18.0),
        Some(Denoise::NlMeans(_))
    ));
}

// ---------------------------------------------------------------------------
// White balance
// ---------------------------------------------------------------------------

#[test]
fn test_white_balance_full_severity_is_gray_world() {
    let g = white_balance_gains((100.0, 150.0, 150.0), 1.0);
    assert_abs_diff_eq!(g.r, 4.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(g.g, 8.0 / 9.0, epsilon = 1e-12);
    assert_abs_diff_eq!(g.b, 8.0 / 9.0, epsilon = 1e-12);
}

#[test]
fn test_white_balance_damped_by_severity() {
    let g = white_balance_gains((100.0, 150.0, 150.0), 0.0);
    assert_abs_diff_eq!(g.r, 1.0 + (1.0 / 3.0) * 0.3, epsilon = 1e-12);
    assert_abs_diff_eq!(g.g, 1.0 - (1.0 / 9.0) * 0.3, epsilon = 1e-12);
}

#[test]
fn test_white_balance_gains_clamped() {
    let g = white_balance_gains((0.0, 200.0, 250.0), 1.0);
    assert_abs_diff_eq!(g.r, GAIN_RANGE.1);
    assert!(g.g >= GAIN_RANGE.0 && g.g <= GAIN_RANGE.1);
    assert!(g.b >= GAIN_RANGE.0 && g.b <= GAIN_RANGE.1);

    let g = white_balance_gains((255.0, 1.0, 1.0), 1.0);
    assert_abs_diff_eq!(g.r, GAIN_RANGE.0);
    assert_abs_diff_eq!(g.g, GAIN_RANGE.1);
}

// ---------------------------------------------------------------------------
// CLAHE
// ---------------------------------------------------------------------------

#[test]
fn test_clahe_params_table() {
    let p = clahe_params(50.0, 0.1, 0.05);
    assert_abs_diff_eq!(p.clip_limit, 2.0 * 2.5 * 1.3, epsilon = 1e-12);
    assert_eq!(p.tile_grid, 6);

    let p = clahe_params(200.0, 0.2, 0.25);
    assert_abs_diff_eq!(p.clip_limit, 2.0 * 1.8 * 0.8, epsilon = 1e-12);
    assert_eq!(p.tile_grid, 12);

    let p = clahe_params(120.0, 0.28, 0.15);
    assert_abs_diff_eq!(p.clip_limit, 2.0 * 1.2, epsilon = 1e-12);
    assert_eq!(p.tile_grid, 8);
}

// ---------------------------------------------------------------------------
// Saturation
// ---------------------------------------------------------------------------

#[test]
fn test_saturation_scale_tiers() {
    assert_abs_diff_eq!(saturation_scale(20.0, 1.0), 1.7, epsilon = 1e-12);
    assert_abs_diff_eq!(saturation_scale(40.0, 0.5), 1.3, epsilon = 1e-12);
    assert_abs_diff_eq!(saturation_scale(55.0, 0.0), 1.1, epsilon = 1e-12);
}

#[test]
fn test_saturation_scale_ratio_is_bounded() {
    assert_abs_diff_eq!(saturation_scale(20.0, 5.0), 1.7, epsilon = 1e-12);
    assert_abs_diff_eq!(saturation_scale(20.0, -3.0), 1.4, epsilon = 1e-12);
}

// ---------------------------------------------------------------------------
// Sharpen
// ---------------------------------------------------------------------------

#[test]
fn test_unsharp_tiers_without_noise() {
    let p = unsharp_params(0.8, 5.0);
    assert_abs_diff_eq!(p.radius, 1.5);
    assert_abs_diff_eq!(p.amount, 120.0);

    let p = unsharp_params(0.5, 5.0);
    assert_abs_diff_eq!(p.radius, 1.2);
    assert_abs_diff_eq!(p.amount, 100.0);

    let p = unsharp_params(0.1, 5.0);
    assert_abs_diff_eq!(p.radius, 0.8);
    assert_abs_diff_eq!(p.amount, 80.0);
}

#[test]
fn test_unsharp_moderate_noise_damping() {
    let p = unsharp_params(0.5, 20.0);
    assert_abs_diff_eq!(p.radius, 1.2 * 1.2, epsilon = 1e-12);
    assert_abs_diff_eq!(p.amount, 70.0, epsilon = 1e-12);
}

#[test]
fn test_unsharp_heavy_noise_damping() {
    let p = unsharp_params(0.2, 30.0);
    assert_abs_diff_eq!(p.radius, 1.2, epsilon = 1e-12);
    assert_abs_diff_eq!(p.amount, 40.0, epsilon = 1e-12);

    // 1.5 * 1.5 exceeds the radius ceiling.
    let p = unsharp_params(0.9, 30.0);
    assert_abs_diff_eq!(p.radius, SHARPEN_RADIUS_RANGE.1);
    assert_abs_diff_eq!(p.amount, 60.0, epsilon = 1e-12);
}

// ---------------------------------------------------------------------------
// Clamp invariants
// ---------------------------------------------------------------------------

#[test]
fn test_every_parameter_stays_in_range_for_extreme_metrics() {
    let extremes = [-1e12, -1.0, 0.0, 1e-9, 0.5, 1.0, 59.9, 255.0, 1e12];

    for &m in &extremes {
        for range in [0usize, 99, 100, 255] {
            if let Some(g) = gamma_for(m, range) {
                assert!(g >= GAMMA_RANGE.0 && g <= GAMMA_RANGE.1, "gamma {g}");
            }
        }

        let s = saturation_scale(m, m);
        assert!(s >= SATURATION_RANGE.0 && s <= SATURATION_RANGE.1, "saturation {s}");

        for &noise in &extremes {
            let p = unsharp_params(m, noise);
            assert!(p.radius >= SHARPEN_RADIUS_RANGE.0 && p.radius <= SHARPEN_RADIUS_RANGE.1);
            assert!(p.amount >= SHARPEN_AMOUNT_RANGE.0 && p.amount <= SHARPEN_AMOUNT_RANGE.1);
        }

        let means = (m.abs().min(255.0), 128.0, 255.0 - m.abs().min(255.0));
        let g = white_balance_gains(means, m);
        for gain in [g.r, g.g, g.b] {
            assert!(gain >= GAIN_RANGE.0 && gain <= GAIN_RANGE.1, "gain {gain}");
        }
    }
}
