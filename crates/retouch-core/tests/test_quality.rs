mod common;

use approx::assert_abs_diff_eq;

use retouch_core::enhance::AnalysisConfig;
use retouch_core::filters::gaussian_blur::gaussian_blur;
use retouch_core::quality::{
    analyze_brightness, analyze_dynamic_range, estimate_noise, has_color_cast, is_blurry,
    is_low_contrast, needs_saturation_boost,
};
use retouch_core::{analyze, analyze_with, Frame};

use common::{checkerboard, horizontal_ramp, noisy_gray, random_gray, uniform};

// ---------------------------------------------------------------------------
// Degenerate inputs
// ---------------------------------------------------------------------------

#[test]
fn test_uniform_gray_metrics() {
    let frame = uniform(16, 16, [128, 128, 128]);
    let m = analyze(&frame).unwrap();

    assert_abs_diff_eq!(m.noise_std, 0.0);
    assert_abs_diff_eq!(m.brightness, 128.0);
    assert_eq!(m.dynamic_range.low_1, 128);
    assert_eq!(m.dynamic_range.high_99, 128);
    assert_eq!(m.dynamic_range.range_99, 0);
    assert!(!m.color_cast.has_cast);
    assert_abs_diff_eq!(m.color_cast.severity, 0.0);
    assert!(m.contrast.is_low);
    assert_abs_diff_eq!(m.contrast.std_contrast, 0.0);
    assert!(m.saturation.needs_boost);
    assert_abs_diff_eq!(m.saturation.mean_sat, 0.0);
    assert_abs_diff_eq!(m.saturation.low_sat_ratio, 1.0);
    assert!(m.blur.is_blurry);
    assert_abs_diff_eq!(m.blur.laplacian_var, 0.0);
    assert_abs_diff_eq!(m.blur.severity, 1.0);
}

#[test]
fn test_single_pixel_is_finite() {
    let frame = uniform(1, 1, [10, 200, 30]);
    let m = analyze(&frame).unwrap();
    assert_abs_diff_eq!(m.noise_std, 0.0);
    assert_abs_diff_eq!(m.blur.laplacian_var, 0.0);
    assert_abs_diff_eq!(m.blur.mean_gradient, 0.0);
    assert!(m.brightness.is_finite());
    assert!(m.saturation.mean_sat.is_finite());
    assert!(m.color_cast.has_cast);
}

#[test]
fn test_two_by_two_has_no_interior() {
    let frame = common::checkerboard(2, 2, 1, [0, 0, 0], [255, 255, 255]);
    let blur = is_blurry(&frame, 100.0);
    assert_abs_diff_eq!(blur.laplacian_var, 0.0);
    assert_abs_diff_eq!(blur.mean_gradient, 0.0);
    assert!(blur.is_blurry);
}

#[test]
fn test_black_channel_does_not_break_analysis() {
    let frame = uniform(8, 8, [0, 120, 200]);
    let m = analyze(&frame).unwrap();
    assert!(m.color_cast.has_cast);
    assert_abs_diff_eq!(m.color_cast.severity, 200.0 / 255.0, epsilon = 1e-12);
    assert!(m.color_cast.severity <= 1.0);
}

// ---------------------------------------------------------------------------
// Individual measurements
// ---------------------------------------------------------------------------

#[test]
fn test_noise_grows_with_noise_level() {
    let clean = uniform(48, 48, [128, 128, 128]);
    let light = noisy_gray(48, 48, 128, 5.0, 1);
    let heavy = noisy_gray(48, 48, 128, 20.0, 1);

    let n0 = estimate_noise(&clean);
    let n1 = estimate_noise(&light);
    let n2 = estimate_noise(&heavy);
    assert_abs_diff_eq!(n0, 0.0);
    assert!(n1 > n0);
    assert!(n2 > n1, "heavy {n2} should exceed light {n1}");
}

#[test]
fn test_brightness_is_mean_luma() {
    assert_abs_diff_eq!(analyze_brightness(&uniform(4, 4, [0, 0, 0])), 0.0);
    assert_abs_diff_eq!(analyze_brightness(&uniform(4, 4, [255, 255, 255])), 255.0);
    // 0.299 * 255 = 76.2
    assert_abs_diff_eq!(analyze_brightness(&uniform(4, 4, [255, 0, 0])), 76.0);
}

#[test]
fn test_dynamic_range_of_uniform_histogram() {
    // Every level in 50..=200 appears equally often.
    let frame = Frame::from_fn(151, 10, |_, col| {
        let v = (50 + col) as u8;
        [v, v, v]
    })
    .unwrap();
    let dr = analyze_dynamic_range(&frame);

    assert!(dr.low_1.abs_diff(51) <= 1, "low_1 = {}", dr.low_1);
    assert!(dr.high_99.abs_diff(199) <= 1, "high_99 = {}", dr.high_99);
    assert!(dr.low_5.abs_diff(57) <= 1, "low_5 = {}", dr.low_5);
    assert!(dr.high_95.abs_diff(193) <= 1, "high_95 = {}", dr.high_95);
    assert_eq!(dr.range_99, dr.high_99 - dr.low_1);
    assert_eq!(dr.range_95, dr.high_95 - dr.low_5);
}

#[test]
fn test_color_cast_from_channel_means() {
    let cast = has_color_cast(&uniform(8, 8, [100, 150, 150]), 15.0);
    assert!(cast.has_cast);
    assert_abs_diff_eq!(cast.severity, 50.0 / 255.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cast.channel_means.0, 100.0);
    assert_abs_diff_eq!(cast.channel_means.1, 150.0);
    assert_abs_diff_eq!(cast.channel_means.2, 150.0);

    let slight = has_color_cast(&uniform(8, 8, [100, 110, 105]), 15.0);
    assert!(!slight.has_cast);
}

#[test]
fn test_full_ramp_is_not_low_contrast() {
    let frame = horizontal_ramp(256, 8, 0, 255);
    let c = is_low_contrast(&frame, 0.3);
    assert!(!c.is_low);
    assert!(c.range_contrast > 0.9);
    assert!(c.std_contrast > 0.2);
    assert_abs_diff_eq!(c.rms_contrast, c.std_contrast, epsilon = 1e-9);
}

#[test]
fn test_narrow_ramp_is_low_contrast() {
    let frame = horizontal_ramp(64, 8, 110, 150);
    let c = is_low_contrast(&frame, 0.3);
    assert!(c.is_low);
    assert!(c.range_contrast < 0.2);
}

#[test]
fn test_saturated_red_needs_no_boost() {
    let s = needs_saturation_boost(&uniform(8, 8, [255, 0, 0]), 60.0);
    assert!(!s.needs_boost);
    assert_abs_diff_eq!(s.mean_sat, 255.0);
    assert_abs_diff_eq!(s.std_sat, 0.0);
    assert_abs_diff_eq!(s.low_sat_ratio, 0.0);
}

#[test]
fn test_muted_color_needs_boost() {
    // s = (140 - 120) / 140 * 255 ~= 36
    let s = needs_saturation_boost(&uniform(8, 8, [140, 130, 120]), 60.0);
    assert!(s.needs_boost);
    assert!(s.mean_sat > 30.0 && s.mean_sat < 40.0, "mean_sat = {}", s.mean_sat);
    assert_abs_diff_eq!(s.low_sat_ratio, 1.0);
}

#[test]
fn test_blur_decreases_with_gaussian_sigma() {
    let frame = random_gray(64, 64, 7);
    let sharp = is_blurry(&frame, 100.0);
    assert!(!sharp.is_blurry);

    let mut previous = sharp.laplacian_var;
    let mut last_gradient = sharp.mean_gradient;
    for sigma in [0.5, 1.0, 1.5, 2.0] {
        let blurred = gaussian_blur(&frame, sigma).unwrap();
        let b = is_blurry(&blurred, 100.0);
        assert!(
            b.laplacian_var < previous,
            "sigma {sigma}: {} should be below {previous}",
            b.laplacian_var
        );
        assert!(b.mean_gradient < last_gradient);
        previous = b.laplacian_var;
        last_gradient = b.mean_gradient;
    }

    let very_blurred = is_blurry(&gaussian_blur(&frame, 2.0).unwrap(), 100.0);
    assert!(very_blurred.is_blurry);
    assert!(very_blurred.severity > 0.0 && very_blurred.severity <= 1.0);
}

#[test]
fn test_blur_severity_never_decreases_on_step_edges() {
    let frame = checkerboard(64, 64, 8, [40, 40, 40], [200, 200, 200]);
    let sharp = is_blurry(&frame, 100.0);
    assert!(!sharp.is_blurry);
    assert_abs_diff_eq!(sharp.severity, 0.0);

    let mut previous = sharp;
    for sigma in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0] {
        let b = is_blurry(&gaussian_blur(&frame, sigma).unwrap(), 100.0);
        assert!(b.laplacian_var < previous.laplacian_var, "sigma {sigma}");
        assert!(
            b.severity >= previous.severity,
            "sigma {sigma}: severity {} dropped below {}",
            b.severity,
            previous.severity
        );
        previous = b;
    }
    assert!(previous.is_blurry);
    assert!(previous.severity > 0.9, "severity = {}", previous.severity);
}

// ---------------------------------------------------------------------------
// analyze / analyze_with
// ---------------------------------------------------------------------------

#[test]
fn test_analyze_matches_individual_measurements() {
    let frame = noisy_gray(32, 32, 90, 12.0, 3);
    let m = analyze(&frame).unwrap();

    assert_abs_diff_eq!(m.noise_std, estimate_noise(&frame));
    assert_abs_diff_eq!(m.brightness, analyze_brightness(&frame));
    assert_eq!(m.dynamic_range, analyze_dynamic_range(&frame));
    assert_eq!(m.color_cast, has_color_cast(&frame, 15.0));
    assert_eq!(m.contrast, is_low_contrast(&frame, 0.3));
    assert_eq!(m.saturation, needs_saturation_boost(&frame, 60.0));
    assert_eq!(m.blur, is_blurry(&frame, 100.0));
}

#[test]
fn test_analyze_with_custom_thresholds() {
    let frame = uniform(8, 8, [100, 110, 105]);
    let strict = AnalysisConfig {
        cast_threshold: 5.0,
        ..AnalysisConfig::default()
    };
    assert!(!analyze(&frame).unwrap().color_cast.has_cast);
    assert!(analyze_with(&frame, &strict).unwrap().color_cast.has_cast);

    let lenient_blur = AnalysisConfig {
        blur_threshold: 0.0,
        ..AnalysisConfig::default()
    };
    let m = analyze_with(&frame, &lenient_blur).unwrap();
    assert!(!m.blur.is_blurry);
    assert_abs_diff_eq!(m.blur.severity, 0.0);
}

#[test]
fn test_analyze_is_deterministic() {
    let frame = noisy_gray(40, 24, 100, 15.0, 11);
    assert_eq!(analyze(&frame).unwrap(), analyze(&frame).unwrap());
}

#[test]
fn test_metrics_serialize_to_json() {
    let m = analyze(&uniform(4, 4, [100, 150, 150])).unwrap();
    let json = serde_json::to_value(&m).unwrap();
    assert!(json["noise_std"].is_number());
    assert_eq!(json["color_cast"]["has_cast"], true);
    assert_eq!(json["dynamic_range"]["range_99"], 0);
    assert!(json["blur"]["laplacian_var"].is_number());
}
