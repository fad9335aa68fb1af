use std::path::Path;

use console::Style;
use retouch_core::enhance::{ManualParameters, ParametersUsed};
use retouch_core::QualityMetrics;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    flag: Style,
    ok: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            flag: Style::new().yellow().bold(),
            ok: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }

    fn verdict(&self, needs_fix: bool, text: &str) -> String {
        if needs_fix {
            self.flag.apply_to(text).to_string()
        } else {
            self.ok.apply_to("ok").to_string()
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

fn row(s: &Styles, label: &str, value: impl std::fmt::Display) {
    println!("    {:<16}{}", s.label.apply_to(label), s.value.apply_to(value));
}

pub fn print_metrics(path: &Path, metrics: &QualityMetrics) {
    let s = Styles::new();
    print_title(&s, "Quality Analysis");
    println!(
        "  {:<18}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(path.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Exposure"));
    row(&s, "Brightness", format!("{:.1}", metrics.brightness));
    let dr = &metrics.dynamic_range;
    row(&s, "Range 1-99%", format!("{}..{} ({})", dr.low_1, dr.high_99, dr.range_99));
    row(&s, "Range 5-95%", format!("{}..{} ({})", dr.low_5, dr.high_95, dr.range_95));
    println!();

    println!("  {}", s.header.apply_to("Noise"));
    row(&s, "Residual std", format!("{:.2}", metrics.noise_std));
    println!();

    let cast = &metrics.color_cast;
    let (r, g, b) = cast.channel_means;
    println!(
        "  {:<18}{}",
        s.header.apply_to("Color cast"),
        s.verdict(cast.has_cast, "cast")
    );
    row(&s, "Channel means", format!("R {r:.1}  G {g:.1}  B {b:.1}"));
    row(&s, "Severity", format!("{:.3}", cast.severity));
    println!();

    let c = &metrics.contrast;
    println!(
        "  {:<18}{}",
        s.header.apply_to("Contrast"),
        s.verdict(c.is_low, "low")
    );
    row(&s, "Range", format!("{:.3}", c.range_contrast));
    row(&s, "Std", format!("{:.3}", c.std_contrast));
    row(&s, "RMS", format!("{:.3}", c.rms_contrast));
    println!();

    let sat = &metrics.saturation;
    println!(
        "  {:<18}{}",
        s.header.apply_to("Saturation"),
        s.verdict(sat.needs_boost, "dull")
    );
    row(&s, "Mean", format!("{:.1}", sat.mean_sat));
    row(&s, "Std", format!("{:.1}", sat.std_sat));
    row(&s, "Washed out", format!("{:.1}%", sat.low_sat_ratio * 100.0));
    println!();

    let blur = &metrics.blur;
    println!(
        "  {:<18}{}",
        s.header.apply_to("Sharpness"),
        s.verdict(blur.is_blurry, "blurry")
    );
    row(&s, "Laplacian var", format!("{:.1}", blur.laplacian_var));
    row(&s, "Mean gradient", format!("{:.2}", blur.mean_gradient));
    row(&s, "Blur severity", format!("{:.3}", blur.severity));
    println!();
}

pub fn print_parameters_used(params: &ParametersUsed, output: &Path) {
    let s = Styles::new();
    print_title(&s, "Automatic Enhancement");

    if let Some(ref reason) = params.fallback {
        println!(
            "  {:<18}{}",
            s.label.apply_to("Result"),
            s.flag.apply_to("original image kept")
        );
        println!("  {:<18}{}", s.label.apply_to("Reason"), reason);
    } else if params.stages.is_empty() {
        println!(
            "  {:<18}{}",
            s.label.apply_to("Stages"),
            s.disabled.apply_to("none needed")
        );
    } else {
        println!("  {}", s.header.apply_to("Stages"));
        for (i, stage) in params.stages.iter().enumerate() {
            println!("    {}. {}", s.label.apply_to(i + 1), s.value.apply_to(stage));
        }
        println!();
        println!("  {}", s.header.apply_to("Parameters"));
        let opt = |label: &str, v: Option<String>| {
            if let Some(v) = v {
                row(&s, label, v);
            }
        };
        opt("Gamma", params.gamma.map(|v| format!("{v:.2}")));
        opt("Bilateral d", params.bilateral_diameter.map(|v| v.to_string()));
        opt("Sigma color", params.sigma_color.map(|v| format!("{v:.1}")));
        opt("Sigma space", params.sigma_space.map(|v| format!("{v:.1}")));
        opt("NLM h", params.nlm_strength.map(|v| format!("{v:.1}")));
        opt("NLM template", params.nlm_template_window.map(|v| v.to_string()));
        opt("NLM search", params.nlm_search_window.map(|v| v.to_string()));
        opt("R gain", params.r_gain.map(|v| format!("{v:.3}")));
        opt("G gain", params.g_gain.map(|v| format!("{v:.3}")));
        opt("B gain", params.b_gain.map(|v| format!("{v:.3}")));
        opt("Clip limit", params.clip_limit.map(|v| format!("{v:.2}")));
        opt("Tile grid", params.tile_grid.map(|v| v.to_string()));
        opt("Saturation", params.saturation.map(|v| format!("{v:.2}")));
        opt("Sharpen radius", params.sharpen_radius.map(|v| format!("{v:.2}")));
        opt("Sharpen amount", params.sharpen_amount.map(|v| format!("{v:.0}")));
    }
    println!();
    println!(
        "  {:<18}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!();
}

pub fn print_manual_parameters(params: &ManualParameters, output: &Path) {
    let s = Styles::new();
    print_title(&s, "Manual Enhancement");

    println!("  {}", s.header.apply_to("Denoise"));
    row(&s, "Sigma space", format!("{:.1}", params.sigma_space));
    row(&s, "Sigma color", format!("{:.1}", params.sigma_color));
    println!();
    println!("  {}", s.header.apply_to("White balance"));
    row(
        &s,
        "Gains",
        format!(
            "R {:.2}  G {:.2}  B {:.2}",
            params.r_gain, params.g_gain, params.b_gain
        ),
    );
    println!();
    println!("  {}", s.header.apply_to("Tone"));
    row(&s, "Gamma", format!("{:.2}", params.gamma));
    row(&s, "Clip limit", format!("{:.2}", params.clip_limit));
    row(&s, "Tile grid", params.tile_grid);
    row(&s, "Saturation", format!("{:.2}", params.saturation));
    println!();
    println!("  {}", s.header.apply_to("Sharpen"));
    row(&s, "Radius", format!("{:.2}", params.sharpen_radius));
    row(&s, "Amount", format!("{:.0}", params.sharpen_amount));
    println!();
    println!(
        "  {:<18}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!();
}
