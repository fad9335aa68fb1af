use indicatif::{ProgressBar, ProgressStyle};
use retouch_core::enhance::{EnhanceObserver, EnhanceStage};
use retouch_core::QualityMetrics;

/// Drives a progress bar from enhancement events, one tick per stage.
pub struct BarObserver {
    pb: ProgressBar,
}

impl BarObserver {
    pub fn new(analysis: bool) -> anyhow::Result<Self> {
        let stages = EnhanceStage::AUTO_ORDER.len() as u64;
        let pb = ProgressBar::new(if analysis { stages + 1 } else { stages });
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg:22} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        if analysis {
            pb.set_message("Analyzing");
        }
        Ok(Self { pb })
    }

    pub fn finish(&self) {
        self.pb.finish_with_message("Done");
    }
}

impl EnhanceObserver for BarObserver {
    fn on_analysis(&self, _metrics: &QualityMetrics) {
        self.pb.inc(1);
    }

    fn begin_stage(&self, stage: EnhanceStage) {
        self.pb.set_message(stage.to_string());
    }

    fn stage_applied(&self, _stage: EnhanceStage) {
        self.pb.inc(1);
    }

    fn stage_skipped(&self, _stage: EnhanceStage) {
        self.pb.inc(1);
    }
}
