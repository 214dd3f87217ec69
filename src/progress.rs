use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use indicatif::{HumanDuration, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

pub struct Progress {
    enabled: bool,
    start: Instant,

    mp: Option<MultiProgress>,
    stage: ProgressBar,
    pages: ProgressBar,

    pages_done: AtomicU64,
    pages_attached: AtomicU64,
}

impl Progress {
    pub fn new(enabled: bool, total_pages: usize) -> Self {
        let start = Instant::now();

        if !enabled {
            return Self {
                enabled: false,
                start,
                mp: None,
                stage: ProgressBar::hidden(),
                pages: ProgressBar::hidden(),
                pages_done: AtomicU64::new(0),
                pages_attached: AtomicU64::new(0),
            };
        }

        let mp = MultiProgress::with_draw_target(ProgressDrawTarget::stderr());

        let stage = mp.add(ProgressBar::new_spinner());
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}  [{elapsed_precise}]") {
            stage.set_style(style);
        }
        stage.enable_steady_tick(Duration::from_millis(80));
        stage.set_message("starting");

        let pages = mp.add(ProgressBar::new(total_pages as u64));
        if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
            pages.set_style(style.progress_chars("##-"));
        }
        pages.set_message("pages");

        Self {
            enabled: true,
            start,
            mp: Some(mp),
            stage,
            pages,
            pages_done: AtomicU64::new(0),
            pages_attached: AtomicU64::new(0),
        }
    }

    pub fn set_stage(&self, msg: impl Into<String>) {
        if !self.enabled {
            return;
        }
        self.stage.set_message(msg.into());
    }

    pub fn page_done(&self, path: &Path, attached: bool) {
        self.pages_done.fetch_add(1, Ordering::Relaxed);
        if attached {
            self.pages_attached.fetch_add(1, Ordering::Relaxed);
        }
        if self.enabled {
            self.pages.inc(1);
            self.pages.set_message(path.display().to_string());
        }
    }

    /// `(pages done, pages with a toggle attached)`.
    pub fn counts(&self) -> (u64, u64) {
        (
            self.pages_done.load(Ordering::Relaxed),
            self.pages_attached.load(Ordering::Relaxed),
        )
    }

    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        let (done, attached) = self.counts();
        self.stage.finish_with_message("done");
        self.pages.finish_and_clear();
        if let Some(mp) = &self.mp {
            let _ = mp.println(format!(
                "{done} pages ({attached} with toggle) in {}",
                HumanDuration(self.start.elapsed())
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_progress_still_counts() {
        let progress = Progress::new(false, 2);
        progress.page_done(Path::new("a.html"), true);
        progress.page_done(Path::new("b.html"), false);
        progress.finish();
        assert_eq!(progress.counts(), (2, 1));
    }
}
