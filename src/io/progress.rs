//! Terminal progress display for long-running passes

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template =
        format!("{{msg:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{elapsed}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar reused across the passes of one command
///
/// All methods take `&self`, so one reporter can be shared with helpers
/// that only borrow it.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    /// Create a reporter drawing to stderr
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar }
    }

    /// Create a reporter that never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Begin a pass over `total` items
    pub fn start(&self, label: &str, total: usize) {
        self.bar.reset();
        self.bar.set_length(total as u64);
        self.bar.set_message(label.to_string());
    }

    /// Mark one item as done
    pub fn advance(&self) {
        self.bar.inc(1);
    }

    /// Items completed in the current pass
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// End the current pass and clear the bar
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
