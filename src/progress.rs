use std::borrow::Cow;

use crate::config::Config;

const KNOWN_TOTAL_TEMPLATE: &str =
    "{prefix}{spinner:.green} [{bar:40.cyan/blue}] {binary_bytes}/{binary_total_bytes} {binary_bytes_per_sec} ({eta}) {wide_msg}";
const UNKNOWN_TOTAL_TEMPLATE: &str =
    "{prefix}{spinner:.green} {binary_bytes} {binary_bytes_per_sec} {wide_msg}";

fn style(template: &str) -> indicatif::ProgressStyle {
    indicatif::ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
        .progress_chars("##-")
}

pub struct ProgressBar {
    inner: indicatif::ProgressBar,
}

#[derive(Debug)]
pub struct ProgressBarManager {
    root: indicatif::MultiProgress,
}

impl ProgressBar {
    fn new() -> Self {
        let inner = indicatif::ProgressBar::new_spinner().with_style(style(UNKNOWN_TOTAL_TEMPLATE));
        Self { inner }
    }

    pub fn set_position(&self, pos: u64) {
        self.inner.set_position(pos);
    }

    pub fn set_message(&self, msg: impl Into<Cow<'static, str>>) {
        self.inner.set_message(msg);
    }

    pub fn finish(&self, msg: impl Into<Cow<'static, str>>) {
        self.inner.finish_with_message(msg);
    }

    /// Switch to a bar once the download size is known.
    pub fn update_template(&self, total: Option<u64>) {
        match total {
            Some(total) => {
                self.inner.set_style(style(KNOWN_TOTAL_TEMPLATE));
                self.inner.set_length(total);
            }
            None => self.inner.set_style(style(UNKNOWN_TOTAL_TEMPLATE)),
        }
    }
}

impl ProgressBarManager {
    pub fn new(config: &Config) -> Self {
        let root = if config.progress() {
            indicatif::MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::stderr())
        } else {
            indicatif::MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden())
        };
        Self { root }
    }

    pub fn add(&self) -> ProgressBar {
        let bar = ProgressBar::new();
        self.root.add(bar.inner.clone());
        bar
    }
}
