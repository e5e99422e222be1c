//! Terminal progress bar for index transfers

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use mrf_index_client::telemetry::TransferSnapshot;
use mrf_index_client::transport::ProgressObserver;

const BYTES_TEMPLATE: &str =
    "{spinner:.cyan} [{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {msg}";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} [{elapsed_precise}] {bytes} ({bytes_per_sec}) {msg}";

/// Drives an indicatif bar from transfer updates
///
/// Switches from a spinner to a bounded bar once the total size is known.
#[derive(Debug, Clone)]
pub struct BarObserver {
    bar: ProgressBar,
    sized: bool,
}

impl BarObserver {
    /// Bar drawn on stderr, labelled with `message`
    #[must_use]
    pub fn stderr(message: impl Into<String>) -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr_with_hz(12));
        bar.set_style(style(SPINNER_TEMPLATE));
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self::with_bar(bar)
    }

    /// Observer over an existing bar
    #[must_use]
    pub fn with_bar(bar: ProgressBar) -> Self {
        Self { bar, sized: false }
    }

    #[must_use]
    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

impl ProgressObserver for BarObserver {
    fn on_progress(&mut self, bytes_read: u64, total: Option<u64>) {
        if !self.sized
            && let Some(total) = total
        {
            self.bar.set_length(total);
            self.bar.set_style(style(BYTES_TEMPLATE));
            self.sized = true;
        }
        self.bar.set_position(bytes_read);
    }

    fn on_finish(&mut self, snapshot: &TransferSnapshot) {
        self.bar.set_position(snapshot.bytes_read);
        self.bar.finish_and_clear();
    }
}
