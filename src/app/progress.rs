//! Terminal progress bar driven by `StateUpdate` events.

use indicatif::{ProgressBar, ProgressStyle};

use super::state::BatchPhase;
use super::view_model::UiState;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Owns the progress bar of the running batch, if any.
///
/// The bar is created on the first update of a run and torn down when the
/// run's final dialog is shown.
pub struct ProgressDisplay {
    bar: Option<ProgressBar>,
    hidden: bool,
}

impl Default for ProgressDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressDisplay {
    /// A display that draws to the terminal.
    pub fn new() -> Self {
        Self {
            bar: None,
            hidden: false,
        }
    }

    /// A display that tracks progress without drawing anything.
    pub fn hidden() -> Self {
        Self {
            bar: None,
            hidden: true,
        }
    }

    pub fn bar(&self) -> Option<&ProgressBar> {
        self.bar.as_ref()
    }

    /// Mirrors the progress of a converting batch onto the bar.
    pub fn update(&mut self, ui_state: &UiState) {
        if ui_state.phase != BatchPhase::Converting
            || !ui_state.progress_visible
            || ui_state.progress_max == 0
        {
            return;
        }

        let hidden = self.hidden;
        let bar = self.bar.get_or_insert_with(|| new_bar(hidden));
        bar.set_length(ui_state.progress_max as u64);
        bar.set_position(ui_state.progress_value as u64);
        bar.set_message(ui_state.status_message.clone());
    }

    /// Removes the bar once the batch has ended.
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

fn new_bar(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    let style = ProgressStyle::with_template(BAR_TEMPLATE)
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}
