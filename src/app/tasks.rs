//! The background task that converts a selection, one file at a time.

use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::helpers::{notify_state, report_error, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::{AppState, BatchPhase};

use crate::core::{
    resolve_destination_name, BatchOutcome, BatchRun, Converter, OutputLocation, SourceItem,
    TargetFormat,
};

const SUCCESS_TITLE: &str = "Success";
const SUCCESS_MESSAGE: &str = "Files have been converted successfully!";

/// Converts `sources` in order and stops at the first failure.
///
/// Progress is reported after every converted file. Files written before a
/// failure are left in the output folder.
pub async fn conversion_task<P: EventProxy, C: Converter>(
    proxy: P,
    state: Arc<Mutex<AppState>>,
    converter: Arc<C>,
    sources: Vec<SourceItem>,
    format_label: String,
    output: OutputLocation,
) {
    let total = sources.len();
    let format = match TargetFormat::from_label(&format_label) {
        Ok(format) => format,
        Err(e) => {
            tracing::error!("Cannot start conversion: {}", e);
            let outcome = BatchOutcome::Aborted {
                processed: 0,
                failed_item: None,
                error: e,
            };
            report_outcome(&proxy, &state, outcome, total, &output);
            return;
        }
    };

    let mut run = BatchRun::new(sources, format);
    tracing::info!("Converting {} files to {}", total, run.format());
    let mut failure = None;

    while let Some(source) = run.current_item().cloned() {
        let position = run.position();
        with_state_and_notify(&state, &proxy, |s| {
            s.status_message = format!("Converting file {} of {}", position, total);
        });

        let candidate = resolve_destination_name(&source.base_name, format);
        match converter
            .convert_one(&source, format, &output, &candidate)
            .await
        {
            Ok(destination) => {
                let name = destination.name.clone();
                run.record_success(destination);
                let progress = run.progress();
                with_state_and_notify(&state, &proxy, |s| {
                    s.progress = progress;
                    s.converted_files.push(name);
                });
            }
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    let outcome = run.finish(failure);
    report_outcome(&proxy, &state, outcome, total, &output);
}

/// Shows the final dialog, then re-enables the controls.
fn report_outcome<P: EventProxy>(
    proxy: &P,
    state: &Arc<Mutex<AppState>>,
    outcome: BatchOutcome,
    total: usize,
    output: &OutputLocation,
) {
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    state_guard.conversion_task = None;

    match outcome {
        BatchOutcome::Completed { converted } => {
            tracing::info!("All {} files converted into {:?}", converted, output.path());
            state_guard.phase = BatchPhase::Completed;
            state_guard.status_message = format!(
                "Conversion complete! Files saved in {}",
                output.path().display()
            );
            proxy.send_event(UserEvent::ShowSuccess {
                title: SUCCESS_TITLE.to_string(),
                message: SUCCESS_MESSAGE.to_string(),
            });
        }
        BatchOutcome::Aborted {
            processed,
            failed_item,
            error,
        } => {
            state_guard.phase = BatchPhase::Failed;
            state_guard.status_message = match &failed_item {
                Some(item) => format!(
                    "Conversion stopped at {} after {} of {} files",
                    item, processed, total
                ),
                None => format!("Conversion stopped after {} of {} files", processed, total),
            };
            report_error(&mut state_guard, proxy, &error);
        }
    }

    notify_state(&state_guard, proxy);
}
