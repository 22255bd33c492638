//! The batch conversion orchestrator and its UI-facing plumbing.

pub mod commands;
pub mod events;
pub mod file_dialog;
pub mod helpers;
pub mod progress;
pub mod proxy;
pub mod state;
pub mod tasks;
pub mod view_model;

use std::sync::{Arc, Mutex};

use crate::core::Converter;
use events::{UiCommand, UserEvent};
use file_dialog::DialogService;
use progress::ProgressDisplay;
use proxy::EventProxy;
use state::AppState;

/// Dispatches a command from the UI to its handler.
pub fn handle_command<P, D, C>(
    command: UiCommand,
    dialog: &D,
    converter: Arc<C>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) where
    P: EventProxy,
    D: DialogService + ?Sized,
    C: Converter,
{
    tracing::debug!("Handling command: {:?}", command);
    match command {
        UiCommand::Initialize => commands::initialize(proxy, state),
        UiCommand::SelectFiles => commands::select_files(dialog, proxy, state),
        UiCommand::ChooseFormat(label) => commands::choose_format(label, proxy, state),
        UiCommand::StartConversion => commands::start_conversion(converter, proxy, state),
    }
}

/// Renders one event: state updates drive the terminal progress bar, modal
/// messages go to native dialogs and end the bar of the finished batch.
pub fn handle_user_event<D: DialogService + ?Sized>(
    event: UserEvent,
    dialog: &D,
    progress: &mut ProgressDisplay,
) {
    match event {
        UserEvent::StateUpdate(ui_state) => {
            tracing::info!("{}", ui_state.status_message);
            progress.update(&ui_state);
        }
        UserEvent::ShowError { title, message } => {
            progress.finish();
            tracing::error!("{}: {}", title, message);
            dialog.show_error(&title, &message);
        }
        UserEvent::ShowSuccess { title, message } => {
            progress.finish();
            tracing::info!("{}: {}", title, message);
            dialog.show_info(&title, &message);
        }
    }
}
