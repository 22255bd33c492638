//! Contains helper functions to reduce boilerplate code in other `app` modules.

use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::AppState;
use super::view_model::generate_ui_state;
use crate::core::ConvertError;

/// Locks the `AppState`, performs a mutation, and then sends a `StateUpdate`
/// event to the UI.
pub fn with_state_and_notify<F, P: EventProxy>(
    state: &Arc<Mutex<AppState>>,
    proxy: &P,
    update_fn: F,
) where
    F: FnOnce(&mut AppState),
{
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    update_fn(&mut state_guard);

    notify_state(&state_guard, proxy);
}

/// Sends the current state to the UI without mutating it.
pub fn notify_state<P: EventProxy>(state: &AppState, proxy: &P) {
    let ui_state = generate_ui_state(state);
    proxy.send_event(UserEvent::StateUpdate(Box::new(ui_state)));
}

/// Reports `error` according to its kind.
///
/// Validation errors only replace the status line. Every other error opens an
/// error dialog. Startup errors additionally disable conversion for the rest
/// of the session. The caller sends the state update.
pub fn report_error<P: EventProxy>(state: &mut AppState, proxy: &P, error: &ConvertError) {
    if error.is_startup_fatal() {
        state.output_location = None;
        state.startup_error = Some(error.to_string());
        state.status_message = error.to_string();
    }

    if error.is_validation() {
        tracing::info!("Request rejected: {}", error);
        state.status_message = error.to_string();
    } else {
        proxy.send_event(UserEvent::ShowError {
            title: error.title().to_string(),
            message: error.to_string(),
        });
    }
}
