use file_converter::app::{self, events::UiCommand, events::UserEvent, state::AppState};
use file_converter::app::file_dialog::{DialogService, NativeDialogService};
use file_converter::app::progress::ProgressDisplay;
use file_converter::app::state::BatchPhase;
use file_converter::config::AppConfig;
use file_converter::core::{PlaceholderConverter, TargetFormat};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing_subscriber::EnvFilter;

/// Renders every event that is already queued.
fn render_pending<D: DialogService>(
    events: &mut UnboundedReceiver<UserEvent>,
    dialog: &D,
    progress: &mut ProgressDisplay,
) {
    while let Ok(event) = events.try_recv() {
        app::handle_user_event(event, dialog, progress);
    }
}

/// Renders events until the running batch reports its final dialog.
async fn render_until_finished<D: DialogService>(
    events: &mut UnboundedReceiver<UserEvent>,
    dialog: &D,
    progress: &mut ProgressDisplay,
) {
    while let Some(event) = events.recv().await {
        let finished = matches!(
            event,
            UserEvent::ShowSuccess { .. } | UserEvent::ShowError { .. }
        );
        app::handle_user_event(event, dialog, progress);
        if finished {
            break;
        }
    }
    render_pending(events, dialog, progress);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let state = Arc::new(Mutex::new(AppState::new(config)));
    let dialog = NativeDialogService;
    let converter = Arc::new(PlaceholderConverter);
    let (proxy, mut events) = mpsc::unbounded_channel::<UserEvent>();
    let mut progress = ProgressDisplay::new();

    let dispatch = |command: UiCommand| {
        app::handle_command(
            command,
            &dialog,
            converter.clone(),
            proxy.clone(),
            state.clone(),
        );
    };

    dispatch(UiCommand::Initialize);
    render_pending(&mut events, &dialog, &mut progress);
    if state
        .lock()
        .expect("Mutex was poisoned. This should not happen.")
        .output_location
        .is_none()
    {
        tracing::error!("No output folder available. Restart the application to retry.");
        return Ok(());
    }

    loop {
        dispatch(UiCommand::SelectFiles);
        render_pending(&mut events, &dialog, &mut progress);

        let has_selection = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.")
            .phase
            == BatchPhase::Selected;
        if has_selection {
            dispatch(UiCommand::ChooseFormat(dialog.pick_format(&TargetFormat::ALL)));
            dispatch(UiCommand::StartConversion);

            let started = state
                .lock()
                .expect("Mutex was poisoned. This should not happen.")
                .phase
                == BatchPhase::Converting;
            if started {
                render_until_finished(&mut events, &dialog, &mut progress).await;
            } else {
                render_pending(&mut events, &dialog, &mut progress);
            }
        }

        if !dialog.confirm("File Converter", "Convert more files?") {
            break;
        }
    }

    tracing::info!("Exiting.");
    Ok(())
}
