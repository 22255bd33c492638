// src/app/commands.rs
//! Contains the handlers for every `UiCommand`.
//!
//! Each handler validates the request against the `AppState`, mutates it, and
//! sends `UserEvent`s back to the UI. The conversion itself runs in a separate
//! task spawned by `start_conversion` (see `tasks`).

use super::helpers::{notify_state, report_error, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::{AppState, BatchPhase};
use super::tasks;
use crate::app::file_dialog::DialogService;
use crate::core::{ConversionProgress, ConvertError, Converter, OutputLocation};
use std::sync::{Arc, Mutex};

/// Resolves the output folder. Called once, when the UI starts.
///
/// On failure the error is shown once and conversion stays disabled until
/// restart. Later calls are ignored, whatever the first call's outcome.
pub fn initialize<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    if state_guard.output_location.is_some() || state_guard.startup_error.is_some() {
        tracing::warn!("Ignoring repeated initialization; the output folder is resolved once.");
        return;
    }

    let output_dir = state_guard.config.output_directory();
    match OutputLocation::ensure(&output_dir) {
        Ok(location) => {
            state_guard.output_location = Some(location);
            state_guard.status_message = "Ready.".to_string();
        }
        Err(e) => {
            tracing::error!("Failed to prepare output folder {:?}: {}", output_dir, e);
            report_error(&mut state_guard, &proxy, &e);
        }
    }

    notify_state(&state_guard, &proxy);
}

/// Opens the file picker and replaces the selection with the picked files.
///
/// A cancelled picker counts as an empty selection.
pub fn select_files<P: EventProxy, D: DialogService + ?Sized>(
    dialog: &D,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let config = {
        let state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        if !state_guard.controls_enabled() {
            tracing::warn!("Ignoring file selection while a conversion is running.");
            return;
        }
        state_guard.config.clone()
    };

    let picked = dialog.pick_sources(&config).unwrap_or_else(|| {
        tracing::info!("User cancelled file selection.");
        Vec::new()
    });

    with_state_and_notify(&state, &proxy, |s| {
        if let Some(parent) = picked.first().and_then(|p| p.parent()) {
            s.config.last_source_directory = Some(parent.to_path_buf());
            s.save_config();
        }

        s.converted_files.clear();
        match s.selection.replace(picked) {
            Ok(0) => {
                s.phase = BatchPhase::Idle;
                s.progress = ConversionProgress::default();
                s.status_message = ConvertError::NoSelection.to_string();
            }
            Ok(count) => {
                s.phase = BatchPhase::Selected;
                s.progress = ConversionProgress {
                    processed: 0,
                    total: count,
                };
                s.status_message = format!("{} files selected", count);
            }
            Err(e) => {
                tracing::warn!("File selection failed: {}", e);
                s.phase = BatchPhase::Idle;
                s.progress = ConversionProgress::default();
                s.status_message = ConvertError::NoSelection.to_string();
                report_error(s, &proxy, &e);
            }
        }
    });
}

/// Records the label chosen in the format chooser and remembers it for next time.
pub fn choose_format<P: EventProxy>(
    label: Option<String>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    with_state_and_notify(&state, &proxy, |s| {
        if !s.controls_enabled() {
            tracing::warn!("Ignoring format change while a conversion is running.");
            return;
        }
        s.chosen_format = label.clone();
        if label.is_some() {
            s.config.last_format = label;
            s.save_config();
        }
    });
}

/// Checks, in order, that the output folder exists, a format is chosen and
/// the selection is not empty.
fn validate_start(state: &AppState) -> Result<(OutputLocation, String), ConvertError> {
    let output = state
        .output_location
        .clone()
        .ok_or(ConvertError::OutputUnavailable)?;
    let label = state
        .chosen_format
        .clone()
        .ok_or(ConvertError::NoFormatChosen)?;
    if state.selection.is_empty() {
        return Err(ConvertError::NoSelection);
    }
    Ok((output, label))
}

/// Validates the request and spawns the conversion task.
///
/// A missing output folder, format or selection only updates the status line.
pub fn start_conversion<P: EventProxy, C: Converter>(
    converter: Arc<C>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    if !state_guard.controls_enabled() {
        tracing::warn!("Ignoring start request while a conversion is running.");
        return;
    }

    let ready = validate_start(&state_guard);
    let (output, label) = match ready {
        Ok(ready) => ready,
        Err(e) => {
            report_error(&mut state_guard, &proxy, &e);
            notify_state(&state_guard, &proxy);
            return;
        }
    };
    let sources = state_guard.selection.items().to_vec();

    state_guard.phase = BatchPhase::Converting;
    state_guard.progress = ConversionProgress {
        processed: 0,
        total: sources.len(),
    };
    state_guard.converted_files.clear();
    state_guard.status_message = "Starting conversion...".to_string();
    notify_state(&state_guard, &proxy);

    let proxy_clone = proxy.clone();
    let state_clone = state.clone();
    let handle = tokio::spawn(async move {
        tasks::conversion_task(proxy_clone, state_clone, converter, sources, label, output).await;
    });
    state_guard.conversion_task = Some(handle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::UserEvent;
    use crate::app::view_model::UiState;
    use crate::config::AppConfig;
    use crate::core::{PlaceholderConverter, TargetFormat};
    use std::fs as std_fs;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};
    use tokio::sync::mpsc;

    // A mock EventProxy for capturing events sent to the UI.
    #[derive(Clone)]
    struct TestEventProxy {
        sender: mpsc::UnboundedSender<UserEvent>,
    }

    impl EventProxy for TestEventProxy {
        fn send_event(&self, event: UserEvent) {
            self.sender.send(event).expect("Test receiver dropped");
        }
    }

    // A mock DialogService to simulate user interaction with the pickers.
    #[derive(Default)]
    struct MockDialogService {
        picked_files: Mutex<Option<Vec<PathBuf>>>,
    }

    impl MockDialogService {
        fn set_picked_files(&self, files: Option<Vec<PathBuf>>) {
            *self.picked_files.lock().unwrap() = files;
        }
    }

    impl DialogService for MockDialogService {
        fn pick_sources(&self, _config: &AppConfig) -> Option<Vec<PathBuf>> {
            self.picked_files.lock().unwrap().clone()
        }
        fn pick_format(&self, formats: &[TargetFormat]) -> Option<String> {
            formats.first().map(|f| f.label().to_string())
        }
        fn confirm(&self, _title: &str, _message: &str) -> bool {
            false
        }
        fn show_error(&self, _title: &str, _message: &str) {}
        fn show_info(&self, _title: &str, _message: &str) {}
    }

    struct TestHarness {
        state: Arc<Mutex<AppState>>,
        proxy: TestEventProxy,
        event_rx: mpsc::UnboundedReceiver<UserEvent>,
        dialog: MockDialogService,
        root_path: PathBuf,
        _temp_dir: TempDir,
    }

    impl TestHarness {
        fn new() -> Self {
            let temp_dir = tempdir().expect("Failed to create temp dir");
            let root_path = temp_dir.path().to_path_buf();
            let (tx, rx) = mpsc::unbounded_channel();

            let config = AppConfig {
                output_root: Some(root_path.join("Documents")),
                ..Default::default()
            };
            let mut state = AppState::new(config);
            state.config_dir = Some(root_path.join("config"));

            Self {
                state: Arc::new(Mutex::new(state)),
                proxy: TestEventProxy { sender: tx },
                event_rx: rx,
                dialog: MockDialogService::default(),
                root_path,
                _temp_dir: temp_dir,
            }
        }

        fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
            let path = self.root_path.join(relative_path);
            if let Some(parent) = path.parent() {
                std_fs::create_dir_all(parent).unwrap();
            }
            std_fs::write(&path, content).unwrap();
            path
        }

        fn drain_events(&mut self) -> Vec<UserEvent> {
            let mut events = Vec::new();
            while let Ok(event) = self.event_rx.try_recv() {
                events.push(event);
            }
            events
        }

        fn last_state_update(&mut self) -> Option<Box<UiState>> {
            self.drain_events().into_iter().rev().find_map(|e| match e {
                UserEvent::StateUpdate(ui) => Some(ui),
                _ => None,
            })
        }
    }

    #[test]
    fn initialize_creates_output_folder() {
        let mut harness = TestHarness::new();

        initialize(harness.proxy.clone(), harness.state.clone());

        let expected = harness.root_path.join("Documents").join("ConvertedFiles");
        assert!(expected.is_dir());
        let ui = harness.last_state_update().unwrap();
        assert_eq!(ui.output_directory, Some(expected));
    }

    #[test]
    fn initialize_failure_shows_error_and_blocks_conversion() {
        let mut harness = TestHarness::new();
        // A file where the documents directory should be makes creation fail.
        harness.create_file("Documents", "not a directory");

        initialize(harness.proxy.clone(), harness.state.clone());

        let events = harness.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            UserEvent::ShowError { title, .. } if title == "Failed to create output folder"
        )));
        let state = harness.state.lock().unwrap();
        assert!(state.output_location.is_none());
        assert!(state.startup_error.is_some());
        assert!(!state.can_convert());
    }

    #[test]
    fn initialize_runs_only_once_even_after_failure() {
        let mut harness = TestHarness::new();
        let blocker = harness.create_file("Documents", "not a directory");
        initialize(harness.proxy.clone(), harness.state.clone());
        harness.drain_events();

        std_fs::remove_file(blocker).unwrap();
        initialize(harness.proxy.clone(), harness.state.clone());

        assert!(harness.drain_events().is_empty());
        assert!(!harness.root_path.join("Documents").exists());
        let state = harness.state.lock().unwrap();
        assert!(state.output_location.is_none());
        assert!(state.startup_error.is_some());
    }

    #[test]
    fn initialize_does_not_touch_a_running_conversion() {
        let mut harness = TestHarness::new();
        initialize(harness.proxy.clone(), harness.state.clone());
        {
            let mut state = harness.state.lock().unwrap();
            state.phase = BatchPhase::Converting;
            state.status_message = "Converting file 1 of 2".to_string();
        }
        harness.drain_events();

        initialize(harness.proxy.clone(), harness.state.clone());

        assert!(harness.drain_events().is_empty());
        assert_eq!(
            harness.state.lock().unwrap().status_message,
            "Converting file 1 of 2"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn read_only_output_folder_blocks_conversion_with_permission_error() {
        use std::os::unix::fs::PermissionsExt;
        let mut harness = TestHarness::new();
        let output_dir = harness.root_path.join("Documents").join("ConvertedFiles");
        std_fs::create_dir_all(&output_dir).unwrap();
        std_fs::set_permissions(&output_dir, std_fs::Permissions::from_mode(0o555)).unwrap();

        initialize(harness.proxy.clone(), harness.state.clone());

        let events = harness.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            UserEvent::ShowError { title, .. } if title == "Permission Error"
        )));

        let a = harness.create_file("in/a.txt", "a");
        harness.dialog.set_picked_files(Some(vec![a]));
        select_files(&harness.dialog, harness.proxy.clone(), harness.state.clone());
        choose_format(Some("PDF".into()), harness.proxy.clone(), harness.state.clone());
        start_conversion(
            Arc::new(PlaceholderConverter),
            harness.proxy.clone(),
            harness.state.clone(),
        );

        std_fs::set_permissions(&output_dir, std_fs::Permissions::from_mode(0o755)).unwrap();
        let state = harness.state.lock().unwrap();
        assert!(state.conversion_task.is_none());
        assert_ne!(state.phase, BatchPhase::Converting);
        assert_eq!(state.status_message, "Output folder is unavailable");
        assert_eq!(std_fs::read_dir(&output_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn start_without_output_folder_is_rejected() {
        let mut harness = TestHarness::new();
        harness.create_file("Documents", "not a directory");
        initialize(harness.proxy.clone(), harness.state.clone());
        let a = harness.create_file("in/a.txt", "a");
        harness.dialog.set_picked_files(Some(vec![a]));
        select_files(&harness.dialog, harness.proxy.clone(), harness.state.clone());
        choose_format(Some("PDF".into()), harness.proxy.clone(), harness.state.clone());
        harness.drain_events();

        start_conversion(
            Arc::new(PlaceholderConverter),
            harness.proxy.clone(),
            harness.state.clone(),
        );

        let events = harness.drain_events();
        assert!(events.iter().all(|e| matches!(e, UserEvent::StateUpdate(_))));
        let state = harness.state.lock().unwrap();
        assert_eq!(state.status_message, "Output folder is unavailable");
        assert_eq!(state.phase, BatchPhase::Selected);
        assert!(state.conversion_task.is_none());
    }

    #[test]
    fn select_files_sets_count_and_progress_bounds() {
        let mut harness = TestHarness::new();
        let a = harness.create_file("in/a.txt", "a");
        let b = harness.create_file("in/b.docx", "b");
        harness.dialog.set_picked_files(Some(vec![a, b]));

        select_files(&harness.dialog, harness.proxy.clone(), harness.state.clone());

        let ui = harness.last_state_update().unwrap();
        assert_eq!(ui.phase, BatchPhase::Selected);
        assert_eq!(ui.status_message, "2 files selected");
        assert_eq!(ui.progress_max, 2);
        assert_eq!(ui.progress_value, 0);
        assert_eq!(ui.selected_files, vec!["a.txt", "b.docx"]);
    }

    #[test]
    fn cancelled_picker_clears_selection() {
        let mut harness = TestHarness::new();
        let a = harness.create_file("in/a.txt", "a");
        harness.dialog.set_picked_files(Some(vec![a]));
        select_files(&harness.dialog, harness.proxy.clone(), harness.state.clone());

        harness.dialog.set_picked_files(None);
        select_files(&harness.dialog, harness.proxy.clone(), harness.state.clone());

        let ui = harness.last_state_update().unwrap();
        assert_eq!(ui.phase, BatchPhase::Idle);
        assert_eq!(ui.status_message, "No files selected");
        assert!(ui.selected_files.is_empty());
        assert!(!ui.can_convert);
    }

    #[test]
    fn selecting_a_directory_reports_selection_error() {
        let mut harness = TestHarness::new();
        let folder = harness.root_path.join("in/folder.txt");
        std_fs::create_dir_all(&folder).unwrap();
        harness.dialog.set_picked_files(Some(vec![folder]));

        select_files(&harness.dialog, harness.proxy.clone(), harness.state.clone());

        let events = harness.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            UserEvent::ShowError { title, .. } if title == "File Selection Error"
        )));
        assert_eq!(harness.state.lock().unwrap().phase, BatchPhase::Idle);
    }

    #[test]
    fn choose_format_is_remembered_in_config() {
        let harness = TestHarness::new();

        choose_format(Some("DOCX".into()), harness.proxy.clone(), harness.state.clone());

        let state = harness.state.lock().unwrap();
        assert_eq!(state.chosen_format.as_deref(), Some("DOCX"));
        assert_eq!(state.config.last_format.as_deref(), Some("DOCX"));
        assert!(harness.root_path.join("config/config.json").exists());
    }

    #[tokio::test]
    async fn start_with_empty_selection_is_a_status_only_no_op() {
        let mut harness = TestHarness::new();
        initialize(harness.proxy.clone(), harness.state.clone());
        choose_format(Some("PDF".into()), harness.proxy.clone(), harness.state.clone());
        harness.drain_events();

        start_conversion(
            Arc::new(PlaceholderConverter),
            harness.proxy.clone(),
            harness.state.clone(),
        );

        let events = harness.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], UserEvent::StateUpdate(ui) if ui.status_message == "No files selected"));
        assert_eq!(harness.state.lock().unwrap().phase, BatchPhase::Idle);
    }

    #[tokio::test]
    async fn start_without_format_is_a_status_only_no_op() {
        let mut harness = TestHarness::new();
        initialize(harness.proxy.clone(), harness.state.clone());
        let a = harness.create_file("in/a.txt", "a");
        harness.dialog.set_picked_files(Some(vec![a]));
        select_files(&harness.dialog, harness.proxy.clone(), harness.state.clone());
        harness.drain_events();

        start_conversion(
            Arc::new(PlaceholderConverter),
            harness.proxy.clone(),
            harness.state.clone(),
        );

        let events = harness.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], UserEvent::StateUpdate(ui) if ui.status_message == "Please choose format"));
        let state = harness.state.lock().unwrap();
        assert_eq!(state.phase, BatchPhase::Selected);
        assert_eq!(state.progress.processed, 0);
        assert!(state.conversion_task.is_none());
    }

    #[test]
    fn commands_are_ignored_while_converting() {
        let mut harness = TestHarness::new();
        harness.state.lock().unwrap().phase = BatchPhase::Converting;
        let a = harness.create_file("in/a.txt", "a");
        harness.dialog.set_picked_files(Some(vec![a]));

        select_files(&harness.dialog, harness.proxy.clone(), harness.state.clone());

        assert!(harness.drain_events().is_empty());
        assert!(harness.state.lock().unwrap().selection.is_empty());
    }
}
