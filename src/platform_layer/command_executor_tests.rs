use super::command_executor::*;
use super::error::PlatformError;
use super::types::{AboutInfo, PlatformCommand, WindowId};

use std::path::PathBuf;

/*
 * Unit tests for the headless command executor. Each test starts from an empty
 * `HeadlessState` and checks the bookkeeping a command leaves behind.
 */

fn state_with_window(window_id: WindowId) -> HeadlessState {
    let mut state = HeadlessState::default();
    execute_command(
        &mut state,
        PlatformCommand::CreateMainWindow {
            window_id,
            from_file: false,
        },
    )
    .unwrap();
    state
}

#[test]
fn test_register_action_replaces_previous_accelerators() {
    let mut state = HeadlessState::default();

    execute_command(
        &mut state,
        PlatformCommand::RegisterAction {
            name: "preferences".to_string(),
            accelerators: vec!["<primary>comma".to_string()],
        },
    )
    .unwrap();
    execute_command(
        &mut state,
        PlatformCommand::RegisterAction {
            name: "preferences".to_string(),
            accelerators: vec![],
        },
    )
    .unwrap();

    assert!(state.is_action_registered("preferences"));
    assert_eq!(state.actions.len(), 1);
    assert!(state.actions["preferences"].is_empty());
}

#[test]
fn test_create_and_present_window() {
    let window_id = WindowId(7);
    let mut state = HeadlessState::default();

    execute_command(
        &mut state,
        PlatformCommand::CreateMainWindow {
            window_id,
            from_file: true,
        },
    )
    .unwrap();
    execute_command(&mut state, PlatformCommand::PresentWindow { window_id }).unwrap();
    execute_command(&mut state, PlatformCommand::PresentWindow { window_id }).unwrap();

    let window = &state.windows[&window_id];
    assert!(window.from_file);
    assert_eq!(window.present_count, 2);
    assert_eq!(state.main_window(), Some(window_id));
}

#[test]
fn test_present_unknown_window_is_invalid_handle() {
    let mut state = HeadlessState::default();

    let result = execute_command(
        &mut state,
        PlatformCommand::PresentWindow {
            window_id: WindowId(99),
        },
    );

    assert!(matches!(result, Err(PlatformError::InvalidHandle(_))));
}

#[test]
fn test_submit_file_records_path_on_window() {
    let window_id = WindowId(1);
    let mut state = state_with_window(window_id);
    let path = PathBuf::from("/tmp/Some.AppImage");

    execute_command(
        &mut state,
        PlatformCommand::SubmitFileToWindow {
            window_id,
            path: path.clone(),
        },
    )
    .unwrap();

    assert_eq!(state.windows[&window_id].submitted_files, vec![path]);
}

#[test]
fn test_close_window_removes_it_once() {
    let window_id = WindowId(1);
    let mut state = state_with_window(window_id);

    assert!(close_window(&mut state, window_id));
    assert!(!close_window(&mut state, window_id));
    assert_eq!(state.main_window(), None);
    assert!(matches!(
        execute_command(
            &mut state,
            PlatformCommand::SubmitFileToWindow {
                window_id,
                path: PathBuf::from("/tmp/x"),
            },
        ),
        Err(PlatformError::InvalidHandle(_))
    ));
}

#[test]
fn test_dialog_commands_are_counted() {
    let mut state = HeadlessState::default();
    let info = AboutInfo {
        application_name: "App".to_string(),
        version: "1.0".to_string(),
        developers: vec!["Someone".to_string()],
        copyright: "2023".to_string(),
        application_icon: "app".to_string(),
        issue_url: "https://example.invalid".to_string(),
    };

    execute_command(&mut state, PlatformCommand::ShowOnboarding).unwrap();
    execute_command(&mut state, PlatformCommand::ShowPreferences).unwrap();
    execute_command(&mut state, PlatformCommand::ShowAboutDialog { info: info.clone() }).unwrap();
    execute_command(&mut state, PlatformCommand::QuitApplication).unwrap();

    assert_eq!(state.onboarding_presentations, 1);
    assert_eq!(state.preferences_presentations, 1);
    assert_eq!(state.about_presentations, vec![info]);
    assert!(state.quit_requested);
}

#[test]
fn test_install_stylesheet_keeps_latest() {
    let mut state = HeadlessState::default();

    execute_command(
        &mut state,
        PlatformCommand::InstallStylesheet {
            css: ".a {}".to_string(),
        },
    )
    .unwrap();

    assert_eq!(state.stylesheet.as_deref(), Some(".a {}"));
}
