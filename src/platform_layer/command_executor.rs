/*
 * This module is responsible for executing specific `PlatformCommand`s.
 * It holds the headless platform's bookkeeping (`HeadlessState`): registered
 * actions and their accelerators, the installed stylesheet and the live
 * windows. Each command has its own `execute_*` function; `execute_command`
 * dispatches to them.
 */

use super::error::{PlatformError, Result as PlatformResult};
use super::types::{AboutInfo, PlatformCommand, WindowId};

use std::collections::HashMap;
use std::path::PathBuf;

/// Per-window data the platform keeps for a live window.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct NativeWindowData {
    pub(crate) from_file: bool,
    pub(crate) present_count: usize,
    pub(crate) submitted_files: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub(crate) struct HeadlessState {
    pub(crate) actions: HashMap<String, Vec<String>>,
    pub(crate) stylesheet: Option<String>,
    pub(crate) windows: HashMap<WindowId, NativeWindowData>,
    pub(crate) onboarding_presentations: usize,
    pub(crate) about_presentations: Vec<AboutInfo>,
    pub(crate) preferences_presentations: usize,
    pub(crate) quit_requested: bool,
}

impl HeadlessState {
    pub(crate) fn is_action_registered(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    // The platform keeps at most one window; returns it if present.
    pub(crate) fn main_window(&self) -> Option<WindowId> {
        self.windows.keys().next().copied()
    }
}

pub(crate) fn execute_command(
    state: &mut HeadlessState,
    command: PlatformCommand,
) -> PlatformResult<()> {
    match command {
        PlatformCommand::InstallStylesheet { css } => execute_install_stylesheet(state, css),
        PlatformCommand::RegisterAction { name, accelerators } => {
            execute_register_action(state, name, accelerators)
        }
        PlatformCommand::CreateMainWindow {
            window_id,
            from_file,
        } => execute_create_main_window(state, window_id, from_file),
        PlatformCommand::PresentWindow { window_id } => execute_present_window(state, window_id),
        PlatformCommand::ShowOnboarding => {
            state.onboarding_presentations += 1;
            log::info!(
                "CommandExecutor: Presenting onboarding screen (#{}).",
                state.onboarding_presentations
            );
            Ok(())
        }
        PlatformCommand::ShowAboutDialog { info } => {
            state.about_presentations.push(info);
            if let Some(info) = state.about_presentations.last() {
                log::info!(
                    "CommandExecutor: About '{}' {} by {} ({}, icon '{}', issues at {}), shown {} time(s).",
                    info.application_name,
                    info.version,
                    info.developers.join(", "),
                    info.copyright,
                    info.application_icon,
                    info.issue_url,
                    state.about_presentations.len()
                );
            }
            Ok(())
        }
        PlatformCommand::ShowPreferences => {
            state.preferences_presentations += 1;
            log::info!(
                "CommandExecutor: Presenting preferences (#{}).",
                state.preferences_presentations
            );
            Ok(())
        }
        PlatformCommand::SubmitFileToWindow { window_id, path } => {
            execute_submit_file(state, window_id, path)
        }
        PlatformCommand::QuitApplication => {
            log::debug!("CommandExecutor: Quit requested.");
            state.quit_requested = true;
            Ok(())
        }
    }
}

fn execute_install_stylesheet(state: &mut HeadlessState, css: String) -> PlatformResult<()> {
    log::debug!(
        "CommandExecutor: Installing application stylesheet ({} bytes).",
        css.len()
    );
    if let Some(previous) = state.stylesheet.replace(css) {
        log::debug!(
            "CommandExecutor: Replaced previous stylesheet ({} bytes).",
            previous.len()
        );
    }
    Ok(())
}

/*
 * Registers `app.<name>`. Registering an existing name replaces its previous
 * accelerators; an empty accelerator list leaves the action without shortcuts.
 */
fn execute_register_action(
    state: &mut HeadlessState,
    name: String,
    accelerators: Vec<String>,
) -> PlatformResult<()> {
    log::debug!("CommandExecutor: Registering action 'app.{name}' accelerators {accelerators:?}");
    state.actions.insert(name, accelerators);
    Ok(())
}

fn execute_create_main_window(
    state: &mut HeadlessState,
    window_id: WindowId,
    from_file: bool,
) -> PlatformResult<()> {
    log::debug!("CommandExecutor: Creating main window {window_id:?} (from_file: {from_file})");
    state.windows.insert(
        window_id,
        NativeWindowData {
            from_file,
            ..Default::default()
        },
    );
    Ok(())
}

fn execute_present_window(state: &mut HeadlessState, window_id: WindowId) -> PlatformResult<()> {
    let window = state.windows.get_mut(&window_id).ok_or_else(|| {
        PlatformError::InvalidHandle(format!(
            "WindowId {:?} not found for execute_present_window",
            window_id
        ))
    })?;
    window.present_count += 1;
    log::info!(
        "CommandExecutor: Presenting window {window_id:?} (from_file: {}, presentation #{})",
        window.from_file,
        window.present_count
    );
    Ok(())
}

fn execute_submit_file(
    state: &mut HeadlessState,
    window_id: WindowId,
    path: PathBuf,
) -> PlatformResult<()> {
    let window = state.windows.get_mut(&window_id).ok_or_else(|| {
        PlatformError::InvalidHandle(format!(
            "WindowId {:?} not found for execute_submit_file",
            window_id
        ))
    })?;
    window.submitted_files.push(path);
    log::info!(
        "CommandExecutor: Window {window_id:?} received file #{}: {:?}",
        window.submitted_files.len(),
        window.submitted_files.last()
    );
    Ok(())
}

// Removes a window the user closed. Returns false if it was not live.
pub(crate) fn close_window(state: &mut HeadlessState, window_id: WindowId) -> bool {
    let removed = state.windows.remove(&window_id).is_some();
    log::debug!("CommandExecutor: Closing window {window_id:?} (was live: {removed})");
    removed
}
