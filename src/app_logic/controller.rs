use super::actions::{ActionRegistry, AppAction};
use super::file_open::FileOpenDispatcher;
use super::window_lifecycle::{MainWindow, WindowLifecycle};

use crate::core::{CommandRunnerOperations, InstallerOperations, SettingsOperations};
use crate::platform_layer::{
    AppEvent, PlatformCommand, PlatformError, PlatformEventHandler, PlatformResult, WindowId,
};
use crate::ui_description_layer::{self, theme};

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Started,
    Running,
    ShuttingDown,
}

#[derive(Debug)]
pub enum ControllerError {
    AlreadyStarted,
    NotStarted,
    ShuttingDown,
    Theme(theme::ThemeError),
}

impl From<theme::ThemeError> for ControllerError {
    fn from(err: theme::ThemeError) -> Self {
        ControllerError::Theme(err)
    }
}

impl std::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerError::AlreadyStarted => write!(f, "Startup has already run"),
            ControllerError::NotStarted => write!(f, "Startup has not run yet"),
            ControllerError::ShuttingDown => write!(f, "The application is shutting down"),
            ControllerError::Theme(e) => write!(f, "Theme error: {e}"),
        }
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::Theme(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ControllerError>;

/*
 * The session controller. Sequences the application lifecycle
 * (`Uninitialized -> Started -> Running`), owns the single main window through
 * `WindowLifecycle`, routes opened files through `FileOpenDispatcher` and
 * dispatches the registered actions. It talks to the platform only by queueing
 * `PlatformCommand`s, and to the outside world through the injected
 * `...Operations` collaborators.
 */
pub struct ApplicationController {
    state: LifecycleState,
    window_lifecycle: WindowLifecycle,
    actions: ActionRegistry,
    file_open: FileOpenDispatcher,
    settings: Arc<dyn SettingsOperations>,
    command_runner: Arc<dyn CommandRunnerOperations>,
    log_dir: PathBuf,
    resource_dir: PathBuf,
    command_queue: VecDeque<PlatformCommand>,
}

impl ApplicationController {
    /*
     * Creates the controller and registers the `about`, `preferences` and
     * `open_log_file` actions; their registration commands are queued for the
     * platform's first drain.
     */
    pub fn new(
        settings: Arc<dyn SettingsOperations>,
        installer: Arc<dyn InstallerOperations>,
        command_runner: Arc<dyn CommandRunnerOperations>,
        log_dir: &Path,
        resource_dir: &Path,
    ) -> Self {
        let mut controller = ApplicationController {
            state: LifecycleState::Uninitialized,
            window_lifecycle: WindowLifecycle::new(),
            actions: ActionRegistry::new(),
            file_open: FileOpenDispatcher::new(installer),
            settings,
            command_runner,
            log_dir: log_dir.to_path_buf(),
            resource_dir: resource_dir.to_path_buf(),
            command_queue: VecDeque::new(),
        };
        controller.create_action(AppAction::About, &[]);
        controller.create_action(AppAction::Preferences, &[]);
        controller.create_action(AppAction::OpenLogFile, &[]);
        controller
    }

    fn create_action(&mut self, action: AppAction, accelerators: &[&str]) {
        let command = self.actions.register(action.name(), action, accelerators);
        self.command_queue.push_back(command);
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn main_window(&self) -> Option<&MainWindow> {
        self.window_lifecycle.main_window()
    }

    fn ensure_serving(&self) -> Result<()> {
        match self.state {
            LifecycleState::Uninitialized => Err(ControllerError::NotStarted),
            LifecycleState::ShuttingDown => Err(ControllerError::ShuttingDown),
            LifecycleState::Started | LifecycleState::Running => Ok(()),
        }
    }

    /*
     * One-shot startup: loads the application stylesheet and queues its
     * installation. A missing stylesheet is returned as an error and is meant
     * to end the process.
     */
    pub fn startup(&mut self) -> Result<()> {
        if self.state != LifecycleState::Uninitialized {
            return Err(ControllerError::AlreadyStarted);
        }
        log::info!("AppController: Application startup");
        let theme_command = theme::define_application_theme(&self.resource_dir)?;
        self.command_queue.push_back(theme_command);
        self.state = LifecycleState::Started;
        Ok(())
    }

    /*
     * Presents the main window, creating it (and possibly the onboarding
     * screen) on first use. Returns the same handle for every call while the
     * window is alive.
     */
    pub fn activate(&mut self, from_file: bool) -> Result<WindowId> {
        self.ensure_serving()?;
        let window_id =
            self.window_lifecycle
                .activate(from_file, self.settings.as_ref(), &mut self.command_queue);
        self.state = LifecycleState::Running;
        Ok(window_id)
    }

    /*
     * Handles files handed over by the platform. If the first file is
     * installable, activates from file and forwards it to the window;
     * otherwise nothing happens at all. `count` and `hint` are informational.
     */
    pub fn open_files(
        &mut self,
        files: &[PathBuf],
        count: usize,
        hint: &str,
    ) -> Result<Option<WindowId>> {
        self.ensure_serving()?;
        log::debug!("AppController: open_files count={count} hint='{hint}' files={files:?}");
        let Some(file) = self.file_open.accept(files).cloned() else {
            return Ok(None);
        };
        let window_id = self.activate(true)?;
        self.command_queue
            .push_back(PlatformCommand::SubmitFileToWindow {
                window_id,
                path: file,
            });
        Ok(Some(window_id))
    }

    pub fn invoke_action(&mut self, name: &str) {
        let Some(action) = self.actions.lookup(name) else {
            log::warn!("AppController: No action registered as '{name}'");
            return;
        };
        log::debug!("AppController: Invoking action {action:?}");
        match action {
            AppAction::About => self.command_queue.push_back(PlatformCommand::ShowAboutDialog {
                info: ui_description_layer::describe_about_dialog(),
            }),
            AppAction::Preferences => self.command_queue.push_back(PlatformCommand::ShowPreferences),
            AppAction::OpenLogFile => self.open_log_folder(),
        }
    }

    // No window, no folder.
    fn open_log_folder(&self) {
        if self.window_lifecycle.main_window().is_none() {
            log::debug!("AppController: open_log_file ignored, no main window.");
            return;
        }
        self.command_runner.open_in_file_manager(&self.log_dir);
    }

    pub fn on_window_closed(&mut self, window_id: WindowId) {
        self.window_lifecycle.on_window_closed(window_id);
    }

    pub fn request_quit(&mut self) {
        log::info!("AppController: Quit requested.");
        self.state = LifecycleState::ShuttingDown;
        self.command_queue.push_back(PlatformCommand::QuitApplication);
    }

    fn dispatch_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Startup => self.startup(),
            AppEvent::Activate => self.activate(false).map(|_| ()),
            AppEvent::OpenFiles { files, hint } => {
                self.open_files(&files, files.len(), &hint).map(|_| ())
            }
            AppEvent::ActionInvoked { name } => {
                self.invoke_action(&name);
                Ok(())
            }
            AppEvent::WindowClosed { window_id } => {
                self.on_window_closed(window_id);
                Ok(())
            }
            AppEvent::QuitRequested => {
                self.request_quit();
                Ok(())
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn test_drain_commands(&mut self) -> Vec<PlatformCommand> {
        self.command_queue.drain(..).collect()
    }
}

impl PlatformEventHandler for ApplicationController {
    fn handle_event(&mut self, event: AppEvent) -> PlatformResult<()> {
        if self.state == LifecycleState::ShuttingDown {
            log::debug!("AppController: Shutting down, ignoring {event:?}");
            return Ok(());
        }
        self.dispatch_event(event).map_err(|e| {
            log::error!("AppController: Fatal error: {e}");
            PlatformError::EventHandlingFailed(e.to_string())
        })
    }

    fn on_quit(&mut self) {
        log::info!(
            "AppController: Session ended (main window open: {}).",
            self.main_window().is_some()
        );
    }

    fn try_dequeue_command(&mut self) -> Option<PlatformCommand> {
        self.command_queue.pop_front()
    }
}
