/*
 * This module defines the data types exchanged between the application logic
 * and the platform layer: the opaque `WindowId` handle, the lifecycle events
 * the platform delivers (`AppEvent`), the commands the logic asks the platform
 * to carry out (`PlatformCommand`), and the `PlatformEventHandler` trait the
 * application logic implements.
 */

use super::error::Result as PlatformResult;
use std::path::PathBuf;

// An opaque identifier for the native main window.
//
// Allocated by the application logic when it decides a window must exist; the
// platform maps it to whatever native object backs the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub(crate) usize);

// Static content of the About dialog. The platform decides how to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutInfo {
    pub application_name: String,
    pub version: String,
    pub developers: Vec<String>,
    pub copyright: String,
    pub application_icon: String,
    pub issue_url: String,
}

// --- Events from Platform to App Logic ---

/*
 * Lifecycle events raised by the toolkit's application object.
 *
 * `Startup` arrives exactly once, before anything else. `Activate` and
 * `OpenFiles` may arrive any number of times afterwards. `ActionInvoked`
 * carries the name of a previously registered application action.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Startup,
    Activate,
    OpenFiles {
        files: Vec<PathBuf>,
        hint: String,
    },
    ActionInvoked {
        name: String,
    },
    // The user closed the window; the id is invalid afterwards.
    WindowClosed {
        window_id: WindowId,
    },
    QuitRequested,
}

// --- Commands from App Logic to Platform ---

/*
 * Side effects the application logic asks the platform to perform. Queued by
 * the logic and executed in FIFO order by the platform after each event.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCommand {
    // Installs the application-wide stylesheet for the default display.
    InstallStylesheet {
        css: String,
    },
    // Exposes a parameterless action under `app.<name>` with optional accelerators.
    RegisterAction {
        name: String,
        accelerators: Vec<String>,
    },
    CreateMainWindow {
        window_id: WindowId,
        from_file: bool,
    },
    // Raises the window and gives it focus.
    PresentWindow {
        window_id: WindowId,
    },
    ShowOnboarding,
    ShowAboutDialog {
        info: AboutInfo,
    },
    ShowPreferences,
    // Hands a file to the window's from-file installation flow.
    SubmitFileToWindow {
        window_id: WindowId,
        path: PathBuf,
    },
    QuitApplication,
}

// --- Trait for App Logic to Handle Events ---

// Implemented by the application logic. The platform calls `handle_event` for
// every lifecycle event and then drains `try_dequeue_command` until it is empty.
pub trait PlatformEventHandler {
    // An `Err` is fatal: the platform stops its loop and reports it to the caller.
    fn handle_event(&mut self, event: AppEvent) -> PlatformResult<()>;

    // Called once when the platform's loop is about to return.
    fn on_quit(&mut self) {}

    fn try_dequeue_command(&mut self) -> Option<PlatformCommand>;
}
