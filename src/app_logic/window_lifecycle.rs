/*
 * Owns the one main window. `activate` creates it on first need and only
 * raises it afterwards; the first creation on a fresh installation also shows
 * the onboarding screen, gated by the persisted `first-run` flag.
 */
use crate::core::{SettingsFlag, SettingsOperations};
use crate::platform_layer::{PlatformCommand, WindowId};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainWindow {
    pub window_id: WindowId,
    // Set when the window was created to install a specific file.
    pub from_file: bool,
}

#[derive(Debug)]
pub struct WindowLifecycle {
    main_window: Option<MainWindow>,
    next_window_id_counter: usize,
}

impl WindowLifecycle {
    pub fn new() -> Self {
        WindowLifecycle {
            main_window: None,
            next_window_id_counter: 1,
        }
    }

    pub fn main_window(&self) -> Option<&MainWindow> {
        self.main_window.as_ref()
    }

    fn generate_window_id(&mut self) -> WindowId {
        let id = self.next_window_id_counter;
        self.next_window_id_counter += 1;
        WindowId(id)
    }

    /*
     * Returns the window to present, creating it if there is none. `from_file`
     * only matters on creation. When `first-run` is false the flag is written
     * to true first and the onboarding command queued after; a failed write is
     * logged and onboarding is still shown. The window is always presented.
     */
    pub fn activate(
        &mut self,
        from_file: bool,
        settings: &dyn SettingsOperations,
        commands: &mut VecDeque<PlatformCommand>,
    ) -> WindowId {
        let window_id = match &self.main_window {
            Some(window) => {
                log::debug!(
                    "WindowLifecycle: Reusing window {:?} created with from_file={} (request {from_file} ignored)",
                    window.window_id,
                    window.from_file
                );
                window.window_id
            }
            None => {
                let window_id = self.generate_window_id();
                log::info!("WindowLifecycle: Creating main window {window_id:?} (from_file: {from_file})");
                self.main_window = Some(MainWindow {
                    window_id,
                    from_file,
                });
                commands.push_back(PlatformCommand::CreateMainWindow {
                    window_id,
                    from_file,
                });

                if !settings.get_flag(SettingsFlag::FirstRun) {
                    if let Err(e) = settings.set_flag(SettingsFlag::FirstRun, true) {
                        log::error!("WindowLifecycle: Could not persist first-run flag: {e}");
                    }
                    log::info!("WindowLifecycle: First run, presenting onboarding.");
                    commands.push_back(PlatformCommand::ShowOnboarding);
                }
                window_id
            }
        };
        commands.push_back(PlatformCommand::PresentWindow { window_id });
        window_id
    }

    // Forgets the window if it is the current one. Returns whether it was.
    pub fn on_window_closed(&mut self, window_id: WindowId) -> bool {
        match &self.main_window {
            Some(window) if window.window_id == window_id => {
                log::debug!("WindowLifecycle: Main window {window_id:?} closed.");
                self.main_window = None;
                true
            }
            _ => {
                log::warn!("WindowLifecycle: Close for unknown window {window_id:?} ignored.");
                false
            }
        }
    }
}

impl Default for WindowLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
