/*
 * This module consolidates the core, platform-agnostic services of the
 * application: configuration and paths, the diagnostic log file, the settings
 * gateway, the installability predicate and the shell command runner. Each
 * service that the controller consumes sits behind an `...Operations` trait so
 * tests can substitute mocks.
 */
pub mod config;
pub mod installer;
pub mod log_manager;
pub mod settings;
pub mod shell;

pub use config::{APP_DISPLAY_NAME, APP_ID, APP_NAME, APP_VERSION, AppConfig};
pub use installer::{CoreAppImageInstaller, InstallerOperations};
pub use log_manager::{LOG_FILE_MAX_LINES, LogManager};
pub use settings::{CoreSettingsStore, SettingsFlag, SettingsOperations};

#[cfg(test)]
pub use settings::SettingsError;
pub use shell::{CommandRunnerOperations, CoreCommandRunner};
