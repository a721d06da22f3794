// src/main.rs

mod app_logic;
mod core;
mod platform_layer;
mod ui_description_layer;

use crate::app_logic::ApplicationController;
use crate::core::{
    APP_NAME, AppConfig, CoreAppImageInstaller, CoreCommandRunner, CoreSettingsStore,
    LOG_FILE_MAX_LINES, LogManager, SettingsFlag, SettingsOperations, log_manager,
};
use crate::platform_layer::PlatformInterface;

use std::error::Error;
use std::io;
use std::sync::Arc;

/*
 * Initializes a logger for test runs. Safe to call from every test; only the
 * first call installs anything.
 */
#[cfg(test)]
pub(crate) fn initialize_logging() {
    use simplelog::{Config, LevelFilter, TestLogger};
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = TestLogger::init(LevelFilter::Debug, Config::default());
    });
}

/*
 * Prepares the log file (directory, line ceiling, sink) before anything else
 * runs, then hands the unmodified argument vector to the platform loop. Any
 * error here, or a fatal error from the controller, ends the process.
 */
fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_environment()?;

    let log_manager = LogManager::prepare(&config.cache_root, APP_NAME, LOG_FILE_MAX_LINES)?;
    println!("Logging to file {}", log_manager.log_file().display());
    log_manager.enforce_ceiling()?;

    let settings = Arc::new(CoreSettingsStore::open(&config.settings_file));
    let level = log_manager::level_for(settings.get_flag(SettingsFlag::DebugLogs));
    log_manager.configure_sink(level)?;

    let mut controller = ApplicationController::new(
        settings,
        Arc::new(CoreAppImageInstaller::new()),
        Arc::new(CoreCommandRunner::new()),
        log_manager.log_dir(),
        &config.resource_dir,
    );

    let args: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let mut platform = PlatformInterface::new();
    platform.run(&mut controller, &args, io::stdin().lock())?;
    log::info!("main: Application exited in state {:?}.", controller.state());
    Ok(())
}
