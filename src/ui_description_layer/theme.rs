/*
 * This module loads the application theme. The stylesheet is a resource file
 * (`assets/style.css`) under the configured resource directory; loading it
 * produces the `InstallStylesheet` command the platform applies to the default
 * display. A missing or unreadable stylesheet is an error the caller treats as
 * fatal.
 */
use crate::platform_layer::PlatformCommand;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const STYLESHEET_RESOURCE: &str = "assets/style.css";

#[derive(Debug)]
pub enum ThemeError {
    ResourceUnavailable { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for ThemeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeError::ResourceUnavailable { path, source } => {
                write!(f, "Could not load theme resource {path:?}: {source}")
            }
        }
    }
}

impl std::error::Error for ThemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ThemeError::ResourceUnavailable { source, .. } => Some(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, ThemeError>;

pub fn load_stylesheet(resource_dir: &Path) -> Result<String> {
    let path = resource_dir.join(STYLESHEET_RESOURCE);
    fs::read_to_string(&path).map_err(|source| ThemeError::ResourceUnavailable { path, source })
}

pub fn define_application_theme(resource_dir: &Path) -> Result<PlatformCommand> {
    let css = load_stylesheet(resource_dir)?;
    log::debug!(
        "theme: Loaded stylesheet from {:?} ({} bytes).",
        resource_dir.join(STYLESHEET_RESOURCE),
        css.len()
    );
    Ok(PlatformCommand::InstallStylesheet { css })
}
