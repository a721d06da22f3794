/*
 * Resolves the application's identity and the locations it works with: the
 * cache root (which holds the `logs` folder), the settings file, and the
 * resource directory that carries the stylesheet. Locations come from the
 * platform's standard user directories via `ProjectDirs`, each of which can be
 * overridden through an environment variable.
 *
 * Resolution is split from the environment lookup (`AppConfig::resolve` takes a
 * lookup closure) so tests can supply their own variables without touching the
 * process environment.
 */
use directories::ProjectDirs;
use std::ffi::OsString;
use std::path::PathBuf;

pub const APP_ID: &str = "it.mijorus.gearlever";
pub const APP_NAME: &str = "gearlever";
pub const APP_DISPLAY_NAME: &str = "Gear lever";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CACHE_DIR_ENV: &str = "GEARLEVER_CACHE_DIR";
pub const CONFIG_DIR_ENV: &str = "GEARLEVER_CONFIG_DIR";
pub const RESOURCE_DIR_ENV: &str = "GEARLEVER_RESOURCE_DIR";

const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug)]
pub enum ConfigError {
    NoProjectDirectory,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoProjectDirectory => {
                write!(f, "Could not determine user directories for {APP_ID}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub cache_root: PathBuf,
    pub settings_file: PathBuf,
    pub resource_dir: PathBuf,
}

impl AppConfig {
    pub fn from_environment() -> Result<Self> {
        Self::resolve(|key| std::env::var_os(key))
    }

    /*
     * Builds the configuration from an environment lookup. Overrides win over
     * the `ProjectDirs` locations; `ProjectDirs` is only consulted when at least
     * one of the cache or config overrides is missing.
     */
    pub fn resolve<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let cache_override = lookup(CACHE_DIR_ENV).map(PathBuf::from);
        let config_override = lookup(CONFIG_DIR_ENV).map(PathBuf::from);

        let (cache_root, config_dir) = match (cache_override, config_override) {
            (Some(cache), Some(config)) => (cache, config),
            (cache, config) => {
                let proj_dirs = ProjectDirs::from("it", "mijorus", APP_NAME)
                    .ok_or(ConfigError::NoProjectDirectory)?;
                (
                    cache.unwrap_or_else(|| proj_dirs.cache_dir().to_path_buf()),
                    config.unwrap_or_else(|| proj_dirs.config_local_dir().to_path_buf()),
                )
            }
        };

        let resource_dir = lookup(RESOURCE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")));

        let config = AppConfig {
            cache_root,
            settings_file: config_dir.join(SETTINGS_FILENAME),
            resource_dir,
        };
        log::trace!("AppConfig: Resolved {config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> + use<> {
        let map: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_resolve_uses_all_overrides() {
        // Arrange
        let unique = rand::random::<u64>();
        let cache = format!("/tmp/gl-cache-{unique}");
        let config_dir = format!("/tmp/gl-config-{unique}");
        let resources = format!("/tmp/gl-res-{unique}");
        let lookup = lookup_from(&[
            (CACHE_DIR_ENV, cache.as_str()),
            (CONFIG_DIR_ENV, config_dir.as_str()),
            (RESOURCE_DIR_ENV, resources.as_str()),
        ]);

        // Act
        let config = AppConfig::resolve(lookup).unwrap();

        // Assert
        assert_eq!(config.cache_root, PathBuf::from(&cache));
        assert_eq!(
            config.settings_file,
            PathBuf::from(&config_dir).join(SETTINGS_FILENAME)
        );
        assert_eq!(config.resource_dir, PathBuf::from(&resources));
        assert!(!config.cache_root.exists(), "resolve must not touch the file system");
    }

    #[test]
    fn test_resolve_defaults_resource_dir_to_manifest_dir() {
        let lookup = lookup_from(&[
            (CACHE_DIR_ENV, "/tmp/gl-cache"),
            (CONFIG_DIR_ENV, "/tmp/gl-config"),
        ]);

        let config = AppConfig::resolve(lookup).unwrap();

        assert_eq!(config.resource_dir, PathBuf::from(env!("CARGO_MANIFEST_DIR")));
        assert!(config.resource_dir.join("assets").join("style.css").exists());
    }

    #[test]
    fn test_resolve_without_overrides_uses_project_dirs() {
        // ProjectDirs depends on the environment (HOME); skip quietly when unavailable.
        let Some(proj_dirs) = ProjectDirs::from("it", "mijorus", APP_NAME) else {
            return;
        };

        let config = AppConfig::resolve(|_| None).unwrap();

        assert_eq!(config.cache_root, proj_dirs.cache_dir());
        assert_eq!(
            config.settings_file,
            proj_dirs.config_local_dir().join(SETTINGS_FILENAME)
        );
    }
}
