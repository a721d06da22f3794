/*
 * The settings gateway. The controller only ever needs two persisted booleans,
 * `first-run` and `debug-logs`, so the surface is a typed flag enum plus
 * get/set. `CoreSettingsStore` keeps them in a small JSON file; a missing or
 * unreadable file reads as every flag being false.
 */
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsFlag {
    FirstRun,
    DebugLogs,
}

impl SettingsFlag {
    pub fn key(self) -> &'static str {
        match self {
            SettingsFlag::FirstRun => "first-run",
            SettingsFlag::DebugLogs => "debug-logs",
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Serde(serde_json::Error),
}

impl From<io::Error> for SettingsError {
    fn from(err: io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Serde(err)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "Settings I/O error: {e}"),
            SettingsError::Serde(e) => write!(f, "Settings serialization error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Serde(e) => Some(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;

pub trait SettingsOperations: Send + Sync {
    fn get_flag(&self, flag: SettingsFlag) -> bool;
    fn set_flag(&self, flag: SettingsFlag, value: bool) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct StoredFlags {
    #[serde(default)]
    first_run: bool,
    #[serde(default)]
    debug_logs: bool,
}

impl StoredFlags {
    fn get(&self, flag: SettingsFlag) -> bool {
        match flag {
            SettingsFlag::FirstRun => self.first_run,
            SettingsFlag::DebugLogs => self.debug_logs,
        }
    }

    fn set(&mut self, flag: SettingsFlag, value: bool) {
        match flag {
            SettingsFlag::FirstRun => self.first_run = value,
            SettingsFlag::DebugLogs => self.debug_logs = value,
        }
    }
}

/*
 * File-backed settings. Flags are loaded once at construction and cached; each
 * write updates the cache and rewrites the whole file.
 */
pub struct CoreSettingsStore {
    settings_file: PathBuf,
    flags: Mutex<StoredFlags>,
}

impl CoreSettingsStore {
    pub fn open(settings_file: &Path) -> Self {
        let flags = match Self::read_flags(settings_file) {
            Ok(Some(flags)) => {
                log::debug!("CoreSettingsStore: Loaded {flags:?} from {settings_file:?}");
                flags
            }
            Ok(None) => {
                log::debug!(
                    "CoreSettingsStore: No settings file at {settings_file:?}, using defaults."
                );
                StoredFlags::default()
            }
            Err(e) => {
                log::warn!(
                    "CoreSettingsStore: Could not read {settings_file:?}: {e}. Using defaults."
                );
                StoredFlags::default()
            }
        };
        CoreSettingsStore {
            settings_file: settings_file.to_path_buf(),
            flags: Mutex::new(flags),
        }
    }

    fn read_flags(settings_file: &Path) -> Result<Option<StoredFlags>> {
        if !settings_file.exists() {
            return Ok(None);
        }
        let reader = BufReader::new(File::open(settings_file)?);
        Ok(Some(serde_json::from_reader(reader)?))
    }

    fn write_flags(&self, flags: &StoredFlags) -> Result<()> {
        if let Some(parent) = self.settings_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.settings_file)?);
        serde_json::to_writer_pretty(&mut writer, flags)?;
        writer.flush()?;
        Ok(())
    }
}

impl SettingsOperations for CoreSettingsStore {
    fn get_flag(&self, flag: SettingsFlag) -> bool {
        match self.flags.lock() {
            Ok(flags) => flags.get(flag),
            Err(poisoned) => poisoned.into_inner().get(flag),
        }
    }

    fn set_flag(&self, flag: SettingsFlag, value: bool) -> Result<()> {
        let mut flags = match self.flags.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        flags.set(flag, value);
        self.write_flags(&flags)?;
        log::debug!(
            "CoreSettingsStore: Set '{}' = {value} in {:?}",
            flag.key(),
            self.settings_file
        );
        Ok(())
    }
}
