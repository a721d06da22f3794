/*
 * Owns the diagnostic log file: where it lives (`<cache root>/logs/<app>.log`),
 * how big it may grow, and the process-wide sink that writes into it.
 *
 * Rotation is all-or-nothing. At session start the file's lines are counted
 * and, when the count is above the ceiling, the file is truncated to empty.
 * Nothing is archived and nothing is partially trimmed.
 *
 * The sink is a `simplelog::WriteLogger` over the file in append mode. The
 * `log` facade accepts a single global logger, so `configure_sink` is the one
 * initialization point and refuses a second call.
 */
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const LOG_FILE_MAX_LINES: usize = 5000;
pub const LOG_DIR_NAME: &str = "logs";
const SESSION_SEPARATOR: &str = "---- Application startup";

static SINK_CONFIGURED: AtomicBool = AtomicBool::new(false);

#[derive(Debug)]
pub enum LogError {
    Io(io::Error),
    Timestamp(time::error::Format),
    SetLogger(log::SetLoggerError),
    SinkAlreadyConfigured,
}

impl From<io::Error> for LogError {
    fn from(err: io::Error) -> Self {
        LogError::Io(err)
    }
}

impl From<time::error::Format> for LogError {
    fn from(err: time::error::Format) -> Self {
        LogError::Timestamp(err)
    }
}

impl From<log::SetLoggerError> for LogError {
    fn from(err: log::SetLoggerError) -> Self {
        LogError::SetLogger(err)
    }
}

impl std::fmt::Display for LogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::Io(e) => write!(f, "Log file I/O error: {e}"),
            LogError::Timestamp(e) => write!(f, "Could not format session timestamp: {e}"),
            LogError::SetLogger(e) => write!(f, "Could not install log sink: {e}"),
            LogError::SinkAlreadyConfigured => {
                write!(f, "The log sink has already been configured for this process")
            }
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogError::Io(e) => Some(e),
            LogError::Timestamp(e) => Some(e),
            LogError::SetLogger(e) => Some(e),
            LogError::SinkAlreadyConfigured => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LogError>;

/*
 * The resolved log location plus the ceiling it is held to. Created by
 * `prepare`, which is the only step that touches the file system.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogManager {
    log_dir: PathBuf,
    log_file: PathBuf,
    ceiling: usize,
}

impl LogManager {
    /*
     * Ensures `<cache_root>/logs` exists (creating it if needed, a no-op
     * otherwise) and computes `<cache_root>/logs/<app_name>.log`. The file
     * itself is not created here.
     */
    pub fn prepare(cache_root: &Path, app_name: &str, ceiling: usize) -> Result<Self> {
        let log_dir = cache_root.join(LOG_DIR_NAME);
        if !log_dir.exists() {
            fs::create_dir_all(&log_dir)?;
            log::debug!("LogManager: Created log directory {log_dir:?}");
        }
        let log_file = log_dir.join(format!("{app_name}.log"));
        Ok(LogManager {
            log_dir,
            log_file,
            ceiling,
        })
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn enforce_ceiling(&self) -> Result<bool> {
        enforce_ceiling(&self.log_file, self.ceiling)
    }

    pub fn configure_sink(&self, level: LevelFilter) -> Result<()> {
        configure_sink(&self.log_file, level)
    }
}

pub fn level_for(debug_logs: bool) -> LevelFilter {
    if debug_logs {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/*
 * Counts newline-separated lines; a trailing fragment without a newline counts
 * as a line. Works on raw bytes so non-UTF-8 content never fails the count.
 */
pub fn count_lines(path: &Path) -> Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    let mut count = 0;
    for segment in reader.split(b'\n') {
        segment?;
        count += 1;
    }
    Ok(count)
}

/*
 * Truncates the file to empty when it holds more than `ceiling` lines.
 * Returns whether a truncation happened. A missing file is left alone.
 */
pub fn enforce_ceiling(log_file: &Path, ceiling: usize) -> Result<bool> {
    if !log_file.exists() {
        return Ok(false);
    }
    let line_count = count_lines(log_file)?;
    if line_count <= ceiling {
        return Ok(false);
    }
    File::create(log_file)?;
    // The sink isn't up yet at this point.
    println!("Log file {log_file:?} had {line_count} lines (limit {ceiling}), cleared it.");
    Ok(true)
}

/*
 * Opens the log file for appending, writes the session separator and wraps the
 * file in a `WriteLogger`. Does not install anything globally.
 */
pub fn open_sink(log_file: &Path, level: LevelFilter) -> Result<Box<WriteLogger<File>>> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;
    let timestamp = OffsetDateTime::now_utc().format(&Rfc3339)?;
    writeln!(file, "\n\n{SESSION_SEPARATOR} {timestamp}")?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_time_format_rfc3339()
        .build();
    Ok(WriteLogger::new(level, config, file))
}

// Takes the one initialization this process gets. Later claims fail.
fn claim_sink() -> Result<()> {
    if SINK_CONFIGURED.swap(true, Ordering::SeqCst) {
        return Err(LogError::SinkAlreadyConfigured);
    }
    Ok(())
}

/*
 * Installs the file sink as the process-wide logger. Must run exactly once,
 * after `enforce_ceiling`; a second call fails with `SinkAlreadyConfigured`,
 * even when the first call failed to install.
 */
pub fn configure_sink(log_file: &Path, level: LevelFilter) -> Result<()> {
    claim_sink()?;
    let logger = open_sink(log_file, level)?;
    log::set_boxed_logger(logger)?;
    log::set_max_level(level);
    log::info!("LogManager: Logging to {log_file:?} at level {level}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Record};
    use tempfile::tempdir;

    fn write_lines(path: &Path, count: usize) {
        let mut file = File::create(path).unwrap();
        for i in 0..count {
            writeln!(file, "line {i}").unwrap();
        }
    }

    #[test]
    fn test_prepare_creates_log_dir_and_computes_path() {
        // Arrange
        let dir = tempdir().unwrap();

        // Act
        let manager = LogManager::prepare(dir.path(), "gearlever", LOG_FILE_MAX_LINES).unwrap();

        // Assert
        assert!(dir.path().join(LOG_DIR_NAME).is_dir());
        assert_eq!(manager.log_dir(), dir.path().join(LOG_DIR_NAME));
        assert_eq!(
            manager.log_file(),
            dir.path().join(LOG_DIR_NAME).join("gearlever.log")
        );
        assert!(!manager.log_file().exists(), "prepare must not create the file");
    }

    #[test]
    fn test_prepare_is_idempotent_and_keeps_existing_files() {
        let dir = tempdir().unwrap();
        let first = LogManager::prepare(dir.path(), "gearlever", 10).unwrap();
        write_lines(first.log_file(), 3);

        let second = LogManager::prepare(dir.path(), "gearlever", 10).unwrap();

        assert_eq!(first, second);
        assert_eq!(count_lines(second.log_file()).unwrap(), 3);
    }

    #[test]
    fn test_enforce_ceiling_truncates_file_above_ceiling() {
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("app.log");
        write_lines(&log_file, LOG_FILE_MAX_LINES + 1);

        let truncated = enforce_ceiling(&log_file, LOG_FILE_MAX_LINES).unwrap();

        assert!(truncated);
        assert_eq!(fs::metadata(&log_file).unwrap().len(), 0);
        assert_eq!(count_lines(&log_file).unwrap(), 0);
    }

    #[test]
    fn test_enforce_ceiling_keeps_file_at_ceiling() {
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("app.log");
        write_lines(&log_file, LOG_FILE_MAX_LINES);
        let before = fs::read(&log_file).unwrap();

        let truncated = enforce_ceiling(&log_file, LOG_FILE_MAX_LINES).unwrap();

        assert!(!truncated);
        assert_eq!(fs::read(&log_file).unwrap(), before);
    }

    #[test]
    fn test_enforce_ceiling_missing_file_is_noop() {
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("absent.log");

        assert!(!enforce_ceiling(&log_file, 5).unwrap());
        assert!(!log_file.exists());
    }

    #[test]
    fn test_count_lines_counts_trailing_fragment_and_binary_content() {
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("app.log");
        fs::write(&log_file, b"one\n\xff\xfe two\nthree").unwrap();

        assert_eq!(count_lines(&log_file).unwrap(), 3);
    }

    #[test]
    fn test_open_sink_appends_separator_and_records() {
        // Arrange
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("app.log");
        fs::write(&log_file, "previous session\n").unwrap();

        // Act
        let logger = open_sink(&log_file, LevelFilter::Info).unwrap();
        logger.log(
            &Record::builder()
                .args(format_args!("hello from the new session"))
                .level(Level::Info)
                .target("gear_lever")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("debug noise"))
                .level(Level::Debug)
                .target("gear_lever")
                .build(),
        );
        logger.flush();

        // Assert
        let content = fs::read_to_string(&log_file).unwrap();
        assert!(content.starts_with("previous session\n"));
        let separator_pos = content.find(SESSION_SEPARATOR).unwrap();
        let record_pos = content.find("hello from the new session").unwrap();
        assert!(separator_pos < record_pos);
        assert!(!content.contains("debug noise"));
    }

    // The only test that may touch the process-wide sink guard.
    #[test]
    fn test_configure_sink_can_only_be_claimed_once() {
        // Arrange: the test logger owns the global slot, so installing fails.
        crate::initialize_logging();
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("app.log");

        // Act
        let first = configure_sink(&log_file, LevelFilter::Info);
        let second = configure_sink(&log_file, LevelFilter::Debug);

        // Assert
        assert!(matches!(first, Err(LogError::SetLogger(_))), "got {first:?}");
        assert!(
            matches!(second, Err(LogError::SinkAlreadyConfigured)),
            "got {second:?}"
        );
        let content = fs::read_to_string(&log_file).unwrap();
        assert_eq!(content.matches(SESSION_SEPARATOR).count(), 1);
    }

    #[test]
    fn test_level_for_debug_flag() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Info);
    }
}
