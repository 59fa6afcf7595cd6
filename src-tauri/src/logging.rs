use std::{
    env, fs,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, OnceLock},
};

use chrono::{DateTime, Local};
use log::{LevelFilter, Metadata, Record};

use crate::{APP_DATA_DIR_NAME, DESKTOP_LOG_FILE, DESKTOP_LOG_MAX_BYTES};

static DESKTOP_LOG_PATH: OnceLock<PathBuf> = OnceLock::new();
static DESKTOP_LOG_WRITE_LOCK: Mutex<()> = Mutex::new(());

pub fn resolve_desktop_log_path(log_dir_override: Option<PathBuf>, log_file: &str) -> PathBuf {
    let log_dir = log_dir_override
        .filter(|dir| !dir.as_os_str().is_empty())
        .or_else(|| home::home_dir().map(|home| home.join(APP_DATA_DIR_NAME).join("logs")))
        .unwrap_or_else(|| env::temp_dir().join(APP_DATA_DIR_NAME).join("logs"));
    log_dir.join(log_file)
}

/// Fixes the log location for the rest of the process. Only the first call
/// wins; a log line written before it pins the default location.
pub fn init_desktop_log_path(log_dir_override: Option<PathBuf>) -> &'static Path {
    DESKTOP_LOG_PATH.get_or_init(|| resolve_desktop_log_path(log_dir_override, DESKTOP_LOG_FILE))
}

pub fn desktop_log_path() -> &'static Path {
    DESKTOP_LOG_PATH.get_or_init(|| resolve_desktop_log_path(None, DESKTOP_LOG_FILE))
}

pub fn format_log_line(scope: &str, message: &str, timestamp: DateTime<Local>) -> String {
    format!(
        "[{}] [{}] {}",
        timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
        scope,
        message
    )
}

fn rotated_log_path(path: &Path) -> PathBuf {
    let mut rotated = path.as_os_str().to_os_string();
    rotated.push(".1");
    PathBuf::from(rotated)
}

/// Moves `path` to `path.1` once it reaches `max_bytes`. Returns whether a
/// rotation happened.
pub fn rotate_log_if_needed(path: &Path, max_bytes: u64) -> Result<bool, String> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(error) => {
            return Err(format!(
                "Failed to read log metadata {}: {}",
                path.display(),
                error
            ))
        }
    };
    if size < max_bytes {
        return Ok(false);
    }

    let rotated = rotated_log_path(path);
    fs::rename(path, &rotated).map_err(|error| {
        format!(
            "Failed to rotate log {} to {}: {}",
            path.display(),
            rotated.display(),
            error
        )
    })?;
    Ok(true)
}

pub fn append_log_line(path: &Path, line: &str, max_bytes: u64) -> Result<(), String> {
    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }
    rotate_log_if_needed(path, max_bytes)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log {}: {}", path.display(), error))?;
    writeln!(file, "{line}")
        .map_err(|error| format!("Failed to write log {}: {}", path.display(), error))
}

fn append_scoped_log(scope: &str, message: &str) {
    let line = format_log_line(scope, message, Local::now());
    if cfg!(debug_assertions) {
        eprintln!("{line}");
    }

    let _guard = DESKTOP_LOG_WRITE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Err(error) = append_log_line(desktop_log_path(), &line, DESKTOP_LOG_MAX_BYTES) {
        eprintln!("{error}");
    }
}

pub fn append_desktop_log(message: &str) {
    append_scoped_log("desktop", message);
}

pub fn append_startup_log(message: &str) {
    append_scoped_log("startup", message);
}

pub fn append_update_log(message: &str) {
    append_scoped_log("update", message);
}

pub fn append_ipc_log(message: &str) {
    append_scoped_log("ipc", message);
}

const UPDATER_LOG_TARGET: &str = "tauri_plugin_updater";

fn is_updater_target(target: &str) -> bool {
    target
        .strip_prefix(UPDATER_LOG_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

/// Forwards the updater plugin's `log` records into the update scope.
struct UpdaterLogBridge;

impl log::Log for UpdaterLogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= LevelFilter::Info && is_updater_target(metadata.target())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            append_update_log(&format!("[{}] {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

static UPDATER_LOG_BRIDGE: UpdaterLogBridge = UpdaterLogBridge;

pub fn install_updater_log_bridge() {
    match log::set_logger(&UPDATER_LOG_BRIDGE) {
        Ok(()) => log::set_max_level(LevelFilter::Info),
        Err(error) => append_startup_log(&format!("updater log bridge not installed: {error}")),
    }
}

/// Routes panics to the desktop log with a captured backtrace.
pub fn install_panic_log_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        append_desktop_log(&format!("panic: {info}\n{backtrace}"));
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn resolve_desktop_log_path_prefers_override() {
        let path = resolve_desktop_log_path(Some(PathBuf::from("/var/log/app")), "main.log");
        assert_eq!(path, PathBuf::from("/var/log/app/main.log"));
    }

    #[test]
    fn resolve_desktop_log_path_ignores_empty_override() {
        let path = resolve_desktop_log_path(Some(PathBuf::new()), "main.log");
        assert!(path.ends_with(Path::new("logs").join("main.log")));
        assert!(path
            .components()
            .any(|component| component.as_os_str() == APP_DATA_DIR_NAME));
    }

    #[test]
    fn updater_bridge_accepts_plugin_targets_only() {
        assert!(is_updater_target("tauri_plugin_updater"));
        assert!(is_updater_target("tauri_plugin_updater::updater"));
        assert!(!is_updater_target("tauri_plugin_updater_extra"));
        assert!(!is_updater_target("reqwest::connect"));
        assert!(!is_updater_target("tauri::manager"));
    }

    #[test]
    fn updater_bridge_filters_below_info() {
        let bridge = UpdaterLogBridge;
        let info = Metadata::builder()
            .level(log::Level::Info)
            .target("tauri_plugin_updater::updater")
            .build();
        let debug = Metadata::builder()
            .level(log::Level::Debug)
            .target("tauri_plugin_updater::updater")
            .build();
        let other = Metadata::builder()
            .level(log::Level::Error)
            .target("hyper::client")
            .build();
        assert!(log::Log::enabled(&bridge, &info));
        assert!(!log::Log::enabled(&bridge, &debug));
        assert!(!log::Log::enabled(&bridge, &other));
    }

    #[test]
    fn format_log_line_includes_timestamp_and_scope() {
        let timestamp = Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("timestamp should be unambiguous");
        assert_eq!(
            format_log_line("update", "checking", timestamp),
            "[2024-03-09 14:05:07.000] [update] checking"
        );
    }

    #[test]
    fn append_log_line_creates_parent_directories() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("logs").join("main.log");

        append_log_line(&path, "first", 1024).expect("first append");
        append_log_line(&path, "second", 1024).expect("second append");

        let contents = fs::read_to_string(&path).expect("log should exist");
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn append_log_line_rotates_when_limit_reached() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("main.log");

        append_log_line(&path, "0123456789", 8).expect("first append");
        append_log_line(&path, "after", 8).expect("append after rotation");

        let rotated = fs::read_to_string(temp.path().join("main.log.1")).expect("rotated log");
        assert_eq!(rotated, "0123456789\n");
        let current = fs::read_to_string(&path).expect("current log");
        assert_eq!(current, "after\n");
    }

    #[test]
    fn rotate_log_if_needed_skips_missing_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let rotated = rotate_log_if_needed(&temp.path().join("absent.log"), 1)
            .expect("missing file should not error");
        assert!(!rotated);
    }
}
