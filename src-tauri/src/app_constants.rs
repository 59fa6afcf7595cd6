pub const MAIN_WINDOW_LABEL: &str = "main";
pub const MAIN_WINDOW_WIDTH: f64 = 1024.0;
pub const MAIN_WINDOW_HEIGHT: f64 = 728.0;
pub const MAIN_WINDOW_TITLE_PREFIX: &str = "AutoUpdateApp";
pub const MAIN_WINDOW_ENTRY: &str = "index.html";

pub const DEFAULT_UPDATE_API_URL: &str = "https://localhost:5004/api";
pub const UPDATE_ACCEPT_HEADER: &str = "application/octet-stream";

pub const IPC_EXAMPLE_CHANNEL: &str = "ipc-example";

pub const APP_DATA_DIR_NAME: &str = ".autoupdate-desktop";
pub const DESKTOP_LOG_FILE: &str = "main.log";
pub const DESKTOP_LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;

pub const NODE_ENV_ENV: &str = "NODE_ENV";
pub const DEBUG_PROD_ENV: &str = "DEBUG_PROD";
pub const START_MINIMIZED_ENV: &str = "START_MINIMIZED";
pub const UPGRADE_EXTENSIONS_ENV: &str = "UPGRADE_EXTENSIONS";
pub const UPDATE_API_URL_ENV: &str = "UPDATE_API_URL";
pub const UPDATER_PUBKEY_ENV: &str = "UPDATER_PUBKEY";
pub const LOG_DIR_ENV: &str = "AUTOUPDATE_LOG_DIR";

pub const LEARN_MORE_URL: &str = "https://v2.tauri.app/";
pub const DOCUMENTATION_URL: &str = "https://v2.tauri.app/plugin/updater/";
