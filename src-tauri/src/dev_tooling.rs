use tauri::WebviewWindow;

use crate::{logging, runtime_config::RuntimeConfig};

/// Development and crash-reporting aids derived from the runtime config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolingPlan {
    pub panic_log_hook: bool,
    pub open_devtools: bool,
    pub force_extension_refresh: bool,
}

impl ToolingPlan {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            panic_log_hook: config.is_production(),
            open_devtools: config.debug_tooling_enabled(),
            force_extension_refresh: config.upgrade_extensions,
        }
    }
}

pub fn apply_process_tooling<F>(plan: &ToolingPlan, log: F)
where
    F: Fn(&str),
{
    if plan.panic_log_hook {
        logging::install_panic_log_hook();
        log("panic log hook installed");
    }
    if plan.open_devtools {
        log("debug tooling enabled");
    }
    if plan.force_extension_refresh {
        // Webview devtools ship without an extension store.
        log("extension refresh requested; no devtools extensions to refresh");
    }
}

pub fn apply_window_tooling<F>(window: &WebviewWindow, plan: &ToolingPlan, log: F)
where
    F: Fn(&str),
{
    if plan.open_devtools {
        window.open_devtools();
        log(&format!("devtools opened on window {}", window.label()));
    }
}
