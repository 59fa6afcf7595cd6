use tauri::{AppHandle, Manager};

use crate::{
    app_menu, append_desktop_log, external_links, window_actions, AppSession, DOCUMENTATION_URL,
    LEARN_MORE_URL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DevToolsDecision {
    IgnoreBecauseDebugToolingDisabled,
    Toggle,
}

fn decide_devtools_toggle(debug_tooling_enabled: bool) -> DevToolsDecision {
    if debug_tooling_enabled {
        DevToolsDecision::Toggle
    } else {
        DevToolsDecision::IgnoreBecauseDebugToolingDisabled
    }
}

fn open_help_page(url: &str) {
    if let Err(error) = external_links::open_external_url(url) {
        append_desktop_log(&format!("failed to open help page {url}: {error}"));
    }
}

pub fn handle_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match app_menu::action_from_menu_id(menu_id) {
        Some(app_menu::MenuAction::Reload) => {
            window_actions::reload_main_window(app_handle, append_desktop_log)
        }
        Some(app_menu::MenuAction::ToggleFullscreen) => {
            window_actions::toggle_main_window_fullscreen(app_handle, append_desktop_log)
        }
        Some(app_menu::MenuAction::ToggleDevTools) => {
            let debug_tooling_enabled = app_handle
                .try_state::<AppSession>()
                .is_some_and(|state| state.config.debug_tooling_enabled());
            match decide_devtools_toggle(debug_tooling_enabled) {
                DevToolsDecision::IgnoreBecauseDebugToolingDisabled => {
                    append_desktop_log("devtools toggle ignored: debug tooling disabled");
                }
                DevToolsDecision::Toggle => {
                    window_actions::toggle_main_window_devtools(app_handle, append_desktop_log)
                }
            }
        }
        Some(app_menu::MenuAction::LearnMore) => open_help_page(LEARN_MORE_URL),
        Some(app_menu::MenuAction::Documentation) => open_help_page(DOCUMENTATION_URL),
        Some(app_menu::MenuAction::Quit) => {
            append_desktop_log("menu quit requested, exiting desktop process");
            app_handle.exit(0);
        }
        None => {}
    }
}
