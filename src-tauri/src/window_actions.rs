use tauri::{AppHandle, Manager, WebviewWindow};

use crate::AppSession;

fn current_main_window<F>(app_handle: &AppHandle, action: &str, log: F) -> Option<WebviewWindow>
where
    F: Fn(&str),
{
    let window = app_handle
        .try_state::<AppSession>()
        .and_then(|state| state.main_window.current());
    if window.is_none() {
        log(&format!("{action} skipped: main window not open"));
    }
    window
}

fn show_window<F>(window: &WebviewWindow, log: F)
where
    F: Fn(&str),
{
    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize window {}: {error}", window.label()));
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show window {}: {error}", window.label()));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus window {}: {error}", window.label()));
    }
}

fn minimize_window<F>(window: &WebviewWindow, log: F)
where
    F: Fn(&str),
{
    if let Err(error) = window.show() {
        log(&format!(
            "failed to show window {} before minimizing: {error}",
            window.label()
        ));
    }
    if let Err(error) = window.minimize() {
        log(&format!("failed to minimize window {}: {error}", window.label()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RevealAction {
    ShowAndFocus,
    Minimize,
}

pub(crate) fn decide_reveal(start_minimized: bool) -> RevealAction {
    if start_minimized {
        RevealAction::Minimize
    } else {
        RevealAction::ShowAndFocus
    }
}

/// First-paint reveal: show and focus, or minimize when starting minimized.
pub fn reveal_window<F>(window: &WebviewWindow, start_minimized: bool, log: F)
where
    F: Fn(&str),
{
    match decide_reveal(start_minimized) {
        RevealAction::Minimize => {
            log("first page load finished; starting minimized");
            minimize_window(window, log);
        }
        RevealAction::ShowAndFocus => {
            log("first page load finished; showing window");
            show_window(window, log);
        }
    }
}

pub fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    if let Some(window) = current_main_window(app_handle, "show_main_window", &log) {
        show_window(&window, log);
    }
}

pub fn set_main_window_title<F>(app_handle: &AppHandle, title: &str, log: F)
where
    F: Fn(&str),
{
    let Some(window) = current_main_window(app_handle, "set_main_window_title", &log) else {
        return;
    };

    if let Err(error) = window.set_title(title) {
        log(&format!("failed to set main window title: {error}"));
    }
}

pub fn reload_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = current_main_window(app_handle, "reload_main_window", &log) else {
        return;
    };

    if let Err(error) = window.eval("window.location.reload()") {
        log(&format!("failed to reload main window: {error}"));
    }
}

pub fn toggle_main_window_fullscreen<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = current_main_window(app_handle, "toggle_main_window_fullscreen", &log)
    else {
        return;
    };

    match window.is_fullscreen() {
        Ok(fullscreen) => {
            if let Err(error) = window.set_fullscreen(!fullscreen) {
                log(&format!("failed to toggle main window fullscreen: {error}"));
            }
        }
        Err(error) => log(&format!(
            "failed to read main window fullscreen state: {error}"
        )),
    }
}

pub fn toggle_main_window_devtools<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = current_main_window(app_handle, "toggle_main_window_devtools", &log)
    else {
        return;
    };

    if window.is_devtools_open() {
        window.close_devtools();
    } else {
        window.open_devtools();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_minimized_minimizes_on_first_paint() {
        assert_eq!(decide_reveal(true), RevealAction::Minimize);
    }

    #[test]
    fn default_reveal_shows_and_focuses() {
        assert_eq!(decide_reveal(false), RevealAction::ShowAndFocus);
    }
}
