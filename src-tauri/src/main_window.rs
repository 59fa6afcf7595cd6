use std::path::{Path, PathBuf};

use tauri::{
    image::Image,
    webview::{NewWindowResponse, PageLoadEvent},
    AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder,
};

use crate::{
    append_desktop_log, external_links, window_actions, AppSession, MAIN_WINDOW_ENTRY,
    MAIN_WINDOW_HEIGHT, MAIN_WINDOW_LABEL, MAIN_WINDOW_TITLE_PREFIX, MAIN_WINDOW_WIDTH,
};

const ASSETS_DIR: &str = "assets";
const WINDOW_ICON_FILE: &str = "icon.png";

pub(crate) fn main_window_title(app_version: &str) -> String {
    format!("{MAIN_WINDOW_TITLE_PREFIX} v{app_version}")
}

pub(crate) fn asset_path(assets_dir: &Path, parts: &[&str]) -> PathBuf {
    parts
        .iter()
        .fold(assets_dir.to_path_buf(), |path, part| path.join(part))
}

fn resolve_assets_dir(app_handle: &AppHandle) -> Result<PathBuf, String> {
    if tauri::is_dev() {
        return Ok(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(ASSETS_DIR));
    }

    app_handle
        .path()
        .resource_dir()
        .map(|dir| dir.join(ASSETS_DIR))
        .map_err(|error| format!("Failed to resolve resource directory: {error}"))
}

fn load_window_icon(app_handle: &AppHandle) -> Result<Image<'static>, String> {
    let icon_path = asset_path(&resolve_assets_dir(app_handle)?, &[WINDOW_ICON_FILE]);
    Image::from_path(&icon_path)
        .map_err(|error| format!("Failed to load icon {}: {}", icon_path.display(), error))
}

/// Creates the hidden main window and records it in the application session.
pub(crate) fn create_main_window(app_handle: &AppHandle) -> Result<WebviewWindow, String> {
    let state = app_handle.state::<AppSession>();
    let start_minimized = state.config.start_minimized;
    let app_version = app_handle.package_info().version.to_string();

    let mut builder = WebviewWindowBuilder::new(
        app_handle,
        MAIN_WINDOW_LABEL,
        WebviewUrl::App(MAIN_WINDOW_ENTRY.into()),
    )
    .title(main_window_title(&app_version))
    .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
    .visible(false)
    .on_navigation(|url| external_links::allow_webview_navigation(url, append_desktop_log))
    .on_new_window(|url, _features| {
        external_links::handle_new_window_request(&url, append_desktop_log);
        NewWindowResponse::Deny
    })
    .on_page_load(move |window, payload| {
        if !matches!(payload.event(), PageLoadEvent::Finished) {
            return;
        }
        let first_load = window
            .app_handle()
            .try_state::<AppSession>()
            .is_some_and(|state| state.take_first_load());
        if first_load {
            window_actions::reveal_window(&window, start_minimized, append_desktop_log);
        }
    });

    match load_window_icon(app_handle) {
        Ok(icon) => {
            builder = builder
                .icon(icon)
                .map_err(|error| format!("Failed to set main window icon: {error}"))?;
        }
        Err(error) => append_desktop_log(&format!("main window icon unavailable: {error}")),
    }

    state.arm_first_load();
    let window = builder
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;
    state.main_window.attach(window.clone());
    append_desktop_log(&format!(
        "main window created: {}x{} start_minimized={}",
        MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT, start_minimized
    ));
    Ok(window)
}
