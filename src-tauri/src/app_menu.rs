use tauri::{
    menu::{IsMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu},
    AppHandle, Wry,
};

pub const MENU_RELOAD: &str = "menu_reload";
pub const MENU_QUIT: &str = "menu_quit";
pub const MENU_TOGGLE_FULLSCREEN: &str = "menu_toggle_fullscreen";
pub const MENU_TOGGLE_DEVTOOLS: &str = "menu_toggle_devtools";
pub const MENU_LEARN_MORE: &str = "menu_learn_more";
pub const MENU_DOCUMENTATION: &str = "menu_documentation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Reload,
    Quit,
    ToggleFullscreen,
    ToggleDevTools,
    LearnMore,
    Documentation,
}

pub fn action_from_menu_id(menu_id: &str) -> Option<MenuAction> {
    match menu_id {
        MENU_RELOAD => Some(MenuAction::Reload),
        MENU_QUIT => Some(MenuAction::Quit),
        MENU_TOGGLE_FULLSCREEN => Some(MenuAction::ToggleFullscreen),
        MENU_TOGGLE_DEVTOOLS => Some(MenuAction::ToggleDevTools),
        MENU_LEARN_MORE => Some(MenuAction::LearnMore),
        MENU_DOCUMENTATION => Some(MenuAction::Documentation),
        _ => None,
    }
}

pub fn view_menu_ids(debug_tooling: bool) -> Vec<&'static str> {
    let mut ids = vec![MENU_TOGGLE_FULLSCREEN];
    if debug_tooling {
        ids.push(MENU_TOGGLE_DEVTOOLS);
    }
    ids
}

pub fn build_app_menu(app_handle: &AppHandle, debug_tooling: bool) -> tauri::Result<Menu<Wry>> {
    let reload_item =
        MenuItem::with_id(app_handle, MENU_RELOAD, "Reload", true, Some("CmdOrCtrl+R"))?;
    let quit_item =
        MenuItem::with_id(app_handle, MENU_QUIT, "Quit", true, Some("CmdOrCtrl+Q"))?;
    let separator = PredefinedMenuItem::separator(app_handle)?;
    let file_menu = Submenu::with_items(
        app_handle,
        "File",
        true,
        &[&reload_item, &separator, &quit_item],
    )?;

    let fullscreen_item = MenuItem::with_id(
        app_handle,
        MENU_TOGGLE_FULLSCREEN,
        "Toggle Full Screen",
        true,
        Some("F11"),
    )?;
    let devtools_item = MenuItem::with_id(
        app_handle,
        MENU_TOGGLE_DEVTOOLS,
        "Toggle Developer Tools",
        true,
        Some("Alt+CmdOrCtrl+I"),
    )?;
    let mut view_items: Vec<&dyn IsMenuItem<Wry>> = Vec::new();
    for id in view_menu_ids(debug_tooling) {
        let item: &dyn IsMenuItem<Wry> = if id == MENU_TOGGLE_DEVTOOLS {
            &devtools_item
        } else {
            &fullscreen_item
        };
        view_items.push(item);
    }
    let view_menu = Submenu::with_items(app_handle, "View", true, &view_items)?;

    let learn_more_item =
        MenuItem::with_id(app_handle, MENU_LEARN_MORE, "Learn More", true, None::<&str>)?;
    let documentation_item = MenuItem::with_id(
        app_handle,
        MENU_DOCUMENTATION,
        "Documentation",
        true,
        None::<&str>,
    )?;
    let help_menu = Submenu::with_items(
        app_handle,
        "Help",
        true,
        &[&learn_more_item, &documentation_item],
    )?;

    Menu::with_items(app_handle, &[&file_menu, &view_menu, &help_menu])
}
