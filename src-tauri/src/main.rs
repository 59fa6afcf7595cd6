#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_menu;
mod app_runtime;
mod app_types;
mod dev_tooling;
mod external_links;
mod ipc_commands;
mod logging;
mod main_window;
mod menu_handler;
mod platform;
mod runtime_config;
mod update_endpoint;
mod update_notifier;
mod update_phase;
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_types::{ActivateDecision, AppSession};
pub(crate) use logging::{
    append_desktop_log, append_ipc_log, append_startup_log, append_update_log,
};

fn main() {
    app_runtime::run();
}
