use tauri::{AppHandle, Manager, RunEvent, WindowEvent};

use crate::{
    app_menu, app_types::decide_activate, append_desktop_log, append_startup_log,
    dev_tooling::{self, ToolingPlan},
    ipc_commands, logging, main_window, menu_handler,
    platform::Platform,
    runtime_config::RuntimeConfig,
    update_notifier, window_actions, ActivateDecision, AppSession, MAIN_WINDOW_LABEL,
};

fn bootstrap_main_window(app_handle: &AppHandle, tooling: &ToolingPlan) -> Result<(), String> {
    let window = main_window::create_main_window(app_handle)?;
    dev_tooling::apply_window_tooling(&window, tooling, append_startup_log);
    update_notifier::start_for_main_window(app_handle);
    Ok(())
}

/// Dock activation or a second launch: re-create the window if it was
/// closed, otherwise bring it forward.
fn handle_activate(app_handle: &AppHandle, tooling: &ToolingPlan) {
    let Some(state) = app_handle.try_state::<AppSession>() else {
        return;
    };

    match decide_activate(&state.main_window) {
        ActivateDecision::CreateWindow => {
            append_desktop_log("activate: no main window, re-creating");
            if let Err(error) = bootstrap_main_window(app_handle, tooling) {
                append_desktop_log(&format!("failed to re-create main window: {error}"));
            }
        }
        ActivateDecision::FocusExisting => {
            window_actions::show_main_window(app_handle, append_desktop_log)
        }
    }
}

pub(crate) fn run() {
    let config = RuntimeConfig::from_env();
    let platform = Platform::current();
    let tooling = ToolingPlan::from_config(&config);
    let debug_tooling = config.debug_tooling_enabled();
    let keep_running_without_windows = platform.keeps_running_without_windows();
    logging::init_desktop_log_path(config.log_dir.clone());
    logging::install_updater_log_bridge();

    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "Logpath: {}",
        logging::desktop_log_path().display()
    ));
    append_startup_log(&format!(
        "platform={} update_api_url={}",
        platform, config.update_api_url
    ));
    dev_tooling::apply_process_tooling(&tooling, append_startup_log);

    let build_result = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(
            move |app_handle, _args, _cwd| {
                append_desktop_log("second instance launched");
                handle_activate(app_handle, &tooling);
            },
        ))
        .plugin(tauri_plugin_updater::Builder::new().build())
        .manage(AppSession::new(config, platform))
        .menu(move |app_handle| app_menu::build_app_menu(app_handle, debug_tooling))
        .on_menu_event(|app_handle, event| {
            menu_handler::handle_menu_event(app_handle, event.id().as_ref())
        })
        .invoke_handler(tauri::generate_handler![
            ipc_commands::ipc_example,
            ipc_commands::update_status,
        ])
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            if let WindowEvent::Destroyed = event {
                if let Some(state) = window.app_handle().try_state::<AppSession>() {
                    state.main_window.clear();
                }
                append_desktop_log("main window closed");
            }
        })
        .setup(move |app| {
            if let Err(error) = bootstrap_main_window(app.handle(), &tooling) {
                append_startup_log(&format!("failed to create main window: {error}"));
                return Err(error.into());
            }
            Ok(())
        })
        .build(tauri::generate_context!());

    let app = match build_result {
        Ok(app) => app,
        Err(error) => {
            append_startup_log(&format!("failed to start desktop application: {error}"));
            std::process::exit(1);
        }
    };

    app.run(move |app_handle, event| match event {
        RunEvent::ExitRequested { code, api, .. } => {
            if code.is_none() && keep_running_without_windows {
                append_desktop_log("last window closed; keeping process alive");
                api.prevent_exit();
            }
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => handle_activate(app_handle, &tooling),
        RunEvent::Exit => {
            update_notifier::install_pending_update(app_handle);
        }
        _ => {}
    });
}
