use tauri::{AppHandle, Manager};

use crate::{
    append_ipc_log, update_notifier::UpdateStatusPayload, AppSession, IPC_EXAMPLE_CHANNEL,
};

fn ipc_message(ping_pong: &str) -> String {
    format!("IPC test: {ping_pong}")
}

fn reply_to_ipc_example<F>(arg: &str, log: F) -> String
where
    F: Fn(&str),
{
    log(&format!("{IPC_EXAMPLE_CHANNEL}: {}", ipc_message(arg)));
    ipc_message("pong")
}

#[tauri::command]
pub(crate) fn ipc_example(arg: String) -> String {
    reply_to_ipc_example(&arg, append_ipc_log)
}

#[tauri::command]
pub(crate) fn update_status(app_handle: AppHandle) -> Option<UpdateStatusPayload> {
    app_handle
        .try_state::<AppSession>()
        .and_then(|state| state.update_session())
        .map(|session| session.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn ping_is_answered_with_fixed_pong() {
        let logs = RefCell::new(Vec::new());
        let reply = reply_to_ipc_example("ping", |line| logs.borrow_mut().push(line.to_string()));

        assert_eq!(reply, "IPC test: pong");
        assert_eq!(logs.into_inner(), vec!["ipc-example: IPC test: ping".to_string()]);
    }

    #[test]
    fn reply_does_not_echo_the_argument() {
        assert_eq!(reply_to_ipc_example("hello", |_| {}), "IPC test: pong");
    }
}
