use std::sync::{Arc, Mutex, MutexGuard};

use semver::Version;
use serde::Serialize;
use tauri::{AppHandle, Manager};
use tauri_plugin_updater::{Update, Updater, UpdaterExt};
use url::Url;

use crate::{
    append_update_log,
    platform::{manifest_arch, Platform, UpdateStrategy},
    update_endpoint,
    update_phase::{UpdateEvent, UpdatePhase},
    window_actions, AppSession, UPDATE_ACCEPT_HEADER,
};

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// With downgrades allowed any differing remote version is offered.
pub(crate) fn should_offer_release(
    current: &Version,
    remote: &Version,
    allow_downgrade: bool,
) -> bool {
    if allow_downgrade {
        remote != current
    } else {
        remote > current
    }
}

struct PendingInstall {
    update: Update,
    bytes: Vec<u8>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateStatusPayload {
    pub(crate) phase: &'static str,
    pub(crate) version: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) endpoint: Option<String>,
    pub(crate) strategy: UpdateStrategy,
    pub(crate) current_version: String,
}

/// One check-for-update operation owned by the main window.
pub(crate) struct UpdateSession {
    platform: Platform,
    strategy: UpdateStrategy,
    endpoint: Result<String, String>,
    allow_downgrade: bool,
    app_version: String,
    log_path: String,
    phase: Mutex<UpdatePhase>,
    pending_install: Mutex<Option<PendingInstall>>,
}

impl UpdateSession {
    pub(crate) fn new(
        platform: Platform,
        app_version: &str,
        api_url: &str,
        log_path: &str,
    ) -> Self {
        let strategy = platform.update_strategy();
        let endpoint = update_endpoint::build_update_endpoint(api_url, &platform, app_version);
        Self {
            platform,
            strategy,
            endpoint,
            allow_downgrade: true,
            app_version: app_version.to_string(),
            log_path: log_path.to_string(),
            phase: Mutex::new(UpdatePhase::Idle),
            pending_install: Mutex::new(None),
        }
    }

    pub(crate) fn strategy(&self) -> UpdateStrategy {
        self.strategy
    }

    pub(crate) fn endpoint(&self) -> Result<&str, &str> {
        self.endpoint
            .as_ref()
            .map(String::as_str)
            .map_err(String::as_str)
    }

    pub(crate) fn phase(&self) -> UpdatePhase {
        lock_or_recover(&self.phase).clone()
    }

    pub(crate) fn window_title(&self) -> Option<String> {
        self.phase().window_title(&self.app_version, &self.log_path)
    }

    /// Applies `event` and pushes the resulting title. Returns the new phase,
    /// or `None` when the event was ignored.
    pub(crate) fn report<L, T>(
        &self,
        event: UpdateEvent,
        log: L,
        set_title: T,
    ) -> Option<UpdatePhase>
    where
        L: Fn(&str),
        T: Fn(&str),
    {
        let event_name = event.name();
        let next = {
            let mut phase = lock_or_recover(&self.phase);
            let Some(next) = phase.apply(event) else {
                log(&format!(
                    "ignored updater event {event_name} in phase {}",
                    phase.name()
                ));
                return None;
            };
            *phase = next.clone();
            next
        };

        if let UpdatePhase::Error { message } = &next {
            log(&format!("{}: Update error: {message}", self.app_version));
        } else {
            let suffix = if next.is_terminal() { " (final)" } else { "" };
            log(&format!("{event_name} -> {}{suffix}", next.name()));
        }
        if let Some(title) = next.window_title(&self.app_version, &self.log_path) {
            set_title(&title);
        }
        Some(next)
    }

    pub(crate) fn status(&self) -> UpdateStatusPayload {
        let phase = self.phase();
        let (version, message) = match &phase {
            UpdatePhase::Available { version } | UpdatePhase::Downloaded { version } => {
                (Some(version.clone()), None)
            }
            UpdatePhase::Error { message } => (None, Some(message.clone())),
            _ => (None, None),
        };
        UpdateStatusPayload {
            phase: phase.name(),
            version,
            message,
            title: phase.window_title(&self.app_version, &self.log_path),
            endpoint: self.endpoint.as_ref().ok().cloned(),
            strategy: self.strategy,
            current_version: self.app_version.clone(),
        }
    }

    fn store_pending_install(&self, update: Update, bytes: Vec<u8>) {
        *lock_or_recover(&self.pending_install) = Some(PendingInstall { update, bytes });
    }

    fn take_pending_install(&self) -> Option<PendingInstall> {
        lock_or_recover(&self.pending_install).take()
    }

    fn build_updater(
        &self,
        app_handle: &AppHandle,
        pubkey: Option<&str>,
    ) -> Result<Updater, String> {
        let endpoint = self.endpoint()?;
        let endpoint = Url::parse(endpoint)
            .map_err(|error| format!("Invalid update endpoint '{endpoint}': {error}"))?;
        let allow_downgrade = self.allow_downgrade;
        let target = self
            .strategy
            .manifest_target(&self.platform, manifest_arch(std::env::consts::ARCH));

        let mut builder = app_handle
            .updater_builder()
            .endpoints(vec![endpoint])
            .map_err(|error| format!("Failed to set update endpoint: {error}"))?
            .header("accept", UPDATE_ACCEPT_HEADER)
            .map_err(|error| format!("Failed to set update request header: {error}"))?
            .target(target)
            .version_comparator(move |current, release| {
                should_offer_release(&current, &release.version, allow_downgrade)
            });
        if let Some(pubkey) = pubkey {
            builder = builder.pubkey(pubkey);
        }

        builder
            .build()
            .map_err(|error| format!("Failed to initialize updater: {error}"))
    }
}

fn push_title(app_handle: &AppHandle, title: &str) {
    window_actions::set_main_window_title(app_handle, title, append_update_log);
}

fn is_current_session(app_handle: &AppHandle, session: &Arc<UpdateSession>) -> bool {
    app_handle
        .try_state::<AppSession>()
        .and_then(|state| state.update_session())
        .is_some_and(|current| Arc::ptr_eq(&current, session))
}

async fn run_update_check(app_handle: AppHandle, session: Arc<UpdateSession>) {
    // A replaced session keeps its phase but no longer owns the title.
    let report = |event: UpdateEvent| {
        session.report(event, append_update_log, |title| {
            if is_current_session(&app_handle, &session) {
                push_title(&app_handle, title);
            }
        })
    };

    report(UpdateEvent::CheckingForUpdate);

    let pubkey = app_handle
        .try_state::<AppSession>()
        .and_then(|state| state.config.updater_pubkey.clone());
    let updater = match session.build_updater(&app_handle, pubkey.as_deref()) {
        Ok(updater) => updater,
        Err(message) => {
            report(UpdateEvent::Error { message });
            return;
        }
    };

    let update = match updater.check().await {
        Ok(Some(update)) => update,
        Ok(None) => {
            report(UpdateEvent::UpdateNotAvailable);
            return;
        }
        Err(error) => {
            report(UpdateEvent::Error {
                message: format!("Failed to check for update: {error}"),
            });
            return;
        }
    };

    report(UpdateEvent::UpdateAvailable {
        version: update.version.clone(),
    });

    match update.download(|_, _| {}, || {}).await {
        Ok(bytes) => {
            session.store_pending_install(update, bytes);
            report(UpdateEvent::UpdateDownloaded);
        }
        Err(error) => {
            report(UpdateEvent::Error {
                message: format!("Failed to download update: {error}"),
            });
        }
    }
}

/// Only a session whose check finished without a download is replaced. A
/// session still checking or downloading keeps running, and a downloaded one
/// waits for exit.
pub(crate) fn should_start_new_check(existing: Option<&UpdatePhase>) -> bool {
    matches!(
        existing,
        None | Some(UpdatePhase::NoUpdate | UpdatePhase::Error { .. })
    )
}

/// Creates the update session for the current main window and fires one check.
pub(crate) fn start_for_main_window(app_handle: &AppHandle) {
    let Some(state) = app_handle.try_state::<AppSession>() else {
        append_update_log("update check skipped: application session missing");
        return;
    };

    if let Some(existing) = state.update_session() {
        if !should_start_new_check(Some(&existing.phase())) {
            if let Some(title) = existing.window_title() {
                push_title(app_handle, &title);
            }
            append_update_log(&format!(
                "keeping update session in phase {}",
                existing.phase().name()
            ));
            return;
        }
    }

    let app_version = app_handle.package_info().version.to_string();
    let log_path = crate::logging::desktop_log_path().display().to_string();
    let session = Arc::new(UpdateSession::new(
        state.platform.clone(),
        &app_version,
        &state.config.update_api_url,
        &log_path,
    ));
    match session.endpoint() {
        Ok(endpoint) => append_update_log(&format!(
            "update session created: strategy={} endpoint={endpoint}",
            session.strategy().installer_key()
        )),
        Err(error) => append_update_log(&format!("update endpoint unavailable: {error}")),
    }
    state.replace_update_session(session.clone());

    tauri::async_runtime::spawn(run_update_check(app_handle.clone(), session));
}

/// Installs a downloaded update while the application exits.
pub(crate) fn install_pending_update(app_handle: &AppHandle) {
    let Some(session) = app_handle
        .try_state::<AppSession>()
        .and_then(|state| state.update_session())
    else {
        return;
    };
    let Some(pending) = session.take_pending_install() else {
        return;
    };

    append_update_log(&format!(
        "installing update {} on exit",
        pending.update.version
    ));
    if let Err(error) = pending.update.install(&pending.bytes) {
        append_update_log(&format!("Failed to install update: {error}"));
    }
}
