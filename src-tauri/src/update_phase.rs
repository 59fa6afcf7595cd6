use serde::Serialize;

/// Observable stage of a single update check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "kebab-case")]
pub enum UpdatePhase {
    #[default]
    Idle,
    Checking,
    NoUpdate,
    Available { version: String },
    Downloaded { version: String },
    Error { message: String },
}

/// Events reported by the updater while a check runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateEvent {
    CheckingForUpdate,
    UpdateAvailable { version: String },
    UpdateNotAvailable,
    UpdateDownloaded,
    Error { message: String },
}

impl UpdateEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CheckingForUpdate => "checking-for-update",
            Self::UpdateAvailable { .. } => "update-available",
            Self::UpdateNotAvailable => "update-not-available",
            Self::UpdateDownloaded => "update-downloaded",
            Self::Error { .. } => "error",
        }
    }
}

impl UpdatePhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Checking => "checking",
            Self::NoUpdate => "no-update",
            Self::Available { .. } => "available",
            Self::Downloaded { .. } => "downloaded",
            Self::Error { .. } => "error",
        }
    }

    /// Error and downloaded end the session; no-update ends the current cycle.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::NoUpdate | Self::Downloaded { .. } | Self::Error { .. }
        )
    }

    /// Returns the next phase, or `None` when the event does not apply to the
    /// current phase and should be ignored.
    pub fn apply(&self, event: UpdateEvent) -> Option<UpdatePhase> {
        match (self, event) {
            (_, UpdateEvent::Error { message }) => Some(Self::Error { message }),
            (Self::Idle, UpdateEvent::CheckingForUpdate) => Some(Self::Checking),
            (Self::Checking, UpdateEvent::UpdateNotAvailable) => Some(Self::NoUpdate),
            (Self::Checking, UpdateEvent::UpdateAvailable { version }) => {
                Some(Self::Available { version })
            }
            (Self::Available { version }, UpdateEvent::UpdateDownloaded) => {
                Some(Self::Downloaded {
                    version: version.clone(),
                })
            }
            _ => None,
        }
    }

    /// Window title for this phase. `Idle` leaves the initial title alone.
    pub fn window_title(&self, app_version: &str, log_path: &str) -> Option<String> {
        match self {
            Self::Idle => None,
            Self::Checking => Some("Checking for update".to_string()),
            Self::Available { version } => Some(format!("Version: {version} is available")),
            Self::NoUpdate => Some(format!("{app_version}: Up to date.")),
            Self::Downloaded { .. } => Some(format!(
                "{app_version}: Update downloaded, Restart to install"
            )),
            Self::Error { .. } => Some(format!(
                "{app_version}: Update error check logfile: {log_path}"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available(version: &str) -> UpdatePhase {
        UpdatePhase::Available {
            version: version.to_string(),
        }
    }

    fn error_event(message: &str) -> UpdateEvent {
        UpdateEvent::Error {
            message: message.to_string(),
        }
    }

    #[test]
    fn happy_path_reaches_downloaded() {
        let checking = UpdatePhase::Idle
            .apply(UpdateEvent::CheckingForUpdate)
            .expect("idle should start checking");
        assert_eq!(checking, UpdatePhase::Checking);

        let found = checking
            .apply(UpdateEvent::UpdateAvailable {
                version: "2.0.0".to_string(),
            })
            .expect("checking should accept an available update");
        assert_eq!(found, available("2.0.0"));

        let downloaded = found
            .apply(UpdateEvent::UpdateDownloaded)
            .expect("available should accept download completion");
        assert_eq!(
            downloaded,
            UpdatePhase::Downloaded {
                version: "2.0.0".to_string()
            }
        );
        assert!(downloaded.is_terminal());
    }

    #[test]
    fn checking_can_end_without_update() {
        let phase = UpdatePhase::Checking
            .apply(UpdateEvent::UpdateNotAvailable)
            .expect("checking should accept no-update");
        assert_eq!(phase, UpdatePhase::NoUpdate);
        assert!(phase.is_terminal());
    }

    #[test]
    fn error_is_reachable_from_every_phase() {
        let phases = [
            UpdatePhase::Idle,
            UpdatePhase::Checking,
            UpdatePhase::NoUpdate,
            available("1.0.0"),
            UpdatePhase::Downloaded {
                version: "1.0.0".to_string(),
            },
            UpdatePhase::Error {
                message: "earlier".to_string(),
            },
        ];
        for phase in phases {
            assert_eq!(
                phase.apply(error_event("boom")),
                Some(UpdatePhase::Error {
                    message: "boom".to_string()
                }),
                "error should apply from {}",
                phase.name()
            );
        }
    }

    #[test]
    fn out_of_order_events_are_ignored() {
        assert_eq!(UpdatePhase::Idle.apply(UpdateEvent::UpdateDownloaded), None);
        assert_eq!(
            UpdatePhase::Idle.apply(UpdateEvent::UpdateAvailable {
                version: "2.0.0".to_string()
            }),
            None
        );
        assert_eq!(UpdatePhase::NoUpdate.apply(UpdateEvent::UpdateDownloaded), None);
        assert_eq!(UpdatePhase::Checking.apply(UpdateEvent::CheckingForUpdate), None);
        assert_eq!(available("2.0.0").apply(UpdateEvent::UpdateNotAvailable), None);
    }

    #[test]
    fn available_title_names_the_new_version() {
        assert_eq!(
            available("2.0.0").window_title("1.0.0", "/tmp/main.log"),
            Some("Version: 2.0.0 is available".to_string())
        );
    }

    #[test]
    fn error_title_points_at_the_log_file() {
        let title = UpdatePhase::Error {
            message: "network down".to_string(),
        }
        .window_title("1.0.0", "/tmp/main.log")
        .expect("error phase should set a title");
        assert!(title.contains("Update error check logfile:"));
        assert_eq!(title, "1.0.0: Update error check logfile: /tmp/main.log");
    }

    #[test]
    fn remaining_titles_match_lifecycle_copy() {
        assert_eq!(UpdatePhase::Idle.window_title("1.0.0", "log"), None);
        assert_eq!(
            UpdatePhase::Checking.window_title("1.0.0", "log").as_deref(),
            Some("Checking for update")
        );
        assert_eq!(
            UpdatePhase::NoUpdate.window_title("1.0.0", "log").as_deref(),
            Some("1.0.0: Up to date.")
        );
        assert_eq!(
            UpdatePhase::Downloaded {
                version: "2.0.0".to_string()
            }
            .window_title("1.0.0", "log")
            .as_deref(),
            Some("1.0.0: Update downloaded, Restart to install")
        );
    }

    #[test]
    fn phase_serializes_with_kebab_case_tag() {
        let value = serde_json::to_value(available("2.0.0")).expect("phase should serialize");
        assert_eq!(value["phase"], "available");
        assert_eq!(value["version"], "2.0.0");

        let value = serde_json::to_value(UpdatePhase::NoUpdate).expect("phase should serialize");
        assert_eq!(value["phase"], "no-update");
    }
}
