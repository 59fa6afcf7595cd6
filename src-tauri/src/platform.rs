use std::fmt;

/// Operating system family the update server distinguishes between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Other(String),
}

impl Platform {
    /// Accepts both the update server's identifiers (`win32`, `darwin`) and
    /// Rust's `std::env::consts::OS` names (`windows`, `macos`).
    pub fn from_identifier(raw: &str) -> Self {
        match raw.trim() {
            "win32" | "windows" => Self::Windows,
            "darwin" | "macos" => Self::MacOs,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn current() -> Self {
        Self::from_identifier(std::env::consts::OS)
    }

    /// Identifier used in update endpoint paths.
    pub fn identifier(&self) -> &str {
        match self {
            Self::Windows => "win32",
            Self::MacOs => "darwin",
            Self::Other(name) => name,
        }
    }

    /// OS segment of the updater manifest target key.
    pub fn manifest_os(&self) -> &str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "darwin",
            Self::Other(name) => name,
        }
    }

    pub fn update_strategy(&self) -> UpdateStrategy {
        match self {
            Self::Windows => UpdateStrategy::NsisInstaller,
            Self::MacOs => UpdateStrategy::AppBundle,
            Self::Other(_) => UpdateStrategy::AppImage,
        }
    }

    /// macOS keeps the process alive after the last window closes.
    pub fn keeps_running_without_windows(&self) -> bool {
        matches!(self, Self::MacOs)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Architecture names as they appear in updater manifest keys.
pub fn manifest_arch(rust_arch: &str) -> &str {
    match rust_arch {
        "x86" => "i686",
        "arm" => "armv7",
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateStrategy {
    NsisInstaller,
    AppBundle,
    AppImage,
}

impl UpdateStrategy {
    pub fn installer_key(self) -> &'static str {
        match self {
            Self::NsisInstaller => "nsis",
            Self::AppBundle => "app",
            Self::AppImage => "appimage",
        }
    }

    /// Release manifest key, e.g. `windows-x86_64-nsis`.
    pub fn manifest_target(self, platform: &Platform, arch: &str) -> String {
        format!("{}-{}-{}", platform.manifest_os(), arch, self.installer_key())
    }
}
