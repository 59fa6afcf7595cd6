use std::{env, path::PathBuf};

use crate::{
    DEBUG_PROD_ENV, DEFAULT_UPDATE_API_URL, LOG_DIR_ENV, NODE_ENV_ENV, START_MINIMIZED_ENV,
    UPDATER_PUBKEY_ENV, UPDATE_API_URL_ENV, UPGRADE_EXTENSIONS_ENV,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildEnvironment {
    Production,
    Development,
    Unspecified,
}

impl BuildEnvironment {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("production") => Self::Production,
            Some("development") => Self::Development,
            _ => Self::Unspecified,
        }
    }
}

/// Startup settings read once from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub environment: BuildEnvironment,
    pub debug_prod: bool,
    pub start_minimized: bool,
    pub upgrade_extensions: bool,
    pub update_api_url: String,
    pub updater_pubkey: Option<String>,
    pub log_dir: Option<PathBuf>,
}

/// Set means present and non-empty; whitespace counts as a value.
fn is_set(value: Option<String>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            environment: BuildEnvironment::parse(lookup(NODE_ENV_ENV).as_deref()),
            debug_prod: lookup(DEBUG_PROD_ENV).is_some_and(|value| value == "true"),
            start_minimized: is_set(lookup(START_MINIMIZED_ENV)),
            upgrade_extensions: is_set(lookup(UPGRADE_EXTENSIONS_ENV)),
            update_api_url: non_empty(lookup(UPDATE_API_URL_ENV))
                .unwrap_or_else(|| DEFAULT_UPDATE_API_URL.to_string()),
            updater_pubkey: non_empty(lookup(UPDATER_PUBKEY_ENV)),
            log_dir: non_empty(lookup(LOG_DIR_ENV)).map(PathBuf::from),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == BuildEnvironment::Production
    }

    pub fn debug_tooling_enabled(&self) -> bool {
        self.environment == BuildEnvironment::Development || self.debug_prod
    }
}
