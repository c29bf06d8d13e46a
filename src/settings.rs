//! Runtime configuration
//!
//! Native builds read environment variables, falling back to defaults.
//! The browser build always uses defaults.

use std::path::PathBuf;

use crate::consts::DEFAULT_API_BASE_URL;

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// REST API base URL (no trailing `/comments` or `/users`)
    pub api_base_url: String,
    /// Where the native front end keeps table state between runs
    pub state_file: PathBuf,
    /// HTTP timeout for the native client
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            state_file: PathBuf::from(".datagrid-navigator.json"),
            timeout_secs: 10,
        }
    }
}

impl Settings {
    const API_URL_VAR: &'static str = "DATAGRID_API_URL";
    const STATE_FILE_VAR: &'static str = "DATAGRID_STATE_FILE";
    const TIMEOUT_VAR: &'static str = "DATAGRID_TIMEOUT_SECS";

    /// Load settings from the environment (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    /// Build settings from any variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_base_url = lookup(Self::API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                log::debug!("{} not set, using default: {}", Self::API_URL_VAR, defaults.api_base_url);
                defaults.api_base_url.clone()
            });

        let state_file = lookup(Self::STATE_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                log::debug!(
                    "{} not set, using default: {}",
                    Self::STATE_FILE_VAR,
                    defaults.state_file.display()
                );
                defaults.state_file.clone()
            });

        let timeout_secs = match lookup(Self::TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    log::warn!("Invalid {} value {:?}, using default", Self::TIMEOUT_VAR, raw);
                    defaults.timeout_secs
                }
            },
            None => defaults.timeout_secs,
        };

        Self {
            api_base_url,
            state_file,
            timeout_secs,
        }
    }
}
