// crates/dinedb-core/src/config.rs
//! Layered settings: defaults, then `dinedb.toml`, then `DINEDB_*` variables.
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `DINEDB_GEOCODE__TGOS_APP_ID` or `DINEDB_DATA__ECO_FRIENDLY`.

use crate::error::Result;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "dinedb.toml";
pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const TGOS_LOCATE_ENDPOINT: &str = "https://addr.tgos.tw/addrws/v40/QueryAddr.asmx/QueryAddr";
pub const TGOS_DATA_ENDPOINT: &str = "https://data.tgos.tw/MOIDataThemeAPIMgr";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataPaths,
    pub geocode: GeocodeSettings,
}

/// Source files. Any of them may be absent; absent datasets load empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub eco_friendly: Option<PathBuf>,
    pub safety: Option<PathBuf>,
    pub ingredients: Option<PathBuf>,
    pub gazetteer: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeSettings {
    /// Primary provider is only attempted when both are set.
    pub tgos_app_id: Option<String>,
    pub tgos_api_key: Option<String>,
    /// Key for the TGOS open-data theme API (town lookup, nearby restaurants).
    pub tgos_data_api_key: Option<String>,
    pub nominatim_endpoint: String,
    pub tgos_locate_endpoint: String,
    pub tgos_data_endpoint: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
    /// `None` keeps every result for the life of the process.
    pub cache_max_entries: Option<usize>,
}

impl Default for GeocodeSettings {
    fn default() -> Self {
        Self {
            tgos_app_id: None,
            tgos_api_key: None,
            tgos_data_api_key: None,
            nominatim_endpoint: NOMINATIM_ENDPOINT.to_string(),
            tgos_locate_endpoint: TGOS_LOCATE_ENDPOINT.to_string(),
            tgos_data_endpoint: TGOS_DATA_ENDPOINT.to_string(),
            request_timeout_secs: 10,
            user_agent: concat!("dinedb/", env!("CARGO_PKG_VERSION")).to_string(),
            accept_language: "zh-TW".to_string(),
            cache_max_entries: None,
        }
    }
}

impl GeocodeSettings {
    /// Both TGOS credentials, trimmed, when configured and non-empty.
    pub fn tgos_credentials(&self) -> Option<(&str, &str)> {
        let app = self.tgos_app_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let key = self.tgos_api_key.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((app, key))
    }
}

impl Settings {
    /// Loads `dinedb.toml` from the working directory plus the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let settings = Self::figment(path.as_ref()).extract()?;
        Ok(settings)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("DINEDB_").split("__"))
    }
}
