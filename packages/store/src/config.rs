//! # Client configuration — `moviel.toml`
//!
//! Tunables for the single-page app, read from a TOML file bundled with the
//! web build. Every field has a default, so a missing or empty file equals
//! [`AppConfig::default`].
//!
//! ```toml
//! [api]
//! base_url = "/api"          # REST backend prefix
//! cache_ttl_secs = 60        # 0 disables the request cache
//!
//! [session]
//! ttl_hours = 24
//!
//! [catalog]
//! admin_page_size = 10
//! reviews_step = 3
//! similar_limit = 4
//! search_page_size = 20
//!
//! [player]
//! idle_hide_secs = 3
//! seek_step_secs = 10
//!
//! [download]
//! tick_ms = 500
//! step_percent = 10
//! complete_after_ms = 5000
//! ```

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Seconds a cached GET response stays fresh. 0 disables caching.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u32,
}

fn default_base_url() -> String {
    "/api".to_string()
}

fn default_cache_ttl() -> u32 {
    60
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u32,
}

fn default_ttl_hours() -> u32 {
    24
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_admin_page_size")]
    pub admin_page_size: usize,
    #[serde(default = "default_reviews_step")]
    pub reviews_step: usize,
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,
}

fn default_admin_page_size() -> usize {
    10
}

fn default_reviews_step() -> usize {
    3
}

fn default_similar_limit() -> usize {
    4
}

fn default_search_page_size() -> u32 {
    20
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            admin_page_size: default_admin_page_size(),
            reviews_step: default_reviews_step(),
            similar_limit: default_similar_limit(),
            search_page_size: default_search_page_size(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_idle_hide")]
    pub idle_hide_secs: u32,
    #[serde(default = "default_seek_step")]
    pub seek_step_secs: u32,
}

fn default_idle_hide() -> u32 {
    3
}

fn default_seek_step() -> u32 {
    10
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            idle_hide_secs: default_idle_hide(),
            seek_step_secs: default_seek_step(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DownloadConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u32,
    #[serde(default = "default_step_percent")]
    pub step_percent: u8,
    #[serde(default = "default_complete_after")]
    pub complete_after_ms: u32,
}

fn default_tick_ms() -> u32 {
    500
}

fn default_step_percent() -> u8 {
    10
}

fn default_complete_after() -> u32 {
    5000
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            step_percent: default_step_percent(),
            complete_after_ms: default_complete_after(),
        }
    }
}

impl AppConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "moviel.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Session lifetime in milliseconds.
    pub fn session_ttl_ms(&self) -> i64 {
        i64::from(self.session.ttl_hours) * 60 * 60 * 1000
    }
}
