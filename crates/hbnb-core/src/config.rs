//! Application configuration management.
//!
//! This module handles loading the client configuration: the
//! API endpoints, the pages to navigate to, and the token cookie policy.
//!
//! Configuration is stored at `~/.config/hbnb/config.json`. Endpoint URLs
//! can be overridden with `HBNB_API_URL`, `HBNB_LOGIN_URL` and
//! `HBNB_SIGNUP_URL`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::auth::CookiePolicy;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "hbnb";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/v1";

/// Request timeout in seconds. Submissions are never retried, so this only
/// bounds how long a single attempt may hang.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL; reviews are posted to `<api_url>/reviews`
    pub api_url: String,
    /// Login endpoint, defaults to `<api_url>/auth/login`
    pub login_url: Option<String>,
    /// Signup endpoint, defaults to `<api_url>/auth/register`
    pub signup_url: Option<String>,
    pub landing_page: String,
    pub login_page: String,
    pub cookie: CookiePolicy,
    /// Review forms on some pages require a rating, others don't
    pub require_rating: bool,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            login_url: None,
            signup_url: None,
            landing_page: "index.html".to_string(),
            login_page: "login.html".to_string(),
            cookie: CookiePolicy::default(),
            require_rating: true,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply `HBNB_*` overrides from `lookup`
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("HBNB_API_URL") {
            self.api_url = url;
        }
        if let Some(url) = lookup("HBNB_LOGIN_URL") {
            self.login_url = Some(url);
        }
        if let Some(url) = lookup("HBNB_SIGNUP_URL") {
            self.signup_url = Some(url);
        }
        self
    }

    fn base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn login_endpoint(&self) -> String {
        self.login_url
            .clone()
            .unwrap_or_else(|| format!("{}/auth/login", self.base()))
    }

    pub fn signup_endpoint(&self) -> String {
        self.signup_url
            .clone()
            .unwrap_or_else(|| format!("{}/auth/register", self.base()))
    }

    pub fn reviews_endpoint(&self) -> String {
        format!("{}/reviews", self.base())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}
