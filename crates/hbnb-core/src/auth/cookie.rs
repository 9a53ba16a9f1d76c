//! Document-cookie emulation.
//!
//! `CookieJar` behaves like `document.cookie`: writes take a full
//! `name=value; attr; attr` string, reads return `name=value` pairs joined
//! by `; `, and HttpOnly cookies are invisible to reads.

use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AuthToken, CredentialStore};

/// Default cookie name for the auth token
pub const TOKEN_COOKIE_NAME: &str = "token";

/// Expiry date written on logout; any date in the past removes the cookie.
const EXPIRED_DATE: &str = "Thu, 01 Jan 1970 00:00:01 GMT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes written with the token cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookiePolicy {
    pub name: String,
    pub path: String,
    pub secure: bool,
    pub same_site: SameSite,
    /// HttpOnly cookies cannot be read back by page scripts, which means
    /// review submissions will never find a token. Off by default.
    pub http_only: bool,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            name: TOKEN_COOKIE_NAME.to_string(),
            path: "/".to_string(),
            secure: true,
            same_site: SameSite::Strict,
            http_only: false,
        }
    }
}

impl CookiePolicy {
    /// Cookie string that stores `value`.
    ///
    /// Fails for values a cookie cannot carry unchanged: `;`, control
    /// characters, or leading/trailing whitespace.
    pub fn token_cookie(&self, value: &str) -> Result<String> {
        check_cookie_value(value)?;
        let mut cookie = format!("{}={}; path={}", self.name, value, self.path);
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str("; SameSite=");
        cookie.push_str(self.same_site.as_str());
        Ok(cookie)
    }

    /// Cookie string that removes the token
    pub fn expired_cookie(&self) -> String {
        format!("{}=; path={}; expires={};", self.name, self.path, EXPIRED_DATE)
    }
}

#[derive(Debug, Clone)]
struct StoredCookie {
    value: String,
    http_only: bool,
}

/// In-memory cookie jar holding the auth token.
pub struct CookieJar {
    policy: CookiePolicy,
    cookies: Mutex<BTreeMap<String, StoredCookie>>,
}

impl CookieJar {
    pub fn new(policy: CookiePolicy) -> Self {
        Self {
            policy,
            cookies: Mutex::new(BTreeMap::new()),
        }
    }

    /// Apply a cookie assignment, as `document.cookie = cookie` would
    pub fn write(&self, cookie: &str) -> Result<()> {
        let mut parts = cookie.split(';');
        let pair = parts.next().unwrap_or_default().trim();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Malformed cookie: missing '=' in {:?}", pair))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("Malformed cookie: empty name"));
        }

        let mut http_only = false;
        let mut expired = false;
        for attr in parts.map(str::trim).filter(|a| !a.is_empty()) {
            let (key, val) = attr.split_once('=').unwrap_or((attr, ""));
            match key.trim().to_ascii_lowercase().as_str() {
                "httponly" => http_only = true,
                "expires" => expired = is_past(val.trim()),
                "max-age" => expired = val.trim().parse::<i64>().map(|s| s <= 0).unwrap_or(false),
                _ => {}
            }
        }

        let mut cookies = self.cookies.lock().unwrap_or_else(|e| e.into_inner());
        if expired {
            debug!(name = name, "Cookie expired, removing");
            cookies.remove(name);
        } else {
            cookies.insert(
                name.to_string(),
                StoredCookie {
                    value: value.trim().to_string(),
                    http_only,
                },
            );
        }
        Ok(())
    }

    /// Script-visible view: `name=value` pairs joined by `; `
    pub fn document_cookie(&self) -> String {
        let cookies = self.cookies.lock().unwrap_or_else(|e| e.into_inner());
        cookies
            .iter()
            .filter(|(_, c)| !c.http_only)
            .map(|(name, c)| format!("{}={}", name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new(CookiePolicy::default())
    }
}

impl CredentialStore for CookieJar {
    fn get(&self) -> Result<Option<AuthToken>> {
        let prefix = format!("{}=", self.policy.name);
        let token = self
            .document_cookie()
            .split(';')
            .map(str::trim)
            .find_map(|c| c.strip_prefix(prefix.as_str()).map(str::to_string))
            .filter(|v| !v.is_empty())
            .map(AuthToken::new);
        Ok(token)
    }

    fn set(&self, token: &AuthToken) -> Result<()> {
        self.write(&self.policy.token_cookie(token.as_str())?)
    }

    fn clear(&self) -> Result<()> {
        self.write(&self.policy.expired_cookie())
    }
}

fn check_cookie_value(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(anyhow!("Cookie value is empty"));
    }
    if value.trim() != value {
        return Err(anyhow!("Cookie value has leading or trailing whitespace"));
    }
    if value.chars().any(|c| c == ';' || c.is_control()) {
        return Err(anyhow!("Cookie value contains ';' or a control character"));
    }
    Ok(())
}

fn is_past(date: &str) -> bool {
    DateTime::parse_from_rfc2822(date)
        .map(|d| d.with_timezone(&Utc) <= Utc::now())
        .unwrap_or(false)
}
