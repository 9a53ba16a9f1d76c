use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AuthToken, CookieJar, CookiePolicy, CredentialStore};

/// Token file name in cache directory
const TOKEN_FILE: &str = "token.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    /// Cookie string as rendered by the store's `CookiePolicy`
    pub cookie: String,
    pub created_at: DateTime<Utc>,
}

impl StoredToken {
    /// Minutes since the token was stored (for display)
    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.created_at).num_minutes().max(0)
    }
}

/// Token cookie persisted as JSON in the cache directory.
///
/// This is the cookie jar of the terminal front end: it keeps the login
/// across invocations until `clear` is called. The cookie is written and
/// read back under the configured `CookiePolicy`, so an HttpOnly policy
/// makes the token unreadable here just as it would be on the page.
pub struct TokenFile {
    cache_dir: PathBuf,
    policy: CookiePolicy,
    // Serializes read-modify-write of the file within this process
    lock: Mutex<()>,
}

impl TokenFile {
    pub fn new(cache_dir: PathBuf, policy: CookiePolicy) -> Self {
        Self {
            cache_dir,
            policy,
            lock: Mutex::new(()),
        }
    }

    /// Load the stored token with its metadata
    pub fn load(&self) -> Result<Option<StoredToken>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let path = self.token_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read token file")?;
        let stored: StoredToken =
            serde_json::from_str(&contents).context("Failed to parse token file")?;
        Ok(Some(stored))
    }

    fn token_path(&self) -> PathBuf {
        self.cache_dir.join(TOKEN_FILE)
    }
}

impl CredentialStore for TokenFile {
    fn get(&self) -> Result<Option<AuthToken>> {
        let Some(stored) = self.load()? else {
            return Ok(None);
        };
        let jar = CookieJar::new(self.policy.clone());
        jar.write(&stored.cookie)
            .context("Failed to parse stored token cookie")?;
        jar.get()
    }

    fn set(&self, token: &AuthToken) -> Result<()> {
        let stored = StoredToken {
            cookie: self.policy.token_cookie(token.as_str())?,
            created_at: Utc::now(),
        };

        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let path = self.token_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create cache directory")?;
        }
        let contents = serde_json::to_string_pretty(&stored)?;
        std::fs::write(&path, contents).context("Failed to write token file")?;
        debug!(path = %path.display(), "Token saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let path = self.token_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove token file")?;
        }
        Ok(())
    }
}
