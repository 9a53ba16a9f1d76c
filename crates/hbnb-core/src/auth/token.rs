use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Opaque bearer credential issued by the login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct AuthToken {
    pub value: String,
}

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Show only a prefix so tokens don't end up in logs
        let prefix: String = self.value.chars().take(4).collect();
        write!(f, "AuthToken({}…)", prefix)
    }
}

/// Where the auth token lives between submissions.
///
/// `get` returns `Ok(None)` when no token is stored.
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Result<Option<AuthToken>>;

    fn set(&self, token: &AuthToken) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_token() {
        let token = AuthToken::new("abcdefghijkl");
        let shown = format!("{:?}", token);
        assert!(shown.starts_with("AuthToken(abcd"));
        assert!(!shown.contains("efgh"));
    }
}
