use anyhow::{Context, Result};
use keyring::Entry;

use super::{AuthToken, CredentialStore};

const SERVICE_NAME: &str = "hbnb";

/// Token kept in the OS keychain, keyed by account name.
pub struct KeychainStore {
    entry: Entry,
}

impl KeychainStore {
    pub fn new(account: &str) -> Result<Self> {
        let entry = Entry::new(SERVICE_NAME, account).context("Failed to create keyring entry")?;
        Ok(Self { entry })
    }
}

impl CredentialStore for KeychainStore {
    fn get(&self) -> Result<Option<AuthToken>> {
        match self.entry.get_password() {
            Ok(value) if !value.is_empty() => Ok(Some(AuthToken::new(value))),
            Ok(_) | Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve token from keychain"),
        }
    }

    fn set(&self, token: &AuthToken) -> Result<()> {
        self.entry
            .set_password(token.as_str())
            .context("Failed to store token in keychain")
    }

    fn clear(&self) -> Result<()> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_store() -> KeychainStore {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        KeychainStore::new("test-account").expect("mock keyring entry")
    }

    #[test]
    fn test_absent_entry_reads_as_no_token() {
        let store = mock_store();
        assert_eq!(store.get().unwrap(), None);
        // Clearing an absent entry is not an error
        store.clear().unwrap();
    }

    #[test]
    fn test_set_get_clear() {
        let store = mock_store();

        store.set(&AuthToken::new("T")).unwrap();
        assert_eq!(store.get().unwrap(), Some(AuthToken::new("T")));

        store.set(&AuthToken::new("T2")).unwrap();
        assert_eq!(store.get().unwrap(), Some(AuthToken::new("T2")));

        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
        store.clear().unwrap();
    }
}
