//! Authentication token storage.
//!
//! This module provides:
//! - `AuthToken`: the opaque credential issued by the login endpoint
//! - `CredentialStore`: the get/set/clear seam the form controller uses
//! - `CookieJar`: document-cookie emulation with an explicit cookie policy
//! - `TokenFile`: token persisted to the cache directory between runs
//! - `KeychainStore`: token kept in the OS keychain via keyring
//!
//! Stores are replaced wholesale on every write, never merged.

pub mod cookie;
pub mod keychain;
pub mod token;
pub mod token_file;

pub use cookie::{CookieJar, CookiePolicy, SameSite};
pub use keychain::KeychainStore;
pub use token::{AuthToken, CredentialStore};
pub use token_file::TokenFile;
