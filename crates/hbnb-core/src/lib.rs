//! Core library for the HBnB places site front end.
//!
//! This crate holds everything that does not depend on a concrete page:
//!
//! - `api`: the HTTP transport used to reach the login and review endpoints
//! - `auth`: the auth token and the credential stores it lives in
//! - `forms`: form identifiers and the field sources submissions read from
//! - `controller`: the `FormSubmissionController` that ties them together
//! - `listing`: place cards and client-side price filtering
//! - `config`: endpoint and cookie policy configuration
//!
//! Front ends supply a `Presenter` for notifications and navigation.

pub mod api;
pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod forms;
pub mod listing;
pub mod models;

pub use api::{ApiClient, ApiError, HttpReply, Transport};
pub use auth::{AuthToken, CookieJar, CookiePolicy, CredentialStore, KeychainStore, TokenFile};
pub use config::Config;
pub use controller::{FormSubmissionController, Presenter};
pub use error::FormError;
pub use forms::{FieldMap, FormFieldSource, FormId};
pub use listing::{filter_by_max_price, parse_price_filter, PlaceCard};
pub use models::{Credentials, ReviewSubmission};
