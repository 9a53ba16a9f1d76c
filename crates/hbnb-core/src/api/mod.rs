//! HTTP transport for the HBnB API.
//!
//! This module provides the `Transport` seam the form controller talks
//! through, and `ApiClient`, its reqwest implementation. Every call is a
//! single JSON POST; there are no retries at this layer.
//!
//! Review submissions authenticate with a bearer token obtained from the
//! login endpoint.

pub mod client;
pub mod error;

pub use client::{ApiClient, HttpReply, Transport};
pub use error::ApiError;
