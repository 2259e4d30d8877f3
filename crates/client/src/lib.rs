//! # ctOMOP Client
//!
//! Async client for the ctOMOP records API and the postal-code lookup service.
//!
//! - [`ClientConfig`]: startup configuration from YAML and environment
//! - [`ApiClient`]: typed REST calls over a cookie-authenticated session
//! - [`PatientService`]: load a record into a [`ctomop_core::RecordEditor`] and save edits back

pub mod api;
pub mod config;
pub mod error;
pub mod service;
pub mod zip;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigFile};
pub use error::{ClientError, ClientResult};
pub use service::{PatientService, SaveOutcome};
pub use zip::{Place, ZipLookup};
