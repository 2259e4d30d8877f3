//! # API Shared
//!
//! Wire types for the oncology records REST API.
//!
//! Contains:
//! - Request/response bodies for patient listing, detail, partial update and bulk delete
//! - Bulk import (CSV / FHIR Bundle) results
//! - Authentication payloads and the explicit [`Session`] context object
//!
//! Used by `ctomop-client` and the CLI so the JSON shapes live in one place.

pub mod auth;
pub mod import;
pub mod patient;

pub use auth::{CurrentUserRes, ErrorRes, LoginReq, LoginRes, Session, User};
pub use import::{ImportKind, ImportRes};
pub use patient::{
    display_name_for, BulkDeleteReq, BulkDeleteRes, PatientDetailRes, PatientSummary,
    UpdateNameReq,
};
