use serde::{Deserialize, Serialize};

/// Which bulk import endpoint a file goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportKind {
    Csv,
    FhirBundle,
}

impl ImportKind {
    /// Endpoint path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            ImportKind::Csv => "/patient-info/upload_csv/",
            ImportKind::FhirBundle => "/patient-info/upload_fhir/",
        }
    }

    /// File extension the upload form accepts.
    pub fn extension(self) -> &'static str {
        match self {
            ImportKind::Csv => "csv",
            ImportKind::FhirBundle => "json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImportKind::Csv => "text/csv",
            ImportKind::FhirBundle => "application/fhir+json",
        }
    }
}

/// Result of a bulk import. Imports are not atomic: rows that parsed are persisted even when
/// others failed, so `errors` may be non-empty alongside a positive `created_count`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRes {
    #[serde(default)]
    pub created_count: u64,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ImportRes {
    pub fn is_partial(&self) -> bool {
        self.created_count > 0 && !self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
