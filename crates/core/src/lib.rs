//! # ctOMOP Core
//!
//! Domain logic for the ctOMOP patient record editor.
//!
//! This crate contains pure data operations with no I/O:
//! - Disease classification into a closed set of clinical categories
//! - Field groups per category and per editor tab
//! - Therapy regimen and genetic mutation vocabularies
//! - Derived fields (age, triple-negative status)
//! - The flat patient record and the edit session over it
//!
//! **No API concerns**: HTTP, authentication and configuration belong in `ctomop-client`;
//! wire types shared with the server live in `api-shared`.

pub mod constants;
pub mod derived;
pub mod disease;
pub mod editor;
pub mod error;
pub mod fields;
pub mod mutation;
pub mod record;
pub mod therapy;
pub mod validation;

pub use derived::{
    age_today, apply_tnbc, compute_age, compute_age_from_str, compute_tnbc, parse_date,
};
pub use disease::{classify_disease, ClinicalCategory};
pub use editor::{split_name, MutationField, RecordEditor};
pub use error::{RecordError, RecordResult};
pub use fields::{
    disease_field_groups, lookup_field, tab_groups, ControlType, EditorTab, FieldGroup, FieldSpec,
};
pub use mutation::{gene_option, mutation_options, on_gene_change, MutationEntry};
pub use record::{FieldValue, PatientRecord};
pub use therapy::{therapy_display_options, therapy_vocabulary, TherapyLine};
pub use validation::{validate_upload_file, validate_zip_code};
