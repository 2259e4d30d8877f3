//! Input validation utilities.
//!
//! Checks applied to user input before it reaches the network: postal codes before a place
//! lookup, and upload paths before a bulk import.

use std::path::Path;

use ctomop_types::ZipCode;

use crate::{RecordError, RecordResult};

/// Validates a US postal code for place lookup.
///
/// # Arguments
///
/// * `zip` - Raw postal code as typed. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `RecordError::InvalidInput` unless the code is exactly five ASCII digits.
pub fn validate_zip_code(zip: &str) -> RecordResult<ZipCode> {
    ZipCode::parse(zip).map_err(|e| RecordError::InvalidInput(e.to_string()))
}

/// Validates that an upload path carries the extension the importer expects.
///
/// The comparison is case-insensitive, so `PATIENTS.CSV` is accepted for `csv`.
///
/// # Errors
///
/// Returns `RecordError::InvalidInput` with a "Please select a CSV file" style message when
/// the extension is missing or different.
pub fn validate_upload_file(path: &Path, extension: &str) -> RecordResult<()> {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

    if !matches {
        return Err(RecordError::InvalidInput(format!(
            "Please select a {} file",
            extension.to_ascii_uppercase()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_zip_code_valid() {
        assert_eq!(validate_zip_code("02139").expect("valid").as_str(), "02139");
        assert_eq!(validate_zip_code(" 94110 ").expect("valid").as_str(), "94110");
    }

    #[test]
    fn test_validate_zip_code_invalid() {
        for zip in ["", "1234", "123456", "12a45", "12345-6789", "１２３４５"] {
            let err = validate_zip_code(zip).expect_err(zip);
            assert!(matches!(err, RecordError::InvalidInput(_)), "{zip}");
        }
    }

    #[test]
    fn test_validate_upload_file_csv() {
        assert!(validate_upload_file(&PathBuf::from("patients.csv"), "csv").is_ok());
        assert!(validate_upload_file(&PathBuf::from("/tmp/PATIENTS.CSV"), "csv").is_ok());

        let err = validate_upload_file(&PathBuf::from("patients.xlsx"), "csv").expect_err("xlsx");
        match err {
            RecordError::InvalidInput(msg) => assert_eq!(msg, "Please select a CSV file"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_upload_file_json() {
        assert!(validate_upload_file(&PathBuf::from("bundle.json"), "json").is_ok());

        let err = validate_upload_file(&PathBuf::from("bundle"), "json").expect_err("no extension");
        match err {
            RecordError::InvalidInput(msg) => assert_eq!(msg, "Please select a JSON file"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
