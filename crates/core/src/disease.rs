//! Disease classification.
//!
//! The disease label on a record is free text (or one of [`DISEASE_OPTIONS`]), so the editor
//! reduces it to a closed [`ClinicalCategory`] before choosing field groups or therapy lists.
//! The category is never stored; it is recomputed from the label on every read.
//!
//! [`DISEASE_OPTIONS`]: crate::constants::DISEASE_OPTIONS

use serde::{Deserialize, Serialize};

/// Clinical category that drives disease-specific fields and therapy vocabularies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicalCategory {
    Breast,
    Lymphoma,
    Myeloma,
    Other,
}

impl ClinicalCategory {
    /// Every category, in classification order.
    pub const ALL: [ClinicalCategory; 4] = [
        ClinicalCategory::Breast,
        ClinicalCategory::Lymphoma,
        ClinicalCategory::Myeloma,
        ClinicalCategory::Other,
    ];

    /// Classifies a disease label.
    ///
    /// Case-insensitive substring match, checked in the fixed order breast, lymphoma,
    /// myeloma; the first hit wins. Empty or absent labels are [`ClinicalCategory::Other`].
    pub fn classify(disease: Option<&str>) -> Self {
        let disease = disease.unwrap_or_default().to_lowercase();
        if disease.contains("breast") {
            ClinicalCategory::Breast
        } else if disease.contains("lymphoma") {
            ClinicalCategory::Lymphoma
        } else if disease.contains("myeloma") {
            ClinicalCategory::Myeloma
        } else {
            ClinicalCategory::Other
        }
    }

    /// Caption of the disease-specific editor tab.
    pub fn tab_label(self) -> &'static str {
        match self {
            ClinicalCategory::Breast => "Breast Cancer",
            ClinicalCategory::Lymphoma => "Follicular Lymphoma",
            ClinicalCategory::Myeloma => "Multiple Myeloma",
            ClinicalCategory::Other => "Disease Specific",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClinicalCategory::Breast => "breast",
            ClinicalCategory::Lymphoma => "lymphoma",
            ClinicalCategory::Myeloma => "myeloma",
            ClinicalCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for ClinicalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`ClinicalCategory::classify`].
pub fn classify_disease(disease: Option<&str>) -> ClinicalCategory {
    ClinicalCategory::classify(disease)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DISEASE_OPTIONS;

    #[test]
    fn test_classify_matches_any_casing_and_surrounding_text() {
        for label in ["Breast Cancer", "BREAST", "metastatic breast carcinoma", "Inflammatory bReAsT ca"] {
            assert_eq!(classify_disease(Some(label)), ClinicalCategory::Breast, "{label}");
        }
        for label in ["Follicular Lymphoma", "lymphoma", "Diffuse large B-cell LYMPHOMA"] {
            assert_eq!(classify_disease(Some(label)), ClinicalCategory::Lymphoma, "{label}");
        }
        for label in ["Multiple Myeloma", "smouldering myeloma", "MYELOMA"] {
            assert_eq!(classify_disease(Some(label)), ClinicalCategory::Myeloma, "{label}");
        }
    }

    #[test]
    fn test_classify_falls_back_to_other() {
        assert_eq!(classify_disease(None), ClinicalCategory::Other);
        assert_eq!(classify_disease(Some("")), ClinicalCategory::Other);
        assert_eq!(classify_disease(Some("Lung Cancer")), ClinicalCategory::Other);
        assert_eq!(classify_disease(Some("Colon Cancer")), ClinicalCategory::Other);
    }

    #[test]
    fn test_classify_uses_fixed_precedence() {
        assert_eq!(
            classify_disease(Some("myeloma with breast involvement")),
            ClinicalCategory::Breast
        );
        assert_eq!(
            classify_disease(Some("myeloma or lymphoma, undetermined")),
            ClinicalCategory::Lymphoma
        );
    }

    #[test]
    fn test_disease_options_cover_every_category() {
        let categories: Vec<_> = DISEASE_OPTIONS
            .iter()
            .map(|d| classify_disease(Some(d)))
            .collect();
        for category in ClinicalCategory::ALL {
            assert!(categories.contains(&category), "{category} not reachable");
        }
    }

    #[test]
    fn test_tab_label() {
        assert_eq!(ClinicalCategory::Myeloma.tab_label(), "Multiple Myeloma");
        assert_eq!(ClinicalCategory::Other.tab_label(), "Disease Specific");
    }
}
