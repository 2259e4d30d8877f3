//! Therapy regimen vocabularies.
//!
//! Each (category, line) pair has its own static list, ordered from first-preferred to
//! escalation regimens. Lists end with "Other" so any regimen can still be recorded.

use serde::{Deserialize, Serialize};

use crate::disease::ClinicalCategory;

/// Position of a regimen in the patient's treatment history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TherapyLine {
    First,
    Second,
    Later,
}

impl TherapyLine {
    pub const ALL: [TherapyLine; 3] = [TherapyLine::First, TherapyLine::Second, TherapyLine::Later];

    /// Record field holding the regimen chosen for this line.
    pub fn therapy_field(self) -> &'static str {
        match self {
            TherapyLine::First => "first_line_therapy",
            TherapyLine::Second => "second_line_therapy",
            TherapyLine::Later => "later_line_therapy",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TherapyLine::First => "first",
            TherapyLine::Second => "second",
            TherapyLine::Later => "later",
        }
    }
}

impl std::fmt::Display for TherapyLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TherapyLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "1" | "first-line" => Ok(TherapyLine::First),
            "second" | "2" | "second-line" => Ok(TherapyLine::Second),
            "later" | "3" | "later-line" | "third" => Ok(TherapyLine::Later),
            other => Err(format!("unknown therapy line: {other:?}")),
        }
    }
}

const BREAST_CANCER_FIRST_LINE: &[&str] = &[
    "AC-T (Doxorubicin/Cyclophosphamide followed by Paclitaxel)",
    "TC (Docetaxel/Cyclophosphamide)",
    "Paclitaxel/Trastuzumab/Pertuzumab (HER2+)",
    "Hormone Therapy (Tamoxifen/Aromatase Inhibitor)",
    "CDK4/6 Inhibitor + Hormone Therapy",
    "Capecitabine",
    "Other",
];

const BREAST_CANCER_SECOND_LINE: &[&str] = &[
    "Capecitabine",
    "T-DM1 (Trastuzumab emtansine) (HER2+)",
    "T-DXd (Trastuzumab deruxtecan) (HER2+)",
    "Eribulin",
    "Gemcitabine/Carboplatin",
    "PARP Inhibitor (BRCA+)",
    "Sacituzumab govitecan",
    "Other",
];

const BREAST_CANCER_LATER_LINE: &[&str] = &[
    "T-DXd (Trastuzumab deruxtecan)",
    "Sacituzumab govitecan",
    "Eribulin",
    "Vinorelbine",
    "Ixabepilone",
    "PARP Inhibitor",
    "Clinical Trial",
    "Other",
];

const LYMPHOMA_FIRST_LINE: &[&str] = &[
    "R-CHOP (Rituximab/Cyclophosphamide/Doxorubicin/Vincristine/Prednisone)",
    "BR (Bendamustine/Rituximab)",
    "R-CVP (Rituximab/Cyclophosphamide/Vincristine/Prednisone)",
    "Rituximab Monotherapy",
    "Watch and Wait",
    "Other",
];

const LYMPHOMA_SECOND_LINE: &[&str] = &[
    "R-ICE (Rituximab/Ifosfamide/Carboplatin/Etoposide)",
    "R-DHAP (Rituximab/Dexamethasone/Cytarabine/Cisplatin)",
    "BR (Bendamustine/Rituximab)",
    "Lenalidomide/Rituximab",
    "Obinutuzumab-based therapy",
    "Other",
];

const LYMPHOMA_LATER_LINE: &[&str] = &[
    "Tazemetostat",
    "Lenalidomide/Rituximab",
    "PI3K Inhibitor (Copanlisib/Duvelisib/Idelalisib)",
    "Obinutuzumab Monotherapy",
    "Clinical Trial",
    "Other",
];

const MYELOMA_FIRST_LINE: &[&str] = &[
    "VRd (Bortezomib/Lenalidomide/Dexamethasone)",
    "CyBorD (Cyclophosphamide/Bortezomib/Dexamethasone)",
    "DRd (Daratumumab/Lenalidomide/Dexamethasone)",
    "RVd (Lenalidomide/Bortezomib/Dexamethasone)",
    "KRd (Carfilzomib/Lenalidomide/Dexamethasone)",
    "Other",
];

const MYELOMA_SECOND_LINE: &[&str] = &[
    "DVd (Daratumumab/Bortezomib/Dexamethasone)",
    "KRd (Carfilzomib/Lenalidomide/Dexamethasone)",
    "DRd (Daratumumab/Lenalidomide/Dexamethasone)",
    "Elotuzumab/Lenalidomide/Dexamethasone",
    "Ixazomib/Lenalidomide/Dexamethasone",
    "Carfilzomib/Dexamethasone",
    "Other",
];

const MYELOMA_LATER_LINE: &[&str] = &[
    "Isatuximab/Pomalidomide/Dexamethasone",
    "Daratumumab/Pomalidomide/Dexamethasone",
    "Selinexor/Bortezomib/Dexamethasone",
    "Belantamab mafodotin",
    "CAR-T (Idecabtagene vicleucel/Ciltacabtagene autoleucel)",
    "Clinical Trial",
    "Other",
];

const OTHER_ONLY: &[&str] = &["Other"];

/// Allowed regimens for a category and line, first-preferred first.
pub fn therapy_vocabulary(category: ClinicalCategory, line: TherapyLine) -> &'static [&'static str] {
    match (category, line) {
        (ClinicalCategory::Breast, TherapyLine::First) => BREAST_CANCER_FIRST_LINE,
        (ClinicalCategory::Breast, TherapyLine::Second) => BREAST_CANCER_SECOND_LINE,
        (ClinicalCategory::Breast, TherapyLine::Later) => BREAST_CANCER_LATER_LINE,
        (ClinicalCategory::Lymphoma, TherapyLine::First) => LYMPHOMA_FIRST_LINE,
        (ClinicalCategory::Lymphoma, TherapyLine::Second) => LYMPHOMA_SECOND_LINE,
        (ClinicalCategory::Lymphoma, TherapyLine::Later) => LYMPHOMA_LATER_LINE,
        (ClinicalCategory::Myeloma, TherapyLine::First) => MYELOMA_FIRST_LINE,
        (ClinicalCategory::Myeloma, TherapyLine::Second) => MYELOMA_SECOND_LINE,
        (ClinicalCategory::Myeloma, TherapyLine::Later) => MYELOMA_LATER_LINE,
        (ClinicalCategory::Other, _) => OTHER_ONLY,
    }
}

/// Options to show in the therapy select for the current stored value.
///
/// A stored value outside the vocabulary (the disease changed after it was chosen, or it is
/// legacy free text) is kept selectable by putting it first.
pub fn therapy_display_options(
    category: ClinicalCategory,
    line: TherapyLine,
    current: Option<&str>,
) -> Vec<String> {
    let vocabulary = therapy_vocabulary(category, line);
    let mut options = Vec::with_capacity(vocabulary.len() + 1);
    if let Some(current) = current.filter(|c| !c.is_empty()) {
        if !vocabulary.contains(&current) {
            options.push(current.to_string());
        }
    }
    options.extend(vocabulary.iter().map(|s| s.to_string()));
    options
}
