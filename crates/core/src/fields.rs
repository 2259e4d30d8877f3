//! Field groups rendered by the patient editor.
//!
//! The disease-specific tab shows exactly one of four mutually exclusive group sets,
//! selected by [`ClinicalCategory`]. The remaining tabs are shared by every category.
//! Everything here is static data; selecting a different set never touches record values.

use crate::constants::*;
use crate::disease::ClinicalCategory;
use crate::therapy::TherapyLine;

/// How a field is edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlType {
    Text,
    Number,
    Date,
    /// Single choice from a fixed list.
    Select(&'static [&'static str]),
    /// Single choice from the therapy vocabulary for the current category and this line.
    Therapy(TherapyLine),
    /// Repeatable list of structured mutation entries.
    MutationList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub control: ControlType,
    /// Derived fields are displayed but never edited.
    pub read_only: bool,
    pub full_width: bool,
}

impl FieldSpec {
    const fn new(key: &'static str, label: &'static str, control: ControlType) -> Self {
        Self {
            key,
            label,
            control,
            read_only: false,
            full_width: false,
        }
    }

    const fn wide(mut self) -> Self {
        self.full_width = true;
        self
    }

    const fn derived(mut self) -> Self {
        self.read_only = true;
        self
    }
}

const fn text(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::new(key, label, ControlType::Text)
}

const fn number(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::new(key, label, ControlType::Number)
}

const fn date(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::new(key, label, ControlType::Date)
}

const fn select(key: &'static str, label: &'static str, options: &'static [&'static str]) -> FieldSpec {
    FieldSpec::new(key, label, ControlType::Select(options))
}

const fn therapy(key: &'static str, label: &'static str, line: TherapyLine) -> FieldSpec {
    FieldSpec::new(key, label, ControlType::Therapy(line)).wide()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldGroup {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Tabs of the patient editor, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorTab {
    General,
    DiseaseSpecific,
    Treatment,
    Blood,
    Labs,
    Behavior,
}

impl EditorTab {
    pub const ALL: [EditorTab; 6] = [
        EditorTab::General,
        EditorTab::DiseaseSpecific,
        EditorTab::Treatment,
        EditorTab::Blood,
        EditorTab::Labs,
        EditorTab::Behavior,
    ];

    pub fn label(self, category: ClinicalCategory) -> &'static str {
        match self {
            EditorTab::General => "General",
            EditorTab::DiseaseSpecific => category.tab_label(),
            EditorTab::Treatment => "Treatment",
            EditorTab::Blood => "Blood",
            EditorTab::Labs => "Labs",
            EditorTab::Behavior => "Behavior",
        }
    }
}

impl std::str::FromStr for EditorTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(EditorTab::General),
            "disease" | "disease-specific" => Ok(EditorTab::DiseaseSpecific),
            "treatment" => Ok(EditorTab::Treatment),
            "blood" => Ok(EditorTab::Blood),
            "labs" => Ok(EditorTab::Labs),
            "behavior" | "behaviour" => Ok(EditorTab::Behavior),
            other => Err(format!("unknown tab: {other:?}")),
        }
    }
}

const BREAST_GROUPS: &[FieldGroup] = &[
    FieldGroup {
        name: "Tumor Characteristics",
        fields: &[
            text("histologic_type", "Histologic Type").wide(),
            select("stage", "Stage", STAGE_OPTIONS),
            number("tumor_size", "Tumor Size (cm)"),
            select("lymph_node_status", "Lymph Node Status", POSITIVE_NEGATIVE_OPTIONS),
            select("metastasis_status", "Metastasis Status", POSITIVE_NEGATIVE_OPTIONS),
        ],
    },
    FieldGroup {
        name: "Receptor Status",
        fields: &[
            select(ER_STATUS_FIELD, "Estrogen Receptor (ER) Status", ER_PR_OPTIONS),
            select(PR_STATUS_FIELD, "Progesterone Receptor (PR) Status", ER_PR_OPTIONS),
            select(HER2_STATUS_FIELD, "HER2 Status", HER2_OPTIONS),
        ],
    },
    FieldGroup {
        name: "Triple Negative Status",
        fields: &[select(TNBC_STATUS_FIELD, "Triple Negative Status", YES_NO_OPTIONS).derived()],
    },
    FieldGroup {
        name: "Additional Biomarkers",
        fields: &[
            number("ki67_proliferation_index", "Ki-67 Proliferation Index (%)"),
            number("pd_l1_tumor_cels", "PD-L1 Status (%)"),
        ],
    },
    FieldGroup {
        name: "Genetic Mutations",
        fields: &[FieldSpec::new(GENETIC_MUTATIONS_FIELD, "Genetic Mutations", ControlType::MutationList).wide()],
    },
];

const LYMPHOMA_GROUPS: &[FieldGroup] = &[
    FieldGroup {
        name: "Disease Characteristics",
        fields: &[
            text("histologic_type", "Histologic Subtype").wide(),
            select("stage", "Ann Arbor Stage", STAGE_OPTIONS),
            number("flipi_score", "FLIPI Score"),
            select("flipi_risk_category", "FLIPI Risk Category", FLIPI_RISK_OPTIONS),
            select("bulky_disease", "Bulky Disease", YES_NO_OPTIONS),
            select("b_symptoms", "B Symptoms", YES_NO_OPTIONS),
        ],
    },
    FieldGroup {
        name: "Laboratory Markers",
        fields: &[
            number("ldh_level", "LDH Level (U/L)"),
            number("beta2_microglobulin", "Beta-2 Microglobulin (mg/L)"),
            select("bone_marrow_involvement", "Bone Marrow Involvement", YES_NO_OPTIONS),
            number("number_of_nodal_sites", "Number of Nodal Sites"),
        ],
    },
];

const MYELOMA_GROUPS: &[FieldGroup] = &[
    FieldGroup {
        name: "Disease Characteristics",
        fields: &[
            text("myeloma_type", "Myeloma Type"),
            select("stage", "ISS Stage", ISS_STAGE_OPTIONS),
            select("r_iss_stage", "R-ISS Stage", ISS_STAGE_OPTIONS),
            text("durie_salmon_stage", "Durie-Salmon Stage"),
        ],
    },
    FieldGroup {
        name: "Myeloma Markers",
        fields: &[
            text("m_protein_type", "M-Protein Type"),
            number("serum_m_protein", "Serum M-Protein (g/dL)"),
            number("urine_m_protein", "Urine M-Protein (mg/24h)"),
            number("free_light_chain_ratio", "Free Light Chain Ratio"),
            number("beta2_microglobulin", "Beta-2 Microglobulin (mg/L)"),
            number("ldh_level", "LDH Level (U/L)"),
        ],
    },
    FieldGroup {
        name: "Complications",
        fields: &[
            select("bone_lesions", "Bone Lesions", YES_NO_OPTIONS),
            select("hypercalcemia", "Hypercalcemia", YES_NO_OPTIONS),
            select("renal_impairment", "Renal Impairment", YES_NO_OPTIONS),
            select("anemia", "Anemia", YES_NO_OPTIONS),
            number("plasma_cell_percentage", "Plasma Cell Percentage (%)"),
        ],
    },
    FieldGroup {
        name: "Cytogenetics",
        fields: &[
            select("cytogenetic_risk", "Cytogenetic Risk", CYTOGENETIC_RISK_OPTIONS),
            text("cytogenetic_abnormalities", "Cytogenetic Abnormalities").wide(),
            text("molecular_markers", "Molecular Markers").wide(),
        ],
    },
];

const OTHER_GROUPS: &[FieldGroup] = &[FieldGroup {
    name: "Disease",
    fields: &[
        select(DISEASE_FIELD, "Disease", DISEASE_OPTIONS),
        select("stage", "Stage", STAGE_OPTIONS),
        text("histologic_type", "Histologic Type").wide(),
    ],
}];

const GENERAL_GROUPS: &[FieldGroup] = &[
    FieldGroup {
        name: "Patient",
        fields: &[
            date(DATE_OF_BIRTH_FIELD, "Date of Birth"),
            number(AGE_FIELD, "Age").derived(),
            select("gender", "Gender", GENDER_OPTIONS),
        ],
    },
    FieldGroup {
        name: "Location",
        fields: &[
            select("country", "Country", COUNTRY_OPTIONS),
            text(REGION_FIELD, "Region/State"),
            text(CITY_FIELD, "City"),
            text(POSTAL_CODE_FIELD, "Postal Code"),
        ],
    },
    FieldGroup {
        name: "Ethnicity",
        fields: &[select("ethnicity", "Ethnicity", ETHNICITY_OPTIONS).wide()],
    },
    FieldGroup {
        name: "Clinical Summary",
        fields: &[
            select(DISEASE_FIELD, "Disease", DISEASE_OPTIONS),
            select("stage", "Stage", STAGE_OPTIONS),
            text("histologic_type", "Histologic Type").wide(),
            select("ecog_performance_status", "ECOG Performance Status", ECOG_OPTIONS),
            select("karnofsky_performance_score", "Karnofsky Performance Score", KARNOFSKY_OPTIONS),
        ],
    },
    FieldGroup {
        name: "Physical Measurements",
        fields: &[
            number("weight", "Weight (kg)"),
            number("height", "Height (cm)"),
            number("bmi", "BMI"),
            number("systolic_blood_pressure", "Systolic Blood Pressure (mmHg)"),
            number("diastolic_blood_pressure", "Diastolic Blood Pressure (mmHg)"),
            number("heartrate", "Heart Rate (bpm)"),
        ],
    },
];

const TREATMENT_GROUPS: &[FieldGroup] = &[
    FieldGroup {
        name: "Treatment History",
        fields: &[
            select("prior_therapy", "Prior Therapy", YES_NO_OPTIONS),
            number("therapy_lines_count", "Number of Prior Lines"),
            number("relapse_count", "Relapse Count"),
            select("refractory_status", "Refractory Status", REFRACTORY_STATUS_OPTIONS).wide(),
        ],
    },
    FieldGroup {
        name: "First Line Therapy",
        fields: &[
            therapy("first_line_therapy", "First Line Therapy", TherapyLine::First),
            date("first_line_date", "First Line Date"),
            select("first_line_outcome", "First Line Outcome", THERAPY_OUTCOME_OPTIONS),
        ],
    },
    FieldGroup {
        name: "Second Line Therapy",
        fields: &[
            therapy("second_line_therapy", "Second Line Therapy", TherapyLine::Second),
            date("second_line_date", "Second Line Date"),
            select("second_line_outcome", "Second Line Outcome", THERAPY_OUTCOME_OPTIONS),
        ],
    },
    FieldGroup {
        name: "Later Line Therapy",
        fields: &[
            therapy("later_line_therapy", "Later Line Therapy", TherapyLine::Later),
            date("later_line_date", "Later Line Date"),
            select("later_line_outcome", "Later Line Outcome", THERAPY_OUTCOME_OPTIONS),
        ],
    },
    FieldGroup {
        name: "Prior Treatments",
        fields: &[
            select("prior_surgery", "Prior Surgery", YES_NO_OPTIONS),
            select("prior_radiation", "Prior Radiation", YES_NO_OPTIONS),
            select("prior_chemotherapy", "Prior Chemotherapy", YES_NO_OPTIONS),
            select("prior_hormone_therapy", "Prior Hormone Therapy", YES_NO_OPTIONS),
            select("prior_targeted_therapy", "Prior Targeted Therapy", YES_NO_OPTIONS),
            select("prior_immunotherapy", "Prior Immunotherapy", YES_NO_OPTIONS),
            select("prior_transplant", "Prior Transplant", YES_NO_OPTIONS),
            select("prior_proteasome_inhibitor", "Prior Proteasome Inhibitor", YES_NO_OPTIONS),
            select("prior_immunomodulatory_drug", "Prior Immunomodulatory Drug", YES_NO_OPTIONS),
            select("prior_anti_cd38", "Prior Anti-CD38 Antibody", YES_NO_OPTIONS),
        ],
    },
];

const BLOOD_GROUPS: &[FieldGroup] = &[FieldGroup {
    name: "Blood Counts",
    fields: &[
        number("hemoglobin_level", "Hemoglobin (g/dL)"),
        number("hematocrit", "Hematocrit (%)"),
        number("white_blood_cell_count", "White Blood Cell Count (10³/µL)"),
        number("red_blood_cell_count", "Red Blood Cell Count (10⁶/µL)"),
        number("platelet_count", "Platelet Count (10³/µL)"),
        number("absolute_neutrophile_count", "Absolute Neutrophil Count (10³/µL)"),
        number("absolute_lymphocyte_count", "Absolute Lymphocyte Count (10³/µL)"),
        number("absolute_monocyte_count", "Absolute Monocyte Count (10³/µL)"),
    ],
}];

const LABS_GROUPS: &[FieldGroup] = &[
    FieldGroup {
        name: "Chemistry Panel",
        fields: &[
            number("serum_creatinine_level", "Serum Creatinine (mg/dL)"),
            number("blood_urea_nitrogen", "Blood Urea Nitrogen (mg/dL)"),
            number("egfr", "eGFR (mL/min/1.73m²)"),
            number("serum_sodium", "Serum Sodium (mEq/L)"),
            number("serum_potassium", "Serum Potassium (mEq/L)"),
            number("serum_calcium_level", "Serum Calcium (mg/dL)"),
            number("albumin_level", "Serum Albumin (g/dL)"),
            number("total_protein", "Total Protein (g/dL)"),
        ],
    },
    FieldGroup {
        name: "Liver Function Tests",
        fields: &[
            number("liver_enzyme_levels_ast", "AST (U/L)"),
            number("liver_enzyme_levels_alt", "ALT (U/L)"),
            number("liver_enzyme_levels_alp", "ALP (U/L)"),
            number("serum_bilirubin_level_total", "Total Bilirubin (mg/dL)"),
            number("serum_bilirubin_level_direct", "Direct Bilirubin (mg/dL)"),
        ],
    },
    FieldGroup {
        name: "Other Markers",
        fields: &[
            number("ldh_level", "LDH (U/L)"),
            number("beta2_microglobulin", "Beta-2 Microglobulin (mg/L)"),
            number("c_reactive_protein", "C-Reactive Protein (mg/L)"),
            number("esr", "ESR (mm/hr)"),
        ],
    },
];

const BEHAVIOR_GROUPS: &[FieldGroup] = &[
    FieldGroup {
        name: "Performance Status",
        fields: &[
            select("ecog_performance_status", "ECOG Performance Status", ECOG_OPTIONS),
            select("karnofsky_performance_score", "Karnofsky Performance Score", KARNOFSKY_OPTIONS),
        ],
    },
    FieldGroup {
        name: "Lifestyle Factors",
        fields: &[
            select("smoking_status", "Smoking Status", SMOKING_STATUS_OPTIONS),
            number("pack_years", "Pack Years (if applicable)"),
            select("alcohol_use", "Alcohol Use", ALCOHOL_USE_OPTIONS),
            number("drinks_per_week", "Drinks per Week (if applicable)"),
            select("exercise_frequency", "Exercise Frequency", EXERCISE_FREQUENCY_OPTIONS),
            number("exercise_minutes_per_week", "Exercise Minutes per Week"),
            select("diet_type", "Diet Type", DIET_TYPE_OPTIONS),
        ],
    },
    FieldGroup {
        name: "Sleep & Wellbeing",
        fields: &[
            number("sleep_hours_per_night", "Average Sleep Hours per Night"),
            select("sleep_quality", "Sleep Quality", SLEEP_QUALITY_OPTIONS),
            select("stress_level", "Stress Level", STRESS_LEVEL_OPTIONS),
            select("social_support", "Social Support", SOCIAL_SUPPORT_OPTIONS),
        ],
    },
    FieldGroup {
        name: "Socioeconomic Factors",
        fields: &[
            select("employment_status", "Employment Status", EMPLOYMENT_STATUS_OPTIONS),
            select("education_level", "Education Level", EDUCATION_LEVEL_OPTIONS),
            select("marital_status", "Marital Status", MARITAL_STATUS_OPTIONS),
            select("insurance_type", "Insurance Type", INSURANCE_TYPE_OPTIONS),
            number("number_of_dependents", "Number of Dependents"),
            number("annual_household_income", "Annual Household Income (USD)"),
        ],
    },
];

/// Disease-specific field groups for a category.
pub fn disease_field_groups(category: ClinicalCategory) -> &'static [FieldGroup] {
    match category {
        ClinicalCategory::Breast => BREAST_GROUPS,
        ClinicalCategory::Lymphoma => LYMPHOMA_GROUPS,
        ClinicalCategory::Myeloma => MYELOMA_GROUPS,
        ClinicalCategory::Other => OTHER_GROUPS,
    }
}

/// Field groups shown on `tab`. Only the disease-specific tab depends on the category.
pub fn tab_groups(tab: EditorTab, category: ClinicalCategory) -> &'static [FieldGroup] {
    match tab {
        EditorTab::General => GENERAL_GROUPS,
        EditorTab::DiseaseSpecific => disease_field_groups(category),
        EditorTab::Treatment => TREATMENT_GROUPS,
        EditorTab::Blood => BLOOD_GROUPS,
        EditorTab::Labs => LABS_GROUPS,
        EditorTab::Behavior => BEHAVIOR_GROUPS,
    }
}

/// Resolves a field key for editing under `category`.
///
/// The category's disease groups win over the shared tabs, so `stage` under myeloma offers
/// ISS stages. Fields of other categories are not editable while they are not rendered.
pub fn lookup_field(category: ClinicalCategory, key: &str) -> Option<&'static FieldSpec> {
    EditorTab::ALL
        .iter()
        .copied()
        .filter(|tab| *tab != EditorTab::General)
        .chain(std::iter::once(EditorTab::General))
        .flat_map(|tab| tab_groups(tab, category).iter())
        .flat_map(|group| group.fields.iter())
        .find(|field| field.key == key)
}
