//! Constants used throughout the record editor core.
//!
//! Field keys that derivations depend on, plus the fixed option lists offered by select
//! controls. The field-set tables and the derivations both read keys from here.

/// Free-text or selected disease label.
pub const DISEASE_FIELD: &str = "disease";

/// Calendar date of birth, `YYYY-MM-DD`.
pub const DATE_OF_BIRTH_FIELD: &str = "date_of_birth";

/// Displayed age; derived from the date of birth and never written by the editor.
pub const AGE_FIELD: &str = "age";

pub const ER_STATUS_FIELD: &str = "estrogen_receptor_status";
pub const PR_STATUS_FIELD: &str = "progesterone_receptor_status";
pub const HER2_STATUS_FIELD: &str = "her2_status";

/// Triple-negative flag; derived from the three receptor statuses.
pub const TNBC_STATUS_FIELD: &str = "tnbc_status";

/// Repeatable list of breast cancer mutation entries.
pub const GENETIC_MUTATIONS_FIELD: &str = "genetic_mutations";

pub const POSTAL_CODE_FIELD: &str = "postal_code";
pub const CITY_FIELD: &str = "city";
pub const REGION_FIELD: &str = "region";

/// Receptor status value that counts towards triple-negative.
pub const NEGATIVE: &str = "Negative";

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Other", "Unknown"];
pub const COUNTRY_OPTIONS: &[&str] = &[
    "United States",
    "Canada",
    "United Kingdom",
    "Germany",
    "France",
    "Spain",
    "Italy",
    "Other",
];
pub const ETHNICITY_OPTIONS: &[&str] = &["Hispanic or Latino", "Not Hispanic or Latino", "Unknown"];
pub const DISEASE_OPTIONS: &[&str] = &[
    "Breast Cancer",
    "Follicular Lymphoma",
    "Multiple Myeloma",
    "Lung Cancer",
    "Colon Cancer",
    "Other",
];
pub const STAGE_OPTIONS: &[&str] = &["Stage I", "Stage II", "Stage III", "Stage IV", "Unknown"];
pub const ECOG_OPTIONS: &[&str] = &["0", "1", "2", "3", "4", "5"];
pub const KARNOFSKY_OPTIONS: &[&str] = &[
    "100", "90", "80", "70", "60", "50", "40", "30", "20", "10", "0",
];
pub const YES_NO_OPTIONS: &[&str] = &["Yes", "No", "Unknown"];
pub const POSITIVE_NEGATIVE_OPTIONS: &[&str] = &["Positive", "Negative", "Unknown"];
pub const ER_PR_OPTIONS: &[&str] = &["Positive", "Negative", "Borderline", "Unknown"];
pub const HER2_OPTIONS: &[&str] = &["Positive", "Negative", "Equivocal", "Unknown"];
pub const FLIPI_RISK_OPTIONS: &[&str] = &["Low", "Intermediate", "High"];
pub const ISS_STAGE_OPTIONS: &[&str] = &["Stage I", "Stage II", "Stage III"];
pub const CYTOGENETIC_RISK_OPTIONS: &[&str] = &["Standard Risk", "High Risk", "Very High Risk"];
pub const THERAPY_OUTCOME_OPTIONS: &[&str] = &[
    "Complete Response",
    "Partial Response",
    "Stable Disease",
    "Progressive Disease",
    "Unknown",
];
pub const REFRACTORY_STATUS_OPTIONS: &[&str] = &[
    "Not Refractory",
    "Refractory to PI",
    "Refractory to IMiD",
    "Refractory to Anti-CD38",
    "Triple-class Refractory",
    "Penta-refractory",
];
pub const SMOKING_STATUS_OPTIONS: &[&str] =
    &["Never Smoker", "Former Smoker", "Current Smoker", "Unknown"];
pub const ALCOHOL_USE_OPTIONS: &[&str] = &["None", "Occasional", "Moderate", "Heavy", "Unknown"];
pub const EXERCISE_FREQUENCY_OPTIONS: &[&str] = &[
    "None",
    "Rarely",
    "1-2 times/week",
    "3-4 times/week",
    "5+ times/week",
    "Daily",
    "Unknown",
];
pub const DIET_TYPE_OPTIONS: &[&str] = &[
    "Regular",
    "Vegetarian",
    "Vegan",
    "Mediterranean",
    "Low-carb",
    "Ketogenic",
    "Other",
];
pub const SLEEP_QUALITY_OPTIONS: &[&str] = &["Excellent", "Good", "Fair", "Poor", "Very Poor"];
pub const STRESS_LEVEL_OPTIONS: &[&str] = &["None", "Low", "Moderate", "High", "Very High"];
pub const SOCIAL_SUPPORT_OPTIONS: &[&str] = &["Excellent", "Good", "Fair", "Poor", "None"];
pub const EMPLOYMENT_STATUS_OPTIONS: &[&str] = &[
    "Employed Full-time",
    "Employed Part-time",
    "Self-employed",
    "Unemployed",
    "Retired",
    "Disabled",
    "Student",
    "Homemaker",
];
pub const EDUCATION_LEVEL_OPTIONS: &[&str] = &[
    "Less than High School",
    "High School Graduate",
    "Some College",
    "Associate Degree",
    "Bachelor Degree",
    "Master Degree",
    "Doctoral Degree",
    "Professional Degree",
];
pub const MARITAL_STATUS_OPTIONS: &[&str] = &[
    "Single",
    "Married",
    "Divorced",
    "Widowed",
    "Separated",
    "Domestic Partnership",
];
pub const INSURANCE_TYPE_OPTIONS: &[&str] = &[
    "Private Insurance",
    "Medicare",
    "Medicaid",
    "Veterans Affairs",
    "Other Government",
    "Self-pay",
    "None",
];
