use ctomop_core::PatientRecord;
use ctomop_types::PersonId;
use serde::{Deserialize, Serialize};

use crate::auth::User;

/// One row of `GET /patient-info/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub person_id: PersonId,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub disease: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `GET /patient-info/{id}/`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PatientDetailRes {
    pub patient_info: PatientRecord,
    #[serde(default)]
    pub user: Option<User>,
}

/// Body of `PATCH /user/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNameReq {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BulkDeleteReq {
    pub person_ids: Vec<PersonId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteRes {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub deleted_count: u64,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Name shown for a patient in the editor header.
///
/// Full name of the linked account, else its username, else `Patient {id}`.
pub fn display_name_for(user: Option<&User>, person_id: PersonId) -> String {
    if let Some(user) = user {
        let full = user.full_name();
        if !full.is_empty() {
            return full;
        }
        if !user.username.trim().is_empty() {
            return user.username.clone();
        }
    }
    format!("Patient {person_id}")
}
