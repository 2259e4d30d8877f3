//! Records API client.
//!
//! Thin typed wrapper over the REST endpoints. Authentication is a server session cookie kept
//! in the underlying `reqwest` cookie store, so one [`ApiClient`] is one login session.

use std::path::Path;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use api_shared::{
    BulkDeleteReq, BulkDeleteRes, CurrentUserRes, ErrorRes, ImportKind, ImportRes, LoginReq,
    LoginRes, PatientDetailRes, PatientSummary, Session, UpdateNameReq, User,
};
use ctomop_core::{validate_upload_file, PatientRecord};
use ctomop_types::PersonId;

use crate::{ClientConfig, ClientError, ClientResult};

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(ClientError::Http)?;
        Ok(Self::with_http(http, config.api_base_url()))
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Underlying HTTP client, shared with the zip lookup so both use one connection pool.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<User> {
        let body = LoginReq {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.url("/auth/login/")).json(&body).send().await;
        let res: LoginRes = read_json(response, "Login failed").await?;
        tracing::info!(username = %res.user.username, "logged in");
        Ok(res.user)
    }

    pub async fn logout(&self) -> ClientResult<()> {
        let response = self.http.post(self.url("/auth/logout/")).send().await;
        read_empty(response, "Logout failed").await
    }

    /// Current session. An unauthenticated request yields an anonymous session, not an error.
    pub async fn current_user(&self) -> ClientResult<Session> {
        let response = self
            .http
            .get(self.url("/user/"))
            .send()
            .await
            .map_err(ClientError::Http)?;
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(Session::anonymous());
        }
        let res: CurrentUserRes = read_json(Ok(response), "Failed to fetch user").await?;
        Ok(Session::authenticated(res.into_user()))
    }

    pub async fn list_patients(&self) -> ClientResult<Vec<PatientSummary>> {
        let response = self.http.get(self.url("/patient-info/")).send().await;
        let patients: Vec<PatientSummary> = read_json(response, "Failed to fetch patients").await?;
        tracing::info!(count = patients.len(), "patients loaded");
        Ok(patients)
    }

    pub async fn fetch_patient(&self, person_id: PersonId) -> ClientResult<PatientDetailRes> {
        let response = self
            .http
            .get(self.url(&format!("/patient-info/{person_id}/")))
            .send()
            .await;
        read_json(response, "Failed to fetch patient").await
    }

    /// Sends a sparse partial update and returns the record as stored by the server.
    pub async fn update_patient(
        &self,
        person_id: PersonId,
        changes: &PatientRecord,
    ) -> ClientResult<PatientRecord> {
        let response = self
            .http
            .patch(self.url(&format!("/patient-info/{person_id}/")))
            .json(changes)
            .send()
            .await;
        read_json(response, "Failed to update patient").await
    }

    pub async fn update_name(&self, first_name: &str, last_name: &str) -> ClientResult<()> {
        let body = UpdateNameReq {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };
        let response = self.http.patch(self.url("/user/")).json(&body).send().await;
        read_empty(response, "Failed to update name").await
    }

    /// Deletes several patients at once.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidInput` without calling the API when `person_ids` is empty.
    pub async fn bulk_delete(&self, person_ids: &[PersonId]) -> ClientResult<BulkDeleteRes> {
        if person_ids.is_empty() {
            return Err(ClientError::InvalidInput("no patients selected".into()));
        }
        let body = BulkDeleteReq {
            person_ids: person_ids.to_vec(),
        };
        let response = self
            .http
            .delete(self.url("/patient-info/bulk_delete/"))
            .json(&body)
            .send()
            .await;
        let res: BulkDeleteRes = read_json(response, "Failed to delete patients").await?;
        tracing::info!(deleted = res.deleted_count, "patients deleted");
        Ok(res)
    }

    /// Uploads a CSV file or FHIR bundle for bulk import.
    pub async fn import(&self, kind: ImportKind, path: &Path) -> ClientResult<ImportRes> {
        validate_upload_file(path, kind.extension())?;
        let bytes = tokio::fs::read(path).await.map_err(ClientError::FileRead)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("upload.{}", kind.extension()));

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(kind.mime_type())
            .map_err(ClientError::Http)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self.http.post(self.url(kind.path())).multipart(form).send().await;
        let res: ImportRes = read_json(response, "Failed to upload file").await?;
        if !res.is_clean() {
            tracing::warn!(
                created = res.created_count,
                errors = res.errors.len(),
                "import finished with errors"
            );
        } else {
            tracing::info!(created = res.created_count, "import finished");
        }
        Ok(res)
    }
}

async fn read_json<T: DeserializeOwned>(
    response: Result<Response, reqwest::Error>,
    default_message: &str,
) -> ClientResult<T> {
    let response = ensure_success(response, default_message).await?;
    response.json().await.map_err(ClientError::Http)
}

async fn read_empty(
    response: Result<Response, reqwest::Error>,
    default_message: &str,
) -> ClientResult<()> {
    ensure_success(response, default_message).await.map(|_| ())
}

/// Turns a non-2xx response into `ClientError::Api`, preferring the server's `error` message.
async fn ensure_success(
    response: Result<Response, reqwest::Error>,
    default_message: &str,
) -> ClientResult<Response> {
    let response = response.map_err(|e| {
        tracing::error!(error = %e, "{default_message}");
        ClientError::Http(e)
    })?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorRes>(&body)
        .ok()
        .and_then(|e| e.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| default_message.to_string());
    tracing::error!(status = status.as_u16(), %message, "API request failed");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
