//! Load, edit and save flow for one patient.

use api_shared::display_name_for;
use ctomop_core::constants::POSTAL_CODE_FIELD;
use ctomop_core::RecordEditor;
use ctomop_types::PersonId;

use crate::{ApiClient, ClientConfig, ClientResult, Place, ZipLookup};

/// What a save sent to the API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    pub fields_sent: usize,
    pub name_updated: bool,
}

impl SaveOutcome {
    pub fn is_noop(&self) -> bool {
        self.fields_sent == 0 && !self.name_updated
    }
}

#[derive(Clone, Debug)]
pub struct PatientService {
    api: ApiClient,
    zip: ZipLookup,
}

impl PatientService {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let api = ApiClient::new(config)?;
        let zip = ZipLookup::new(api.http().clone(), config.zip_lookup_url());
        Ok(Self { api, zip })
    }

    pub fn from_parts(api: ApiClient, zip: ZipLookup) -> Self {
        Self { api, zip }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Fetches a patient and opens an edit session on it.
    pub async fn load(&self, person_id: PersonId) -> ClientResult<RecordEditor> {
        let detail = self.api.fetch_patient(person_id).await?;
        let name = display_name_for(detail.user.as_ref(), person_id);
        tracing::info!(%person_id, fields = detail.patient_info.len(), "patient loaded");
        Ok(RecordEditor::new(person_id, detail.patient_info, name))
    }

    /// Sends pending edits: the sparse record first, then the display name.
    ///
    /// The editor's baseline only moves once every request succeeded, so a failed save keeps
    /// all edits pending and can be retried.
    pub async fn save(&self, editor: &mut RecordEditor) -> ClientResult<SaveOutcome> {
        let changes = editor.changes();
        let mut outcome = SaveOutcome::default();

        if !changes.is_empty() {
            self.api.update_patient(editor.person_id(), &changes).await?;
            outcome.fields_sent = changes.len();
        }
        if let Some((first, last)) = editor.name_change() {
            self.api.update_name(&first, &last).await?;
            outcome.name_updated = true;
        }

        editor.mark_saved();
        tracing::info!(
            person_id = %editor.person_id(),
            fields = outcome.fields_sent,
            name_updated = outcome.name_updated,
            "patient saved"
        );
        Ok(outcome)
    }

    /// Applies user input to a field. A postal code also fills city and region when the
    /// lookup finds a place; a failed lookup leaves them unchanged.
    pub async fn set_input(
        &self,
        editor: &mut RecordEditor,
        key: &str,
        raw: &str,
    ) -> ClientResult<Option<Place>> {
        editor.set_from_input(key, raw)?;
        if key != POSTAL_CODE_FIELD {
            return Ok(None);
        }
        Ok(self.enrich_postal_code(editor).await)
    }

    /// Looks up the editor's postal code and applies the place found, if any.
    pub async fn enrich_postal_code(&self, editor: &mut RecordEditor) -> Option<Place> {
        let zip = editor.record().text(POSTAL_CODE_FIELD)?.to_string();
        let place = self.zip.lookup(&zip).await?;
        editor.apply_place(&place.city, &place.region);
        Some(place)
    }
}
