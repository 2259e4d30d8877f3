//! Edit session over one patient record.
//!
//! [`RecordEditor`] keeps the record as loaded next to the working copy so a save only sends
//! what changed. Derived fields are maintained here: writes to a receptor status recompute
//! `tnbc_status`, and `age` is rendered from `date_of_birth` on display.

use chrono::NaiveDate;
use ctomop_types::{NonEmptyText, PersonId};

use crate::constants::{
    AGE_FIELD, CITY_FIELD, DATE_OF_BIRTH_FIELD, DISEASE_FIELD, GENETIC_MUTATIONS_FIELD,
    REGION_FIELD, TNBC_STATUS_FIELD,
};
use crate::derived::{apply_tnbc, compute_age_from_str, is_tnbc_input, parse_date};
use crate::disease::ClinicalCategory;
use crate::fields::{lookup_field, ControlType};
use crate::mutation::{
    gene_option, mutation_options, on_gene_change, MutationEntry, INTERPRETATION_OPTIONS,
    ORIGIN_OPTIONS,
};
use crate::record::{FieldValue, PatientRecord};
use crate::therapy::therapy_display_options;
use crate::{RecordError, RecordResult};

/// Editable part of a mutation entry other than its gene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationField {
    Mutation,
    Origin,
    Interpretation,
}

impl std::str::FromStr for MutationField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mutation" => Ok(MutationField::Mutation),
            "origin" => Ok(MutationField::Origin),
            "interpretation" => Ok(MutationField::Interpretation),
            other => Err(format!("unknown mutation field: {other:?}")),
        }
    }
}

/// Splits a display name at the first space into first and last name.
///
/// `"Mary Ann Smith"` becomes `("Mary", "Ann Smith")`; a single word has an empty last name.
pub fn split_name(name: &str) -> (String, String) {
    let name = name.trim();
    match name.split_once(' ') {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (name.to_string(), String::new()),
    }
}

#[derive(Clone, Debug)]
pub struct RecordEditor {
    person_id: PersonId,
    original: PatientRecord,
    edited: PatientRecord,
    original_name: String,
    edited_name: String,
}

impl RecordEditor {
    pub fn new(person_id: PersonId, record: PatientRecord, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            person_id,
            original: record.clone(),
            edited: record,
            original_name: display_name.clone(),
            edited_name: display_name,
        }
    }

    pub fn person_id(&self) -> PersonId {
        self.person_id
    }

    /// Working copy including unsaved edits.
    pub fn record(&self) -> &PatientRecord {
        &self.edited
    }

    /// Record as last loaded or saved.
    pub fn original(&self) -> &PatientRecord {
        &self.original
    }

    /// Category of the working copy's current disease label.
    pub fn category(&self) -> ClinicalCategory {
        ClinicalCategory::classify(self.edited.text(DISEASE_FIELD))
    }

    pub fn display_name(&self) -> &str {
        &self.edited_name
    }

    /// Renames the patient. The new name is saved as first and last name.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidInput` for a blank name.
    pub fn set_display_name(&mut self, name: &str) -> RecordResult<()> {
        let name = NonEmptyText::new(name).map_err(|e| RecordError::InvalidInput(e.to_string()))?;
        self.edited_name = name.as_str().to_string();
        Ok(())
    }

    /// Stores `value` under `key`.
    ///
    /// Changing the disease never clears fields of other categories. Changing a receptor
    /// status recomputes the triple-negative flag.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::DerivedField` for `age` and `tnbc_status`.
    pub fn set_field(&mut self, key: &str, value: impl Into<FieldValue>) -> RecordResult<()> {
        if is_derived(key) {
            return Err(RecordError::DerivedField(key.to_string()));
        }
        self.edited.set(key, value);
        if is_tnbc_input(key) {
            apply_tnbc(&mut self.edited);
        }
        Ok(())
    }

    /// Clears `key`, keeping it in the record as an explicit null.
    pub fn clear_field(&mut self, key: &str) -> RecordResult<()> {
        self.set_field(key, FieldValue::Null)
    }

    /// Parses raw user input according to the field's control and stores it.
    ///
    /// Only fields rendered for the current category can be set this way. Empty input clears
    /// the field.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField`, `DerivedField`, `InvalidNumber`, `InvalidDate` or
    /// `NotInVocabulary` depending on what is wrong with the input. Mutation lists are edited
    /// through the mutation operations and give `InvalidInput`.
    pub fn set_from_input(&mut self, key: &str, raw: &str) -> RecordResult<()> {
        let category = self.category();
        let field =
            lookup_field(category, key).ok_or_else(|| RecordError::UnknownField(key.to_string()))?;
        if field.read_only {
            return Err(RecordError::DerivedField(key.to_string()));
        }

        let raw = raw.trim();
        if raw.is_empty() {
            return self.clear_field(key);
        }

        let value = match field.control {
            ControlType::Text => FieldValue::from(raw),
            ControlType::Number => parse_number(raw).ok_or_else(|| RecordError::InvalidNumber {
                field: key.to_string(),
                value: raw.to_string(),
            })?,
            ControlType::Date => {
                let date = parse_date(raw).ok_or_else(|| RecordError::InvalidDate {
                    field: key.to_string(),
                    value: raw.to_string(),
                })?;
                FieldValue::Text(date.format("%Y-%m-%d").to_string())
            }
            ControlType::Select(options) => {
                ensure_allowed(key, raw, options.iter().copied())?;
                FieldValue::from(raw)
            }
            ControlType::Therapy(line) => {
                let options = therapy_display_options(category, line, self.edited.text(key));
                ensure_allowed(key, raw, options.iter().map(String::as_str))?;
                FieldValue::from(raw)
            }
            ControlType::MutationList => {
                return Err(RecordError::InvalidInput(format!(
                    "{key} is a list; edit its entries individually"
                )))
            }
        };
        self.set_field(key, value)
    }

    pub fn mutations(&self) -> &[MutationEntry] {
        self.edited.mutations(GENETIC_MUTATIONS_FIELD)
    }

    /// Appends an empty mutation entry and returns its index.
    ///
    /// Fails without touching the record when `genetic_mutations` holds something other
    /// than a list of entries.
    pub fn add_mutation(&mut self) -> RecordResult<usize> {
        let entries = self.edited.mutations_mut(GENETIC_MUTATIONS_FIELD)?;
        entries.push(MutationEntry::default());
        Ok(entries.len() - 1)
    }

    pub fn remove_mutation(&mut self, index: usize) -> RecordResult<MutationEntry> {
        self.check_mutation_index(index)?;
        Ok(self.edited.mutations_mut(GENETIC_MUTATIONS_FIELD)?.remove(index))
    }

    /// Sets an entry's gene. The entry's mutation is always cleared.
    ///
    /// Genes match the vocabulary regardless of case, so stored lowercase symbols such as
    /// `brca1` are accepted and kept as entered.
    pub fn set_mutation_gene(&mut self, index: usize, gene: &str) -> RecordResult<()> {
        let gene = gene.trim();
        if !gene.is_empty() && gene_option(gene).is_none() {
            return Err(RecordError::NotInVocabulary {
                field: "gene".to_string(),
                value: gene.to_string(),
            });
        }
        on_gene_change(self.mutation_at(index)?, gene);
        Ok(())
    }

    /// Sets the mutation, origin or interpretation of an entry.
    ///
    /// The mutation must belong to the entry's gene. Empty input clears the part.
    pub fn set_mutation_field(
        &mut self,
        index: usize,
        field: MutationField,
        value: &str,
    ) -> RecordResult<()> {
        let value = value.trim();
        let entry = self.mutation_at(index)?;
        if !value.is_empty() {
            match field {
                MutationField::Mutation => {
                    ensure_allowed("mutation", value, mutation_options(&entry.gene).iter().copied())?
                }
                MutationField::Origin => {
                    ensure_allowed("origin", value, ORIGIN_OPTIONS.iter().copied())?
                }
                MutationField::Interpretation => {
                    ensure_allowed("interpretation", value, INTERPRETATION_OPTIONS.iter().copied())?
                }
            }
        }
        let slot = match field {
            MutationField::Mutation => &mut entry.mutation,
            MutationField::Origin => &mut entry.origin,
            MutationField::Interpretation => &mut entry.interpretation,
        };
        *slot = value.to_string();
        Ok(())
    }

    /// Fills city and region from a postal-code lookup.
    pub fn apply_place(&mut self, city: &str, region: &str) {
        self.edited.set(CITY_FIELD, city);
        self.edited.set(REGION_FIELD, region);
    }

    /// Sparse update payload for the record.
    pub fn changes(&self) -> PatientRecord {
        self.edited.changes_since(&self.original)
    }

    /// First and last name to send when the display name was edited.
    pub fn name_change(&self) -> Option<(String, String)> {
        if self.edited_name.trim() == self.original_name.trim() {
            return None;
        }
        Some(split_name(&self.edited_name))
    }

    pub fn has_changes(&self) -> bool {
        !self.changes().is_empty() || self.name_change().is_some()
    }

    /// Makes the current edits the new baseline after a successful save.
    pub fn mark_saved(&mut self) {
        self.original = self.edited.clone();
        self.original_name = self.edited_name.clone();
    }

    /// Read-only rendering of a field, computing `age` from the date of birth.
    pub fn display_value(&self, key: &str, today: NaiveDate) -> String {
        if key == AGE_FIELD {
            return self
                .edited
                .text(DATE_OF_BIRTH_FIELD)
                .and_then(|dob| compute_age_from_str(dob, today))
                .map(|age| age.to_string())
                .unwrap_or_default();
        }
        self.edited
            .get(key)
            .map(FieldValue::display)
            .unwrap_or_default()
    }

    fn check_mutation_index(&self, index: usize) -> RecordResult<()> {
        if index < self.mutations().len() {
            Ok(())
        } else {
            Err(RecordError::MutationIndex(index))
        }
    }

    fn mutation_at(&mut self, index: usize) -> RecordResult<&mut MutationEntry> {
        self.check_mutation_index(index)?;
        self.edited
            .mutations_mut(GENETIC_MUTATIONS_FIELD)?
            .get_mut(index)
            .ok_or(RecordError::MutationIndex(index))
    }
}

fn is_derived(key: &str) -> bool {
    key == AGE_FIELD || key == TNBC_STATUS_FIELD
}

fn parse_number(raw: &str) -> Option<FieldValue> {
    if let Ok(i) = raw.parse::<i64>() {
        return Some(FieldValue::Integer(i));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(FieldValue::Number)
}

fn ensure_allowed<'a>(
    field: &str,
    value: &str,
    mut options: impl Iterator<Item = &'a str>,
) -> RecordResult<()> {
    if options.any(|option| option == value) {
        Ok(())
    } else {
        Err(RecordError::NotInVocabulary {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}
