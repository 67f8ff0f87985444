//! Admission store: bed occupancy, admit/discharge, and the
//! available-bed computation the admission form offers.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};

use super::{load_collection, persist_collection, StoreError};
use crate::ids::IdGenerator;
use crate::models::catalog::{bed_pool, TOTAL_BEDS};
use crate::models::enums::AdmissionStatus;
use crate::models::{Admission, AdmissionFilter, AdmissionPatch, NewAdmission};
use crate::storage::{StorageAdapter, SLOT_ADMISSIONS};

pub struct AdmissionStore {
    admissions: Vec<Admission>,
    storage: Arc<dyn StorageAdapter>,
    ids: Arc<dyn IdGenerator>,
    beds: Vec<String>,
}

impl AdmissionStore {
    pub fn new(storage: Arc<dyn StorageAdapter>, ids: Arc<dyn IdGenerator>) -> Self {
        Self::with_beds(storage, ids, TOTAL_BEDS)
    }

    /// Store over a ward of `total_beds` beds (tests use small wards).
    pub fn with_beds(
        storage: Arc<dyn StorageAdapter>,
        ids: Arc<dyn IdGenerator>,
        total_beds: usize,
    ) -> Self {
        let admissions = load_collection(storage.as_ref(), SLOT_ADMISSIONS, Vec::new);
        Self {
            admissions,
            storage,
            ids,
            beds: bed_pool(total_beds),
        }
    }

    fn persist(&self) {
        persist_collection(self.storage.as_ref(), SLOT_ADMISSIONS, &self.admissions);
    }

    pub fn list(&self) -> Vec<Admission> {
        let mut items = self.admissions.clone();
        items.sort_by(|a, b| b.from_date.cmp(&a.from_date));
        items
    }

    pub fn get(&self, id: &str) -> Option<&Admission> {
        self.admissions.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.admissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admissions.is_empty()
    }

    /// Whether any admission (any status) records this patient.
    /// Exact name match — records are denormalized by name.
    pub fn has_patient(&self, patient_name: &str) -> bool {
        self.admissions
            .iter()
            .any(|a| a.patient_name == patient_name)
    }

    /// The fixed bed pool this ward offers.
    pub fn beds(&self) -> &[String] {
        &self.beds
    }

    /// Bed number → occupying admission, for every bed with an active
    /// admission today.
    pub fn occupied_beds(&self, today: NaiveDate) -> BTreeMap<String, Admission> {
        let mut occupied = BTreeMap::new();
        for admission in &self.admissions {
            if admission.is_active(today) {
                occupied.insert(admission.bed_no.clone(), admission.clone());
            }
        }
        occupied
    }

    /// Pool minus beds with an active, non-discharged admission.
    pub fn available_beds(&self, today: NaiveDate) -> Vec<String> {
        let occupied = self.occupied_beds(today);
        self.beds
            .iter()
            .filter(|bed| !occupied.contains_key(*bed))
            .cloned()
            .collect()
    }

    /// Admit a patient. Rejects when the chosen bed is not in the
    /// currently computed available list (occupied or not in the pool).
    pub fn admit(&mut self, form: NewAdmission) -> Result<Admission, StoreError> {
        self.admit_on(form, Local::now().date_naive())
    }

    /// Admit with an explicit "today" (tests).
    pub fn admit_on(&mut self, form: NewAdmission, today: NaiveDate) -> Result<Admission, StoreError> {
        if !self.available_beds(today).contains(&form.bed_no) {
            return Err(StoreError::BedUnavailable { bed_no: form.bed_no });
        }

        let admission = Admission {
            id: self.ids.next_id(),
            patient_name: form.patient_name,
            age: form.age,
            gender: form.gender,
            symptoms: form.symptoms.join(", "),
            bed_no: form.bed_no,
            from_date: form.from_date,
            to_date: form.to_date,
            status: AdmissionStatus::Admitted,
            admitting_doctor: form.admitting_doctor,
        };
        tracing::info!(id = %admission.id, bed = %admission.bed_no, "Admitted patient");
        self.admissions.push(admission.clone());
        self.persist();
        Ok(admission)
    }

    /// Merge a patch. A bed change re-runs the availability check.
    pub fn update(&mut self, id: &str, patch: AdmissionPatch) -> Result<Admission, StoreError> {
        self.update_on(id, patch, Local::now().date_naive())
    }

    pub fn update_on(
        &mut self,
        id: &str,
        patch: AdmissionPatch,
        today: NaiveDate,
    ) -> Result<Admission, StoreError> {
        let position = self
            .admissions
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Admission",
                id: id.to_string(),
            })?;

        let current_bed = self.admissions[position].bed_no.clone();
        let mut updated = self.admissions[position].clone();
        patch.apply(&mut updated);
        if updated.bed_no != current_bed && !self.available_beds(today).contains(&updated.bed_no) {
            return Err(StoreError::BedUnavailable {
                bed_no: updated.bed_no,
            });
        }

        self.admissions[position] = updated.clone();
        self.persist();
        Ok(updated)
    }

    /// Discharge: status change plus a discharge date; the bed becomes
    /// available immediately.
    pub fn discharge(&mut self, id: &str) -> Result<Admission, StoreError> {
        self.discharge_on(id, Local::now().date_naive())
    }

    pub fn discharge_on(&mut self, id: &str, today: NaiveDate) -> Result<Admission, StoreError> {
        self.update_on(
            id,
            AdmissionPatch {
                status: Some(AdmissionStatus::Discharged),
                to_date: Some(today),
                ..Default::default()
            },
            today,
        )
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.admissions.len();
        self.admissions.retain(|a| a.id != id);
        if self.admissions.len() == before {
            return Err(StoreError::NotFound {
                entity: "Admission",
                id: id.to_string(),
            });
        }
        self.persist();
        Ok(())
    }

    pub fn search(&self, filter: &AdmissionFilter, today: NaiveDate) -> Vec<Admission> {
        self.list()
            .into_iter()
            .filter(|a| !filter.active_only || a.is_active(today))
            .filter(|a| filter.bed_no.as_deref().map_or(true, |bed| a.bed_no == bed))
            .collect()
    }
}
