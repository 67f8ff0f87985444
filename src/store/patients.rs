//! Patient store: registration with duplicate-contact checks, search,
//! and the demographics statistics on the patients screen.

use std::sync::Arc;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{load_collection, persist_collection, StoreError};
use crate::ids::IdGenerator;
use crate::models::enums::Gender;
use crate::models::{NewPatient, Patient, PatientFilter, PatientPatch};
use crate::storage::{StorageAdapter, SLOT_PATIENTS};

/// Demographics summary for the patients dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientStats {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub other: usize,
    pub new_this_week: usize,
}

pub struct PatientStore {
    patients: Vec<Patient>,
    storage: Arc<dyn StorageAdapter>,
    ids: Arc<dyn IdGenerator>,
}

impl PatientStore {
    pub fn new(storage: Arc<dyn StorageAdapter>, ids: Arc<dyn IdGenerator>) -> Self {
        let patients = load_collection(storage.as_ref(), SLOT_PATIENTS, Vec::new);
        Self {
            patients,
            storage,
            ids,
        }
    }

    fn persist(&self) {
        persist_collection(self.storage.as_ref(), SLOT_PATIENTS, &self.patients);
    }

    /// All patients, most recently registered first.
    pub fn list(&self) -> Vec<Patient> {
        let mut items = self.patients.clone();
        items.sort_by(|a, b| {
            (b.registered_date, b.registered_time.as_str())
                .cmp(&(a.registered_date, a.registered_time.as_str()))
        });
        items
    }

    pub fn get(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Soft uniqueness check: any patient (other than `exclude`)
    /// sharing the phone number or email.
    pub fn has_duplicate(&self, phone: &str, email: &str, exclude: Option<&str>) -> bool {
        self.patients
            .iter()
            .filter(|p| exclude != Some(p.id.as_str()))
            .any(|p| p.shares_contact(phone, email))
    }

    /// Register a patient, stamping the current date and time.
    pub fn add(&mut self, form: NewPatient) -> Result<Patient, StoreError> {
        let now = Local::now();
        self.add_at(form, now.date_naive(), now.format("%H:%M").to_string())
    }

    /// Register with an explicit registration timestamp (tests).
    pub fn add_at(
        &mut self,
        form: NewPatient,
        registered_date: NaiveDate,
        registered_time: String,
    ) -> Result<Patient, StoreError> {
        if self.has_duplicate(&form.phone, &form.email, None) {
            return Err(StoreError::DuplicatePatient);
        }

        let patient = Patient {
            id: self.ids.next_id(),
            patient_name: form.patient_name,
            age: form.age,
            gender: form.gender,
            dob: form.dob,
            blood_group: form.blood_group,
            phone: form.phone,
            alternate_phone: form.alternate_phone,
            email: form.email,
            address: form.address,
            symptoms: form.symptoms.join(", "),
            profession: form.profession,
            medical_history: form.medical_history,
            allergies: form.allergies,
            name_of_kin: form.name_of_kin,
            kin_contact: form.kin_contact,
            department: form.department,
            registered_date,
            registered_time,
        };
        tracing::info!(id = %patient.id, name = %patient.patient_name, "Registered patient");
        self.patients.push(patient.clone());
        self.persist();
        Ok(patient)
    }

    /// Merge a patch, re-checking contact uniqueness against every
    /// other patient.
    pub fn update(&mut self, id: &str, patch: PatientPatch) -> Result<Patient, StoreError> {
        let position = self
            .patients
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Patient",
                id: id.to_string(),
            })?;

        let mut updated = self.patients[position].clone();
        patch.apply(&mut updated);
        if self.has_duplicate(&updated.phone, &updated.email, Some(id)) {
            return Err(StoreError::DuplicatePatient);
        }

        self.patients[position] = updated.clone();
        self.persist();
        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> Result<Patient, StoreError> {
        let position = self
            .patients
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Patient",
                id: id.to_string(),
            })?;
        let removed = self.patients.remove(position);
        self.persist();
        Ok(removed)
    }

    /// Filtered listing by name, phone, or email.
    pub fn search(&self, filter: &PatientFilter) -> Vec<Patient> {
        let needle = filter.search.as_deref().map(str::to_lowercase);
        self.list()
            .into_iter()
            .filter(|p| {
                needle.as_deref().map_or(true, |q| {
                    p.patient_name.to_lowercase().contains(q)
                        || p.phone.contains(q)
                        || p.email.to_lowercase().contains(q)
                })
            })
            .collect()
    }

    pub fn stats(&self) -> PatientStats {
        self.stats_on(Local::now().date_naive())
    }

    /// Stats with an explicit "today" (tests). New-this-week counts
    /// registrations within the last seven days.
    pub fn stats_on(&self, today: NaiveDate) -> PatientStats {
        let week_ago = today.checked_sub_days(Days::new(7)).unwrap_or(today);
        let mut stats = PatientStats {
            total: self.patients.len(),
            ..Default::default()
        };
        for p in &self.patients {
            match p.gender {
                Gender::Male => stats.male += 1,
                Gender::Female => stats.female += 1,
                Gender::Other => stats.other += 1,
            }
            if p.registered_date > week_ago && p.registered_date <= today {
                stats.new_this_week += 1;
            }
        }
        stats
    }
}
