use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{AdmissionStatus, Gender};

/// A bed admission. Patient fields are a denormalized copy taken at
/// admission time, not a reference into the patient store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    pub id: String,
    pub patient_name: String,
    pub age: u8,
    pub gender: Gender,
    pub symptoms: String,
    pub bed_no: String,
    pub from_date: NaiveDate,
    pub to_date: Option<NaiveDate>,
    pub status: AdmissionStatus,
    pub admitting_doctor: String,
}

impl Admission {
    /// Whether this admission holds its bed on the given day: not
    /// discharged, and the to-date (when set) has not passed.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.status != AdmissionStatus::Discharged
            && self.to_date.map_or(true, |to| to >= today)
    }
}

/// Admission form payload — the store assigns id and sets status
/// to Admitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdmission {
    pub patient_name: String,
    pub age: u8,
    pub gender: Gender,
    pub symptoms: Vec<String>,
    pub bed_no: String,
    pub from_date: NaiveDate,
    pub to_date: Option<NaiveDate>,
    pub admitting_doctor: String,
}

/// Partial update merged into an existing admission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionPatch {
    pub patient_name: Option<String>,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub symptoms: Option<Vec<String>>,
    pub bed_no: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub status: Option<AdmissionStatus>,
    pub admitting_doctor: Option<String>,
}

impl AdmissionPatch {
    pub fn apply(self, admission: &mut Admission) {
        if let Some(v) = self.patient_name {
            admission.patient_name = v;
        }
        if let Some(v) = self.age {
            admission.age = v;
        }
        if let Some(v) = self.gender {
            admission.gender = v;
        }
        if let Some(v) = self.symptoms {
            admission.symptoms = v.join(", ");
        }
        if let Some(v) = self.bed_no {
            admission.bed_no = v;
        }
        if let Some(v) = self.from_date {
            admission.from_date = v;
        }
        if let Some(v) = self.to_date {
            admission.to_date = Some(v);
        }
        if let Some(v) = self.status {
            admission.status = v;
        }
        if let Some(v) = self.admitting_doctor {
            admission.admitting_doctor = v;
        }
    }
}
