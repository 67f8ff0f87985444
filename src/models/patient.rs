use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{BloodGroup, Gender};

/// A registered patient record.
///
/// Demographics, contact, medical, and emergency-contact sections mirror
/// the registration form. Unique by phone or email — a soft constraint
/// the store checks at write time, not enforced by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub patient_name: String,
    pub age: u8,
    pub gender: Gender,
    pub dob: NaiveDate,
    pub blood_group: BloodGroup,
    pub phone: String,
    pub alternate_phone: Option<String>,
    pub email: String,
    pub address: Option<String>,
    pub symptoms: String,
    pub profession: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub name_of_kin: Option<String>,
    pub kin_contact: Option<String>,
    pub department: String,
    pub registered_date: NaiveDate,
    /// Registration wall-clock time, "HH:MM".
    pub registered_time: String,
}

impl Patient {
    pub fn symptom_list(&self) -> Vec<&str> {
        self.symptoms
            .split(", ")
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Same phone or same email as the given contact details.
    pub fn shares_contact(&self, phone: &str, email: &str) -> bool {
        self.phone == phone || self.email.eq_ignore_ascii_case(email)
    }
}

/// Registration form payload — the store assigns id and registration
/// timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub patient_name: String,
    pub age: u8,
    pub gender: Gender,
    pub dob: NaiveDate,
    pub blood_group: BloodGroup,
    pub phone: String,
    pub alternate_phone: Option<String>,
    pub email: String,
    pub address: Option<String>,
    pub symptoms: Vec<String>,
    pub profession: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub name_of_kin: Option<String>,
    pub kin_contact: Option<String>,
    pub department: String,
}

/// Partial update merged into an existing patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPatch {
    pub patient_name: Option<String>,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub dob: Option<NaiveDate>,
    pub blood_group: Option<BloodGroup>,
    pub phone: Option<String>,
    pub alternate_phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub symptoms: Option<Vec<String>>,
    pub profession: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub name_of_kin: Option<String>,
    pub kin_contact: Option<String>,
    pub department: Option<String>,
}

impl PatientPatch {
    pub fn apply(self, patient: &mut Patient) {
        if let Some(v) = self.patient_name {
            patient.patient_name = v;
        }
        if let Some(v) = self.age {
            patient.age = v;
        }
        if let Some(v) = self.gender {
            patient.gender = v;
        }
        if let Some(v) = self.dob {
            patient.dob = v;
        }
        if let Some(v) = self.blood_group {
            patient.blood_group = v;
        }
        if let Some(v) = self.phone {
            patient.phone = v;
        }
        if let Some(v) = self.alternate_phone {
            patient.alternate_phone = Some(v);
        }
        if let Some(v) = self.email {
            patient.email = v;
        }
        if let Some(v) = self.address {
            patient.address = Some(v);
        }
        if let Some(v) = self.symptoms {
            patient.symptoms = v.join(", ");
        }
        if let Some(v) = self.profession {
            patient.profession = Some(v);
        }
        if let Some(v) = self.medical_history {
            patient.medical_history = Some(v);
        }
        if let Some(v) = self.allergies {
            patient.allergies = Some(v);
        }
        if let Some(v) = self.name_of_kin {
            patient.name_of_kin = Some(v);
        }
        if let Some(v) = self.kin_contact {
            patient.kin_contact = Some(v);
        }
        if let Some(v) = self.department {
            patient.department = v;
        }
    }
}
