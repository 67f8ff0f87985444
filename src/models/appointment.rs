use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{AppointmentStatus, Gender};

/// A booked appointment. Symptoms are stored comma-joined, matching
/// the JSON layout the original front desk kept in browser storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    pub age: u8,
    pub gender: Gender,
    pub phone: String,
    pub symptoms: String,
    pub date: NaiveDate,
    /// Slot time, "HH:MM".
    pub time: String,
    pub department: String,
    pub doctor: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub booked_at: DateTime<Utc>,
}

impl Appointment {
    /// Split the comma-joined symptoms back into a list.
    pub fn symptom_list(&self) -> Vec<&str> {
        self.symptoms
            .split(", ")
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Exact slot match: same calendar date and same time string,
    /// regardless of doctor.
    pub fn occupies_slot(&self, date: NaiveDate, time: &str) -> bool {
        self.date == date && self.time == time
    }
}

/// Booking request — everything but the store-assigned id and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_name: String,
    pub age: u8,
    pub gender: Gender,
    pub phone: String,
    pub symptoms: Vec<String>,
    pub date: NaiveDate,
    pub time: String,
    pub department: String,
    pub doctor: String,
    pub notes: Option<String>,
}

/// Partial update merged into an existing appointment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    pub patient_name: Option<String>,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub symptoms: Option<Vec<String>>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub department: Option<String>,
    pub doctor: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

impl AppointmentPatch {
    pub fn apply(self, appointment: &mut Appointment) {
        if let Some(v) = self.patient_name {
            appointment.patient_name = v;
        }
        if let Some(v) = self.age {
            appointment.age = v;
        }
        if let Some(v) = self.gender {
            appointment.gender = v;
        }
        if let Some(v) = self.phone {
            appointment.phone = v;
        }
        if let Some(v) = self.symptoms {
            appointment.symptoms = v.join(", ");
        }
        if let Some(v) = self.date {
            appointment.date = v;
        }
        if let Some(v) = self.time {
            appointment.time = v;
        }
        if let Some(v) = self.department {
            appointment.department = v;
        }
        if let Some(v) = self.doctor {
            appointment.doctor = v;
        }
        if let Some(v) = self.status {
            appointment.status = v;
        }
        if let Some(v) = self.notes {
            appointment.notes = Some(v);
        }
    }
}
