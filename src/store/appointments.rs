//! Appointment store: booking, slot-conflict checks, status flow,
//! and the dashboard statistics the receptionist screens render.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{load_collection, persist_collection, StoreError};
use crate::ids::IdGenerator;
use crate::models::enums::{AppointmentStatus, Gender};
use crate::models::{Appointment, AppointmentFilter, AppointmentPatch, NewAppointment};
use crate::storage::{StorageAdapter, SLOT_APPOINTMENTS};

/// Status breakdown for the appointments dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentStats {
    pub total: usize,
    pub pending: usize,
    pub doctor: usize,
    pub completed: usize,
    pub cancelled: usize,
}

pub struct AppointmentStore {
    appointments: Vec<Appointment>,
    storage: Arc<dyn StorageAdapter>,
    ids: Arc<dyn IdGenerator>,
}

impl AppointmentStore {
    /// Load the store from its slot. A never-written slot falls back
    /// to the demo seed bookings the original front desk shipped with.
    pub fn new(storage: Arc<dyn StorageAdapter>, ids: Arc<dyn IdGenerator>) -> Self {
        let appointments = load_collection(storage.as_ref(), SLOT_APPOINTMENTS, seed_appointments);
        Self {
            appointments,
            storage,
            ids,
        }
    }

    fn persist(&self) {
        persist_collection(self.storage.as_ref(), SLOT_APPOINTMENTS, &self.appointments);
    }

    /// All appointments, newest slot first.
    pub fn list(&self) -> Vec<Appointment> {
        let mut items = self.appointments.clone();
        items.sort_by(|a, b| (b.date, b.time.as_str()).cmp(&(a.date, a.time.as_str())));
        items
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// Whether any appointment (any status) records this patient.
    /// Exact name match — records are denormalized by name.
    pub fn has_patient(&self, patient_name: &str) -> bool {
        self.appointments
            .iter()
            .any(|a| a.patient_name == patient_name)
    }

    /// Whether an appointment (other than `exclude`) already occupies
    /// the exact date+time slot, regardless of doctor.
    pub fn slot_taken(&self, date: NaiveDate, time: &str, exclude: Option<&str>) -> bool {
        self.appointments
            .iter()
            .filter(|a| exclude != Some(a.id.as_str()))
            .any(|a| a.occupies_slot(date, time))
    }

    /// Book an appointment. Rejects when the slot is already taken.
    pub fn add(&mut self, form: NewAppointment) -> Result<Appointment, StoreError> {
        if self.slot_taken(form.date, &form.time, None) {
            return Err(StoreError::SlotTaken {
                date: form.date,
                time: form.time,
            });
        }

        let appointment = Appointment {
            id: self.ids.next_id(),
            patient_name: form.patient_name,
            age: form.age,
            gender: form.gender,
            phone: form.phone,
            symptoms: form.symptoms.join(", "),
            date: form.date,
            time: form.time,
            department: form.department,
            doctor: form.doctor,
            status: AppointmentStatus::Confirmed,
            notes: form.notes,
            booked_at: Utc::now(),
        };
        tracing::info!(id = %appointment.id, date = %appointment.date, time = %appointment.time, "Booked appointment");
        self.appointments.push(appointment.clone());
        self.persist();
        Ok(appointment)
    }

    /// Merge a patch into the matching appointment. A date/time change
    /// re-runs the slot check against every other appointment.
    pub fn update(&mut self, id: &str, patch: AppointmentPatch) -> Result<Appointment, StoreError> {
        let position = self
            .appointments
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Appointment",
                id: id.to_string(),
            })?;

        let mut updated = self.appointments[position].clone();
        patch.apply(&mut updated);
        if self.slot_taken(updated.date, &updated.time, Some(id)) {
            return Err(StoreError::SlotTaken {
                date: updated.date,
                time: updated.time,
            });
        }

        self.appointments[position] = updated.clone();
        self.persist();
        Ok(updated)
    }

    /// Cancel is a status change, never a removal.
    pub fn cancel(&mut self, id: &str) -> Result<Appointment, StoreError> {
        self.set_status(id, AppointmentStatus::Cancelled)
    }

    pub fn set_status(
        &mut self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment, StoreError> {
        self.update(
            id,
            AppointmentPatch {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    /// Hard delete. Kept alongside cancel because the original exposes
    /// both; cancel is the documented path.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.appointments.len();
        self.appointments.retain(|a| a.id != id);
        if self.appointments.len() == before {
            return Err(StoreError::NotFound {
                entity: "Appointment",
                id: id.to_string(),
            });
        }
        self.persist();
        Ok(())
    }

    /// Filtered listing, newest slot first.
    pub fn search(&self, filter: &AppointmentFilter) -> Vec<Appointment> {
        let needle = filter.search.as_deref().map(str::to_lowercase);
        let mut items: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|a| filter.status.map_or(true, |s| a.status == s))
            .filter(|a| filter.date.map_or(true, |d| a.date == d))
            .filter(|a| {
                needle.as_deref().map_or(true, |q| {
                    a.patient_name.to_lowercase().contains(q)
                        || a.phone.contains(q)
                        || a.doctor.to_lowercase().contains(q)
                })
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| (b.date, b.time.as_str()).cmp(&(a.date, a.time.as_str())));
        items
    }

    pub fn stats(&self) -> AppointmentStats {
        let mut stats = AppointmentStats {
            total: self.appointments.len(),
            ..Default::default()
        };
        for a in &self.appointments {
            match a.status {
                AppointmentStatus::Pending => stats.pending += 1,
                AppointmentStatus::Doctor => stats.doctor += 1,
                AppointmentStatus::Completed => stats.completed += 1,
                AppointmentStatus::Cancelled => stats.cancelled += 1,
                AppointmentStatus::Confirmed => {}
            }
        }
        stats
    }

    /// Appointments falling on the given day.
    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.appointments.iter().filter(|a| a.date == date).count()
    }

    pub fn count_today(&self) -> usize {
        self.count_on(Local::now().date_naive())
    }
}

/// The three demo bookings the original dashboard seeds on first run.
fn seed_appointments() -> Vec<Appointment> {
    let booked_at = Utc::now();
    let seed = |id: &str, name: &str, symptoms: &str, date: (i32, u32, u32), time: &str, status| {
        Appointment {
            id: id.to_string(),
            patient_name: name.to_string(),
            age: 45,
            gender: Gender::Male,
            phone: String::new(),
            symptoms: symptoms.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
            time: time.to_string(),
            department: "Cardiology".to_string(),
            doctor: "Dr. Pranjal Patil".to_string(),
            status,
            notes: None,
            booked_at,
        }
    };
    vec![
        seed(
            "1",
            "Aarav Patel",
            "Chest Pain, Shortness of Breath",
            (2025, 1, 20),
            "10:00",
            AppointmentStatus::Confirmed,
        ),
        seed(
            "2",
            "Aanya Sharma",
            "Palpitations, Dizziness",
            (2025, 1, 20),
            "11:00",
            AppointmentStatus::Pending,
        ),
        seed(
            "3",
            "Arjun Singh",
            "High Blood Pressure",
            (2025, 1, 21),
            "09:00",
            AppointmentStatus::Completed,
        ),
    ]
}
