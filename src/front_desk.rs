//! The front-desk service: the single injectable state container the
//! UI shell talks to.
//!
//! Owns the three entity stores and runs every operation through the
//! shared validators and conflict checks before a store mutates. The
//! original kept these as ambient per-page context objects; here the
//! container is constructed explicitly from a storage adapter and an
//! id generator so tests can swap both.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ids::{ClockIds, IdGenerator};
use crate::models::enums::AppointmentStatus;
use crate::models::{
    Admission, AdmissionFilter, AdmissionPatch, Appointment, AppointmentFilter, AppointmentPatch,
    NewAdmission, NewAppointment, NewPatient, Patient, PatientFilter, PatientPatch,
};
use crate::storage::{FileStorage, StorageAdapter, StorageError};
use crate::store::{
    AdmissionStore, AppointmentStore, AppointmentStats, PatientStore, PatientStats, StoreError,
};
use crate::validate::{
    validate_new_admission, validate_new_appointment, validate_new_patient, validate_patient,
    FieldErrors,
};

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

/// Errors from front-desk operations. All are synchronous, user-facing,
/// and leave every store unchanged.
#[derive(Debug, thiserror::Error)]
pub enum FrontDeskError {
    #[error("Invalid form fields: {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
    Validation(FieldErrors),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Cannot delete patient {name} with existing appointments or admissions")]
    PatientHasRecords { name: String },
}

impl FrontDeskError {
    /// The field → message map for inline form rendering, when this is
    /// a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

fn check(errors: FieldErrors) -> Result<(), FrontDeskError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FrontDeskError::Validation(errors))
    }
}

// ═══════════════════════════════════════════════════════════
// View types
// ═══════════════════════════════════════════════════════════

/// One bed in the occupancy overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedSlot {
    pub bed_no: String,
    pub admission: Option<Admission>,
}

/// Per-bed occupancy for the bed view screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedOverview {
    pub beds: Vec<BedSlot>,
    pub available: usize,
    pub occupied: usize,
}

/// Aggregated counters for the dashboard landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub appointments: AppointmentStats,
    pub patients: PatientStats,
    pub todays_appointments: usize,
    pub occupied_beds: usize,
    pub available_beds: usize,
}

// ═══════════════════════════════════════════════════════════
// FrontDesk
// ═══════════════════════════════════════════════════════════

pub struct FrontDesk {
    appointments: AppointmentStore,
    patients: PatientStore,
    admissions: AdmissionStore,
}

impl FrontDesk {
    /// Open the front desk over the default on-disk storage.
    pub fn open_default() -> Result<Self, StorageError> {
        let storage: Arc<dyn StorageAdapter> = Arc::new(FileStorage::open_default()?);
        Ok(Self::new(storage, Arc::new(ClockIds::new())))
    }

    /// Build the container from explicit parts.
    pub fn new(storage: Arc<dyn StorageAdapter>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            appointments: AppointmentStore::new(Arc::clone(&storage), Arc::clone(&ids)),
            patients: PatientStore::new(Arc::clone(&storage), Arc::clone(&ids)),
            admissions: AdmissionStore::new(storage, ids),
        }
    }

    // ── Read access ─────────────────────────────────────────

    pub fn appointments(&self) -> &AppointmentStore {
        &self.appointments
    }

    pub fn patients(&self) -> &PatientStore {
        &self.patients
    }

    pub fn admissions(&self) -> &AdmissionStore {
        &self.admissions
    }

    pub fn search_appointments(&self, filter: &AppointmentFilter) -> Vec<Appointment> {
        self.appointments.search(filter)
    }

    pub fn search_patients(&self, filter: &PatientFilter) -> Vec<Patient> {
        self.patients.search(filter)
    }

    pub fn search_admissions(&self, filter: &AdmissionFilter) -> Vec<Admission> {
        self.admissions.search(filter, Local::now().date_naive())
    }

    // ── Appointments ────────────────────────────────────────

    /// Validate and book. The slot-conflict check runs inside the
    /// store, against the exact date+time regardless of doctor.
    pub fn book_appointment(&mut self, form: NewAppointment) -> Result<Appointment, FrontDeskError> {
        self.book_appointment_on(form, Local::now().date_naive())
    }

    /// Book with an explicit "today" for the not-in-past check (tests).
    pub fn book_appointment_on(
        &mut self,
        form: NewAppointment,
        today: NaiveDate,
    ) -> Result<Appointment, FrontDeskError> {
        check(validate_new_appointment(&form, today))?;
        Ok(self.appointments.add(form)?)
    }

    pub fn update_appointment(
        &mut self,
        id: &str,
        patch: AppointmentPatch,
    ) -> Result<Appointment, FrontDeskError> {
        Ok(self.appointments.update(id, patch)?)
    }

    pub fn cancel_appointment(&mut self, id: &str) -> Result<Appointment, FrontDeskError> {
        Ok(self.appointments.cancel(id)?)
    }

    pub fn set_appointment_status(
        &mut self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment, FrontDeskError> {
        Ok(self.appointments.set_status(id, status)?)
    }

    pub fn delete_appointment(&mut self, id: &str) -> Result<(), FrontDeskError> {
        Ok(self.appointments.delete(id)?)
    }

    // ── Patients ────────────────────────────────────────────

    /// Validate and register. Duplicate phone/email rejection happens
    /// inside the store.
    pub fn register_patient(&mut self, form: NewPatient) -> Result<Patient, FrontDeskError> {
        check(validate_new_patient(&form, Local::now().date_naive()))?;
        Ok(self.patients.add(form)?)
    }

    /// Register with an explicit "today" for the DOB cross-check (tests).
    pub fn register_patient_on(
        &mut self,
        form: NewPatient,
        today: NaiveDate,
    ) -> Result<Patient, FrontDeskError> {
        check(validate_new_patient(&form, today))?;
        Ok(self
            .patients
            .add_at(form, today, Local::now().format("%H:%M").to_string())?)
    }

    /// Merge a patch, then re-validate the resulting record before it
    /// is written.
    pub fn update_patient(
        &mut self,
        id: &str,
        patch: PatientPatch,
    ) -> Result<Patient, FrontDeskError> {
        self.update_patient_on(id, patch, Local::now().date_naive())
    }

    pub fn update_patient_on(
        &mut self,
        id: &str,
        patch: PatientPatch,
        today: NaiveDate,
    ) -> Result<Patient, FrontDeskError> {
        let current = self
            .patients
            .get(id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Patient",
                id: id.to_string(),
            })?;
        let mut preview = current.clone();
        patch.clone().apply(&mut preview);
        check(validate_patient(&preview, today))?;
        Ok(self.patients.update(id, patch)?)
    }

    /// Delete is rejected with no state change while any appointment
    /// or admission records the patient.
    pub fn delete_patient(&mut self, id: &str) -> Result<Patient, FrontDeskError> {
        let name = self
            .patients
            .get(id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Patient",
                id: id.to_string(),
            })?
            .patient_name
            .clone();

        if self.appointments.has_patient(&name) || self.admissions.has_patient(&name) {
            return Err(FrontDeskError::PatientHasRecords { name });
        }
        Ok(self.patients.delete(id)?)
    }

    // ── Admissions ──────────────────────────────────────────

    /// Validate and admit. The bed must be in the currently computed
    /// available list.
    pub fn admit_patient(&mut self, form: NewAdmission) -> Result<Admission, FrontDeskError> {
        self.admit_patient_on(form, Local::now().date_naive())
    }

    pub fn admit_patient_on(
        &mut self,
        form: NewAdmission,
        today: NaiveDate,
    ) -> Result<Admission, FrontDeskError> {
        check(validate_new_admission(&form, today))?;
        Ok(self.admissions.admit_on(form, today)?)
    }

    pub fn update_admission(
        &mut self,
        id: &str,
        patch: AdmissionPatch,
    ) -> Result<Admission, FrontDeskError> {
        Ok(self.admissions.update(id, patch)?)
    }

    pub fn discharge(&mut self, id: &str) -> Result<Admission, FrontDeskError> {
        Ok(self.admissions.discharge(id)?)
    }

    pub fn discharge_on(&mut self, id: &str, today: NaiveDate) -> Result<Admission, FrontDeskError> {
        Ok(self.admissions.discharge_on(id, today)?)
    }

    // ── Dashboard queries ───────────────────────────────────

    pub fn bed_overview(&self) -> BedOverview {
        self.bed_overview_on(Local::now().date_naive())
    }

    pub fn bed_overview_on(&self, today: NaiveDate) -> BedOverview {
        let occupied = self.admissions.occupied_beds(today);
        let beds: Vec<BedSlot> = self
            .admissions
            .beds()
            .iter()
            .map(|bed_no| BedSlot {
                bed_no: bed_no.clone(),
                admission: occupied.get(bed_no).cloned(),
            })
            .collect();
        let occupied_count = beds.iter().filter(|b| b.admission.is_some()).count();
        BedOverview {
            available: beds.len() - occupied_count,
            occupied: occupied_count,
            beds,
        }
    }

    pub fn dashboard(&self) -> DashboardSummary {
        self.dashboard_on(Local::now().date_naive())
    }

    pub fn dashboard_on(&self, today: NaiveDate) -> DashboardSummary {
        let overview = self.bed_overview_on(today);
        DashboardSummary {
            appointments: self.appointments.stats(),
            patients: self.patients.stats_on(today),
            todays_appointments: self.appointments.count_on(today),
            occupied_beds: overview.occupied,
            available_beds: overview.available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    use crate::ids::SequenceIds;
    use crate::models::enums::{BloodGroup, Gender};
    use crate::storage::{MemoryStorage, SLOT_APPOINTMENTS};

    /// A front desk over empty in-memory storage (no seed bookings).
    fn front_desk() -> FrontDesk {
        let storage = Arc::new(MemoryStorage::new().with_slot(SLOT_APPOINTMENTS, "[]"));
        FrontDesk::new(storage, Arc::new(SequenceIds::new()))
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn patient_form(name: &str, phone: &str, email: &str, today: NaiveDate) -> NewPatient {
        NewPatient {
            patient_name: name.into(),
            age: 30,
            gender: Gender::Female,
            dob: day(today.year() - 30, 3, 14),
            blood_group: BloodGroup::OPositive,
            phone: phone.into(),
            alternate_phone: None,
            email: email.into(),
            address: None,
            symptoms: vec!["Palpitations".into()],
            profession: None,
            medical_history: None,
            allergies: None,
            name_of_kin: None,
            kin_contact: None,
            department: "Cardiology".into(),
        }
    }

    fn booking(name: &str, date: NaiveDate, time: &str) -> NewAppointment {
        NewAppointment {
            patient_name: name.into(),
            age: 30,
            gender: Gender::Female,
            phone: "9876543210".into(),
            symptoms: vec!["Palpitations".into()],
            date,
            time: time.into(),
            department: "Cardiology".into(),
            doctor: "Dr. Pranjal Patil".into(),
            notes: None,
        }
    }

    fn admission_form(name: &str, bed: &str, from: NaiveDate) -> NewAdmission {
        NewAdmission {
            patient_name: name.into(),
            age: 30,
            gender: Gender::Female,
            symptoms: vec!["Palpitations".into()],
            bed_no: bed.into(),
            from_date: from,
            to_date: None,
            admitting_doctor: "Dr. Pranjal Patil".into(),
        }
    }

    #[test]
    fn invalid_booking_form_reports_fields() {
        let mut desk = front_desk();
        let today = day(2025, 6, 1);
        let mut form = booking("Aanya Sharma", day(2025, 6, 10), "10:00");
        form.phone = "12345".into();
        let err = desk.book_appointment_on(form, today).unwrap_err();
        let fields = err.field_errors().expect("validation error");
        assert!(fields.contains_key("phone"));
        assert!(desk.appointments().is_empty());
    }

    #[test]
    fn second_booking_for_same_slot_is_rejected() {
        let mut desk = front_desk();
        let today = day(2025, 5, 1);
        let slot_date = day(2025, 6, 1);
        desk.book_appointment_on(booking("Aanya Sharma", slot_date, "10:00"), today)
            .unwrap();
        let err = desk
            .book_appointment_on(booking("Aarav Patel", slot_date, "10:00"), today)
            .unwrap_err();
        assert!(matches!(
            err,
            FrontDeskError::Store(StoreError::SlotTaken { .. })
        ));
        assert_eq!(desk.appointments().len(), 1);
    }

    #[test]
    fn duplicate_patient_registration_is_rejected() {
        let mut desk = front_desk();
        let today = day(2025, 6, 1);
        desk.register_patient_on(
            patient_form("Aanya Sharma", "9876543210", "aanya@example.com", today),
            today,
        )
        .unwrap();
        let err = desk
            .register_patient_on(
                patient_form("Someone Else", "9876543210", "other@example.com", today),
                today,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            FrontDeskError::Store(StoreError::DuplicatePatient)
        ));
    }

    #[test]
    fn patient_update_is_validated_before_write() {
        let mut desk = front_desk();
        let today = day(2025, 6, 1);
        let p = desk
            .register_patient_on(
                patient_form("Aanya Sharma", "9876543210", "aanya@example.com", today),
                today,
            )
            .unwrap();
        let err = desk
            .update_patient_on(
                &p.id,
                PatientPatch {
                    email: Some("not-an-email".into()),
                    ..Default::default()
                },
                today,
            )
            .unwrap_err();
        assert!(err.field_errors().is_some());
        assert_eq!(desk.patients().get(&p.id).unwrap().email, "aanya@example.com");
    }

    #[test]
    fn delete_patient_with_appointment_is_rejected() {
        let mut desk = front_desk();
        let today = day(2025, 6, 1);
        let p = desk
            .register_patient_on(
                patient_form("Aanya Sharma", "9876543210", "aanya@example.com", today),
                today,
            )
            .unwrap();
        desk.book_appointment_on(booking("Aanya Sharma", day(2025, 6, 10), "10:00"), today)
            .unwrap();

        let err = desk.delete_patient(&p.id).unwrap_err();
        assert!(matches!(err, FrontDeskError::PatientHasRecords { .. }));
        assert_eq!(desk.patients().len(), 1);
    }

    #[test]
    fn delete_patient_with_admission_is_rejected_even_after_discharge() {
        let mut desk = front_desk();
        let today = day(2025, 6, 1);
        let p = desk
            .register_patient_on(
                patient_form("Aanya Sharma", "9876543210", "aanya@example.com", today),
                today,
            )
            .unwrap();
        let adm = desk
            .admit_patient_on(admission_form("Aanya Sharma", "B1", today), today)
            .unwrap();
        desk.discharge_on(&adm.id, today).unwrap();

        // The admission record still exists, so the guard still holds.
        let err = desk.delete_patient(&p.id).unwrap_err();
        assert!(matches!(err, FrontDeskError::PatientHasRecords { .. }));
    }

    #[test]
    fn delete_patient_without_records_succeeds() {
        let mut desk = front_desk();
        let today = day(2025, 6, 1);
        let p = desk
            .register_patient_on(
                patient_form("Aanya Sharma", "9876543210", "aanya@example.com", today),
                today,
            )
            .unwrap();
        desk.delete_patient(&p.id).unwrap();
        assert!(desk.patients().is_empty());
    }

    #[test]
    fn admit_to_occupied_bed_rejected_then_discharged_bed_accepted() {
        let mut desk = front_desk();
        let today = day(2025, 6, 1);
        let first = desk
            .admit_patient_on(admission_form("Aanya Sharma", "B1", today), today)
            .unwrap();

        let err = desk
            .admit_patient_on(admission_form("Aarav Patel", "B1", today), today)
            .unwrap_err();
        assert!(matches!(
            err,
            FrontDeskError::Store(StoreError::BedUnavailable { .. })
        ));

        desk.discharge_on(&first.id, today).unwrap();
        assert!(desk
            .admit_patient_on(admission_form("Aarav Patel", "B1", today), today)
            .is_ok());
    }

    #[test]
    fn bed_overview_tracks_occupancy() {
        let mut desk = front_desk();
        let today = day(2025, 6, 1);
        desk.admit_patient_on(admission_form("Aanya Sharma", "B3", today), today)
            .unwrap();

        let overview = desk.bed_overview_on(today);
        assert_eq!(overview.beds.len(), 20);
        assert_eq!(overview.occupied, 1);
        assert_eq!(overview.available, 19);
        let slot = overview.beds.iter().find(|b| b.bed_no == "B3").unwrap();
        assert_eq!(
            slot.admission.as_ref().map(|a| a.patient_name.as_str()),
            Some("Aanya Sharma")
        );
    }

    #[test]
    fn dashboard_aggregates_all_three_stores() {
        let mut desk = front_desk();
        let today = day(2025, 6, 1);
        desk.register_patient_on(
            patient_form("Aanya Sharma", "9876543210", "aanya@example.com", today),
            today,
        )
        .unwrap();
        desk.book_appointment_on(booking("Aanya Sharma", today, "10:00"), today)
            .unwrap();
        desk.book_appointment_on(booking("Aanya Sharma", day(2025, 6, 2), "10:00"), today)
            .unwrap();
        desk.admit_patient_on(admission_form("Aanya Sharma", "B1", today), today)
            .unwrap();

        let summary = desk.dashboard_on(today);
        assert_eq!(summary.appointments.total, 2);
        assert_eq!(summary.todays_appointments, 1);
        assert_eq!(summary.patients.total, 1);
        assert_eq!(summary.occupied_beds, 1);
        assert_eq!(summary.available_beds, 19);
    }

    #[test]
    fn state_survives_a_reload_from_the_same_storage() {
        let storage: Arc<dyn StorageAdapter> =
            Arc::new(MemoryStorage::new().with_slot(SLOT_APPOINTMENTS, "[]"));
        let today = day(2025, 6, 1);
        {
            let mut desk = FrontDesk::new(Arc::clone(&storage), Arc::new(SequenceIds::new()));
            desk.register_patient_on(
                patient_form("Aanya Sharma", "9876543210", "aanya@example.com", today),
                today,
            )
            .unwrap();
            desk.book_appointment_on(booking("Aanya Sharma", day(2025, 6, 10), "10:00"), today)
                .unwrap();
            desk.admit_patient_on(admission_form("Aanya Sharma", "B1", today), today)
                .unwrap();
        }

        let desk = FrontDesk::new(storage, Arc::new(SequenceIds::new()));
        assert_eq!(desk.patients().len(), 1);
        assert_eq!(desk.appointments().len(), 1);
        assert_eq!(desk.admissions().len(), 1);
        assert_eq!(desk.bed_overview_on(today).occupied, 1);
    }

    #[test]
    fn error_display_lists_invalid_fields() {
        let mut desk = front_desk();
        let today = day(2025, 6, 1);
        let mut form = booking("X", day(2025, 6, 10), "10:00");
        form.phone = "12345".into();
        let err = desk.book_appointment_on(form, today).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("patientName"));
        assert!(message.contains("phone"));
    }
}
