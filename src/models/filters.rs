use chrono::NaiveDate;

use super::enums::AppointmentStatus;

/// Free-text appointment search: patient name, phone, or doctor.
#[derive(Debug, Default)]
pub struct AppointmentFilter {
    pub search: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
}

/// Free-text patient search: name, phone, or email.
#[derive(Debug, Default)]
pub struct PatientFilter {
    pub search: Option<String>,
}

/// Admission listing filter.
#[derive(Debug, Default)]
pub struct AdmissionFilter {
    pub active_only: bool,
    pub bed_no: Option<String>,
}
