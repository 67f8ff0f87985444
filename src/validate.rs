//! Shared form validation, one module for every entity form.
//!
//! The original front desk repeated these rules per form with slight
//! drift; here each rule exists once and the per-form entry points
//! assemble a field → message map. Submission proceeds only when the
//! map is empty.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveTime};
use regex::Regex;

use crate::models::catalog::DEPARTMENTS;
use crate::models::{NewAdmission, NewAppointment, NewPatient, Patient};

/// Field name → human-readable message.
pub type FieldErrors = BTreeMap<String, String>;

// ═══════════════════════════════════════════
// Field predicates
// ═══════════════════════════════════════════

/// Trimmed length in [2, 50] characters (not bytes).
pub fn valid_name(name: &str) -> bool {
    let len = name.trim().chars().count();
    (2..=50).contains(&len)
}

/// Exactly 10 digits after stripping non-digits, first digit 7, 8, or 9.
pub fn valid_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.len() == 10 && matches!(digits.as_bytes()[0], b'7' | b'8' | b'9')
}

/// Integer in [1, 120].
pub fn valid_age(age: u8) -> bool {
    (1..=120).contains(&age)
}

/// One `@` with a `.` somewhere after it, no whitespace.
pub fn valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    });
    re.is_match(email)
}

/// Date is today or later (compared at midnight).
pub fn date_not_past(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

/// Parses "HH:MM".
pub fn valid_time(time: &str) -> bool {
    NaiveTime::parse_from_str(time, "%H:%M").is_ok()
}

/// Age in whole years at `today`, adjusted by month/day.
pub fn age_from_dob(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// The age field must equal the age computed from the DOB.
pub fn age_matches_dob(age: u8, dob: NaiveDate, today: NaiveDate) -> bool {
    i32::from(age) == age_from_dob(dob, today)
}

// ═══════════════════════════════════════════
// Per-form assembly
// ═══════════════════════════════════════════

const PHONE_MSG: &str = "Enter valid 10-digit number starting with 7, 8, or 9";

/// One of the departments the hospital offers.
pub fn valid_department(department: &str) -> bool {
    DEPARTMENTS.contains(&department)
}

struct PatientFields<'a> {
    name: &'a str,
    age: u8,
    dob: NaiveDate,
    phone: &'a str,
    alternate_phone: Option<&'a str>,
    email: &'a str,
    kin_contact: Option<&'a str>,
    department: &'a str,
}

fn validate_patient_fields(f: &PatientFields<'_>, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !valid_name(f.name) {
        errors.insert(
            "patientName".into(),
            "Patient name must be between 2-50 characters".into(),
        );
    }
    if !valid_age(f.age) {
        errors.insert("age".into(), "Age must be between 1-120 years".into());
    }
    if f.dob > today {
        errors.insert("dob".into(), "Date of birth cannot be in the future".into());
    } else if !age_matches_dob(f.age, f.dob, today) {
        errors.insert("dob".into(), "Age doesn't match date of birth".into());
    }
    if !valid_phone(f.phone) {
        errors.insert("phone".into(), PHONE_MSG.into());
    }
    if let Some(alt) = f.alternate_phone {
        if !alt.is_empty() && !valid_phone(alt) {
            errors.insert("alternatePhone".into(), PHONE_MSG.into());
        }
    }
    if !valid_email(f.email) {
        errors.insert("email".into(), "Enter valid email address".into());
    }
    if let Some(kin) = f.kin_contact {
        if !kin.is_empty() && !valid_phone(kin) {
            errors.insert(
                "kinContact".into(),
                "Enter valid 10-digit emergency contact number".into(),
            );
        }
    }
    if !valid_department(f.department) {
        errors.insert(
            "department".into(),
            format!("Invalid department: {}", f.department),
        );
    }

    errors
}

/// Validate a registration form.
pub fn validate_new_patient(form: &NewPatient, today: NaiveDate) -> FieldErrors {
    validate_patient_fields(
        &PatientFields {
            name: &form.patient_name,
            age: form.age,
            dob: form.dob,
            phone: &form.phone,
            alternate_phone: form.alternate_phone.as_deref(),
            email: &form.email,
            kin_contact: form.kin_contact.as_deref(),
            department: &form.department,
        },
        today,
    )
}

/// Re-validate a patient record after a patch has been applied.
pub fn validate_patient(patient: &Patient, today: NaiveDate) -> FieldErrors {
    validate_patient_fields(
        &PatientFields {
            name: &patient.patient_name,
            age: patient.age,
            dob: patient.dob,
            phone: &patient.phone,
            alternate_phone: patient.alternate_phone.as_deref(),
            email: &patient.email,
            kin_contact: patient.kin_contact.as_deref(),
            department: &patient.department,
        },
        today,
    )
}

/// Validate a booking form.
pub fn validate_new_appointment(form: &NewAppointment, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !valid_name(&form.patient_name) {
        errors.insert(
            "patientName".into(),
            "Patient name must be between 2-50 characters".into(),
        );
    }
    if !valid_age(form.age) {
        errors.insert("age".into(), "Age must be between 1-120 years".into());
    }
    if !valid_phone(&form.phone) {
        errors.insert("phone".into(), PHONE_MSG.into());
    }
    if !date_not_past(form.date, today) {
        errors.insert("date".into(), "Appointment date cannot be in the past".into());
    }
    if !valid_time(&form.time) {
        errors.insert("time".into(), "Enter time as HH:MM".into());
    }
    if !valid_department(&form.department) {
        errors.insert(
            "department".into(),
            format!("Invalid department: {}", form.department),
        );
    }

    errors
}

/// Validate an admission form.
pub fn validate_new_admission(form: &NewAdmission, _today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !valid_name(&form.patient_name) {
        errors.insert(
            "patientName".into(),
            "Patient name must be between 2-50 characters".into(),
        );
    }
    if !valid_age(form.age) {
        errors.insert("age".into(), "Age must be between 1-120 years".into());
    }
    if form.bed_no.trim().is_empty() {
        errors.insert("bedNo".into(), "Please select a bed".into());
    }
    if let Some(to) = form.to_date {
        if to < form.from_date {
            errors.insert(
                "toDate".into(),
                "Discharge date cannot be before admission date".into(),
            );
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Gender;
    use chrono::Local;

    #[test]
    fn phone_accepts_ten_digits_starting_789() {
        assert!(valid_phone("9876543210"));
        assert!(valid_phone("7000000000"));
        assert!(valid_phone("8999 999 999"));
        assert!(valid_phone("(812) 345-6789"));
    }

    #[test]
    fn phone_rejects_other_formats() {
        assert!(!valid_phone("12345"));
        assert!(!valid_phone("1234567890")); // starts with 1
        assert!(!valid_phone("98765432101")); // 11 digits
        assert!(!valid_phone(""));
        assert!(!valid_phone("abcdefghij"));
    }

    #[test]
    fn name_length_bounds() {
        assert!(!valid_name("A"));
        assert!(valid_name("Jo"));
        assert!(valid_name("  Jo  ")); // trimmed
        assert!(valid_name(&"x".repeat(50)));
        assert!(!valid_name(&"x".repeat(51)));
        assert!(!valid_name("   "));
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // Two characters, three bytes.
        assert!(valid_name("Éa"));
        // 26 characters, 52 bytes.
        assert!(valid_name(&"é".repeat(26)));
        assert!(valid_name(&"é".repeat(50)));
        assert!(!valid_name(&"é".repeat(51)));
    }

    #[test]
    fn age_bounds() {
        assert!(!valid_age(0));
        assert!(valid_age(1));
        assert!(valid_age(120));
        assert!(!valid_age(121));
    }

    #[test]
    fn email_requires_at_and_dot() {
        assert!(valid_email("a@b.com"));
        assert!(valid_email("first.last@clinic.co.in"));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("a.b.com"));
        assert!(!valid_email("a @b.com"));
        assert!(!valid_email(""));
    }

    #[test]
    fn date_not_past_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(date_not_past(today, today));
        assert!(date_not_past(today.succ_opt().unwrap(), today));
        assert!(!date_not_past(today.pred_opt().unwrap(), today));
    }

    #[test]
    fn time_format() {
        assert!(valid_time("10:00"));
        assert!(valid_time("23:59"));
        assert!(!valid_time("24:00"));
        assert!(!valid_time("10"));
        assert!(!valid_time("10:00 AM"));
    }

    #[test]
    fn age_from_dob_adjusts_for_birthday_not_reached() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let before_birthday = NaiveDate::from_ymd_opt(1995, 7, 1).unwrap();
        let after_birthday = NaiveDate::from_ymd_opt(1995, 6, 1).unwrap();
        assert_eq!(age_from_dob(before_birthday, today), 29);
        assert_eq!(age_from_dob(after_birthday, today), 30);
    }

    #[test]
    fn dob_exactly_thirty_years_ago_matches_age_thirty() {
        let today = Local::now().date_naive();
        let dob = NaiveDate::from_ymd_opt(today.year() - 30, today.month(), today.day())
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(today.year() - 30, 2, 28).unwrap());
        assert!(age_matches_dob(30, dob, today));
        let off_by_one = NaiveDate::from_ymd_opt(dob.year() - 1, dob.month(), dob.day())
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(dob.year() - 1, 2, 28).unwrap());
        assert!(!age_matches_dob(30, off_by_one, today));
    }

    fn patient_form() -> NewPatient {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        NewPatient {
            patient_name: "Aanya Sharma".into(),
            age: 30,
            gender: Gender::Female,
            dob: NaiveDate::from_ymd_opt(today.year() - 30, 3, 14).unwrap(),
            blood_group: crate::models::enums::BloodGroup::OPositive,
            phone: "9876543210".into(),
            alternate_phone: None,
            email: "aanya@example.com".into(),
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

    #[test]
    fn valid_patient_form_has_no_errors() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert!(validate_new_patient(&patient_form(), today).is_empty());
    }

    #[test]
    fn patient_form_collects_all_field_errors() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut form = patient_form();
        form.patient_name = "X".into();
        form.phone = "12345".into();
        form.email = "not-an-email".into();
        form.kin_contact = Some("999".into());
        let errors = validate_new_patient(&form, today);
        assert!(errors.contains_key("patientName"));
        assert!(errors.contains_key("phone"));
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("kinContact"));
    }

    #[test]
    fn patient_form_rejects_age_dob_mismatch() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut form = patient_form();
        form.age = 31; // dob says 30
        let errors = validate_new_patient(&form, today);
        assert_eq!(
            errors.get("dob").map(String::as_str),
            Some("Age doesn't match date of birth")
        );
    }

    #[test]
    fn empty_optional_phones_are_not_errors() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut form = patient_form();
        form.alternate_phone = Some(String::new());
        form.kin_contact = Some(String::new());
        assert!(validate_new_patient(&form, today).is_empty());
    }

    #[test]
    fn appointment_form_rejects_past_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let form = NewAppointment {
            patient_name: "Aarav Patel".into(),
            age: 45,
            gender: Gender::Male,
            phone: "9876543210".into(),
            symptoms: vec![],
            date: today.pred_opt().unwrap(),
            time: "10:00".into(),
            department: "Cardiology".into(),
            doctor: "Dr. Pranjal Patil".into(),
            notes: None,
        };
        let errors = validate_new_appointment(&form, today);
        assert!(errors.contains_key("date"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn unknown_department_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut form = patient_form();
        form.department = "Astrology".into();
        let errors = validate_new_patient(&form, today);
        assert_eq!(
            errors.get("department").map(String::as_str),
            Some("Invalid department: Astrology")
        );
    }

    #[test]
    fn admission_form_rejects_inverted_date_range() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let form = NewAdmission {
            patient_name: "Arjun Singh".into(),
            age: 58,
            gender: Gender::Male,
            symptoms: vec![],
            bed_no: "B3".into(),
            from_date: today,
            to_date: today.pred_opt(),
            admitting_doctor: "Dr. Pranjal Patil".into(),
        };
        let errors = validate_new_admission(&form, today);
        assert!(errors.contains_key("toDate"));
    }
}
