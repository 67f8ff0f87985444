//! Fixed catalogs the front desk forms offer: departments, the
//! cardiology symptom checklist, and the bed pool.

pub const DEPARTMENTS: &[&str] = &[
    "Cardiology",
    "General Physician",
    "Pediatrics",
    "Orthopedics",
    "Neurology",
    "Dermatology",
];

pub const CARDIOLOGY_SYMPTOMS: &[&str] = &[
    "Chest Pain",
    "Shortness of Breath",
    "Palpitations",
    "Dizziness",
    "High Blood Pressure",
    "Fatigue",
    "Swelling in Legs",
    "Irregular Heartbeat",
    "Nausea",
    "Sweating",
    "Pain in Arms",
    "Jaw Pain",
    "Lightheadedness",
    "Rapid Heartbeat",
    "Slow Heartbeat",
    "Chest Discomfort",
    "Coughing",
    "Ankle Swelling",
    "Bluish Skin",
    "Fainting",
    "Confusion",
];

/// Number of beds in the ward.
pub const TOTAL_BEDS: usize = 20;

/// The enumerable bed pool: "B1" through "B<total>".
pub fn bed_pool(total: usize) -> Vec<String> {
    (1..=total).map(|i| format!("B{i}")).collect()
}
