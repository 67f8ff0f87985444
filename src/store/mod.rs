//! Entity stores: in-memory collections mirrored to storage slots.
//!
//! Each store follows the same contract: `list` returns the current
//! entities, `add` assigns a generated id and default status, `update`
//! merges a patch, `delete` removes by id. Every mutation serializes
//! the full collection back to its slot; construction deserializes the
//! slot, falling back to empty (or seed) data when the slot is missing
//! or corrupt. Slot writes are best-effort: a failed write is logged
//! and the in-memory state stays authoritative for the session.

pub mod admissions;
pub mod appointments;
pub mod patients;

pub use admissions::AdmissionStore;
pub use appointments::{AppointmentStats, AppointmentStore};
pub use patients::{PatientStats, PatientStore};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::storage::StorageAdapter;

/// Conflict and lookup failures from store mutations. All are
/// user-facing and leave the store unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("An appointment is already booked for {date} at {time}")]
    SlotTaken { date: NaiveDate, time: String },

    #[error("Patient with this phone number or email already exists")]
    DuplicatePatient,

    #[error("Bed {bed_no} is not available")]
    BedUnavailable { bed_no: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

/// Deserialize a slot, falling back to `default` when the slot is
/// missing, unreadable, or corrupt. Failures are logged, never
/// surfaced.
pub(crate) fn load_collection<T: DeserializeOwned>(
    storage: &dyn StorageAdapter,
    slot: &str,
    default: impl FnOnce() -> Vec<T>,
) -> Vec<T> {
    match storage.read_slot(slot) {
        Ok(Some(payload)) => match serde_json::from_str(&payload) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(slot, error = %e, "Corrupt storage slot, starting fresh");
                default()
            }
        },
        Ok(None) => default(),
        Err(e) => {
            tracing::warn!(slot, error = %e, "Failed to read storage slot, starting fresh");
            default()
        }
    }
}

/// Serialize the full collection back to its slot. Best-effort: a
/// write failure is logged and the session continues in memory.
pub(crate) fn persist_collection<T: Serialize>(
    storage: &dyn StorageAdapter,
    slot: &str,
    items: &[T],
) {
    let payload = match serde_json::to_string(items) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(slot, error = %e, "Failed to serialize collection");
            return;
        }
    };
    if let Err(e) = storage.write_slot(slot, &payload) {
        tracing::warn!(slot, error = %e, "Failed to persist collection");
    }
}
