//! Headless core for a small hospital front-desk application.
//!
//! The UI shell embeds this crate and talks to a single [`FrontDesk`]
//! container: appointment booking, patient registration, bed
//! admissions, and the dashboard queries. State lives in memory and is
//! mirrored to JSON slots in local storage after every mutation.

pub mod config;
pub mod front_desk;
pub mod ids;
pub mod models;
pub mod storage;
pub mod store;
pub mod validate;

pub use front_desk::{BedOverview, BedSlot, DashboardSummary, FrontDesk, FrontDeskError};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the embedding shell. Honors RUST_LOG,
/// falling back to the application default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
