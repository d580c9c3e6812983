//! `shipmatch-recon`: two-source shipment quantity reconciliation.
//!
//! Pure engine crate: receives extracted rows, returns discrepancy records.
//! No CLI or IO dependencies.

pub mod aggregate;
pub mod cell;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod session;

pub use cell::{CellValue, RawRow};
pub use config::ReconConfig;
pub use engine::{run, ReconInput};
pub use error::{ReconError, Source};
pub use model::{DiscrepancyRecord, Presence, ReconResult};
pub use normalize::{normalize_key, CanonicalKey};
pub use reconcile::reconcile;
pub use session::{Publication, ReconSession, RunStatus};
