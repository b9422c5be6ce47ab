//! In-memory politician data
//!
//! The dataset is loaded once at startup and never changes while the
//! process runs.

pub mod location;
pub mod records;
pub mod repository;

pub use records::{Coordinates, CurrentBill, PoliticianRecord, Policy, Vote};
pub use repository::PoliticianStore;
