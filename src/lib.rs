//! Penguin measurements dashboard core.
//!
//! The dataset is loaded once ([`data::load_file`]) and shared read-only;
//! each [`Session`] owns its own filter inputs and derives the filtered view
//! and its projections on demand. The egui front end in `main.rs` only calls
//! into this crate.

pub mod config;
pub mod data;
pub mod error;
pub mod session;

pub use config::DashboardConfig;
pub use error::LoadError;
pub use session::Session;
