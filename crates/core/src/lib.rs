//! Domain logic for tasktrack with no I/O dependencies.
//!
//! Shared by the repository layer (`tasktrack-db`) and the HTTP layer
//! (`tasktrack-api`).

pub mod category;
pub mod error;
pub mod ownership;
pub mod pagination;
pub mod task;
pub mod text;
pub mod types;
