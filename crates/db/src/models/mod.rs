//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` input DTO for creates and full updates
//! - The validated field set the repositories bind from

pub mod category;
pub mod dashboard;
pub mod task;
pub mod user;
