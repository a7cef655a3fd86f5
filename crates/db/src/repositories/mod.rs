//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Every query over categories or
//! tasks that serves a request takes the requesting user's id explicitly.

pub mod category_repo;
pub mod dashboard_repo;
pub mod task_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use dashboard_repo::DashboardRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
