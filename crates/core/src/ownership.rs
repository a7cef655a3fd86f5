//! Ownership checks applied before every update or delete.
//!
//! Categories and tasks are private to the user that created them. Handlers
//! look a record up by id, then call [`can_modify`]; a denial short-circuits
//! before any mutation and is reported as `Forbidden`, not `NotFound`.

use crate::types::DbId;

/// A record that belongs to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> DbId;
}

/// Whether `user_id` may update or delete `record`.
pub fn can_modify<R: Owned>(user_id: DbId, record: &R) -> bool {
    record.owner_id() == user_id
}
