//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tasktrack_core::error::CoreError;
use tasktrack_core::ownership::{can_modify, Owned};
use tasktrack_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

impl AuthUser {
    /// Resolve a record looked up by id for this user to act on.
    ///
    /// `None` becomes `NotFound`; a record owned by someone else becomes
    /// `Forbidden`. The message names only the entity kind.
    pub fn authorize<R: Owned>(
        &self,
        record: Option<R>,
        entity: &'static str,
        id: DbId,
    ) -> AppResult<R> {
        let record = record.ok_or(AppError::Core(CoreError::NotFound { entity, id }))?;
        if !can_modify(self.user_id, &record) {
            tracing::warn!(user_id = self.user_id, entity, id, "Ownership check denied");
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "You do not have access to this {}",
                entity.to_lowercase()
            ))));
        }
        Ok(record)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[derive(Debug)]
    struct Record(DbId);

    impl Owned for Record {
        fn owner_id(&self) -> DbId {
            self.0
        }
    }

    #[test]
    fn owner_gets_the_record_back() {
        let user = AuthUser { user_id: 5 };
        assert_matches!(user.authorize(Some(Record(5)), "Task", 1), Ok(Record(5)));
    }

    #[test]
    fn missing_record_is_not_found() {
        let user = AuthUser { user_id: 5 };
        assert_matches!(
            user.authorize(None::<Record>, "Task", 9),
            Err(AppError::Core(CoreError::NotFound { entity: "Task", id: 9 }))
        );
    }

    #[test]
    fn foreign_record_is_forbidden() {
        let user = AuthUser { user_id: 5 };
        assert_matches!(
            user.authorize(Some(Record(6)), "Category", 1),
            Err(AppError::Core(CoreError::Forbidden(msg))) if msg == "You do not have access to this category"
        );
    }
}
