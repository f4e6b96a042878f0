//! Session helpers shared by the handlers.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, EntityTrait};
use tower_sessions::Session;

/// Session key holding the logged-in user's id.
pub const USER_ID_KEY: &str = "user_id";

/// Loads the logged-in user from the session, or fails with `Unauthorized`.
///
/// A session pointing at a deleted user also counts as not logged in.
pub async fn current_user(db: &DatabaseConnection, session: &Session) -> Result<user::Model> {
    let user_id: i32 = session
        .get(USER_ID_KEY)
        .await?
        .ok_or(Error::Unauthorized)?;

    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::Unauthorized)
}

/// Loads the logged-in user and fails with `Forbidden` unless they are an admin.
pub async fn require_admin(db: &DatabaseConnection, session: &Session) -> Result<user::Model> {
    let user = current_user(db, session).await?;
    if user.is_admin {
        Ok(user)
    } else {
        Err(Error::Forbidden)
    }
}
