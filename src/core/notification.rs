//! Notification business logic - creating and listing system notifications.

use crate::{
    entities::{Notification, notification},
    errors::Result,
};
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use sea_orm::{ActiveModelTrait, QueryOrder};

/// Creates a notification for a user.
///
/// Generic over the connection so it can participate in an open database
/// transaction alongside the write that triggered it.
pub async fn create_notification<C>(
    db: &C,
    user_id: i32,
    title: String,
    message: String,
    kind: &str,
) -> Result<notification::Model>
where
    C: ConnectionTrait,
{
    let model = notification::ActiveModel {
        user_id: Set(user_id),
        title: Set(title),
        message: Set(message),
        kind: Set(kind.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves a user's notifications, newest first.
pub async fn get_notifications_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<notification::Model>> {
    Notification::find()
        .filter(notification::Column::UserId.eq(user_id))
        .order_by_desc(notification::Column::CreatedAt)
        .order_by_desc(notification::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_user, setup_test_db};

    #[tokio::test]
    async fn test_create_and_list_notifications() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;

        create_notification(
            &db,
            user.id,
            "Loan Application Pending".to_string(),
            "Your application is under review.".to_string(),
            "warning",
        )
        .await?;
        create_notification(
            &db,
            user.id,
            "Loan Application Approved".to_string(),
            "Your application was approved.".to_string(),
            "success",
        )
        .await?;

        let notifications = get_notifications_for_user(&db, user.id).await?;
        assert_eq!(notifications.len(), 2);
        // Newest first
        assert_eq!(notifications[0].title, "Loan Application Approved");
        assert_eq!(notifications[1].kind, "warning");

        Ok(())
    }

    #[tokio::test]
    async fn test_notifications_are_scoped_to_user() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice").await?;
        let bob = create_test_user(&db, "bob").await?;

        create_notification(&db, alice.id, "t".to_string(), "m".to_string(), "success").await?;

        assert_eq!(get_notifications_for_user(&db, alice.id).await?.len(), 1);
        assert!(get_notifications_for_user(&db, bob.id).await?.is_empty());
        Ok(())
    }
}
