//! Support chat business logic - user messages, the automatic acknowledgement,
//! and admin replies.
//!
//! Messages thread by the customer's user id; admin replies are stored in the
//! same thread with `is_from_admin` set.

use crate::{
    entities::{Message, message},
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// Text of the automatic acknowledgement sent after every user message.
pub const AUTO_REPLY: &str = "Please be patient, an admin will respond soon.";

/// Stores a user's chat message together with the automatic acknowledgement.
///
/// Returns `(message, auto_reply)`. Both rows are written in one database
/// transaction so a thread never shows a user message without its
/// acknowledgement.
pub async fn send_user_message(
    db: &DatabaseConnection,
    user_id: i32,
    content: String,
) -> Result<(message::Model, message::Model)> {
    if content.trim().is_empty() {
        return Err(Error::Validation {
            message: "Message cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;

    let user_message = message::ActiveModel {
        user_id: Set(user_id),
        content: Set(content),
        timestamp: Set(chrono::Utc::now()),
        is_from_admin: Set(false),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let auto_reply = message::ActiveModel {
        user_id: Set(user_id),
        content: Set(AUTO_REPLY.to_string()),
        timestamp: Set(chrono::Utc::now()),
        is_from_admin: Set(true),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok((user_message, auto_reply))
}

/// Stores an admin reply in a user's conversation thread.
pub async fn send_admin_reply(
    db: &DatabaseConnection,
    user_id: i32,
    content: String,
) -> Result<message::Model> {
    if content.trim().is_empty() {
        return Err(Error::Validation {
            message: "Reply content cannot be empty".to_string(),
        });
    }

    message::ActiveModel {
        user_id: Set(user_id),
        content: Set(content),
        timestamp: Set(chrono::Utc::now()),
        is_from_admin: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves one user's conversation thread, oldest first.
pub async fn get_thread_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<message::Model>> {
    Message::find()
        .filter(message::Column::UserId.eq(user_id))
        .order_by_asc(message::Column::Timestamp)
        .order_by_asc(message::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every message across all threads, oldest first, for the admin panel.
pub async fn get_all_messages(db: &DatabaseConnection) -> Result<Vec<message::Model>> {
    Message::find()
        .order_by_asc(message::Column::Timestamp)
        .order_by_asc(message::Column::Id)
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
    async fn test_send_message_pairs_auto_reply() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;

        let (message, auto_reply) =
            send_user_message(&db, user.id, "I need help with my policy".to_string()).await?;
        assert!(!message.is_from_admin);
        assert!(auto_reply.is_from_admin);
        assert_eq!(auto_reply.content, AUTO_REPLY);

        let thread = get_thread_for_user(&db, user.id).await?;
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[0].id, message.id);
        assert_eq!(thread[1].id, auto_reply.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_message_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;

        let result = send_user_message(&db, user.id, "   ".to_string()).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_admin_reply_lands_in_thread() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;
        send_user_message(&db, user.id, "Hello?".to_string()).await?;

        send_admin_reply(&db, user.id, "How can we help?".to_string()).await?;

        let thread = get_thread_for_user(&db, user.id).await?;
        assert_eq!(thread.len(), 3);
        assert!(thread[2].is_from_admin);
        assert_eq!(thread[2].content, "How can we help?");
        Ok(())
    }

    #[tokio::test]
    async fn test_threads_are_separate_but_admin_sees_all() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice").await?;
        let bob = create_test_user(&db, "bob").await?;

        send_user_message(&db, alice.id, "From alice".to_string()).await?;
        send_user_message(&db, bob.id, "From bob".to_string()).await?;

        assert_eq!(get_thread_for_user(&db, alice.id).await?.len(), 2);
        assert_eq!(get_thread_for_user(&db, bob.id).await?.len(), 2);
        assert_eq!(get_all_messages(&db).await?.len(), 4);
        Ok(())
    }
}
