//! Notification entity - System notifications shown to a user.
//!
//! Written whenever the loan workflow changes state. The `kind` field drives
//! presentation: `"success"`, `"warning"`, or `"error"`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    /// Unique identifier for the notification
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the user this notification is for
    pub user_id: i32,
    /// Short title (e.g., "Loan Application Approved")
    pub title: String,
    /// Notification body text
    pub message: String,
    /// Notification kind: `"success"`, `"warning"`, or `"error"`
    pub kind: String,
    /// When the notification was created (UTC)
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Notification and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each notification belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
