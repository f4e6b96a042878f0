//! Message entity - Support-chat messages between a user and the admin team.
//!
//! Both directions live in one table: `is_from_admin` marks replies, and
//! `user_id` keys the conversation thread the message belongs to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Message database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    /// Unique identifier for the message
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the user whose conversation this message belongs to
    pub user_id: i32,
    /// Message text
    pub content: String,
    /// When the message was sent (UTC)
    pub timestamp: DateTimeUtc,
    /// Whether this message was sent by an admin
    pub is_from_admin: bool,
}

/// Defines relationships between Message and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each message belongs to one user's conversation
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
