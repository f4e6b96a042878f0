//! Recommendation entity - A saved policy recommendation for a user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recommendation database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recommendations")]
pub struct Model {
    /// Unique identifier for the recommendation
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the user this recommendation is for
    pub user_id: i32,
    /// ID of the recommended policy, if tied to one
    pub policy_id: Option<i32>,
    /// Generated recommendation sentence
    pub recommendation_text: String,
    /// When the recommendation was generated (UTC)
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Recommendation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each recommendation belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each recommendation may reference one policy
    #[sea_orm(
        belongs_to = "super::policy::Entity",
        from = "Column::PolicyId",
        to = "super::policy::Column::Id"
    )]
    Policy,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::policy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Policy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
