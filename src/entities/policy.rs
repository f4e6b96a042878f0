//! Policy entity - The underwriting catalog the recommendation engine scores.
//!
//! Unlike products (what users buy), policies carry the matching attributes:
//! age band, risk level, and type, used to score fit against a user profile.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Policy database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "policies")]
pub struct Model {
    /// Unique identifier for the policy
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Name of the policy
    pub name: String,
    /// Policy type: health, auto, home, life, travel
    pub policy_type: String,
    /// Monthly premium in currency units
    pub premium: f64,
    /// Coverage description
    pub coverage: String,
    /// Minimum eligible age
    pub min_age: i32,
    /// Maximum eligible age
    pub max_age: i32,
    /// Risk level this policy targets: low, medium, high
    pub risk_level: String,
}

/// Defines relationships between Policy and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One policy can back many saved recommendations
    #[sea_orm(has_many = "super::recommendation::Entity")]
    Recommendations,
}

impl Related<super::recommendation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recommendations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
