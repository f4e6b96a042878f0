//! Product entity - Represents purchasable insurance products in the catalog.
//!
//! Products are what users browse and buy. The description doubles as the
//! type signal for dashboard grouping (medical/vehicle/property keywords).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Name of the product (e.g., "Basic Health Plan")
    pub name: String,
    /// What the product covers
    pub description: String,
    /// Price in currency units
    pub price: f64,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many purchases
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchases,
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
