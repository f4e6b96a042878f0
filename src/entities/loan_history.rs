//! Loan history entity - A user's prior loans and how they were repaid.
//!
//! The eligibility decision derives its history score from these rows:
//! `repayment_status` is `"completed"`, `"defaulted"`, or `"active"`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Loan history database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "loan_history")]
pub struct Model {
    /// Unique identifier for the history record
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the user who held the loan
    pub user_id: i32,
    /// Kind of loan (e.g., "personal", "top_up")
    pub loan_type: String,
    /// Loan principal in currency units
    pub loan_amount: f64,
    /// Repayment outcome: `"completed"`, `"defaulted"`, or `"active"`
    pub repayment_status: String,
    /// When the loan was taken out (UTC)
    pub loan_date: DateTimeUtc,
    /// When the loan was fully repaid, if completed
    pub completion_date: Option<DateTimeUtc>,
    /// Internal repayment score for the loan
    pub repayment_score: i32,
}

/// Defines relationships between `LoanHistory` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each history record belongs to one user
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
