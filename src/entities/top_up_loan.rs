//! Top-up loan entity - A supplementary-loan application and its review state.
//!
//! Applications start `pending`, `approved`, or `rejected` depending on the
//! eligibility decision, and pending ones can later be approved or rejected by
//! an admin, which fills in `review_date` and `admin_review_notes`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Top-up loan application database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "top_up_loans")]
pub struct Model {
    /// Unique identifier for the application
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the applying user
    pub user_id: i32,
    /// Applicant age as declared on the form
    pub age: i32,
    /// Declared monthly income in currency units
    pub monthly_income: f64,
    /// Requested loan amount in currency units
    pub loan_amount: f64,
    /// Application status: `"pending"`, `"approved"`, or `"rejected"`
    pub status: String,
    /// When the application was submitted (UTC)
    pub application_date: DateTimeUtc,
    /// When an admin reviewed the application, if reviewed
    pub review_date: Option<DateTimeUtc>,
    /// Free-text notes left by the reviewing admin
    pub admin_review_notes: Option<String>,
    /// History score at application time: `"good"`, `"poor"`, or `"insufficient"`
    pub loan_history_score: Option<String>,
    /// Rejection reason: `"age_ineligible"`, `"low_income"`, `"poor_history"`,
    /// or `"admin_review"`
    pub rejection_reason: Option<String>,
}

/// Defines relationships between `TopUpLoan` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each application belongs to one user
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
