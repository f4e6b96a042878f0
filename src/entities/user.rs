//! User entity - Represents registered accounts, both customers and admins.
//!
//! Besides the credentials, a user carries the insurance-matching profile
//! fields (age, occupation, lifestyle, income band, and so on) that feed the
//! recommendation engine and the profile completion percentage.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Login name, unique across the system
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2 PHC-string hash of the password, never the plain text
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Contact email, unique when present
    #[sea_orm(unique)]
    pub email: Option<String>,
    /// Whether this account can access the admin panel
    pub is_admin: bool,
    /// Age in years
    pub age: Option<i32>,
    /// Occupation (e.g., "office", "construction")
    pub occupation: Option<String>,
    /// Lifestyle (e.g., "active", "sedentary")
    pub lifestyle: Option<String>,
    /// Health status (e.g., "smoker", "non-smoker")
    pub health_status: Option<String>,
    /// Marital status: single, married, divorced, widowed
    pub marital_status: Option<String>,
    /// Number of dependents
    pub dependents: Option<i32>,
    /// Annual income band (e.g., `"1m_3m"`, `"over_20m"`)
    pub annual_income: Option<String>,
    /// Education background
    pub education_level: Option<String>,
    /// Employment type: full-time, part-time, self-employed, etc.
    pub employment_type: Option<String>,
    /// Residence type: own, rent, family home
    pub residence_type: Option<String>,
    /// Vehicle ownership: own, lease, none
    pub vehicle_ownership: Option<String>,
    /// Travel frequency: frequent, occasional, rare, never
    pub travel_frequency: Option<String>,
    /// Risk tolerance: conservative, moderate, aggressive
    pub risk_tolerance: Option<String>,
    /// Insurance experience: beginner, intermediate, experienced
    pub insurance_experience: Option<String>,
    /// Coverage priority: cost, coverage, service, flexibility
    pub coverage_priority: Option<String>,
    /// Family medical history: none, minor, major
    pub family_medical_history: Option<String>,
    /// Free-text hobbies and activities
    pub hobbies_activities: Option<String>,
    /// City/region for location-based recommendations
    pub location: Option<String>,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many purchases
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchases,
    /// One user has many loan applications
    #[sea_orm(has_many = "super::top_up_loan::Entity")]
    TopUpLoans,
    /// One user has many prior loan history records
    #[sea_orm(has_many = "super::loan_history::Entity")]
    LoanHistory,
    /// One user has many notifications
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
    /// One user has many support-chat messages
    #[sea_orm(has_many = "super::message::Entity")]
    Messages,
    /// One user has many saved recommendations
    #[sea_orm(has_many = "super::recommendation::Entity")]
    Recommendations,
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl Related<super::top_up_loan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TopUpLoans.def()
    }
}

impl Related<super::loan_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LoanHistory.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl Related<super::recommendation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recommendations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
