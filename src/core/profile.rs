//! Profile business logic - updating the insurance-matching profile fields
//! and scoring how complete a profile is.
//!
//! Completion percentage counts the 19 optional profile fields (credentials
//! excluded); the recommendation screens translate it into a quality level.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use serde::Deserialize;

/// A profile update submission; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    /// Age in years
    pub age: Option<i32>,
    /// Occupation
    pub occupation: Option<String>,
    /// Lifestyle
    pub lifestyle: Option<String>,
    /// Health status
    pub health_status: Option<String>,
    /// Marital status
    pub marital_status: Option<String>,
    /// Number of dependents
    pub dependents: Option<i32>,
    /// Annual income band
    pub annual_income: Option<String>,
    /// Education background
    pub education_level: Option<String>,
    /// Employment type
    pub employment_type: Option<String>,
    /// Residence type
    pub residence_type: Option<String>,
    /// Vehicle ownership
    pub vehicle_ownership: Option<String>,
    /// Travel frequency
    pub travel_frequency: Option<String>,
    /// Risk tolerance
    pub risk_tolerance: Option<String>,
    /// Insurance experience
    pub insurance_experience: Option<String>,
    /// Coverage priority
    pub coverage_priority: Option<String>,
    /// Family medical history
    pub family_medical_history: Option<String>,
    /// Hobbies and activities
    pub hobbies_activities: Option<String>,
    /// City/region
    pub location: Option<String>,
    /// Contact email
    pub email: Option<String>,
}

/// Applies a profile update to a user and returns the updated record.
///
/// Fields present in the update overwrite the stored values; absent fields
/// are left untouched. An email, when supplied, must look like one.
pub async fn update_profile(
    db: &DatabaseConnection,
    user_id: i32,
    update: ProfileUpdate,
) -> Result<user::Model> {
    if let Some(email) = &update.email {
        if !email.contains('@') {
            return Err(Error::Validation {
                message: "Invalid email format".to_string(),
            });
        }
        let taken = User::find()
            .filter(user::Column::Email.eq(email.as_str()))
            .filter(user::Column::Id.ne(user_id))
            .one(db)
            .await?;
        if taken.is_some() {
            return Err(Error::Conflict {
                message: "Email already exists".to_string(),
            });
        }
    }

    let existing = User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "User".to_string(),
        })?;

    let mut active = existing.into_active_model();
    macro_rules! apply {
        ($($field:ident),* $(,)?) => {
            $(if let Some(value) = update.$field {
                active.$field = Set(Some(value));
            })*
        };
    }
    apply!(
        age,
        occupation,
        lifestyle,
        health_status,
        marital_status,
        dependents,
        annual_income,
        education_level,
        employment_type,
        residence_type,
        vehicle_ownership,
        travel_frequency,
        risk_tolerance,
        insurance_experience,
        coverage_priority,
        family_medical_history,
        hobbies_activities,
        location,
        email,
    );

    active.update(db).await.map_err(Into::into)
}

/// Percentage of the profile fields that are filled in, 0-100.
#[must_use]
pub fn completion_percentage(user: &user::Model) -> u8 {
    let filled_string = |value: &Option<String>| {
        value
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    };
    let fields = [
        filled_string(&user.email),
        user.age.is_some(),
        filled_string(&user.occupation),
        filled_string(&user.lifestyle),
        filled_string(&user.health_status),
        filled_string(&user.marital_status),
        user.dependents.is_some(),
        filled_string(&user.annual_income),
        filled_string(&user.education_level),
        filled_string(&user.employment_type),
        filled_string(&user.residence_type),
        filled_string(&user.vehicle_ownership),
        filled_string(&user.travel_frequency),
        filled_string(&user.risk_tolerance),
        filled_string(&user.insurance_experience),
        filled_string(&user.coverage_priority),
        filled_string(&user.family_medical_history),
        filled_string(&user.hobbies_activities),
        filled_string(&user.location),
    ];

    let completed = fields.iter().filter(|&&filled| filled).count();
    #[allow(clippy::cast_possible_truncation)]
    {
        (completed * 100 / fields.len()) as u8
    }
}

/// Quality tier derived from the completion percentage, with the message the
/// recommendation screen shows for it.
#[must_use]
pub fn completion_quality(percentage: u8) -> (&'static str, &'static str) {
    if percentage >= 90 {
        (
            "excellent",
            "Excellent! Your complete profile enables highly accurate recommendations.",
        )
    } else if percentage >= 70 {
        (
            "good",
            "Good profile completeness. Recommendations are quite accurate.",
        )
    } else if percentage >= 50 {
        (
            "fair",
            "Fair profile data. Complete more fields for better recommendations.",
        )
    } else {
        (
            "poor",
            "Limited profile data. Please complete your profile for accurate recommendations.",
        )
    }
}

/// Whether the basic fields the recommendation engine needs are all present.
#[must_use]
pub fn has_basic_profile(user: &user::Model) -> bool {
    user.age.is_some()
        && user.occupation.is_some()
        && user.lifestyle.is_some()
        && user.health_status.is_some()
}
