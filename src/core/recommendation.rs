//! Recommendation engine - scores the policy catalog against a user profile.
//!
//! Scoring is additive: 50 points for an age fit, 30 for matching the
//! health-derived risk band, and 10 each for matching the lifestyle- and
//! occupation-derived bands. Policies scoring 20 or less are dropped and the
//! top three survivors are returned, best first.

use crate::{
    core::profile,
    entities::{Policy, policy, recommendation, user},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Minimum score for a policy to be recommended at all.
pub const SCORE_CUTOFF: i32 = 20;
/// How many recommendations to return.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// A policy with its fit score and generated recommendation sentence.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoredPolicy {
    /// The recommended policy
    pub policy: policy::Model,
    /// Fit score against the user profile
    pub score: i32,
    /// Generated one-sentence justification
    pub recommendation: String,
}

/// Risk band derived from a profile attribute value.
fn health_risk(health_status: &str) -> &'static str {
    match health_status {
        "non-smoker" => "low",
        "smoker" => "high",
        _ => "medium",
    }
}

fn lifestyle_risk(lifestyle: &str) -> &'static str {
    match lifestyle {
        "active" => "low",
        _ => "medium",
    }
}

fn occupation_risk(occupation: &str) -> &'static str {
    match occupation {
        "office" => "low",
        "construction" => "high",
        _ => "medium",
    }
}

/// Scores policies against a user's profile.
///
/// The user must have the basic profile fields filled in (age, occupation,
/// lifestyle, health status); the caller is expected to have checked
/// [`profile::has_basic_profile`] and redirected to the profile screen
/// otherwise.
pub fn score_policies(applicant: &user::Model, policies: &[policy::Model]) -> Result<Vec<ScoredPolicy>> {
    if !profile::has_basic_profile(applicant) {
        return Err(Error::Validation {
            message: "Complete your profile (age, occupation, lifestyle, health status) first"
                .to_string(),
        });
    }

    // Unwraps guarded by has_basic_profile above
    let age = applicant.age.unwrap_or_default();
    let occupation = applicant.occupation.as_deref().unwrap_or_default();
    let lifestyle = applicant.lifestyle.as_deref().unwrap_or_default();
    let health_status = applicant.health_status.as_deref().unwrap_or_default();

    let user_risk = health_risk(health_status);
    let user_lifestyle = lifestyle_risk(lifestyle);
    let user_occupation = occupation_risk(occupation);

    let mut scored: Vec<ScoredPolicy> = policies
        .iter()
        .filter_map(|policy| {
            let mut score = 0;
            if policy.min_age <= age && age <= policy.max_age {
                score += 50;
            }
            if policy.risk_level == user_risk {
                score += 30;
            }
            if policy.risk_level == user_lifestyle {
                score += 10;
            }
            if policy.risk_level == user_occupation {
                score += 10;
            }
            (score > SCORE_CUTOFF).then(|| ScoredPolicy {
                policy: policy.clone(),
                score,
                recommendation: format!(
                    "Recommended {} for your {age}-year-old {occupation} profile with \
                     {lifestyle} lifestyle and {health_status} health status.",
                    policy.name
                ),
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_RECOMMENDATIONS);
    Ok(scored)
}

/// Produces recommendations for a user, with optional catalog filters.
///
/// `insurance_type` limits the catalog to one policy type (`"all"` and `None`
/// mean no filter) and `max_budget` caps the premium before scoring.
pub async fn get_recommendations(
    db: &DatabaseConnection,
    applicant: &user::Model,
    insurance_type: Option<&str>,
    max_budget: Option<f64>,
) -> Result<Vec<ScoredPolicy>> {
    let mut query = Policy::find();
    if let Some(budget) = max_budget {
        query = query.filter(policy::Column::Premium.lte(budget));
    }
    if let Some(policy_type) = insurance_type
        && policy_type != "all"
    {
        query = query.filter(policy::Column::PolicyType.eq(policy_type));
    }

    let policies = query.all(db).await?;
    score_policies(applicant, &policies)
}

/// Saves scored recommendations for a user so the history survives the request.
pub async fn save_recommendations(
    db: &DatabaseConnection,
    user_id: i32,
    scored: &[ScoredPolicy],
) -> Result<()> {
    for entry in scored {
        let model = recommendation::ActiveModel {
            user_id: Set(user_id),
            policy_id: Set(Some(entry.policy.id)),
            recommendation_text: Set(entry.recommendation.clone()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        model.insert(db).await?;
    }
    Ok(())
}
