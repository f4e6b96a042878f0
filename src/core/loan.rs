//! Loan business logic - history scoring, eligibility decisions, and the
//! top-up loan application workflow.
//!
//! The decision is a four-branch table evaluated in a fixed order: age gate,
//! income gate, then the repayment-history score. Age and income rejections
//! happen before anything is persisted; applications that clear both gates are
//! stored with the status the history score dictates, and pending ones can be
//! approved or rejected later by an admin.

use crate::{
    core::{email, notification},
    entities::{LoanHistory, TopUpLoan, loan_history, top_up_loan, user},
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

/// Minimum age to apply for a loan.
pub const MIN_ELIGIBLE_AGE: i32 = 18;
/// Minimum monthly income, in currency units, to qualify.
pub const MIN_MONTHLY_INCOME: f64 = 20_000.0;
/// Completed-loan count needed for instant approval.
pub const MIN_COMPLETED_LOANS: usize = 2;
/// Completed/total ratio needed for instant approval.
pub const MIN_SUCCESS_RATE: f64 = 0.8;

/// Derived score over a user's prior loan repayment history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryScore {
    /// At least two completed loans, success rate >= 80%, and no defaults
    Good,
    /// At least one defaulted loan
    Poor,
    /// Not enough history to decide either way
    Insufficient,
}

impl HistoryScore {
    /// The string form stored on the application record.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Poor => "poor",
            Self::Insufficient => "insufficient",
        }
    }
}

/// Why an application was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Applicant is under the minimum age
    AgeIneligible,
    /// Monthly income is below the minimum
    LowIncome,
    /// Repayment history contains a default
    PoorHistory,
    /// An admin rejected the application on review
    AdminReview,
}

impl RejectionReason {
    /// The string form stored on the application record.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AgeIneligible => "age_ineligible",
            Self::LowIncome => "low_income",
            Self::PoorHistory => "poor_history",
            Self::AdminReview => "admin_review",
        }
    }
}

/// Outcome of evaluating an application against the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanDecision {
    /// Instant approval on the strength of the repayment history
    Approved,
    /// Rejected with the given reason
    Rejected(RejectionReason),
    /// Insufficient history; held for admin review
    Pending,
}

impl LoanDecision {
    /// The status string stored on the application record.
    #[must_use]
    pub const fn status_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected(_) => "rejected",
            Self::Pending => "pending",
        }
    }
}

/// Scores a user's repayment history.
///
/// Any default makes the score `Poor` regardless of how many loans completed.
/// `Good` needs at least [`MIN_COMPLETED_LOANS`] completions at a success rate
/// of [`MIN_SUCCESS_RATE`] or better; everything else, including an empty
/// history, is `Insufficient`.
#[must_use]
pub fn score_history(history: &[loan_history::Model]) -> HistoryScore {
    if history.is_empty() {
        return HistoryScore::Insufficient;
    }

    let total = history.len();
    let completed = history
        .iter()
        .filter(|loan| loan.repayment_status == "completed")
        .count();
    let defaulted = history
        .iter()
        .filter(|loan| loan.repayment_status == "defaulted")
        .count();

    #[allow(clippy::cast_precision_loss)]
    let success_rate = completed as f64 / total as f64;

    if defaulted > 0 {
        HistoryScore::Poor
    } else if completed >= MIN_COMPLETED_LOANS && success_rate >= MIN_SUCCESS_RATE {
        HistoryScore::Good
    } else {
        HistoryScore::Insufficient
    }
}

/// Evaluates the four-branch eligibility decision.
///
/// The gates run in order: age, then income, then history. An under-age
/// applicant is rejected as `age_ineligible` no matter what the income or
/// history look like, and a poor history rejects even when the history would
/// otherwise just be thin.
#[must_use]
pub fn evaluate_application(age: i32, monthly_income: f64, history: HistoryScore) -> LoanDecision {
    if age < MIN_ELIGIBLE_AGE {
        return LoanDecision::Rejected(RejectionReason::AgeIneligible);
    }
    if monthly_income < MIN_MONTHLY_INCOME {
        return LoanDecision::Rejected(RejectionReason::LowIncome);
    }
    match history {
        HistoryScore::Good => LoanDecision::Approved,
        HistoryScore::Poor => LoanDecision::Rejected(RejectionReason::PoorHistory),
        HistoryScore::Insufficient => LoanDecision::Pending,
    }
}

/// A submitted application form.
#[derive(Debug, Clone, Copy)]
pub struct LoanApplication {
    /// Declared applicant age
    pub age: i32,
    /// Declared monthly income in currency units
    pub monthly_income: f64,
    /// Requested amount in currency units
    pub loan_amount: f64,
}

/// What `apply` produced: either an early rejection (nothing persisted) or a
/// filed application carrying its decided status.
#[derive(Debug, Clone)]
pub enum ApplyOutcome {
    /// Rejected at the age or income gate; no application record exists
    Rejected {
        /// Which gate rejected the applicant
        reason: RejectionReason,
        /// User-facing explanation
        message: String,
    },
    /// Application persisted with an approved/rejected/pending status
    Filed {
        /// The stored application record
        application: top_up_loan::Model,
        /// User-facing status message
        message: String,
    },
}

/// Processes a top-up loan application for a user.
///
/// Age and income rejections return immediately without touching the
/// database. Otherwise the user's loan history is scored, the application is
/// stored with the decided status together with a notification for the user,
/// and the status email is composed and logged.
pub async fn apply(
    db: &DatabaseConnection,
    applicant: &user::Model,
    form: LoanApplication,
) -> Result<ApplyOutcome> {
    if form.age < MIN_ELIGIBLE_AGE {
        return Ok(ApplyOutcome::Rejected {
            reason: RejectionReason::AgeIneligible,
            message: "You must be at least 18 years old to apply for a loan.".to_string(),
        });
    }
    if form.monthly_income < MIN_MONTHLY_INCOME {
        return Ok(ApplyOutcome::Rejected {
            reason: RejectionReason::LowIncome,
            message: "Your monthly income must be at least 20,000 RWF to qualify for a loan."
                .to_string(),
        });
    }

    let history = LoanHistory::find()
        .filter(loan_history::Column::UserId.eq(applicant.id))
        .all(db)
        .await?;
    let score = score_history(&history);
    let decision = evaluate_application(form.age, form.monthly_income, score);

    let amount = email::format_amount(form.loan_amount);
    let (rejection_reason, message) = match decision {
        LoanDecision::Approved => (
            None,
            format!(
                "Congratulations! Your loan application for {amount} RWF has been approved \
                 instantly due to your excellent repayment history."
            ),
        ),
        LoanDecision::Rejected(reason) => (
            Some(reason),
            "Your loan application has been rejected due to poor repayment history.".to_string(),
        ),
        LoanDecision::Pending => (
            None,
            format!(
                "Your loan application for {amount} RWF is under review. You will be notified \
                 within 2-3 business days."
            ),
        ),
    };

    // Store the application and its notification atomically
    let txn = db.begin().await?;

    let model = top_up_loan::ActiveModel {
        user_id: Set(applicant.id),
        age: Set(form.age),
        monthly_income: Set(form.monthly_income),
        loan_amount: Set(form.loan_amount),
        status: Set(decision.status_str().to_string()),
        application_date: Set(chrono::Utc::now()),
        loan_history_score: Set(Some(score.as_str().to_string())),
        rejection_reason: Set(rejection_reason.map(|r| r.as_str().to_string())),
        ..Default::default()
    };
    let application = model.insert(&txn).await?;

    notification::create_notification(
        &txn,
        applicant.id,
        notification_title(decision.status_str()),
        message.clone(),
        notification_kind(decision.status_str()),
    )
    .await?;

    txn.commit().await?;

    let composed = email::compose_loan_email(
        &applicant.username,
        application.status.as_str(),
        application.loan_amount,
        application.rejection_reason.as_deref(),
        None,
    );
    email::log_delivery(applicant.email.as_deref(), &composed);

    info!(
        application_id = application.id,
        status = %application.status,
        "Loan application processed"
    );

    Ok(ApplyOutcome::Filed {
        application,
        message,
    })
}

/// Admin action on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    /// Approve the application
    Approve,
    /// Reject the application with reason `admin_review`
    Reject,
}

/// Applies an admin review decision to an application.
///
/// Sets the status, review timestamp, and notes; a rejection records the
/// `admin_review` reason. The applicant gets a notification and a composed
/// status email.
pub async fn review(
    db: &DatabaseConnection,
    loan_id: i32,
    action: ReviewAction,
    notes: Option<String>,
) -> Result<top_up_loan::Model> {
    let application = TopUpLoan::find_by_id(loan_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Loan application".to_string(),
        })?;

    let applicant = crate::entities::User::find_by_id(application.user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "User".to_string(),
        })?;

    let txn = db.begin().await?;

    let mut active = application.into_active_model();
    match action {
        ReviewAction::Approve => {
            active.status = Set("approved".to_string());
            active.rejection_reason = Set(None);
        }
        ReviewAction::Reject => {
            active.status = Set("rejected".to_string());
            active.rejection_reason = Set(Some(RejectionReason::AdminReview.as_str().to_string()));
        }
    }
    active.admin_review_notes = Set(notes.clone());
    active.review_date = Set(Some(chrono::Utc::now()));
    let application = active.update(&txn).await?;

    notification::create_notification(
        &txn,
        applicant.id,
        notification_title(&application.status),
        format!("Your loan application has been {}.", application.status),
        notification_kind(&application.status),
    )
    .await?;

    txn.commit().await?;

    let composed = email::compose_loan_email(
        &applicant.username,
        application.status.as_str(),
        application.loan_amount,
        application.rejection_reason.as_deref(),
        notes.as_deref(),
    );
    email::log_delivery(applicant.email.as_deref(), &composed);

    info!(
        application_id = application.id,
        status = %application.status,
        "Loan application reviewed"
    );

    Ok(application)
}

/// Retrieves all loan applications, newest first, for the admin screen.
pub async fn get_all_applications(db: &DatabaseConnection) -> Result<Vec<top_up_loan::Model>> {
    TopUpLoan::find()
        .order_by_desc(top_up_loan::Column::ApplicationDate)
        .order_by_desc(top_up_loan::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a user's own loan applications, newest first.
pub async fn get_applications_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<top_up_loan::Model>> {
    TopUpLoan::find()
        .filter(top_up_loan::Column::UserId.eq(user_id))
        .order_by_desc(top_up_loan::Column::ApplicationDate)
        .order_by_desc(top_up_loan::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Aggregate counts over loan applications by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LoanStats {
    /// All applications
    pub total: usize,
    /// Applications awaiting review
    pub pending: usize,
    /// Approved applications
    pub approved: usize,
    /// Rejected applications
    pub rejected: usize,
}

/// Computes the status breakdown over a list of applications.
#[must_use]
pub fn application_stats(applications: &[top_up_loan::Model]) -> LoanStats {
    let count = |status: &str| {
        applications
            .iter()
            .filter(|app| app.status == status)
            .count()
    };
    LoanStats {
        total: applications.len(),
        pending: count("pending"),
        approved: count("approved"),
        rejected: count("rejected"),
    }
}

fn notification_title(status: &str) -> String {
    let capitalized = {
        let mut chars = status.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().collect::<String>() + chars.as_str()
        })
    };
    format!("Loan Application {capitalized}")
}

fn notification_kind(status: &str) -> &'static str {
    match status {
        "approved" => "success",
        "pending" => "warning",
        _ => "error",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::notification::get_notifications_for_user;
    use crate::test_utils::{create_test_loan_history, create_test_user, setup_test_db};

    fn history_entry(status: &str) -> loan_history::Model {
        loan_history::Model {
            id: 0,
            user_id: 1,
            loan_type: "personal".to_string(),
            loan_amount: 10_000.0,
            repayment_status: status.to_string(),
            loan_date: chrono::Utc::now(),
            completion_date: None,
            repayment_score: 0,
        }
    }

    #[test]
    fn test_score_history_empty_is_insufficient() {
        assert_eq!(score_history(&[]), HistoryScore::Insufficient);
    }

    #[test]
    fn test_score_history_two_completed_is_good() {
        let history = vec![history_entry("completed"), history_entry("completed")];
        assert_eq!(score_history(&history), HistoryScore::Good);
    }

    #[test]
    fn test_score_history_single_completion_is_insufficient() {
        let history = vec![history_entry("completed")];
        assert_eq!(score_history(&history), HistoryScore::Insufficient);
    }

    #[test]
    fn test_score_history_default_beats_completions() {
        // Plenty of completions, but one default poisons the score
        let history = vec![
            history_entry("completed"),
            history_entry("completed"),
            history_entry("completed"),
            history_entry("defaulted"),
        ];
        assert_eq!(score_history(&history), HistoryScore::Poor);
    }

    #[test]
    fn test_score_history_success_rate_boundary() {
        // 4 completed / 5 total = exactly 80%: good
        let mut history = vec![history_entry("completed"); 4];
        history.push(history_entry("active"));
        assert_eq!(score_history(&history), HistoryScore::Good);

        // 3 completed / 4 total = 75%: below the bar
        let mut history = vec![history_entry("completed"); 3];
        history.push(history_entry("active"));
        assert_eq!(score_history(&history), HistoryScore::Insufficient);
    }

    #[test]
    fn test_decision_age_gate_wins_over_everything() {
        for score in [
            HistoryScore::Good,
            HistoryScore::Poor,
            HistoryScore::Insufficient,
        ] {
            assert_eq!(
                evaluate_application(17, 1_000_000.0, score),
                LoanDecision::Rejected(RejectionReason::AgeIneligible)
            );
        }
    }

    #[test]
    fn test_decision_income_gate_after_age() {
        assert_eq!(
            evaluate_application(30, 19_999.0, HistoryScore::Good),
            LoanDecision::Rejected(RejectionReason::LowIncome)
        );
        // Exactly the minimum passes the gate
        assert_ne!(
            evaluate_application(30, 20_000.0, HistoryScore::Good),
            LoanDecision::Rejected(RejectionReason::LowIncome)
        );
    }

    #[test]
    fn test_decision_good_history_approves() {
        assert_eq!(
            evaluate_application(25, 50_000.0, HistoryScore::Good),
            LoanDecision::Approved
        );
    }

    #[test]
    fn test_decision_poor_history_rejects() {
        assert_eq!(
            evaluate_application(25, 50_000.0, HistoryScore::Poor),
            LoanDecision::Rejected(RejectionReason::PoorHistory)
        );
    }

    #[test]
    fn test_decision_insufficient_history_pends() {
        assert_eq!(
            evaluate_application(25, 50_000.0, HistoryScore::Insufficient),
            LoanDecision::Pending
        );
    }

    #[test]
    fn test_age_boundary_at_eighteen() {
        assert_eq!(
            evaluate_application(18, 50_000.0, HistoryScore::Insufficient),
            LoanDecision::Pending
        );
    }

    #[tokio::test]
    async fn test_apply_underage_persists_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;

        let outcome = apply(
            &db,
            &user,
            LoanApplication {
                age: 16,
                monthly_income: 100_000.0,
                loan_amount: 50_000.0,
            },
        )
        .await?;

        assert!(matches!(
            outcome,
            ApplyOutcome::Rejected {
                reason: RejectionReason::AgeIneligible,
                ..
            }
        ));
        assert!(get_all_applications(&db).await?.is_empty());
        assert!(get_notifications_for_user(&db, user.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_apply_low_income_persists_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;

        let outcome = apply(
            &db,
            &user,
            LoanApplication {
                age: 30,
                monthly_income: 15_000.0,
                loan_amount: 50_000.0,
            },
        )
        .await?;

        assert!(matches!(
            outcome,
            ApplyOutcome::Rejected {
                reason: RejectionReason::LowIncome,
                ..
            }
        ));
        assert!(get_all_applications(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_apply_without_history_is_pending() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;

        let outcome = apply(
            &db,
            &user,
            LoanApplication {
                age: 30,
                monthly_income: 50_000.0,
                loan_amount: 75_000.0,
            },
        )
        .await?;

        let ApplyOutcome::Filed { application, .. } = outcome else {
            panic!("expected a filed application");
        };
        assert_eq!(application.status, "pending");
        assert_eq!(application.loan_history_score.as_deref(), Some("insufficient"));
        assert!(application.rejection_reason.is_none());

        // A warning notification accompanies the pending application
        let notifications = get_notifications_for_user(&db, user.id).await?;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, "warning");
        assert_eq!(notifications[0].title, "Loan Application Pending");
        Ok(())
    }

    #[tokio::test]
    async fn test_apply_with_good_history_approves_instantly() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;
        create_test_loan_history(&db, user.id, "completed").await?;
        create_test_loan_history(&db, user.id, "completed").await?;

        let outcome = apply(
            &db,
            &user,
            LoanApplication {
                age: 30,
                monthly_income: 50_000.0,
                loan_amount: 75_000.0,
            },
        )
        .await?;

        let ApplyOutcome::Filed { application, .. } = outcome else {
            panic!("expected a filed application");
        };
        assert_eq!(application.status, "approved");
        assert_eq!(application.loan_history_score.as_deref(), Some("good"));

        let notifications = get_notifications_for_user(&db, user.id).await?;
        assert_eq!(notifications[0].kind, "success");
        Ok(())
    }

    #[tokio::test]
    async fn test_apply_with_default_rejects() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;
        create_test_loan_history(&db, user.id, "completed").await?;
        create_test_loan_history(&db, user.id, "defaulted").await?;

        let outcome = apply(
            &db,
            &user,
            LoanApplication {
                age: 30,
                monthly_income: 50_000.0,
                loan_amount: 75_000.0,
            },
        )
        .await?;

        let ApplyOutcome::Filed { application, .. } = outcome else {
            panic!("expected a filed application");
        };
        assert_eq!(application.status, "rejected");
        assert_eq!(application.rejection_reason.as_deref(), Some("poor_history"));
        Ok(())
    }

    #[tokio::test]
    async fn test_review_approves_pending_application() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;
        let outcome = apply(
            &db,
            &user,
            LoanApplication {
                age: 30,
                monthly_income: 50_000.0,
                loan_amount: 75_000.0,
            },
        )
        .await?;
        let ApplyOutcome::Filed { application, .. } = outcome else {
            panic!("expected a filed application");
        };

        let reviewed = review(
            &db,
            application.id,
            ReviewAction::Approve,
            Some("Verified income documents".to_string()),
        )
        .await?;
        assert_eq!(reviewed.status, "approved");
        assert!(reviewed.review_date.is_some());
        assert_eq!(
            reviewed.admin_review_notes.as_deref(),
            Some("Verified income documents")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_review_rejects_with_admin_reason() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;
        let outcome = apply(
            &db,
            &user,
            LoanApplication {
                age: 30,
                monthly_income: 50_000.0,
                loan_amount: 75_000.0,
            },
        )
        .await?;
        let ApplyOutcome::Filed { application, .. } = outcome else {
            panic!("expected a filed application");
        };

        let reviewed = review(&db, application.id, ReviewAction::Reject, None).await?;
        assert_eq!(reviewed.status, "rejected");
        assert_eq!(reviewed.rejection_reason.as_deref(), Some("admin_review"));
        Ok(())
    }

    #[tokio::test]
    async fn test_review_missing_application_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = review(&db, 999, ReviewAction::Approve, None).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_application_stats() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice").await?;
        let bob = create_test_user(&db, "bob").await?;
        create_test_loan_history(&db, bob.id, "completed").await?;
        create_test_loan_history(&db, bob.id, "completed").await?;

        let form = LoanApplication {
            age: 30,
            monthly_income: 50_000.0,
            loan_amount: 75_000.0,
        };
        apply(&db, &alice, form).await?; // pending
        apply(&db, &bob, form).await?; // approved

        let applications = get_all_applications(&db).await?;
        let stats = application_stats(&applications);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.rejected, 0);
        Ok(())
    }
}
