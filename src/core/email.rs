//! Loan status email composition.
//!
//! Builds the subject and body for loan application status emails. There is
//! no mail transport in this system; `log_delivery` records what would have
//! been sent, matching the behavior when no mail server is configured.

use tracing::{info, warn};

/// A composed email, ready for a transport that does not exist here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanEmail {
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

/// Formats a currency amount with thousands separators and no decimals,
/// e.g. `50000.0` becomes `"50,000"`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Human-readable explanation for a rejection reason code.
#[must_use]
pub fn rejection_reason_text(reason: &str) -> &'static str {
    match reason {
        "age_ineligible" => "You must be at least 18 years old to apply for a loan.",
        "low_income" => "Your monthly income does not meet the minimum requirement of 20,000 RWF.",
        "poor_history" => "Your loan repayment history does not meet our current requirements.",
        _ => "After careful review, your application does not meet our current requirements.",
    }
}

/// Composes the status email for a loan application.
///
/// `status` is `"approved"`, `"rejected"`, or `"pending"`; rejected emails
/// include the reason text and any admin notes.
#[must_use]
pub fn compose_loan_email(
    user_name: &str,
    status: &str,
    loan_amount: f64,
    rejection_reason: Option<&str>,
    admin_notes: Option<&str>,
) -> LoanEmail {
    let amount = format_amount(loan_amount);
    match status {
        "approved" => LoanEmail {
            subject: "Loan Application Approved - InsureMyWay".to_string(),
            body: format!(
                "Dear {user_name},\n\n\
                 Congratulations! Your loan application has been approved.\n\n\
                 Loan Details:\n\
                 - Amount: {amount} RWF\n\
                 - Status: Approved\n\n\
                 The loan amount will be processed and credited to your account \
                 within 1-2 business days.\n\n\
                 Thank you for choosing InsureMyWay!\n\n\
                 Best regards,\nInsureMyWay Team"
            ),
        },
        "rejected" => {
            let reason_text = rejection_reason_text(rejection_reason.unwrap_or(""));
            let notes = admin_notes
                .filter(|n| !n.is_empty())
                .map(|n| format!("\n{n}\n"))
                .unwrap_or_default();
            LoanEmail {
                subject: "Loan Application Update - InsureMyWay".to_string(),
                body: format!(
                    "Dear {user_name},\n\n\
                     Thank you for your interest in our loan services. Unfortunately, \
                     we cannot approve your loan application at this time.\n\n\
                     Reason: {reason_text}\n{notes}\n\
                     You may reapply after addressing the requirements mentioned above.\n\n\
                     Best regards,\nInsureMyWay Team"
                ),
            }
        }
        _ => LoanEmail {
            subject: "Loan Application Received - InsureMyWay".to_string(),
            body: format!(
                "Dear {user_name},\n\n\
                 We have received your loan application and it is currently under review.\n\n\
                 Application Details:\n\
                 - Amount: {amount} RWF\n\
                 - Status: Pending Review\n\n\
                 Our team will review your application and notify you of the decision \
                 within 2-3 business days.\n\n\
                 Thank you for choosing InsureMyWay!\n\n\
                 Best regards,\nInsureMyWay Team"
            ),
        },
    }
}

/// Logs the composed email instead of sending it.
///
/// Users without an email address on file get a warning so the gap shows up
/// in the logs.
pub fn log_delivery(recipient: Option<&str>, email: &LoanEmail) {
    match recipient {
        Some(address) => {
            info!(recipient = address, subject = %email.subject, "Email composed (no transport configured)");
        }
        None => warn!(subject = %email.subject, "No email address on file; notification email skipped"),
    }
}
