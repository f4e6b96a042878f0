//! Core business logic - framework-agnostic operations over the entities.
//!
//! Everything in here takes a database connection and plain values; the HTTP
//! layer is a thin adapter on top. All functions are async and return the
//! crate `Result` type.

/// Registration, login, and password hashing
pub mod auth;
/// Loan status email composition (logged, never sent)
pub mod email;
/// Loan history scoring, eligibility decisions, and the application workflow
pub mod loan;
/// Support chat between users and admins
pub mod message;
/// System notifications
pub mod notification;
/// Product catalog management
pub mod product;
/// Profile updates and completion scoring
pub mod profile;
/// Purchase recording and dashboard aggregates
pub mod purchase;
/// Policy recommendation engine
pub mod recommendation;
/// Admin analytics
pub mod report;
