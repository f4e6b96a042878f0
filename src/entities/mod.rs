//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod loan_history;
pub mod message;
pub mod notification;
pub mod policy;
pub mod product;
pub mod purchase;
pub mod recommendation;
pub mod top_up_loan;
pub mod user;

// Re-export specific types to avoid conflicts
pub use loan_history::{
    Column as LoanHistoryColumn, Entity as LoanHistory, Model as LoanHistoryModel,
};
pub use message::{Column as MessageColumn, Entity as Message, Model as MessageModel};
pub use notification::{
    Column as NotificationColumn, Entity as Notification, Model as NotificationModel,
};
pub use policy::{Column as PolicyColumn, Entity as Policy, Model as PolicyModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use purchase::{Column as PurchaseColumn, Entity as Purchase, Model as PurchaseModel};
pub use recommendation::{
    Column as RecommendationColumn, Entity as Recommendation, Model as RecommendationModel,
};
pub use top_up_loan::{Column as TopUpLoanColumn, Entity as TopUpLoan, Model as TopUpLoanModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
