//! Database connection and table creation using `SeaORM`.
//!
//! Table creation uses `Schema::create_table_from_entity` so the database
//! schema is generated from the entity definitions, keeping it in lockstep
//! with the Rust structs without hand-written SQL.

use crate::entities::{
    LoanHistory, Message, Notification, Policy, Product, Purchase, Recommendation, TopUpLoan, User,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions, if they do not exist yet.
///
/// Uses `IF NOT EXISTS` semantics so startup is safe against an already
/// initialized database and existing rows are preserved.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(Purchase),
        schema.create_table_from_entity(Policy),
        schema.create_table_from_entity(Recommendation),
        schema.create_table_from_entity(Notification),
        schema.create_table_from_entity(Message),
        schema.create_table_from_entity(TopUpLoan),
        schema.create_table_from_entity(LoanHistory),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    Ok(())
}
