//! Database configuration module.
//!
//! Handles `SQLite` connections and table creation using `SeaORM`. Tables are
//! generated from the entity definitions via `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::{Document, LineItem, Payment, StockItem, StockMovement};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the environment or returns the default
/// `SQLite` path.
pub fn get_database_url() -> Result<String> {
    Ok(std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/clinic_billing.sqlite".to_string()))
}

/// Establishes a connection using `DATABASE_URL`, falling back to a local
/// `SQLite` file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url()?;
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all billing tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut document_table = schema.create_table_from_entity(Document);
    let mut line_item_table = schema.create_table_from_entity(LineItem);
    let mut payment_table = schema.create_table_from_entity(Payment);
    let mut stock_item_table = schema.create_table_from_entity(StockItem);
    let mut stock_movement_table = schema.create_table_from_entity(StockMovement);
    document_table.if_not_exists();
    line_item_table.if_not_exists();
    payment_table.if_not_exists();
    stock_item_table.if_not_exists();
    stock_movement_table.if_not_exists();

    db.execute(builder.build(&document_table)).await?;
    db.execute(builder.build(&line_item_table)).await?;
    db.execute(builder.build(&payment_table)).await?;
    db.execute(builder.build(&stock_item_table)).await?;
    db.execute(builder.build(&stock_movement_table)).await?;

    Ok(())
}
