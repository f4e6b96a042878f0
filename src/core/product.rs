//! Product catalog business logic - listing and admin CRUD.
//!
//! Deleting a product also deletes its purchases, matching the admin panel's
//! delete action, so the two run inside one database transaction.

use crate::{
    entities::{Product, Purchase, product, purchase},
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// Retrieves the whole product catalog, ordered by name.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i32,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new catalog product, validating name, description, and price.
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    description: String,
    price: f64,
) -> Result<product::Model> {
    if name.trim().is_empty() || description.trim().is_empty() {
        return Err(Error::Validation {
            message: "All fields are required to add a product".to_string(),
        });
    }
    if !price.is_finite() || price < 0.0 {
        return Err(Error::Validation {
            message: "Price must be a non-negative number".to_string(),
        });
    }

    let model = product::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description.trim().to_string()),
        price: Set(price),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Updates a product's fields; `None` leaves the existing value in place.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i32,
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
) -> Result<product::Model> {
    let existing = get_product_by_id(db, product_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Product".to_string(),
        })?;

    if let Some(price) = price
        && (!price.is_finite() || price < 0.0)
    {
        return Err(Error::Validation {
            message: "Price must be a non-negative number".to_string(),
        });
    }

    let mut active = existing.into_active_model();
    if let Some(name) = name {
        active.name = Set(name);
    }
    if let Some(description) = description {
        active.description = Set(description);
    }
    if let Some(price) = price {
        active.price = Set(price);
    }
    active.update(db).await.map_err(Into::into)
}

/// Deletes a product together with all purchases that reference it.
pub async fn delete_product(db: &DatabaseConnection, product_id: i32) -> Result<()> {
    let product = get_product_by_id(db, product_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Product".to_string(),
        })?;

    let txn = db.begin().await?;
    Purchase::delete_many()
        .filter(purchase::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    product.delete(&txn).await?;
    txn.commit().await?;

    Ok(())
}
