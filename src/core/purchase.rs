//! Purchase business logic - recording purchases and the dashboard aggregates
//! derived from them.
//!
//! Aggregation happens over the loaded rows rather than in SQL: purchase
//! volumes here are tiny and the month bucketing is simpler and portable in
//! Rust than in backend-specific `strftime` queries.

use crate::{
    entities::{Product, Purchase, product, purchase},
    errors::{Error, Result},
};
use chrono::Datelike;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::BTreeMap;

/// Records a purchase of a product by a user, stamped with the current UTC time.
pub async fn record_purchase(
    db: &DatabaseConnection,
    user_id: i32,
    product_id: i32,
) -> Result<purchase::Model> {
    // The product must exist; FK enforcement alone gives an opaque error
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Product".to_string(),
        })?;

    let model = purchase::ActiveModel {
        user_id: Set(user_id),
        product_id: Set(product_id),
        purchase_date: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves a user's purchases joined with the purchased products, oldest first.
pub async fn get_purchases_with_products(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<(purchase::Model, product::Model)>> {
    let rows = Purchase::find()
        .filter(purchase::Column::UserId.eq(user_id))
        .find_also_related(Product)
        .order_by_asc(purchase::Column::PurchaseDate)
        .all(db)
        .await?;

    // A purchase without its product would mean referential breakage; skip it
    Ok(rows
        .into_iter()
        .filter_map(|(purchase, product)| product.map(|p| (purchase, p)))
        .collect())
}

/// Monthly spending totals over a user's purchases.
///
/// Buckets by calendar month of the purchase date and returns
/// `(label, total)` pairs in chronological order, labels as `"YYYY-MM"`.
#[must_use]
pub fn monthly_spending(purchases: &[(purchase::Model, product::Model)]) -> Vec<(String, f64)> {
    let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
    for (purchase, product) in purchases {
        let label = format!(
            "{:04}-{:02}",
            purchase.purchase_date.year(),
            purchase.purchase_date.month()
        );
        *buckets.entry(label).or_insert(0.0) += product.price;
    }
    buckets.into_iter().collect()
}

/// Distribution of purchased products across insurance types.
///
/// Types are inferred from description keywords the way the catalog is
/// written: `medical` means health, `vehicle` means auto, `property` means
/// home. Types with zero purchases are omitted.
#[must_use]
pub fn product_type_distribution(
    purchases: &[(purchase::Model, product::Model)],
) -> Vec<(String, usize)> {
    let mut health = 0;
    let mut auto = 0;
    let mut home = 0;
    for (_, product) in purchases {
        let description = product.description.to_lowercase();
        if description.contains("medical") {
            health += 1;
        } else if description.contains("vehicle") {
            auto += 1;
        } else if description.contains("property") {
            home += 1;
        }
    }

    [("Health", health), ("Auto", auto), ("Home", home)]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{
        create_custom_product, create_test_product, create_test_user, setup_test_db,
    };

    #[tokio::test]
    async fn test_record_purchase() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;
        let product = create_test_product(&db, "Basic Plan").await?;

        let purchase = record_purchase(&db, user.id, product.id).await?;
        assert_eq!(purchase.user_id, user.id);
        assert_eq!(purchase.product_id, product.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_record_purchase_missing_product() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;

        let result = record_purchase(&db, user.id, 999).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_purchases_join_products_and_scope_to_user() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice").await?;
        let bob = create_test_user(&db, "bob").await?;
        let product = create_test_product(&db, "Basic Plan").await?;

        record_purchase(&db, alice.id, product.id).await?;
        record_purchase(&db, bob.id, product.id).await?;

        let purchases = get_purchases_with_products(&db, alice.id).await?;
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].1.name, "Basic Plan");
        Ok(())
    }

    #[tokio::test]
    async fn test_monthly_spending_buckets_by_month() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;
        let product = create_custom_product(&db, "Plan", "medical coverage", 100.0).await?;

        record_purchase(&db, user.id, product.id).await?;
        record_purchase(&db, user.id, product.id).await?;

        let purchases = get_purchases_with_products(&db, user.id).await?;
        let spending = monthly_spending(&purchases);
        // Both purchases land in the current month
        assert_eq!(spending.len(), 1);
        assert_eq!(spending[0].1, 200.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_product_type_distribution_keywords() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;
        let health = create_custom_product(&db, "H", "Essential medical coverage", 10.0).await?;
        let auto = create_custom_product(&db, "A", "Full vehicle protection", 20.0).await?;
        let other = create_custom_product(&db, "O", "Travel coverage abroad", 30.0).await?;

        record_purchase(&db, user.id, health.id).await?;
        record_purchase(&db, user.id, health.id).await?;
        record_purchase(&db, user.id, auto.id).await?;
        record_purchase(&db, user.id, other.id).await?;

        let purchases = get_purchases_with_products(&db, user.id).await?;
        let distribution = product_type_distribution(&purchases);
        assert_eq!(distribution.len(), 2);
        assert!(distribution.contains(&("Health".to_string(), 2)));
        assert!(distribution.contains(&("Auto".to_string(), 1)));
        Ok(())
    }
}
