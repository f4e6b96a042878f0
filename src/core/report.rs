//! Admin analytics - the aggregate figures on the admin panel.

use crate::{
    entities::{Product, Purchase, User, purchase},
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use std::collections::HashMap;

/// The analytics block shown on the admin panel.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Analytics {
    /// Number of registered users (admins included)
    pub total_users: u64,
    /// Number of purchases across all users
    pub total_purchases: u64,
    /// Sum of the prices of all purchased products
    pub total_revenue: f64,
    /// Name of the most purchased product, if any purchases exist
    pub most_purchased_product: Option<String>,
    /// How many times the most purchased product was bought
    pub most_purchased_count: u64,
}

/// Computes the admin analytics block.
pub async fn compute_analytics(db: &DatabaseConnection) -> Result<Analytics> {
    let total_users = User::find().count(db).await?;
    let total_purchases = Purchase::find().count(db).await?;

    let rows = Purchase::find().find_also_related(Product).all(db).await?;

    let mut total_revenue = 0.0;
    let mut counts: HashMap<String, u64> = HashMap::new();
    for (_, product) in rows {
        if let Some(product) = product {
            total_revenue += product.price;
            *counts.entry(product.name).or_insert(0) += 1;
        }
    }

    let best = counts.into_iter().max_by(|a, b| {
        // Tie-break on name so the result is stable
        a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0))
    });
    let (most_purchased_product, most_purchased_count) = match best {
        Some((name, count)) => (Some(name), count),
        None => (None, 0),
    };

    Ok(Analytics {
        total_users,
        total_purchases,
        total_revenue,
        most_purchased_product,
        most_purchased_count,
    })
}

/// Per-purchase row for the admin panel's purchase table: who bought what,
/// for how much, and when.
pub async fn purchase_stats(
    db: &DatabaseConnection,
) -> Result<Vec<(purchase::Model, String, String, f64)>> {
    let rows = Purchase::find()
        .find_also_related(Product)
        .all(db)
        .await?;
    let users = User::find().all(db).await?;
    let names: HashMap<i32, String> = users.into_iter().map(|u| (u.id, u.username)).collect();

    Ok(rows
        .into_iter()
        .filter_map(|(purchase, product)| {
            let product = product?;
            let username = names.get(&purchase.user_id)?.clone();
            Some((purchase, username, product.name, product.price))
        })
        .collect())
}
