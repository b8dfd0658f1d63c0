use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::products::repo::Product;

/// One cart line with its product resolved. Lines whose product has been
/// deleted from the catalog are skipped by the join.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartLine {
    #[sqlx(flatten)]
    pub product: Product,
    // Aliased in the query so it cannot collide with the product's stock count.
    #[sqlx(rename = "cart_quantity")]
    pub quantity: i32,
}

/// A cart is the set of `cart_items` rows for one user. The primary key
/// (user_id, product_id) is what upholds the one-line-per-product invariant.
pub async fn lines(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<CartLine>> {
    let rows = sqlx::query_as::<_, CartLine>(
        r#"
        SELECT p.id, p.code, p.name, p.description, p.image, p.category,
               p.price, p.quantity, p.internal_reference, p.shell_id,
               p.inventory_status, p.rating, p.created_at, p.updated_at,
               c.quantity AS cart_quantity
        FROM cart_items c
        JOIN products p ON p.id = c.product_id
        WHERE c.user_id = $1
        ORDER BY c.added_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Find-or-create-and-accumulate in one atomic statement. Two concurrent adds
/// for the same (user, product) serialize inside Postgres: neither a second
/// line nor a lost increment is possible.
pub async fn add_item(
    db: &PgPool,
    user_id: Uuid,
    product_id: Uuid,
    quantity: i32,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO cart_items (user_id, product_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, product_id)
        DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .execute(db)
    .await?;
    Ok(())
}

/// Set (not accumulate) the quantity of an existing line. Returns false when
/// the user has no line for this product.
pub async fn set_quantity(
    db: &PgPool,
    user_id: Uuid,
    product_id: Uuid,
    quantity: i32,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE cart_items
        SET quantity = $3
        WHERE user_id = $1 AND product_id = $2
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Returns false when no line matched.
pub async fn remove_item(db: &PgPool, user_id: Uuid, product_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM cart_items
        WHERE user_id = $1 AND product_id = $2
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Idempotent: clearing an already-empty cart is a no-op.
pub async fn clear(db: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(r#"DELETE FROM cart_items WHERE user_id = $1"#)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(())
}
