use sqlx::PgPool;
use uuid::Uuid;

use crate::products::repo::Product;

/// Products on the user's wishlist, oldest first. Deleted products drop out
/// of the join.
pub async fn products(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Product>> {
    let rows = sqlx::query_as::<_, Product>(
        r#"
        SELECT p.id, p.code, p.name, p.description, p.image, p.category,
               p.price, p.quantity, p.internal_reference, p.shell_id,
               p.inventory_status, p.rating, p.created_at, p.updated_at
        FROM wishlist_items w
        JOIN products p ON p.id = w.product_id
        WHERE w.user_id = $1
        ORDER BY w.added_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Set-insert: adding a product that is already present is a no-op.
pub async fn add(db: &PgPool, user_id: Uuid, product_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO wishlist_items (user_id, product_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, product_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .execute(db)
    .await?;
    Ok(())
}

/// Returns false when the product was not on the wishlist.
pub async fn remove(db: &PgPool, user_id: Uuid, product_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM wishlist_items
        WHERE user_id = $1 AND product_id = $2
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Idempotent.
pub async fn clear(db: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(r#"DELETE FROM wishlist_items WHERE user_id = $1"#)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(())
}
