use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::{CreateProductRequest, UpdateProductRequest};

/// Stock level advertised on the product card. Stored as a Postgres enum;
/// wire values match the legacy API (`INSTOCK`, ...). Deliberately NOT derived
/// from `quantity` — the two are independently settable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "inventory_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum InventoryStatus {
    InStock,
    LowStock,
    OutOfStock,
}

/// Product record in the catalog store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub internal_reference: Option<String>,
    pub shell_id: Option<i64>,
    pub inventory_status: InventoryStatus,
    pub rating: Option<f64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const PRODUCT_COLUMNS: &str = r#"
    id, code, name, description, image, category, price, quantity,
    internal_reference, shell_id, inventory_status, rating, created_at, updated_at
"#;

impl Product {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            ORDER BY created_at DESC
            "#,
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }

    pub async fn exists(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)"#)
                .bind(id)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }

    pub async fn create(db: &PgPool, req: &CreateProductRequest) -> anyhow::Result<Product> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products
                (code, name, description, image, category, price, quantity,
                 internal_reference, shell_id, inventory_status, rating)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PRODUCT_COLUMNS}
            "#,
        ))
        .bind(&req.code)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.image)
        .bind(&req.category)
        .bind(req.price)
        .bind(req.quantity)
        .bind(&req.internal_reference)
        .bind(req.shell_id)
        .bind(req.inventory_status)
        .bind(req.rating)
        .fetch_one(db)
        .await?;
        Ok(product)
    }

    /// Partial update: absent fields keep their stored values.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        req: &UpdateProductRequest,
    ) -> anyhow::Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                image = COALESCE($5, image),
                category = COALESCE($6, category),
                price = COALESCE($7, price),
                quantity = COALESCE($8, quantity),
                internal_reference = COALESCE($9, internal_reference),
                shell_id = COALESCE($10, shell_id),
                inventory_status = COALESCE($11, inventory_status),
                rating = COALESCE($12, rating),
                updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&req.code)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.image)
        .bind(&req.category)
        .bind(req.price)
        .bind(req.quantity)
        .bind(&req.internal_reference)
        .bind(req.shell_id)
        .bind(req.inventory_status)
        .bind(req.rating)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }

    /// Returns whether a row was deleted. Cart and wishlist lines referencing
    /// the product are left in place; reads skip them.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM products WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_status_uses_legacy_wire_values() {
        assert_eq!(
            serde_json::to_string(&InventoryStatus::InStock).unwrap(),
            r#""INSTOCK""#
        );
        assert_eq!(
            serde_json::to_string(&InventoryStatus::LowStock).unwrap(),
            r#""LOWSTOCK""#
        );
        assert_eq!(
            serde_json::to_string(&InventoryStatus::OutOfStock).unwrap(),
            r#""OUTOFSTOCK""#
        );
        let parsed: InventoryStatus = serde_json::from_str(r#""OUTOFSTOCK""#).unwrap();
        assert_eq!(parsed, InventoryStatus::OutOfStock);
    }

    #[test]
    fn product_serializes_camel_case() {
        let product = Product {
            id: Uuid::new_v4(),
            code: "P-001".into(),
            name: "Gamer Mouse".into(),
            description: None,
            image: None,
            category: Some("Accessories".into()),
            price: 49.9,
            quantity: 12,
            internal_reference: Some("REF-1".into()),
            shell_id: Some(3),
            inventory_status: InventoryStatus::LowStock,
            rating: Some(4.5),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains(r#""inventoryStatus":"LOWSTOCK""#));
        assert!(json.contains(r#""internalReference":"REF-1""#));
        assert!(json.contains(r#""shellId":3"#));
        assert!(json.contains(r#""createdAt""#));
        assert!(!json.contains("internal_reference"));
    }
}
