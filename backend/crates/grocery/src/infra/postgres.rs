//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{GroceryItemId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::GroceryItem;
use crate::domain::repository::GroceryRepository;
use crate::domain::value_object::{Category, Description, ImageUrl, ItemName, Price, Quantity};
use crate::error::GroceryResult;

#[derive(Clone)]
pub struct PgGroceryRepository {
    pool: PgPool,
}

impl PgGroceryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ITEM_COLUMNS: &str = r#"
    grocery_item_id,
    owner_id,
    name,
    description,
    price,
    quantity,
    category,
    image_url,
    is_available,
    created_at,
    updated_at
"#;

impl GroceryRepository for PgGroceryRepository {
    async fn insert(&self, item: &GroceryItem) -> GroceryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO grocery_items (
                grocery_item_id,
                owner_id,
                name,
                description,
                price,
                quantity,
                category,
                image_url,
                is_available,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(item.grocery_item_id.as_uuid())
        .bind(item.owner_id.as_uuid())
        .bind(item.name.as_str())
        .bind(item.description.as_ref().map(Description::as_str))
        .bind(item.price.value())
        .bind(item.quantity.value())
        .bind(item.category.as_str())
        .bind(item.image_url.as_ref().map(ImageUrl::as_str))
        .bind(item.is_available)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> GroceryResult<Vec<GroceryItem>> {
        let rows = sqlx::query_as::<_, GroceryItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM grocery_items WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GroceryItemRow::into_item).collect())
    }

    async fn find(
        &self,
        item_id: &GroceryItemId,
        owner_id: &UserId,
    ) -> GroceryResult<Option<GroceryItem>> {
        let row = sqlx::query_as::<_, GroceryItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM grocery_items WHERE grocery_item_id = $1 AND owner_id = $2"
        ))
        .bind(item_id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GroceryItemRow::into_item))
    }

    async fn update(&self, item: &GroceryItem) -> GroceryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE grocery_items SET
                name = $3,
                description = $4,
                price = $5,
                quantity = $6,
                category = $7,
                image_url = $8,
                is_available = $9,
                updated_at = $10
            WHERE grocery_item_id = $1 AND owner_id = $2
            "#,
        )
        .bind(item.grocery_item_id.as_uuid())
        .bind(item.owner_id.as_uuid())
        .bind(item.name.as_str())
        .bind(item.description.as_ref().map(Description::as_str))
        .bind(item.price.value())
        .bind(item.quantity.value())
        .bind(item.category.as_str())
        .bind(item.image_url.as_ref().map(ImageUrl::as_str))
        .bind(item.is_available)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, item_id: &GroceryItemId, owner_id: &UserId) -> GroceryResult<bool> {
        let result =
            sqlx::query("DELETE FROM grocery_items WHERE grocery_item_id = $1 AND owner_id = $2")
                .bind(item_id.as_uuid())
                .bind(owner_id.as_uuid())
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct GroceryItemRow {
    grocery_item_id: Uuid,
    owner_id: Uuid,
    name: String,
    description: Option<String>,
    price: f64,
    quantity: i32,
    category: String,
    image_url: Option<String>,
    is_available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GroceryItemRow {
    fn into_item(self) -> GroceryItem {
        GroceryItem {
            grocery_item_id: GroceryItemId::from_uuid(self.grocery_item_id),
            owner_id: UserId::from_uuid(self.owner_id),
            name: ItemName::from_db(self.name),
            description: self.description.map(Description::from_db),
            price: Price::from_db(self.price),
            quantity: Quantity::from_db(self.quantity),
            category: Category::from_db(self.category),
            image_url: self.image_url.map(ImageUrl::from_db),
            is_available: self.is_available,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
