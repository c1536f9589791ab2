use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use voicecart_shared::{CreateProductRequest, ProductImage, ProductResponse, UpdateProductRequest};

use crate::error::AppError;
use crate::models::Pagination;

const PRODUCT_COLUMNS: &str = r#"
    id, seller_id, name, description, price, discount_price, category, stock, brand,
    rating, in_stock, featured, images, wishlist, created_at, updated_at
"#;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub category: String,
    /// Not tied to `in_stock`; sellers set both independently.
    pub stock: i32,
    pub brand: String,
    pub rating: f64,
    pub in_stock: bool,
    pub featured: bool,
    pub images: Json<Vec<ProductImage>>,
    pub wishlist: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn from_request(seller_id: Uuid, request: CreateProductRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            seller_id,
            name: request.name,
            description: request.description,
            price: request.price,
            discount_price: request.discount_price,
            category: request.category,
            stock: request.stock,
            brand: request.brand,
            rating: request.rating.unwrap_or(0.0),
            in_stock: request.in_stock.unwrap_or(true),
            featured: request.featured.unwrap_or(false),
            images: Json(request.images),
            wishlist: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place. Price consistency is checked by the
    /// caller on the result.
    pub fn apply_update(&mut self, update: UpdateProductRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if update.clear_discount {
            self.discount_price = None;
        } else if let Some(discount_price) = update.discount_price {
            self.discount_price = Some(discount_price);
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(brand) = update.brand {
            self.brand = brand;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(in_stock) = update.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        if let Some(images) = update.images {
            self.images = Json(images);
        }
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, seller_id: Uuid) -> bool {
        self.seller_id == seller_id
    }

    /// Case-insensitive substring match over name, description and category.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [&self.name, &self.description, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub async fn insert(pool: &PgPool, product: &Product) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, seller_id, name, description, price, discount_price, category, stock, brand,
                rating, in_stock, featured, images, wishlist, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(product.id)
        .bind(product.seller_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.discount_price)
        .bind(&product.category)
        .bind(product.stock)
        .bind(&product.brand)
        .bind(product.rating)
        .bind(product.in_stock)
        .bind(product.featured)
        .bind(&product.images)
        .bind(&product.wishlist)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Overwrite every mutable column. Last write wins.
    pub async fn save(pool: &PgPool, product: &Product) -> Result<Option<Self>, AppError> {
        let sql = format!(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, discount_price = $5, category = $6,
                stock = $7, brand = $8, rating = $9, in_stock = $10, featured = $11,
                images = $12, updated_at = $13
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let saved = sqlx::query_as::<_, Product>(&sql)
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.discount_price)
            .bind(&product.category)
            .bind(product.stock)
            .bind(&product.brand)
            .bind(product.rating)
            .bind(product.in_stock)
            .bind(product.featured)
            .bind(&product.images)
            .bind(product.updated_at)
            .fetch_optional(pool)
            .await?;

        Ok(saved)
    }

    /// Find product by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(product)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC");
        let products = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;

        Ok(products)
    }

    pub async fn list(pool: &PgPool, pagination: Pagination) -> Result<Vec<Self>, AppError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(pagination.limit)
            .bind(pagination.offset())
            .fetch_all(pool)
            .await?;

        Ok(products)
    }

    /// Case-insensitive exact category match
    pub async fn find_by_category(pool: &PgPool, category: &str) -> Result<Vec<Self>, AppError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE LOWER(category) = LOWER($1) ORDER BY created_at DESC"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(category)
            .fetch_all(pool)
            .await?;

        Ok(products)
    }

    pub async fn search(pool: &PgPool, needle: &str) -> Result<Vec<Self>, AppError> {
        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS} FROM products
            WHERE name ILIKE $1 OR description ILIKE $1 OR category ILIKE $1
            ORDER BY created_at DESC
            "#
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(like_pattern(needle))
            .fetch_all(pool)
            .await?;

        Ok(products)
    }

    pub async fn find_by_seller(pool: &PgPool, seller_id: Uuid) -> Result<Vec<Self>, AppError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE seller_id = $1 ORDER BY created_at DESC"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(seller_id)
            .fetch_all(pool)
            .await?;

        Ok(products)
    }

    pub async fn find_featured(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE featured = TRUE ORDER BY created_at DESC"
        );
        let products = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;

        Ok(products)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Add or remove the user from the wishlist. Returns the new membership,
    /// or `None` when the product does not exist.
    pub async fn toggle_wishlist(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<bool>, AppError> {
        let member = sqlx::query_scalar::<_, bool>(
            r#"
            UPDATE products
            SET wishlist = CASE
                    WHEN $2 = ANY(wishlist) THEN array_remove(wishlist, $2)
                    ELSE array_append(wishlist, $2)
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING $2 = ANY(wishlist)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(member)
    }

    pub async fn find_wishlisted_by(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, AppError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE $1 = ANY(wishlist) ORDER BY created_at DESC"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        Ok(products)
    }

    pub async fn set_rating(pool: &PgPool, id: Uuid, rating: f64) -> Result<(), AppError> {
        sqlx::query("UPDATE products SET rating = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(rating)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Convert to response DTO
    pub fn to_response(&self) -> ProductResponse {
        ProductResponse {
            id: self.id,
            seller_id: self.seller_id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            discount_price: self.discount_price,
            category: self.category.clone(),
            stock: self.stock,
            brand: self.brand.clone(),
            rating: self.rating,
            in_stock: self.in_stock,
            featured: self.featured,
            images: self.images.0.clone(),
            wishlist: self.wishlist.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
