use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Pagination, Product};
use crate::repositories::{PaginatedResult, ProductRepository};

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: &Product) -> Result<(), AppError> {
        Product::insert(&self.pool, product).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        Product::find_by_id(&self.pool, id).await
    }

    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        Product::list_all(&self.pool).await
    }

    async fn list(&self, pagination: Pagination) -> Result<PaginatedResult<Product>, AppError> {
        let products = Product::list(&self.pool, pagination).await?;
        let total = Product::count(&self.pool).await?;

        Ok(PaginatedResult::new(products, total, pagination))
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        Product::find_by_category(&self.pool, category).await
    }

    async fn search(&self, needle: &str) -> Result<Vec<Product>, AppError> {
        Product::search(&self.pool, needle).await
    }

    async fn find_by_seller(&self, seller_id: Uuid) -> Result<Vec<Product>, AppError> {
        Product::find_by_seller(&self.pool, seller_id).await
    }

    async fn find_featured(&self) -> Result<Vec<Product>, AppError> {
        Product::find_featured(&self.pool).await
    }

    async fn save(&self, product: &Product) -> Result<Option<Product>, AppError> {
        Product::save(&self.pool, product).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Product::delete(&self.pool, id).await
    }

    async fn toggle_wishlist(&self, id: Uuid, user_id: Uuid) -> Result<Option<bool>, AppError> {
        Product::toggle_wishlist(&self.pool, id, user_id).await
    }

    async fn find_wishlisted_by(&self, user_id: Uuid) -> Result<Vec<Product>, AppError> {
        Product::find_wishlisted_by(&self.pool, user_id).await
    }

    async fn set_rating(&self, id: Uuid, rating: f64) -> Result<(), AppError> {
        Product::set_rating(&self.pool, id, rating).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        Product::count(&self.pool).await
    }
}
