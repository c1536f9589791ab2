use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Pagination, Seller};
use crate::repositories::{PaginatedResult, SellerRepository};

#[derive(Clone)]
pub struct PgSellerRepository {
    pool: PgPool,
}

impl PgSellerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SellerRepository for PgSellerRepository {
    async fn create(&self, seller: &Seller) -> Result<(), AppError> {
        Seller::insert(&self.pool, seller).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Seller>, AppError> {
        Seller::find_by_id(&self.pool, id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Seller>, AppError> {
        Seller::find_by_email(&self.pool, email).await
    }

    async fn approve(
        &self,
        id: Uuid,
        approved_at: DateTime<Utc>,
    ) -> Result<Option<Seller>, AppError> {
        Seller::approve(&self.pool, id, approved_at).await
    }

    async fn list(&self, pagination: Pagination) -> Result<PaginatedResult<Seller>, AppError> {
        let sellers = Seller::list(&self.pool, pagination).await?;
        let total = Seller::count(&self.pool).await?;

        Ok(PaginatedResult::new(sellers, total, pagination))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Seller::count(&self.pool).await
    }

    async fn count_pending(&self) -> Result<i64, AppError> {
        Seller::count_pending(&self.pool).await
    }
}
