use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Review;
use crate::repositories::ReviewRepository;

#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(&self, review: &Review) -> Result<(), AppError> {
        Review::create(&self.pool, review).await
    }

    async fn exists(&self, product_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        Review::exists(&self.pool, product_id, user_id).await
    }

    async fn find_by_product(&self, product_id: Uuid) -> Result<Vec<Review>, AppError> {
        Review::find_by_product(&self.pool, product_id).await
    }

    async fn average_rating(&self, product_id: Uuid) -> Result<Option<f64>, AppError> {
        Review::average_rating(&self.pool, product_id).await
    }
}
