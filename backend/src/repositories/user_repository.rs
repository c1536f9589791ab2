use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use voicecart_shared::UpdateProfileRequest;

use crate::error::AppError;
use crate::models::{Pagination, User};
use crate::repositories::{PaginatedResult, UserRepository};

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> Result<(), AppError> {
        User::insert(&self.pool, user).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        User::find_by_id(&self.pool, id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        User::find_by_email(&self.pool, email).await
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: &UpdateProfileRequest,
    ) -> Result<Option<User>, AppError> {
        User::update_profile(&self.pool, id, changes).await
    }

    async fn list(&self, pagination: Pagination) -> Result<PaginatedResult<User>, AppError> {
        let users = User::list(&self.pool, pagination).await?;
        let total = User::count(&self.pool).await?;

        Ok(PaginatedResult::new(users, total, pagination))
    }

    async fn count(&self) -> Result<i64, AppError> {
        User::count(&self.pool).await
    }
}
