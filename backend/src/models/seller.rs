use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use voicecart_shared::{SellerProfileResponse, SellerResponse, ERROR_EMAIL_ALREADY_EXISTS};

use crate::error::AppError;
use crate::models::Pagination;

const SELLER_COLUMNS: &str = r#"
    id, name, email, password_hash, store_name, phone, description,
    is_approved, approved_at, created_at, updated_at
"#;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Seller {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub store_name: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    /// Login is refused until an admin flips this.
    pub is_approved: bool,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Seller {
    /// New sellers always start unapproved.
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        store_name: String,
        phone: Option<String>,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            store_name,
            phone,
            description,
            is_approved: false,
            approved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub async fn insert(pool: &PgPool, seller: &Seller) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO sellers (
                id, name, email, password_hash, store_name, phone, description,
                is_approved, approved_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(seller.id)
        .bind(&seller.name)
        .bind(&seller.email)
        .bind(&seller.password_hash)
        .bind(&seller.store_name)
        .bind(&seller.phone)
        .bind(&seller.description)
        .bind(seller.is_approved)
        .bind(seller.approved_at)
        .bind(seller.created_at)
        .bind(seller.updated_at)
        .execute(pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, ERROR_EMAIL_ALREADY_EXISTS))?;

        Ok(())
    }

    /// Find seller by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let sql = format!("SELECT {SELLER_COLUMNS} FROM sellers WHERE id = $1");
        let seller = sqlx::query_as::<_, Seller>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(seller)
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, AppError> {
        let sql = format!("SELECT {SELLER_COLUMNS} FROM sellers WHERE email = $1");
        let seller = sqlx::query_as::<_, Seller>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(seller)
    }

    /// Mark the seller approved and stamp the approval time.
    pub async fn approve(
        pool: &PgPool,
        id: Uuid,
        approved_at: DateTime<Utc>,
    ) -> Result<Option<Self>, AppError> {
        let sql = format!(
            r#"
            UPDATE sellers
            SET is_approved = TRUE, approved_at = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {SELLER_COLUMNS}
            "#
        );
        let seller = sqlx::query_as::<_, Seller>(&sql)
            .bind(id)
            .bind(approved_at)
            .fetch_optional(pool)
            .await?;

        Ok(seller)
    }

    pub async fn list(pool: &PgPool, pagination: Pagination) -> Result<Vec<Self>, AppError> {
        let sql = format!(
            "SELECT {SELLER_COLUMNS} FROM sellers ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let sellers = sqlx::query_as::<_, Seller>(&sql)
            .bind(pagination.limit)
            .bind(pagination.offset())
            .fetch_all(pool)
            .await?;

        Ok(sellers)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sellers")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    pub async fn count_pending(pool: &PgPool) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sellers WHERE is_approved = FALSE")
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    pub fn to_response(&self) -> SellerResponse {
        SellerResponse {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            store_name: self.store_name.clone(),
        }
    }

    pub fn to_profile(&self) -> SellerProfileResponse {
        SellerProfileResponse {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            store_name: self.store_name.clone(),
            phone: self.phone.clone(),
            description: self.description.clone(),
            is_approved: self.is_approved,
            approved_at: self.approved_at,
            created_at: self.created_at,
        }
    }
}
