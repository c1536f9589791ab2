use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use voicecart_shared::{ReviewResponse, SubmitReviewRequest};

use crate::error::AppError;

const REVIEW_COLUMNS: &str = "id, product_id, user_id, user_name, rating, comment, created_at";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    /// Copied from the reviewer at submission time.
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn from_request(user_id: Uuid, user_name: String, request: SubmitReviewRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: request.product_id,
            user_id,
            user_name,
            rating: request.rating,
            comment: request.comment,
            created_at: Utc::now(),
        }
    }

    pub async fn create(pool: &PgPool, review: &Review) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, product_id, user_id, user_name, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(review.id)
        .bind(review.product_id)
        .bind(review.user_id)
        .bind(&review.user_name)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn exists(pool: &PgPool, product_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE product_id = $1 AND user_id = $2)",
        )
        .bind(product_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Newest first
    pub async fn find_by_product(pool: &PgPool, product_id: Uuid) -> Result<Vec<Self>, AppError> {
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE product_id = $1 ORDER BY created_at DESC"
        );
        let reviews = sqlx::query_as::<_, Review>(&sql)
            .bind(product_id)
            .fetch_all(pool)
            .await?;

        Ok(reviews)
    }

    pub async fn average_rating(pool: &PgPool, product_id: Uuid) -> Result<Option<f64>, AppError> {
        let average = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(rating)::float8 FROM reviews WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(pool)
        .await?;

        Ok(average)
    }

    pub fn to_response(&self) -> ReviewResponse {
        ReviewResponse {
            id: self.id,
            product_id: self.product_id,
            user_id: self.user_id,
            user_name: self.user_name.clone(),
            rating: self.rating,
            comment: self.comment.clone(),
            created_at: self.created_at,
        }
    }
}

/// Mean rating rounded to one decimal place.
pub fn rounded_average(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    let mean = sum as f64 / ratings.len() as f64;
    Some(round_rating(mean))
}

pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rounds_to_one_decimal() {
        assert_eq!(rounded_average(&[]), None);
        assert_eq!(rounded_average(&[5]), Some(5.0));
        assert_eq!(rounded_average(&[4, 5, 5]), Some(4.7));
        assert_eq!(rounded_average(&[1, 2]), Some(1.5));
    }
}
