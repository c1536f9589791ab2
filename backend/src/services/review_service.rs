use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;
use voicecart_shared::{
    ReviewResponse, SubmitReviewRequest, ERROR_PRODUCT_NOT_FOUND, ERROR_REVIEW_ALREADY_EXISTS,
};

use crate::error::AppError;
use crate::middleware::Principal;
use crate::models::review::round_rating;
use crate::models::Review;
use crate::repositories::{ProductRepository, ReviewRepository};

#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    products: Arc<dyn ProductRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { reviews, products }
    }

    /// One review per user and product, checked before the insert. The
    /// product rating becomes the rounded mean of its reviews.
    pub async fn submit(
        &self,
        reviewer: &Principal,
        request: SubmitReviewRequest,
    ) -> Result<ReviewResponse, AppError> {
        request.validate()?;

        let product_id = request.product_id;
        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(AppError::NotFound(ERROR_PRODUCT_NOT_FOUND.to_string()));
        }
        if self.reviews.exists(product_id, reviewer.id).await? {
            return Err(AppError::Duplicate(ERROR_REVIEW_ALREADY_EXISTS.to_string()));
        }

        let review = Review::from_request(reviewer.id, reviewer.name.clone(), request);
        self.reviews.create(&review).await?;

        if let Some(average) = self.reviews.average_rating(product_id).await? {
            let rating = round_rating(average);
            self.products.set_rating(product_id, rating).await?;
            info!("Product {} rating now {}", product_id, rating);
        }

        Ok(review.to_response())
    }

    pub async fn for_product(&self, product_id: Uuid) -> Result<Vec<ReviewResponse>, AppError> {
        let reviews = self.reviews.find_by_product(product_id).await?;
        Ok(reviews.iter().map(Review::to_response).collect())
    }
}
