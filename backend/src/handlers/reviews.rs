use actix_web::{web, HttpResponse};
use uuid::Uuid;
use voicecart_shared::SubmitReviewRequest;

use crate::error::AppError;
use crate::middleware::Principal;
use crate::services::review_service::ReviewService;

pub async fn submit(
    principal: Principal,
    reviews: web::Data<ReviewService>,
    body: web::Json<SubmitReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let review = reviews.submit(&principal, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(review))
}

pub async fn for_product(
    reviews: web::Data<ReviewService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(reviews.for_product(path.into_inner()).await?))
}
