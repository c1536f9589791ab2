use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;
use voicecart_shared::{CreateProductRequest, SearchQuery, UpdateProductRequest};

use crate::error::AppError;
use crate::middleware::Principal;
use crate::services::product_service::ProductService;

pub async fn add_product(
    principal: Principal,
    products: web::Data<ProductService>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = products.create(principal.id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

pub async fn get_all(products: web::Data<ProductService>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(products.list_all().await?))
}

pub async fn get_featured(products: web::Data<ProductService>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(products.featured().await?))
}

pub async fn get_by_category(
    products: web::Data<ProductService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(products.by_category(&path).await?))
}

pub async fn search(
    products: web::Data<ProductService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(products.search(&query.q).await?))
}

pub async fn get_product(
    products: web::Data<ProductService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(products.get(path.into_inner()).await?))
}

pub async fn update_product(
    principal: Principal,
    products: web::Data<ProductService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = products
        .update(&principal, path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

pub async fn delete_product(
    principal: Principal,
    products: web::Data<ProductService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    products.delete(&principal, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Product deleted"
    })))
}
