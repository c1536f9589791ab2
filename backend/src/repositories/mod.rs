//! Repository layer over the storefront records
//!
//! Each record kind has a trait with two implementations: a Postgres one that
//! delegates to the model queries, and the shared in-memory store used when no
//! database is configured and in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use voicecart_shared::{ItemStatus, OrderStatus, PaginatedResponse, UpdateProfileRequest};

use crate::error::AppError;
use crate::models::{Order, Pagination, PaymentUpdate, Product, Review, Seller, User};

pub mod memory;
pub mod order_repository;
pub mod product_repository;
pub mod review_repository;
pub mod seller_repository;
pub mod user_repository;

pub use memory::MemoryStore;
pub use order_repository::PgOrderRepository;
pub use product_repository::PgProductRepository;
pub use review_repository::PgReviewRepository;
pub use seller_repository::PgSellerRepository;
pub use user_repository::PgUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Duplicate` when the email is taken.
    async fn create(&self, user: &User) -> Result<(), AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn update_profile(
        &self,
        id: Uuid,
        changes: &UpdateProfileRequest,
    ) -> Result<Option<User>, AppError>;
    async fn list(&self, pagination: Pagination) -> Result<PaginatedResult<User>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait SellerRepository: Send + Sync {
    /// Fails with `Duplicate` when the email is taken.
    async fn create(&self, seller: &Seller) -> Result<(), AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Seller>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Seller>, AppError>;
    async fn approve(
        &self,
        id: Uuid,
        approved_at: DateTime<Utc>,
    ) -> Result<Option<Seller>, AppError>;
    async fn list(&self, pagination: Pagination) -> Result<PaginatedResult<Seller>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn count_pending(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &Product) -> Result<(), AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError>;
    async fn list_all(&self) -> Result<Vec<Product>, AppError>;
    async fn list(&self, pagination: Pagination) -> Result<PaginatedResult<Product>, AppError>;
    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, AppError>;
    async fn search(&self, needle: &str) -> Result<Vec<Product>, AppError>;
    async fn find_by_seller(&self, seller_id: Uuid) -> Result<Vec<Product>, AppError>;
    async fn find_featured(&self) -> Result<Vec<Product>, AppError>;
    async fn save(&self, product: &Product) -> Result<Option<Product>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
    /// New membership after the toggle, `None` for an unknown product.
    async fn toggle_wishlist(&self, id: Uuid, user_id: Uuid) -> Result<Option<bool>, AppError>;
    async fn find_wishlisted_by(&self, user_id: Uuid) -> Result<Vec<Product>, AppError>;
    async fn set_rating(&self, id: Uuid, rating: f64) -> Result<(), AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists the order with its items. Fails with `Duplicate` on an
    /// order number collision.
    async fn create(&self, order: &Order) -> Result<(), AppError>;
    async fn set_gateway_order_id(&self, id: Uuid, gateway_order_id: &str)
        -> Result<bool, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError>;
    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, AppError>;
    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>, AppError>;
    async fn record_payment(
        &self,
        id: Uuid,
        update: &PaymentUpdate,
    ) -> Result<Option<Order>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, AppError>;
    /// Orders with at least one item of the seller, all items included.
    async fn find_by_seller(&self, seller_id: Uuid) -> Result<Vec<Order>, AppError>;
    async fn update_item_status(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        status: ItemStatus,
    ) -> Result<bool, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn count_by_status(&self, status: OrderStatus) -> Result<i64, AppError>;
    async fn revenue(&self) -> Result<Decimal, AppError>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &Review) -> Result<(), AppError>;
    async fn exists(&self, product_id: Uuid, user_id: Uuid) -> Result<bool, AppError>;
    async fn find_by_product(&self, product_id: Uuid) -> Result<Vec<Review>, AppError>;
    /// Unrounded mean, `None` without reviews.
    async fn average_rating(&self, product_id: Uuid) -> Result<Option<f64>, AppError>;
}

/// Repository container that holds all repositories
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub sellers: Arc<dyn SellerRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            sellers: Arc::new(PgSellerRepository::new(pool.clone())),
            products: Arc::new(PgProductRepository::new(pool.clone())),
            orders: Arc::new(PgOrderRepository::new(pool.clone())),
            reviews: Arc::new(PgReviewRepository::new(pool)),
        }
    }

    /// Every repository backed by one shared in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            users: store.clone(),
            sellers: store.clone(),
            products: store.clone(),
            orders: store.clone(),
            reviews: store,
        }
    }
}

/// Paginated result wrapper
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub pagination: Pagination,
}

impl<T> PaginatedResult<T> {
    pub fn new(data: Vec<T>, total: i64, pagination: Pagination) -> Self {
        Self {
            data,
            total,
            pagination,
        }
    }

    pub fn total_pages(&self) -> i64 {
        (self.total + self.pagination.limit - 1) / self.pagination.limit
    }

    pub fn into_response<R>(self, convert: impl Fn(&T) -> R) -> PaginatedResponse<R> {
        let total_pages = self.total_pages();
        PaginatedResponse {
            data: self.data.iter().map(convert).collect(),
            total: self.total,
            page: self.pagination.page,
            limit: self.pagination.limit,
            total_pages,
        }
    }
}
