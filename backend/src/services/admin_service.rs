use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use voicecart_shared::{
    DashboardResponse, OrderStatus, PaginatedResponse, ProductResponse, SellerProfileResponse,
    UserResponse, ERROR_SELLER_NOT_FOUND,
};

use crate::error::AppError;
use crate::models::{Pagination, Product, Seller, User};
use crate::repositories::Repositories;
use crate::services::email_service::EmailService;

/// Back-office views and seller approval.
#[derive(Clone)]
pub struct AdminService {
    repos: Repositories,
    email: EmailService,
}

impl AdminService {
    pub fn new(repos: Repositories, email: EmailService) -> Self {
        Self { repos, email }
    }

    pub async fn dashboard(&self) -> Result<DashboardResponse, AppError> {
        Ok(DashboardResponse {
            total_users: self.repos.users.count().await?,
            total_sellers: self.repos.sellers.count().await?,
            pending_sellers: self.repos.sellers.count_pending().await?,
            total_products: self.repos.products.count().await?,
            total_orders: self.repos.orders.count().await?,
            completed_orders: self
                .repos
                .orders
                .count_by_status(OrderStatus::Completed)
                .await?,
            total_revenue: self.repos.orders.revenue().await?,
        })
    }

    pub async fn users(
        &self,
        pagination: Pagination,
    ) -> Result<PaginatedResponse<UserResponse>, AppError> {
        let page = self.repos.users.list(pagination).await?;
        Ok(page.into_response(User::to_response))
    }

    pub async fn sellers(
        &self,
        pagination: Pagination,
    ) -> Result<PaginatedResponse<SellerProfileResponse>, AppError> {
        let page = self.repos.sellers.list(pagination).await?;
        Ok(page.into_response(Seller::to_profile))
    }

    pub async fn products(
        &self,
        pagination: Pagination,
    ) -> Result<PaginatedResponse<ProductResponse>, AppError> {
        let page = self.repos.products.list(pagination).await?;
        Ok(page.into_response(Product::to_response))
    }

    /// Approving twice refreshes the timestamp and re-sends the email.
    pub async fn approve_seller(&self, id: Uuid) -> Result<SellerProfileResponse, AppError> {
        let seller = self
            .repos
            .sellers
            .approve(id, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_SELLER_NOT_FOUND.to_string()))?;
        info!("Seller {} ({}) approved", seller.id, seller.store_name);

        self.email.send_seller_approved(&seller).await;
        Ok(seller.to_profile())
    }
}
