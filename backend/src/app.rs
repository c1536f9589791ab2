use actix_web::web;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::handlers;
use crate::repositories::Repositories;
use crate::services::admin_service::AdminService;
use crate::services::auth_service::AuthService;
use crate::services::email_service::{EmailService, Mailer};
use crate::services::order_service::OrderService;
use crate::services::payment_gateway::PaymentGateway;
use crate::services::product_service::ProductService;
use crate::services::review_service::ReviewService;
use crate::utils::JwtService;

/// Every service the HTTP layer needs, built once and cloned per worker.
#[derive(Clone)]
pub struct AppServices {
    pub jwt: JwtService,
    pub auth: AuthService,
    pub products: ProductService,
    pub orders: OrderService,
    pub reviews: ReviewService,
    pub admin: AdminService,
}

impl AppServices {
    pub fn new(
        config: &AppConfig,
        repos: Repositories,
        gateway: Arc<dyn PaymentGateway>,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, AppError> {
        let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiry_hours)?;
        let email = EmailService::new(mailer);

        Ok(Self {
            auth: AuthService::new(repos.users.clone(), repos.sellers.clone(), jwt.clone(), config),
            products: ProductService::new(repos.products.clone()),
            orders: OrderService::new(
                repos.orders.clone(),
                gateway,
                email.clone(),
                config.razorpay_key_secret.clone(),
                config.currency.clone(),
            ),
            reviews: ReviewService::new(repos.reviews.clone(), repos.products.clone()),
            admin: AdminService::new(repos, email),
            jwt,
        })
    }

    /// Shares the services as app data and mounts the routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.jwt.clone()))
            .app_data(web::Data::new(self.auth.clone()))
            .app_data(web::Data::new(self.products.clone()))
            .app_data(web::Data::new(self.orders.clone()))
            .app_data(web::Data::new(self.reviews.clone()))
            .app_data(web::Data::new(self.admin.clone()));

        handlers::configure(cfg);
    }
}
