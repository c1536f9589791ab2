use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use voicecart_shared::{CreateOrderRequest, OrderItemRequest, PaymentMethod, ShippingAddress};

use crate::app::AppServices;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::repositories::Repositories;
use crate::services::email_service::{EmailMessage, Mailer};
use crate::services::payment_gateway::{GatewayOrder, PaymentGateway};

pub const GATEWAY_SECRET: &str = "rzp_test_secret_key";

pub fn config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: None,
        jwt_secret: "test-secret-key-for-testing-only-must-be-at-least-32-chars".to_string(),
        jwt_expiry_hours: 24,
        bcrypt_cost: 4,
        razorpay_key_id: "rzp_test_key".to_string(),
        razorpay_key_secret: GATEWAY_SECRET.to_string(),
        razorpay_api_url: "http://gateway.invalid/v1".to_string(),
        currency: "INR".to_string(),
        email_api_url: None,
        email_api_key: None,
        email_from: "VoiceCart <orders@voicecart.test>".to_string(),
        frontend_origin: "http://localhost:3000".to_string(),
        admin_email: "admin@voicecart.test".to_string(),
        admin_password: "admin-pass".to_string(),
    }
}

/// Gateway double that hands out sequential order ids.
#[derive(Default)]
pub struct FakeGateway {
    pub fail: AtomicBool,
    counter: AtomicU64,
    pub requests: Mutex<Vec<(i64, String, String)>>,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, AppError> {
        self.requests
            .lock()
            .unwrap()
            .push((amount, currency.to_string(), receipt.to_string()));
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Gateway("gateway unavailable".to_string()));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(GatewayOrder {
            id: format!("order_test{}", n),
            amount,
            currency: currency.to_string(),
        })
    }
}

/// Mailer double that records every attempt.
#[derive(Default)]
pub struct RecordingMailer {
    pub fail: AtomicBool,
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Email("smtp down".to_string()));
        }
        Ok(())
    }
}

pub struct Harness {
    pub repos: Repositories,
    pub gateway: Arc<FakeGateway>,
    pub mailer: Arc<RecordingMailer>,
    pub services: AppServices,
}

pub fn harness() -> Harness {
    let repos = Repositories::in_memory();
    let gateway = Arc::new(FakeGateway::default());
    let mailer = Arc::new(RecordingMailer::default());
    let services = AppServices::new(&config(), repos.clone(), gateway.clone(), mailer.clone())
        .expect("test services");

    Harness {
        repos,
        gateway,
        mailer,
        services,
    }
}

pub fn order_request(sellers: &[Uuid], total: Decimal) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_name: "Priya Sharma".to_string(),
        email: "priya@example.com".to_string(),
        items: sellers
            .iter()
            .enumerate()
            .map(|(i, seller_id)| OrderItemRequest {
                product_id: Uuid::new_v4(),
                seller_id: *seller_id,
                name: format!("Item {}", i + 1),
                quantity: 1,
                price: Decimal::from(10),
            })
            .collect(),
        shipping_address: ShippingAddress {
            street: "12 Residency Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "KA".to_string(),
            zip_code: "560025".to_string(),
        },
        payment_method: PaymentMethod::Card,
        total_amount: total,
    }
}
