use askama::Template;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{Order, OrderItem, Seller};

#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError>;
}

/// Posts messages as JSON to a transactional email API.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Email(e.to_string()))?;

        Ok(Self {
            client,
            api_url,
            api_key,
            from,
        })
    }
}

#[derive(Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&OutgoingEmail {
                from: &self.from,
                to: &message.to,
                subject: &message.subject,
                html: &message.html,
            })
            .send()
            .await
            .map_err(|e| AppError::Email(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Email(format!(
                "Email API responded with {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Development mailer: writes the envelope to the log and succeeds.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        info!("Email to {}: {}", message.to, message.subject);
        Ok(())
    }
}

/// Picks the HTTP mailer when an email API is configured.
pub fn mailer_from_config(config: &AppConfig) -> Result<Arc<dyn Mailer>, AppError> {
    match (&config.email_api_url, &config.email_api_key) {
        (Some(url), Some(key)) => Ok(Arc::new(HttpMailer::new(
            url.clone(),
            key.clone(),
            config.email_from.clone(),
        )?)),
        _ => Ok(Arc::new(LogMailer)),
    }
}

#[derive(Template)]
#[template(path = "email/order_confirmation.html")]
struct OrderConfirmationHtml<'a> {
    customer_name: &'a str,
    order_number: &'a str,
    lines: &'a [OrderItem],
    total: String,
    street: &'a str,
    city: &'a str,
    state: &'a str,
    zip_code: &'a str,
    estimated_delivery: String,
}

#[derive(Template)]
#[template(path = "email/seller_approved.html")]
struct SellerApprovedHtml<'a> {
    name: &'a str,
    store_name: &'a str,
}

/// Customer-supplied text is HTML-escaped by the templates.
pub fn order_confirmation(order: &Order) -> Result<EmailMessage, AppError> {
    let html = OrderConfirmationHtml {
        customer_name: &order.customer_name,
        order_number: &order.order_number,
        lines: &order.items,
        total: order.total_amount.to_string(),
        street: &order.street,
        city: &order.city,
        state: &order.state,
        zip_code: &order.zip_code,
        estimated_delivery: order.estimated_delivery.format("%d %b %Y").to_string(),
    }
    .render()?;

    Ok(EmailMessage {
        to: order.email.clone(),
        subject: format!("Order confirmed: {}", order.order_number),
        html,
    })
}

pub fn seller_approved(seller: &Seller) -> Result<EmailMessage, AppError> {
    let html = SellerApprovedHtml {
        name: &seller.name,
        store_name: &seller.store_name,
    }
    .render()?;

    Ok(EmailMessage {
        to: seller.email.clone(),
        subject: "Your seller account has been approved".to_string(),
        html,
    })
}

/// Sends storefront emails. Rendering and delivery failures are logged and
/// swallowed so they never change the outcome of the triggering request.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<dyn Mailer>,
}

impl EmailService {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    pub async fn send_order_confirmation(&self, order: &Order) {
        self.deliver(order_confirmation(order)).await;
    }

    pub async fn send_seller_approved(&self, seller: &Seller) {
        self.deliver(seller_approved(seller)).await;
    }

    async fn deliver(&self, rendered: Result<EmailMessage, AppError>) {
        let message = match rendered {
            Ok(message) => message,
            Err(e) => {
                error!("Failed to render email: {}", e);
                return;
            }
        };
        match self.mailer.send(&message).await {
            Ok(()) => info!("Sent \"{}\" to {}", message.subject, message.to),
            Err(e) => error!("Failed to send \"{}\" to {}: {}", message.subject, message.to, e),
        }
    }
}
