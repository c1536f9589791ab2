pub mod admin_service;
pub mod auth_service;
pub mod email_service;
pub mod order_service;
pub mod payment_gateway;
pub mod product_service;
pub mod review_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use email_service::{EmailService, Mailer};
pub use order_service::OrderService;
pub use payment_gateway::{PaymentGateway, RazorpayGateway};
pub use product_service::ProductService;
pub use review_service::ReviewService;
