pub mod crypto;
pub mod jwt;
pub mod order_number;
pub mod payment_signature;

pub use crypto::{hash_password, verify_password};
pub use jwt::{Claims, JwtService};
