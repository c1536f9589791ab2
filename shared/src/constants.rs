// Token configuration
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

// Orders
pub const ORDER_NUMBER_PREFIX: &str = "ORD";
pub const DELIVERY_ESTIMATE_DAYS: i64 = 5;
pub const DEFAULT_CURRENCY: &str = "INR";
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

// Pagination defaults
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

// Catalogue constraints
pub const MAX_PRODUCT_RATING: f64 = 5.0;
pub const MIN_REVIEW_RATING: i32 = 1;
pub const MAX_REVIEW_RATING: i32 = 5;

// Success messages
pub const SUCCESS_PAYMENT_VERIFIED: &str = "Payment verified successfully";
pub const SUCCESS_SELLER_REGISTERED: &str = "Seller registered. Awaiting admin approval";
pub const SUCCESS_SELLER_APPROVED: &str = "Seller approved successfully";

// Error messages
pub const ERROR_INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const ERROR_EMAIL_ALREADY_EXISTS: &str = "Email address is already registered";
pub const ERROR_SELLER_NOT_APPROVED: &str = "Seller account is pending admin approval";
pub const ERROR_PAYMENT_VERIFICATION_FAILED: &str = "Payment verification failed";
pub const ERROR_ORDER_NOT_FOUND: &str = "Order not found";
pub const ERROR_PRODUCT_NOT_FOUND: &str = "Product not found";
pub const ERROR_SELLER_NOT_FOUND: &str = "Seller not found";
pub const ERROR_USER_NOT_FOUND: &str = "User not found";
pub const ERROR_REVIEW_ALREADY_EXISTS: &str = "You have already reviewed this product";
pub const ERROR_NOT_PRODUCT_OWNER: &str = "You can only modify your own products";
pub const ERROR_NOT_ITEM_OWNER: &str = "You can only update your own order items";
