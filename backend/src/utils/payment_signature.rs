use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Hex HMAC-SHA256 of `"{order_id}|{payment_id}"` under the gateway secret,
/// the form Razorpay attaches to a completed checkout.
pub fn sign(secret: &str, gateway_order_id: &str, payment_id: &str) -> Result<String, AppError> {
    let mac = keyed(secret, gateway_order_id, payment_id)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Checks a client-supplied checkout signature. Comparison is constant time;
/// a signature that is not valid hex simply fails to match.
pub fn verify(
    secret: &str,
    gateway_order_id: &str,
    payment_id: &str,
    signature: &str,
) -> Result<bool, AppError> {
    let Ok(supplied) = hex::decode(signature.trim()) else {
        return Ok(false);
    };
    let mac = keyed(secret, gateway_order_id, payment_id)?;
    Ok(mac.verify_slice(&supplied).is_ok())
}

fn keyed(secret: &str, gateway_order_id: &str, payment_id: &str) -> Result<HmacSha256, AppError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::Internal("Invalid payment gateway secret".to_string()))?;
    mac.update(gateway_order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Ok(mac)
}
