use chrono::Utc;
use uuid::Uuid;
use voicecart_shared::ORDER_NUMBER_PREFIX;

const TIMESTAMP_DIGITS: usize = 8;
const SUFFIX_LEN: usize = 6;

/// `ORD` + last 8 digits of the millisecond clock + 6 random uppercase hex
/// characters. Uniqueness is still enforced by the store.
pub fn generate() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(TIMESTAMP_DIGITS)..];
    let suffix = Uuid::new_v4().simple().to_string()[..SUFFIX_LEN].to_uppercase();
    format!("{}{}{}", ORDER_NUMBER_PREFIX, tail, suffix)
}
