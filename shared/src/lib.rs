//! Wire types shared between the VoiceCart backend and its clients.

pub mod constants;
pub mod dto;
pub mod types;

pub use constants::*;
pub use dto::*;
pub use types::*;
