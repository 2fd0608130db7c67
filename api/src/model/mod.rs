use serde::Serialize;

pub mod auth;
pub mod booking;
pub mod room;
pub mod user;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// garde のカスタムルール: 0 より大きい金額
pub(crate) fn positive_amount(value: &f64, _: &()) -> garde::Result {
    if value.is_finite() && *value > 0.0 {
        Ok(())
    } else {
        Err(garde::Error::new("must be a positive amount"))
    }
}
