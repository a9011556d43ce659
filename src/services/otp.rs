use async_trait::async_trait;

use crate::error::ApiError;

/// Phone verification channel.
///
/// The interface exists so the registration flow has a seam for SMS
/// verification; no delivery backend is wired yet and the shipped
/// implementation answers accordingly instead of pretending success.
#[async_trait]
pub trait OtpChannel: Send + Sync {
    async fn send_code(&self, phone: &str) -> Result<(), ApiError>;
    async fn verify_code(&self, phone: &str, code: &str) -> Result<bool, ApiError>;
}

pub struct UnimplementedOtp;

#[async_trait]
impl OtpChannel for UnimplementedOtp {
    async fn send_code(&self, _phone: &str) -> Result<(), ApiError> {
        Err(ApiError::NotImplemented(
            "Phone OTP delivery is not implemented".to_string(),
        ))
    }

    async fn verify_code(&self, _phone: &str, _code: &str) -> Result<bool, ApiError> {
        Err(ApiError::NotImplemented(
            "Phone OTP verification is not implemented".to_string(),
        ))
    }
}
