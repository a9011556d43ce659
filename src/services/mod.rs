pub mod company_service;
pub mod identity;
pub mod image_store;
pub mod otp;

pub use company_service::{AuthenticatedCompany, CompanyService, LogoUpload};
pub use identity::{HttpIdentityProvider, IdentityProvider, IdentityRef, NewAccount};
pub use image_store::{HttpImageStore, ImageStore, StoredImage};
pub use otp::{OtpChannel, UnimplementedOtp};
