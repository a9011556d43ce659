use std::sync::Arc;

use crate::auth::token::issue_token;
use crate::config::Settings;
use crate::error::ApiError;
use crate::models::{Company, CompanyRegistration, CompanySummary, CompanyUpdate, NewCompany};
use crate::repositories::CompanyRepository;
use crate::services::identity::{IdentityProvider, NewAccount};
use crate::services::image_store::ImageStore;
use crate::utils::crypto::{hash_password, verify_password};

/// An in-memory logo buffer that already passed the upload filter
/// (image MIME type, within the size limit).
#[derive(Debug, Clone)]
pub struct LogoUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Registration/login result: the company identity plus a bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedCompany {
    pub company: CompanySummary,
    pub token: String,
}

/// Orchestrates the company write path: validation, uniqueness checks,
/// password hashing, the two external collaborators, and token issuance.
pub struct CompanyService {
    settings: Arc<Settings>,
    companies: Arc<dyn CompanyRepository>,
    identity: Arc<dyn IdentityProvider>,
    images: Arc<dyn ImageStore>,
}

impl CompanyService {
    pub fn new(
        settings: Arc<Settings>,
        companies: Arc<dyn CompanyRepository>,
        identity: Arc<dyn IdentityProvider>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            settings,
            companies,
            identity,
            images,
        }
    }

    /// Register a new company.
    ///
    /// Creates one identity-provider account and one database row together.
    /// If the row insert fails after the provider account was created, the
    /// account is deleted again (best effort) so the two stores do not
    /// diverge silently.
    pub async fn register(
        &self,
        registration: CompanyRegistration,
        logo: Option<LogoUpload>,
    ) -> Result<AuthenticatedCompany, ApiError> {
        if registration.name.is_empty()
            || registration.email.is_empty()
            || registration.phone.is_empty()
            || registration.password.is_empty()
        {
            return Err(ApiError::validation(
                "Name, email, phone, and password are required",
            ));
        }

        let logo_url = match logo {
            Some(logo) => Some(
                self.images
                    .upload(logo.bytes, &logo.content_type, &self.settings.logo_folder)
                    .await?
                    .secure_url,
            ),
            None => None,
        };

        if self
            .companies
            .email_or_phone_exists(&registration.email, &registration.phone)
            .await?
        {
            return Err(ApiError::conflict(
                "Company with this email or phone already exists",
            ));
        }

        let password_hash = hash_password(&registration.password)?;

        let account = NewAccount {
            email: registration.email.clone(),
            password: registration.password.clone(),
            phone_number: format!(
                "{}{}",
                self.settings.phone_country_prefix, registration.phone
            ),
            display_name: registration.name.clone(),
        };
        let identity = self.identity.create_account(&account).await?;

        let new_company = NewCompany {
            registration,
            password_hash,
            logo_url,
        };
        let company = match self.companies.create(&new_company).await {
            Ok(company) => company,
            Err(err) => {
                // The provider account exists but the row does not; undo the
                // account so a retry starts from a clean slate.
                if let Err(cleanup_err) = self.identity.delete_account(&identity.uid).await {
                    tracing::error!(
                        uid = %identity.uid,
                        error = %cleanup_err,
                        "failed to delete identity account after aborted registration"
                    );
                }
                return Err(err);
            }
        };

        tracing::info!(company_id = company.id, "company registered");

        let token = issue_token(company.id, &company.email, &self.settings)?;
        Ok(AuthenticatedCompany {
            company: CompanySummary::from(&company),
            token,
        })
    }

    /// Authenticate by email and password, issuing a fresh token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedCompany, ApiError> {
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::validation("Email and password are required"));
        }

        let company = self
            .companies
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApiError::not_found("Company not found"))?;

        if !verify_password(password, &company.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }

        let token = issue_token(company.id, &company.email, &self.settings)?;
        Ok(AuthenticatedCompany {
            company: CompanySummary::from(&company),
            token,
        })
    }

    pub async fn profile(&self, company_id: i32) -> Result<Company, ApiError> {
        self.companies
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Company not found"))
    }

    /// Apply a partial profile update for the authenticated company.
    pub async fn update_profile(
        &self,
        company_id: i32,
        mut update: CompanyUpdate,
        logo: Option<LogoUpload>,
    ) -> Result<Company, ApiError> {
        if let Some(logo) = logo {
            let stored = self
                .images
                .upload(logo.bytes, &logo.content_type, &self.settings.logo_folder)
                .await?;
            update.logo_url = Some(stored.secure_url);
        }

        if let Some(email) = &update.email {
            if self.companies.email_taken_by_other(email, company_id).await? {
                return Err(ApiError::conflict("Email already in use by another company"));
            }
        }

        if let Some(phone) = &update.phone {
            if self.companies.phone_taken_by_other(phone, company_id).await? {
                return Err(ApiError::conflict(
                    "Phone number already in use by another company",
                ));
            }
        }

        let company = self
            .companies
            .update(company_id, &update)
            .await?
            .ok_or_else(|| ApiError::not_found("Company not found"))?;

        tracing::info!(company_id = company.id, "company profile updated");
        Ok(company)
    }
}
