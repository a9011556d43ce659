use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Settings;
use crate::error::ApiError;

/// Account-creation request sent to the identity provider.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub display_name: String,
}

/// Opaque reference to a provider-side identity.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityRef {
    pub uid: String,
}

/// External service of record for authentication credentials.
///
/// The provider is consumed through its call/response contract only:
/// create an account keyed by email, look one up by email, delete by uid
/// (the compensation path for a failed registration).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_account(&self, account: &NewAccount) -> Result<IdentityRef, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityRef>, ApiError>;
    async fn delete_account(&self, uid: &str) -> Result<(), ApiError>;
}

pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpIdentityProvider {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs_f64(settings.upstream_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.identity_api_url.trim_end_matches('/').to_string(),
            api_key: settings.identity_api_key.clone(),
        })
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn create_account(&self, account: &NewAccount) -> Result<IdentityRef, ApiError> {
        let url = format!("{}/v1/accounts", self.base_url);
        let response = self
            .authorized(self.client.post(&url))
            .json(account)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::upstream(format!(
                "identity provider account creation failed ({}): {}",
                status, detail
            )));
        }

        let identity = response.json::<IdentityRef>().await?;
        tracing::debug!(uid = %identity.uid, "identity account created");
        Ok(identity)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityRef>, ApiError> {
        let url = format!("{}/v1/accounts/lookup", self.base_url);
        let response = self
            .authorized(self.client.get(&url))
            .query(&[("email", email)])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ApiError::upstream(format!(
                "identity provider lookup failed ({})",
                response.status()
            )));
        }

        Ok(Some(response.json::<IdentityRef>().await?))
    }

    async fn delete_account(&self, uid: &str) -> Result<(), ApiError> {
        let url = format!("{}/v1/accounts/{}", self.base_url, uid);
        let response = self.authorized(self.client.delete(&url)).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::upstream(format!(
                "identity provider account deletion failed ({})",
                response.status()
            )));
        }

        Ok(())
    }
}
