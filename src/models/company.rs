use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered company row.
///
/// `password_hash` is the only credential field and is never serialized;
/// every read path returns this struct (or a projection of it) directly.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub registration_number: Option<String>,
    pub incorporation_date: Option<NaiveDate>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub company_type: Option<String>,
    pub business_category: Option<String>,
    pub business_description: Option<String>,
    pub status: String,
    pub verification_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated registration input, before hashing and persistence.
#[derive(Debug, Clone, Default)]
pub struct CompanyRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub registration_number: Option<String>,
    pub incorporation_date: Option<NaiveDate>,
    pub website: Option<String>,
    pub company_type: Option<String>,
    pub business_category: Option<String>,
    pub business_description: Option<String>,
}

/// Row to insert: registration fields plus the derived credential and the
/// uploaded logo URL.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub registration: CompanyRegistration,
    pub password_hash: String,
    pub logo_url: Option<String>,
}

/// Partial profile update.
///
/// The allow-list of updatable columns is this struct, statically — the
/// repository binds every field into one fixed statement and `COALESCE`s
/// absent ones, so no per-request SQL is ever assembled from field names.
#[derive(Debug, Clone, Default)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub registration_number: Option<String>,
    pub incorporation_date: Option<NaiveDate>,
    pub website: Option<String>,
    pub company_type: Option<String>,
    pub business_category: Option<String>,
    pub business_description: Option<String>,
    pub logo_url: Option<String>,
}

impl CompanyUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.country.is_none()
            && self.pincode.is_none()
            && self.gst_number.is_none()
            && self.pan_number.is_none()
            && self.registration_number.is_none()
            && self.incorporation_date.is_none()
            && self.website.is_none()
            && self.company_type.is_none()
            && self.business_category.is_none()
            && self.business_description.is_none()
            && self.logo_url.is_none()
    }
}

/// The short company identity echoed by registration and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySummary {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<&Company> for CompanySummary {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            email: company.email.clone(),
        }
    }
}
