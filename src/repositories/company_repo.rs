use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::ApiError,
    models::{Company, CompanyUpdate, NewCompany},
};

const COMPANY_COLUMNS: &str = "id, name, email, phone, password_hash, address, city, state, \
     country, pincode, gst_number, pan_number, registration_number, incorporation_date, \
     website, logo_url, company_type, business_category, business_description, status, \
     verification_status, created_at, updated_at";

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Company>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Company>, ApiError>;
    /// Registration pre-check: any row claiming either value.
    async fn email_or_phone_exists(&self, email: &str, phone: &str) -> Result<bool, ApiError>;
    /// Update pre-checks: the value owned by a row other than `id`.
    async fn email_taken_by_other(&self, email: &str, id: i32) -> Result<bool, ApiError>;
    async fn phone_taken_by_other(&self, phone: &str, id: i32) -> Result<bool, ApiError>;
    async fn create(&self, new: &NewCompany) -> Result<Company, ApiError>;
    /// Partial update; absent fields are left untouched and `updated_at` is
    /// stamped in the same statement. `None` if the row no longer exists.
    async fn update(&self, id: i32, update: &CompanyUpdate) -> Result<Option<Company>, ApiError>;
}

pub struct SqlxCompanyRepository {
    pool: PgPool,
}

impl SqlxCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The pre-checks only narrow the window; the UNIQUE constraints on email
/// and phone are the authoritative guard, so a violation raised at write
/// time is surfaced as the same conflict the pre-check would have reported.
fn map_unique_violation(err: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return ApiError::conflict("Company with this email or phone already exists");
        }
    }
    ApiError::Database(err)
}

#[async_trait]
impl CompanyRepository for SqlxCompanyRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Company>, ApiError> {
        let row = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Company>, ApiError> {
        let row = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn email_or_phone_exists(&self, email: &str, phone: &str) -> Result<bool, ApiError> {
        let row: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM companies WHERE email = $1 OR phone = $2")
                .bind(email)
                .bind(phone)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.is_some())
    }

    async fn email_taken_by_other(&self, email: &str, id: i32) -> Result<bool, ApiError> {
        let row: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM companies WHERE email = $1 AND id != $2")
                .bind(email)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.is_some())
    }

    async fn phone_taken_by_other(&self, phone: &str, id: i32) -> Result<bool, ApiError> {
        let row: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM companies WHERE phone = $1 AND id != $2")
                .bind(phone)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.is_some())
    }

    async fn create(&self, new: &NewCompany) -> Result<Company, ApiError> {
        let r = &new.registration;
        let row = sqlx::query_as::<_, Company>(&format!(
            r#"
            INSERT INTO companies (
                name, email, phone, password_hash, address, city, state, country, pincode,
                gst_number, pan_number, registration_number, incorporation_date, website,
                logo_url, company_type, business_category, business_description
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(&r.name)
        .bind(&r.email)
        .bind(&r.phone)
        .bind(&new.password_hash)
        .bind(&r.address)
        .bind(&r.city)
        .bind(&r.state)
        .bind(&r.country)
        .bind(&r.pincode)
        .bind(&r.gst_number)
        .bind(&r.pan_number)
        .bind(&r.registration_number)
        .bind(r.incorporation_date)
        .bind(&r.website)
        .bind(&new.logo_url)
        .bind(&r.company_type)
        .bind(&r.business_category)
        .bind(&r.business_description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(row)
    }

    async fn update(&self, id: i32, update: &CompanyUpdate) -> Result<Option<Company>, ApiError> {
        let row = sqlx::query_as::<_, Company>(&format!(
            r#"
            UPDATE companies
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                city = COALESCE($6, city),
                state = COALESCE($7, state),
                country = COALESCE($8, country),
                pincode = COALESCE($9, pincode),
                gst_number = COALESCE($10, gst_number),
                pan_number = COALESCE($11, pan_number),
                registration_number = COALESCE($12, registration_number),
                incorporation_date = COALESCE($13, incorporation_date),
                website = COALESCE($14, website),
                company_type = COALESCE($15, company_type),
                business_category = COALESCE($16, business_category),
                business_description = COALESCE($17, business_description),
                logo_url = COALESCE($18, logo_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.name)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.address)
        .bind(&update.city)
        .bind(&update.state)
        .bind(&update.country)
        .bind(&update.pincode)
        .bind(&update.gst_number)
        .bind(&update.pan_number)
        .bind(&update.registration_number)
        .bind(update.incorporation_date)
        .bind(&update.website)
        .bind(&update.company_type)
        .bind(&update.business_category)
        .bind(&update.business_description)
        .bind(&update.logo_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(row)
    }
}
