use axum::{
    extract::{
        multipart::{Field, Multipart},
        Extension, State,
    },
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    auth::context::AuthContext,
    error::ApiError,
    models::{Company, CompanyRegistration, CompanySummary, CompanyUpdate},
    services::LogoUpload,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub company: CompanySummary,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub company: Company,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub company: Company,
}

#[derive(Debug, Deserialize)]
pub struct OtpSendRequest {
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct OtpVerifyRequest {
    pub phone: String,
    pub code: String,
}

/// POST /api/companies/register - Register a new company (multipart)
pub async fn register_company(
    State(app_state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (registration, logo) =
        parse_registration_form(multipart, app_state.config.max_logo_bytes).await?;

    let authenticated = app_state.company_service.register(registration, logo).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Company registered successfully".to_string(),
            company: authenticated.company,
            token: authenticated.token,
        }),
    ))
}

/// POST /api/companies/login - Authenticate and issue a token
pub async fn login_company(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let authenticated = app_state
        .company_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        company: authenticated.company,
        token: authenticated.token,
    }))
}

/// GET /api/companies/profile - Profile of the authenticated company
pub async fn get_company_profile(
    State(app_state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let company = app_state.company_service.profile(ctx.company_id).await?;

    Ok(Json(ProfileResponse { company }))
}

/// PUT /api/companies/profile - Partial profile update (multipart)
pub async fn update_company_profile(
    State(app_state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    multipart: Multipart,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    let (update, logo) = parse_update_form(multipart, app_state.config.max_logo_bytes).await?;

    let company = app_state
        .company_service
        .update_profile(ctx.company_id, update, logo)
        .await?;

    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully".to_string(),
        company,
    }))
}

/// POST /api/companies/otp/send - Phone verification (not yet implemented)
pub async fn send_otp(
    State(app_state): State<AppState>,
    Json(payload): Json<OtpSendRequest>,
) -> Result<StatusCode, ApiError> {
    app_state.otp.send_code(&payload.phone).await?;
    Ok(StatusCode::OK)
}

/// POST /api/companies/otp/verify - Phone verification (not yet implemented)
pub async fn verify_otp(
    State(app_state): State<AppState>,
    Json(payload): Json<OtpVerifyRequest>,
) -> Result<StatusCode, ApiError> {
    app_state.otp.verify_code(&payload.phone, &payload.code).await?;
    Ok(StatusCode::OK)
}

/// Read the `logo` part, enforcing the image-only filter and the size cap.
async fn read_logo(field: Field<'_>, max_logo_bytes: u64) -> Result<LogoUpload, ApiError> {
    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_default();

    if !content_type.starts_with("image/") {
        return Err(ApiError::validation("Only image files are allowed!"));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::validation(format!("Failed to read logo data: {}", e)))?;

    if bytes.len() as u64 > max_logo_bytes {
        return Err(ApiError::validation("File too large"));
    }

    Ok(LogoUpload {
        bytes: bytes.to_vec(),
        content_type,
    })
}

async fn read_text(field: Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::validation(format!("Failed to read multipart field: {}", e)))
}

fn parse_incorporation_date(value: &str) -> Result<Option<NaiveDate>, ApiError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ApiError::validation("incorporation_date must be in YYYY-MM-DD format"))
}

async fn parse_registration_form(
    mut multipart: Multipart,
    max_logo_bytes: u64,
) -> Result<(CompanyRegistration, Option<LogoUpload>), ApiError> {
    let mut registration = CompanyRegistration::default();
    let mut logo: Option<LogoUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "logo" {
            logo = Some(read_logo(field, max_logo_bytes).await?);
            continue;
        }

        let value = read_text(field).await?;
        match name.as_str() {
            "name" => registration.name = value,
            "email" => registration.email = value,
            "phone" => registration.phone = value,
            "password" => registration.password = value,
            "address" => registration.address = Some(value),
            "city" => registration.city = Some(value),
            "state" => registration.state = Some(value),
            "country" => registration.country = Some(value),
            "pincode" => registration.pincode = Some(value),
            "gst_number" => registration.gst_number = Some(value),
            "pan_number" => registration.pan_number = Some(value),
            "registration_number" => registration.registration_number = Some(value),
            "incorporation_date" => {
                registration.incorporation_date = parse_incorporation_date(&value)?
            }
            "website" => registration.website = Some(value),
            "company_type" => registration.company_type = Some(value),
            "business_category" => registration.business_category = Some(value),
            "business_description" => registration.business_description = Some(value),
            // Unknown fields are ignored
            _ => {}
        }
    }

    Ok((registration, logo))
}

async fn parse_update_form(
    mut multipart: Multipart,
    max_logo_bytes: u64,
) -> Result<(CompanyUpdate, Option<LogoUpload>), ApiError> {
    let mut update = CompanyUpdate::default();
    let mut logo: Option<LogoUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "logo" {
            logo = Some(read_logo(field, max_logo_bytes).await?);
            continue;
        }

        let value = read_text(field).await?;
        // Only allow-listed fields are applied; logo_url is never accepted
        // as a text field, it is derived from the upload.
        match name.as_str() {
            "name" => update.name = Some(value),
            "email" => update.email = Some(value),
            "phone" => update.phone = Some(value),
            "address" => update.address = Some(value),
            "city" => update.city = Some(value),
            "state" => update.state = Some(value),
            "country" => update.country = Some(value),
            "pincode" => update.pincode = Some(value),
            "gst_number" => update.gst_number = Some(value),
            "pan_number" => update.pan_number = Some(value),
            "registration_number" => update.registration_number = Some(value),
            "incorporation_date" => update.incorporation_date = parse_incorporation_date(&value)?,
            "website" => update.website = Some(value),
            "company_type" => update.company_type = Some(value),
            "business_category" => update.business_category = Some(value),
            "business_description" => update.business_description = Some(value),
            _ => {}
        }
    }

    Ok((update, logo))
}
