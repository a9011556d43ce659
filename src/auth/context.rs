use serde::{Deserialize, Serialize};

use crate::auth::token::Claims;

/// Authenticated caller identity, attached to request extensions by the
/// auth middleware after token verification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthContext {
    pub company_id: i32,
    pub email: String,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            company_id: claims.id,
            email: claims.email,
        }
    }
}
