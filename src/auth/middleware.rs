use actix_web::http::header::Header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use std::future::{Ready, ready};

use crate::auth::authorization::{Right, Role, require_right};
use crate::auth::jwt;
use crate::error::ApiError;

/// The caller behind a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn require(&self, right: Right) -> Result<(), ApiError> {
        require_right(self.role, right)
    }

    fn from_http(req: &HttpRequest) -> Result<Self, ApiError> {
        // 1. Extract the Bearer token from the Authorization header.
        let bearer = Authorization::<Bearer>::parse(req)
            .map_err(|_| {
                ApiError::Unauthorized("Authorization header must be: Bearer <token>".to_string())
            })?
            .into_scheme();

        // 2. Get the signing secret from app data.
        let secret = req.app_data::<web::Data<JwtSecret>>().ok_or_else(|| {
            ApiError::Internal("JWT secret not configured".to_string())
        })?;

        // 3. Validate the JWT.
        let claims = jwt::validate_token(bearer.token(), &secret.0)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {e}")))?;

        Ok(AuthenticatedUser {
            id: claims.sub,
            role: Role::from_claim(claims.role.as_deref()),
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = Self::from_http(req);
        if let Err(e) = &result {
            tracing::debug!("Rejected request to {}: {e}", req.path());
        }
        ready(result)
    }
}

/// Wrapper type to store the JWT secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);
