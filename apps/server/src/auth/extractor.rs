//! Actix-web extractors for the acting user and the admin key.

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use secrecy::{ExposeSecret, SecretString};
use std::future::{Ready, ready};

use super::AdminKey;
use crate::config::{ADMIN_KEY_HEADER, IDENTITY_HEADER};
use crate::error::ErrorResponse;

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    message: String,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: "UNAUTHORIZED".to_string(),
            message: self.message.clone(),
        })
    }
}

/// The acting user, taken from the identity header set by the upstream proxy.
///
/// Every mutating handler takes this and records the name as
/// `uploaded_by`, `created_by` or `edited_by`.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: String,
}

impl Identity {
    fn from_headers(req: &HttpRequest) -> Option<Self> {
        req.headers()
            .get(IDENTITY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|user| Identity {
                user: user.to_string(),
            })
    }
}

impl FromRequest for Identity {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req).ok_or_else(|| AuthError {
            message: format!("Missing user identity. Provide {} header.", IDENTITY_HEADER),
        }))
    }
}

/// Extractor that requires the admin key.
pub struct AdminAuth;

impl FromRequest for AdminAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(stored) = req.app_data::<web::Data<AdminKey>>() else {
            return ready(Err(AuthError {
                message: "Admin operations are disabled".to_string(),
            }));
        };

        // Wrapped immediately so the value is zeroized on drop.
        let provided: Option<SecretString> = req
            .headers()
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| SecretString::from(s.to_string()));

        match provided {
            Some(key) if stored.verify(key.expose_secret()) => ready(Ok(AdminAuth)),
            Some(_) => ready(Err(AuthError {
                message: "Invalid admin key".to_string(),
            })),
            None => ready(Err(AuthError {
                message: format!("Missing admin key. Provide {} header.", ADMIN_KEY_HEADER),
            })),
        }
    }
}
