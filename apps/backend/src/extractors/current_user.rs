use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::Claims;
use crate::error::AppError;

/// Authenticated caller identity for the current request.
///
/// Read from the claims that `AuthGuard` stored in request extensions; a
/// handler taking this parameter can only be reached through the guard.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub email: String,
    pub name: Option<String>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();

        std::future::ready(
            claims
                .map(CurrentUser::from)
                .ok_or(AppError::MissingToken),
        )
    }
}
