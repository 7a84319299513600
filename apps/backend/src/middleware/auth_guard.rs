//! Access guard middleware
//!
//! Extracts the bearer token from the Authorization header, verifies it
//! against the configured secret and stores the decoded claims in request
//! extensions. Requests without a token get 401; requests with a token that
//! fails verification get 403. The downstream handler is never invoked in
//! either case.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct AuthGuard;

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardMiddleware { service }))
    }
}

pub struct AuthGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_header = req.headers().get(header::AUTHORIZATION).cloned();
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        // Missing header and malformed header both count as "no token".
        let token = match extract_bearer_from_header(auth_header.as_ref()) {
            Some(token) => token,
            None => {
                return Box::pin(async { Err(AppError::MissingToken.into()) });
            }
        };

        let app_state = match app_state {
            Some(state) => state,
            None => {
                return Box::pin(async {
                    Err(AppError::internal("AppState not available").into())
                });
            }
        };

        match verify_token(&token, &app_state.security) {
            Ok(claims) => {
                // Store claims in request extensions BEFORE calling the service
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(e) => {
                tracing::debug!(reason = %e, "rejected bearer token");
                Box::pin(async move { Err(AppError::from(e).into()) })
            }
        }
    }
}

fn extract_bearer_from_header(
    header_value: Option<&actix_web::http::header::HeaderValue>,
) -> Option<String> {
    let auth_str = header_value?.to_str().ok()?;

    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::HeaderValue;

    use super::extract_bearer_from_header;

    #[test]
    fn test_extract_bearer() {
        let header = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(
            extract_bearer_from_header(Some(&header)),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_missing_and_malformed_headers_count_as_no_token() {
        assert_eq!(extract_bearer_from_header(None), None);

        for raw in ["", "Bearer", "Bearer ", "Token abc", "bearer abc"] {
            let header = HeaderValue::from_static(raw);
            assert_eq!(
                extract_bearer_from_header(Some(&header)),
                None,
                "expected no token for {raw:?}"
            );
        }
    }
}
