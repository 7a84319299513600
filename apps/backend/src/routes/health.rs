use actix_web::HttpResponse;
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct BannerResponse {
    message: String,
    version: String,
    endpoints: Vec<String>,
}

pub async fn health() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "API is up".to_string(),
    }))
}

/// API banner listing the available endpoints.
pub async fn root() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(BannerResponse {
        message: "Sales Management API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: [
            "POST /api/auth/register",
            "POST /api/auth/login",
            "GET /api/clients",
            "POST /api/clients",
            "GET /api/suppliers",
            "POST /api/suppliers",
            "GET /api/products",
            "POST /api/products",
            "GET /api/sales",
            "POST /api/sales",
            "GET /api/dashboard",
            "GET /api/health",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    }))
}
