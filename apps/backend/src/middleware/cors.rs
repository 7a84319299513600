use actix_cors::Cors;
use actix_web::http::header;

/// Build CORS middleware.
///
/// The API is consumed by a separately hosted frontend, so any origin is
/// allowed, mirroring the deployment this service replaces.
pub fn cors_middleware() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .max_age(3600)
}
