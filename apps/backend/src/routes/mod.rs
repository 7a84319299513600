use actix_web::web;

use crate::middleware::auth_guard::AuthGuard;

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod products;
pub mod sales;
pub mod suppliers;

/// Configure application routes.
///
/// Auth and health endpoints are open; every other scope is wrapped in the
/// `AuthGuard`, so a request only reaches a CRUD handler with verified
/// claims in its extensions.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Open routes
    cfg.route("/", web::get().to(health::root));
    cfg.route("/api/health", web::get().to(health::health));
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Protected routes
    cfg.service(
        web::scope("/api/clients")
            .wrap(AuthGuard)
            .configure(clients::configure_routes),
    );
    cfg.service(
        web::scope("/api/suppliers")
            .wrap(AuthGuard)
            .configure(suppliers::configure_routes),
    );
    cfg.service(
        web::scope("/api/products")
            .wrap(AuthGuard)
            .configure(products::configure_routes),
    );
    cfg.service(
        web::scope("/api/sales")
            .wrap(AuthGuard)
            .configure(sales::configure_routes),
    );
    cfg.service(
        web::scope("/api/dashboard")
            .wrap(AuthGuard)
            .configure(dashboard::configure_routes),
    );
}
