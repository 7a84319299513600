use actix_web::{web, HttpResponse, Result};
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};
use serde::Serialize;

use crate::db::require_db;
use crate::entities::{clients, products, sales, suppliers};
use crate::error::AppError;
use crate::state::app_state::AppState;

const RECENT_SALES_LIMIT: u64 = 5;

#[derive(Debug, Serialize)]
struct RecentSale {
    #[serde(flatten)]
    sale: sales::Model,
    client: Option<clients::Model>,
}

#[derive(Debug, Serialize)]
struct DashboardResponse {
    total_clients: u64,
    total_products: u64,
    total_sales: u64,
    total_suppliers: u64,
    recent_sales: Vec<RecentSale>,
}

async fn summary(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;

    let total_clients = clients::Entity::find().count(db).await?;
    let total_products = products::Entity::find().count(db).await?;
    let total_sales = sales::Entity::find().count(db).await?;
    let total_suppliers = suppliers::Entity::find().count(db).await?;

    let recent_sales = sales::Entity::find()
        .find_also_related(clients::Entity)
        .order_by_desc(sales::Column::CreatedAt)
        .limit(RECENT_SALES_LIMIT)
        .all(db)
        .await?
        .into_iter()
        .map(|(sale, client)| RecentSale { sale, client })
        .collect();

    Ok(HttpResponse::Ok().json(DashboardResponse {
        total_clients,
        total_products,
        total_sales,
        total_suppliers,
        recent_sales,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(summary)));
}
