use actix_web::{web, HttpResponse, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::require_db;
use crate::entities::{clients, products, sale_items, sales};
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSaleItemRequest {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    pub client_id: i64,
    #[serde(default)]
    pub items: Vec<CreateSaleItemRequest>,
}

#[derive(Debug, Serialize)]
struct SaleItemResponse {
    #[serde(flatten)]
    item: sale_items::Model,
    product: Option<products::Model>,
}

#[derive(Debug, Serialize)]
struct SaleResponse {
    #[serde(flatten)]
    sale: sales::Model,
    client: Option<clients::Model>,
    items: Vec<SaleItemResponse>,
}

async fn list(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;

    let rows = sales::Entity::find()
        .find_also_related(clients::Entity)
        .order_by_desc(sales::Column::CreatedAt)
        .all(db)
        .await?;

    let mut out = Vec::with_capacity(rows.len());
    for (sale, client) in rows {
        let items = sale_items::Entity::find()
            .filter(sale_items::Column::SaleId.eq(sale.id))
            .find_also_related(products::Entity)
            .all(db)
            .await?
            .into_iter()
            .map(|(item, product)| SaleItemResponse { item, product })
            .collect();

        out.push(SaleResponse {
            sale,
            client,
            items,
        });
    }

    Ok(HttpResponse::Ok().json(out))
}

/// Record a sale and its items atomically; total is derived from the items.
async fn create(
    req: web::Json<CreateSaleRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();

    if req.items.is_empty() {
        return Err(AppError::bad_request("Sale must have at least one item"));
    }
    for item in &req.items {
        if item.quantity <= 0 {
            return Err(AppError::bad_request("Item quantity must be positive"));
        }
        if item.unit_price < 0.0 {
            return Err(AppError::bad_request("Item unit price cannot be negative"));
        }
    }

    let db = require_db(&app_state)?;

    let client = clients::Entity::find_by_id(req.client_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::bad_request("Client not found"))?;

    let mut sale_products = Vec::with_capacity(req.items.len());
    for item in &req.items {
        let product = products::Entity::find_by_id(item.product_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::bad_request("Product not found"))?;
        sale_products.push(product);
    }

    let total: f64 = req
        .items
        .iter()
        .map(|item| f64::from(item.quantity) * item.unit_price)
        .sum();

    let now = OffsetDateTime::now_utc();
    let txn = db.begin().await?;

    let sale = sales::ActiveModel {
        client_id: Set(client.id),
        total: Set(total),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(req.items.len());
    for (item, product) in req.items.iter().zip(sale_products) {
        let row = sale_items::ActiveModel {
            sale_id: Set(sale.id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        items.push(SaleItemResponse {
            item: row,
            product: Some(product),
        });
    }

    txn.commit().await?;

    Ok(HttpResponse::Created().json(SaleResponse {
        sale,
        client: Some(client),
        items,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    );
}
