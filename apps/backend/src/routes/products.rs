use actix_web::{web, HttpResponse, Result};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::require_db;
use crate::entities::{products, suppliers};
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    #[serde(default)]
    pub stock: i32,
    pub supplier_id: Option<i64>,
}

/// Product row together with its supplier, mirroring the list shape.
#[derive(Debug, Serialize)]
struct ProductResponse {
    #[serde(flatten)]
    product: products::Model,
    supplier: Option<suppliers::Model>,
}

async fn list(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;

    let rows = products::Entity::find()
        .find_also_related(suppliers::Entity)
        .order_by_desc(products::Column::CreatedAt)
        .all(db)
        .await?;

    let rows: Vec<ProductResponse> = rows
        .into_iter()
        .map(|(product, supplier)| ProductResponse { product, supplier })
        .collect();

    Ok(HttpResponse::Ok().json(rows))
}

async fn create(
    req: web::Json<CreateProductRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();

    if req.name.trim().is_empty() {
        return Err(AppError::bad_request("Name cannot be empty"));
    }
    if req.price < 0.0 {
        return Err(AppError::bad_request("Price cannot be negative"));
    }

    let db = require_db(&app_state)?;

    // Resolve the supplier up front so a dangling id fails before the insert
    let supplier = match req.supplier_id {
        Some(id) => Some(
            suppliers::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| AppError::bad_request("Supplier not found"))?,
        ),
        None => None,
    };

    let product = products::ActiveModel {
        name: Set(req.name),
        description: Set(req.description),
        price: Set(req.price),
        category: Set(req.category),
        stock: Set(req.stock),
        supplier_id: Set(req.supplier_id),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(HttpResponse::Created().json(ProductResponse { product, supplier }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    );
}
