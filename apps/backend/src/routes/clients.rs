use actix_web::{web, HttpResponse, Result};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::entities::clients;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    #[serde(default)]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
}

async fn list(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;

    let rows = clients::Entity::find()
        .order_by_desc(clients::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(HttpResponse::Ok().json(rows))
}

async fn create(
    req: web::Json<CreateClientRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();

    if req.name.trim().is_empty() {
        return Err(AppError::bad_request("Name cannot be empty"));
    }

    let db = require_db(&app_state)?;

    let row = clients::ActiveModel {
        name: Set(req.name),
        email: Set(req.email),
        phone: Set(req.phone),
        address: Set(req.address),
        tax_id: Set(req.tax_id),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(HttpResponse::Created().json(row))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    );
}
