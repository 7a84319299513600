use std::time::SystemTime;

use actix_web::{web, HttpResponse, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::jwt::mint_token;
use crate::auth::password::{hash_password, verify_password};
use crate::db::require_db;
use crate::entities::users;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Create a user and hand back a short-lived token.
async fn register(
    req: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();

    if req.name.trim().is_empty() {
        return Err(AppError::bad_request("Name cannot be empty"));
    }
    if req.email.trim().is_empty() {
        return Err(AppError::bad_request("Email cannot be empty"));
    }
    if req.password.is_empty() {
        return Err(AppError::bad_request("Password cannot be empty"));
    }

    let db = require_db(&app_state)?;

    let existing = users::Entity::find()
        .filter(users::Column::Email.eq(req.email.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(AppError::bad_request("User already exists"));
    }

    let password_hash = hash_password(&req.password).await?;

    let now = OffsetDateTime::now_utc();
    let user = users::ActiveModel {
        name: Set(req.name),
        email: Set(req.email),
        password_hash: Set(password_hash),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let token = mint_token(
        user.id,
        &user.email,
        Some(&user.name),
        app_state.security.register_token_ttl,
        SystemTime::now(),
        &app_state.security,
    )?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    }))
}

/// Exchange email + password for a session token.
///
/// Unknown email and wrong password produce the same response.
async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let db = require_db(&app_state)?;

    let user = users::Entity::find()
        .filter(users::Column::Email.eq(req.email.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    let valid = verify_password(&req.password, &user.password_hash).await?;
    if !valid {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let token = mint_token(
        user.id,
        &user.email,
        Some(&user.name),
        app_state.security.login_token_ttl,
        SystemTime::now(),
        &app_state.security,
    )?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register));
    cfg.route("/login", web::post().to(login));
}
