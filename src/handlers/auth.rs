use crate::{
    models::session::{AdminSession, LoginRequest, LoginResponse, ValidateSessionRequest},
    utils::token::{generate_session_token, session_expiry},
};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;
use std::env;

pub async fn login(
    pool: web::Data<PgPool>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    // Single shared secret, read from the environment on every call.
    let admin_password = env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            actix_web::error::ErrorInternalServerError("Admin password not configured")
        })?;

    if req.password != admin_password {
        return Err(actix_web::error::ErrorUnauthorized("Invalid password"));
    }

    let token = generate_session_token();
    let expires_at = session_expiry(Utc::now().timestamp_millis());

    sqlx::query(
        r#"
        INSERT INTO admin_sessions (token, expires_at)
        VALUES ($1, $2)
        "#,
    )
    .bind(&token)
    .bind(expires_at)
    .execute(pool.get_ref())
    .await
    .map_err(|_| actix_web::error::ErrorInternalServerError("Failed to create session"))?;

    log::info!("admin session issued, expires at {}", expires_at);

    Ok(HttpResponse::Ok().json(LoginResponse { token, expires_at }))
}

pub async fn validate_session(
    pool: web::Data<PgPool>,
    req: web::Json<ValidateSessionRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let session = AdminSession::find_by_token(pool.get_ref(), &req.token)
        .await
        .map_err(|_| actix_web::error::ErrorInternalServerError("Database error"))?;

    let valid = session
        .map(|s| s.is_valid_at(Utc::now().timestamp_millis()))
        .unwrap_or(false);

    Ok(HttpResponse::Ok().json(valid))
}
