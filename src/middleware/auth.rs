use actix_web::{
    dev::ServiceRequest,
    error::{ErrorInternalServerError, ErrorUnauthorized},
    web, Error,
};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::AdminSession;

/// Gate for the admin scope: the bearer token must resolve to a stored
/// session that has not yet expired. Re-checked against the database on
/// every request.
pub async fn session_validator(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let pool = match req.app_data::<web::Data<PgPool>>() {
        Some(pool) => pool.clone(),
        None => return Err((ErrorInternalServerError("Database pool not configured"), req)),
    };

    match AdminSession::find_by_token(pool.get_ref(), credentials.token()).await {
        Ok(Some(session)) if session.is_valid_at(Utc::now().timestamp_millis()) => Ok(req),
        Ok(_) => Err((ErrorUnauthorized("Invalid or expired session"), req)),
        Err(_) => Err((ErrorInternalServerError("Database error"), req)),
    }
}
