use crate::models::rsvp::{CreateInviteRequest, InviteConfig, Rsvp};
use actix_web::{web, HttpResponse};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn get_all(pool: web::Data<PgPool>) -> Result<HttpResponse, actix_web::Error> {
    let rsvps = sqlx::query_as::<_, Rsvp>(
        r#"
        SELECT id, name, guests, attending, plus_one, plus_one_name, plus_one_meal_choice,
               meal_choice, accommodation, number_of_kids, submitted, is_predefined,
               ask_for_plus_one, ask_for_kids, max_number_of_kids, ask_for_accommodation,
               created_at, updated_at
        FROM rsvps
        ORDER BY name
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|_| actix_web::error::ErrorInternalServerError("Failed to fetch RSVPs"))?;

    Ok(HttpResponse::Ok().json(rsvps))
}

pub async fn create_invite(
    pool: web::Data<PgPool>,
    body: web::Json<CreateInviteRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let request = body.into_inner();
    request
        .validate()
        .map_err(actix_web::error::ErrorBadRequest)?;

    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(SELECT 1 FROM rsvps WHERE name = $1)
        "#,
    )
    .bind(&request.name)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|_| actix_web::error::ErrorInternalServerError("Database error"))?;

    if exists {
        return Err(actix_web::error::ErrorConflict(format!(
            "An invite for '{}' already exists",
            request.name
        )));
    }

    let guests = Json(request.guest_list());
    let config = request.config.normalized();

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO rsvps (name, guests, attending, plus_one, plus_one_name,
                           plus_one_meal_choice, meal_choice, accommodation, number_of_kids,
                           submitted, is_predefined, ask_for_plus_one, ask_for_kids,
                           max_number_of_kids, ask_for_accommodation)
        VALUES ($1, $2, NULL, false, '', '', '', false, 0, false, true, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(&request.name)
    .bind(guests)
    .bind(config.ask_for_plus_one)
    .bind(config.ask_for_kids)
    .bind(config.max_number_of_kids)
    .bind(config.ask_for_accommodation)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|_| actix_web::error::ErrorInternalServerError("Failed to create invite"))?;

    log::info!("invite created for '{}'", request.name);

    Ok(HttpResponse::Created().json(id))
}

pub async fn update_invite(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    body: web::Json<InviteConfig>,
) -> Result<HttpResponse, actix_web::Error> {
    let name = path.into_inner();
    let config = body.into_inner().normalized();

    // Only the question toggles are patched; the guest's answers stay put.
    let result = sqlx::query(
        r#"
        UPDATE rsvps
        SET ask_for_plus_one = $2, ask_for_kids = $3, max_number_of_kids = $4,
            ask_for_accommodation = $5, updated_at = NOW()
        WHERE name = $1
        "#,
    )
    .bind(&name)
    .bind(config.ask_for_plus_one)
    .bind(config.ask_for_kids)
    .bind(config.max_number_of_kids)
    .bind(config.ask_for_accommodation)
    .execute(pool.get_ref())
    .await
    .map_err(|_| actix_web::error::ErrorInternalServerError("Failed to update invite"))?;

    if result.rows_affected() == 0 {
        return Err(actix_web::error::ErrorNotFound(format!(
            "No invite found for '{}'",
            name
        )));
    }

    Ok(HttpResponse::Ok().json("Invite updated"))
}

pub async fn remove(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let name = path.into_inner();

    let result = sqlx::query(
        r#"
        DELETE FROM rsvps WHERE name = $1
        "#,
    )
    .bind(&name)
    .execute(pool.get_ref())
    .await
    .map_err(|_| actix_web::error::ErrorInternalServerError("Failed to delete RSVP"))?;

    if result.rows_affected() == 0 {
        return Err(actix_web::error::ErrorNotFound(format!(
            "No RSVP found for '{}'",
            name
        )));
    }

    Ok(HttpResponse::Ok().json("RSVP deleted"))
}
