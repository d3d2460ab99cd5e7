use crate::models::rsvp::{Rsvp, SubmitRsvpRequest};
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn get_by_name(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let name = path.into_inner();

    let rsvp = sqlx::query_as::<_, Rsvp>(
        r#"
        SELECT id, name, guests, attending, plus_one, plus_one_name, plus_one_meal_choice,
               meal_choice, accommodation, number_of_kids, submitted, is_predefined,
               ask_for_plus_one, ask_for_kids, max_number_of_kids, ask_for_accommodation,
               created_at, updated_at
        FROM rsvps
        WHERE name = $1
        "#,
    )
    .bind(&name)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|_| actix_web::error::ErrorInternalServerError("Database error"))?;

    // An unknown name is not an error: the UI switches into
    // self-registration mode on a null body.
    Ok(HttpResponse::Ok().json(rsvp))
}

pub async fn submit(
    pool: web::Data<PgPool>,
    body: web::Json<SubmitRsvpRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let request = body.into_inner();
    request
        .validate()
        .map_err(actix_web::error::ErrorBadRequest)?;

    let payload = request.into_payload();

    let existing = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id FROM rsvps WHERE name = $1
        "#,
    )
    .bind(&payload.name)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|_| actix_web::error::ErrorInternalServerError("Database error"))?;

    let id = match existing {
        // Full replace of the answer fields; invite configuration and
        // provenance stay as the admin set them.
        Some(id) => {
            sqlx::query(
                r#"
                UPDATE rsvps
                SET guests = $2, attending = $3, plus_one = $4, plus_one_name = $5,
                    plus_one_meal_choice = $6, meal_choice = $7, accommodation = $8,
                    number_of_kids = $9, submitted = $10, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(id)
            .bind(payload.guests)
            .bind(payload.attending)
            .bind(payload.plus_one)
            .bind(payload.plus_one_name)
            .bind(payload.plus_one_meal_choice)
            .bind(payload.meal_choice)
            .bind(payload.accommodation)
            .bind(payload.number_of_kids)
            .bind(payload.submitted)
            .execute(pool.get_ref())
            .await
            .map_err(|_| actix_web::error::ErrorInternalServerError("Failed to update RSVP"))?;

            id
        }
        // Self-registration: no admin-provisioned template, so the question
        // toggles take their defaults.
        None => sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO rsvps (name, guests, attending, plus_one, plus_one_name,
                               plus_one_meal_choice, meal_choice, accommodation,
                               number_of_kids, submitted, is_predefined,
                               ask_for_plus_one, ask_for_kids, max_number_of_kids,
                               ask_for_accommodation)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, false, true, false, 0, true)
            RETURNING id
            "#,
        )
        .bind(&payload.name)
        .bind(payload.guests)
        .bind(payload.attending)
        .bind(payload.plus_one)
        .bind(payload.plus_one_name)
        .bind(payload.plus_one_meal_choice)
        .bind(payload.meal_choice)
        .bind(payload.accommodation)
        .bind(payload.number_of_kids)
        .bind(payload.submitted)
        .fetch_one(pool.get_ref())
        .await
        .map_err(|_| actix_web::error::ErrorInternalServerError("Failed to create RSVP"))?,
    };

    Ok(HttpResponse::Ok().json(id))
}
