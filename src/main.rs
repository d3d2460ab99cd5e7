mod db;
mod handlers;
mod middleware;
mod models;
mod utils;

use crate::db::pool::{create_pool, run_migrations};
use actix_cors::Cors;
use actix_web::{
    http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    web::{self},
    App, HttpServer,
};
use actix_web_httpauth::middleware::HttpAuthentication;
use dotenv::dotenv;
use env_logger::Env;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in .env file!");

    let pool = create_pool(&database_url)
        .await
        .expect("Failed to create database pool!");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations!");

    let host = env::var("HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let address = format!("{}:{}", host, port);

    log::info!("RSVP server listening on {}", address);

    HttpServer::new(move || {
        let admin_auth = HttpAuthentication::bearer(middleware::auth::session_validator);
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .send_wildcard()
                    .allowed_headers(vec![AUTHORIZATION, ACCEPT])
                    .allowed_header(CONTENT_TYPE)
                    .max_age(3600),
            )
            .app_data(web::Data::new(pool.clone()))
            .service(
                // public
                web::scope("/api/auth")
                    .route("/login", web::post().to(handlers::auth::login))
                    .route("/validate", web::post().to(handlers::auth::validate_session)),
            )
            .service(
                // admin-gated
                web::scope("/api/admin")
                    .wrap(admin_auth)
                    .route("/rsvps", web::get().to(handlers::admin::get_all))
                    .route("/rsvps/{name}", web::delete().to(handlers::admin::remove))
                    .route("/invites", web::post().to(handlers::admin::create_invite))
                    .route(
                        "/invites/{name}",
                        web::put().to(handlers::admin::update_invite),
                    ),
            )
            .service(
                // guest-facing
                web::scope("/api/rsvps")
                    .route("", web::post().to(handlers::rsvp::submit))
                    .route("/{name}", web::get().to(handlers::rsvp::get_by_name)),
            )
    })
    .bind(&address)?
    .run()
    .await
}
