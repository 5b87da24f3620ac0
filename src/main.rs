use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use taskdesk::auth::AuthMiddleware;
use taskdesk::config::Config;
use taskdesk::routes::{self, health};
use taskdesk::services::{AuthService, TaskService, UserService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    // Token signing reads the secret per call; require it at boot so a
    // misconfigured process fails here, not on the first login.
    std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    // Explicit constructor wiring: each service receives its store and
    // collaborators up front.
    let user_service = UserService::new(pool.clone());
    let auth_service = AuthService::new(user_service.clone());
    let task_service = TaskService::new(pool.clone(), user_service.clone());

    log::info!("Starting TaskDesk server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(task_service.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
