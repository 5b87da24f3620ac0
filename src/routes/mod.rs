pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::error::AppError;

pub fn config(cfg: &mut web::ServiceConfig) {
    // Extraction failures (malformed JSON bodies, unparseable query strings)
    // surface in the same {statusCode, message} shape as domain errors.
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .service(
        web::scope("/auth")
            .service(auth::signup)
            .service(auth::login)
            .service(auth::logout),
    )
    .service(
        web::scope("/users")
            .service(users::list_users)
            .service(users::profile)
            .service(users::admin_signup)
            .service(users::update_user),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
