#[macro_use]
extern crate rocket;

use rocket::figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use rocket::request::Request;
use rocket::serde::json::{Json, Value, json};
use rocket::{Build, Rocket};

pub mod admin_init_fairing;
pub mod api;
pub mod envelope;
pub mod error;
pub mod models;
pub mod orm;
pub use orm::DbConn;
pub mod schema;
pub mod session_guards;
pub mod validate;

#[catch(401)]
fn unauthorized(_req: &Request) -> Json<Value> {
    Json(json!({
        "status": 401,
        "message": "a valid session is required"
    }))
}

#[catch(403)]
fn forbidden(_req: &Request) -> Json<Value> {
    Json(json!({
        "status": 403,
        "message": "forbidden"
    }))
}

#[catch(404)]
fn not_found(req: &Request) -> Json<Value> {
    Json(json!({
        "status": 404,
        "message": format!("no resource at {}", req.uri().path())
    }))
}

#[catch(422)]
fn unprocessable_entity(_req: &Request) -> Json<Value> {
    Json(json!({
        "status": 422,
        "message": "the request body could not be processed"
    }))
}

#[catch(500)]
fn internal_server_error(_req: &Request) -> Json<Value> {
    Json(json!({
        "status": 500,
        "message": "internal server error"
    }))
}

#[catch(default)]
fn default_catcher(status: rocket::http::Status, _req: &Request) -> Json<Value> {
    Json(json!({
        "status": status.code,
        "message": status.reason().unwrap_or("Unknown Error")
    }))
}

pub fn mount_api_routes(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount("/api", api::routes())
}

/// Registers the envelope-shaped catchers so failures outside any route
/// handler still reply with `{status, message}`.
pub fn register_catchers(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.register(
        "/",
        catchers![
            unauthorized,
            forbidden,
            not_found,
            unprocessable_entity,
            internal_server_error,
            default_catcher
        ],
    )
}

/// Builds the production Rocket instance.
///
/// Note that this function doesn't get tested by our tests. Tests set up
/// the in-memory instance defined in orm/testing.rs.
pub fn rocket() -> Rocket<Build> {
    let database_url =
        std::env::var("CRUMBTRAIL_DATABASE_URL").expect("CRUMBTRAIL_DATABASE_URL must be set");

    let figment = Figment::from(rocket::Config::default())
        .merge(Toml::file("Rocket.toml").nested())
        .merge(Env::prefixed("ROCKET_").global())
        .merge(("databases.crumbtrail_db.url", database_url));

    let rocket = rocket::custom(figment)
        .attach(DbConn::fairing())
        .attach(orm::set_foreign_keys_fairing())
        .attach(orm::run_migrations_fairing())
        .attach(admin_init_fairing::admin_init_fairing());

    mount_api_routes(register_catchers(rocket))
}
