//! API endpoint for profile login.

use rocket::Route;
use rocket::http::CookieJar;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::models::Profile;
use crate::orm::DbConn;
use crate::orm::login::process_login;

/// Login request structure containing profile credentials.
#[derive(Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login endpoint.
///
/// - **URL:** `/api/1/login`
/// - **Method:** `POST`
/// - **Purpose:** Authenticates a profile by email and password
/// - **Authentication:** None required
///
/// On success the response sets the `session` cookie (HTTP-only) and the
/// `XSRF-TOKEN` cookie whose value mutating requests must echo in the
/// `X-XSRF-TOKEN` header. The envelope carries the public profile fields.
///
/// Unknown email and wrong password are indistinguishable in the reply.
#[post("/1/login", data = "<login>")]
pub async fn login(
    db: DbConn,
    cookies: &CookieJar<'_>,
    login: Json<LoginRequest>,
) -> Result<Json<Envelope<Profile>>, ApiError> {
    let profile = process_login(&db, cookies, &login).await?;
    Ok(Json(Envelope::ok(profile)))
}

pub fn routes() -> Vec<Route> {
    routes![login]
}
