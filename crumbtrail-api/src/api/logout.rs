//! API endpoint for profile logout.

use rocket::Route;
use rocket::http::CookieJar;
use rocket::serde::json::Json;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::orm::DbConn;
use crate::orm::login::{SESSION_COOKIE, XSRF_COOKIE};
use crate::orm::logout::revoke_session;

/// Logout endpoint.
///
/// - **URL:** `/api/1/logout`
/// - **Method:** `POST`
/// - **Purpose:** Revokes the caller's session and clears the cookie pair
/// - **Authentication:** Session cookie required
///
/// Revoking an already-revoked or unknown token is not an error; the reply
/// is the same either way so the endpoint stays idempotent.
#[post("/1/logout")]
pub async fn logout(
    db: DbConn,
    cookies: &CookieJar<'_>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let Some(session_cookie) = cookies.get(SESSION_COOKIE) else {
        return Err(ApiError::authorization("no session to log out"));
    };

    let token = session_cookie.value().to_string();
    revoke_session(&db, &token).await?;

    cookies.remove(SESSION_COOKIE);
    cookies.remove(XSRF_COOKIE);

    Ok(Json(Envelope::message("logged out")))
}

pub fn routes() -> Vec<Route> {
    routes![logout]
}
