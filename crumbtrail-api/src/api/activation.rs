//! Company activation: the emailed token approves the account.

use rocket::Route;
use rocket::serde::json::Json;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::models::Company;
use crate::orm::DbConn;
use crate::orm::company::activate_company;

/// Company Activation endpoint.
///
/// - **URL:** `/api/1/activation/<token>`
/// - **Method:** `PUT`
/// - **Purpose:** Approves the company holding the activation token and
///   clears the token so the link is single-use
/// - **Authentication:** None; knowing the token is the capability
///
/// A token that matches nothing yields a 404 envelope - the company was
/// already activated, or the token never existed.
#[put("/1/activation/<token>")]
pub async fn activate(db: DbConn, token: String) -> Result<Json<Envelope<Company>>, ApiError> {
    let company = db.run(move |conn| activate_company(conn, &token)).await?;
    Ok(Json(Envelope::with_message(
        company,
        "Welcome to CrumbTrail! Your company account has been approved.",
    )))
}

pub fn routes() -> Vec<Route> {
    routes![activate]
}
