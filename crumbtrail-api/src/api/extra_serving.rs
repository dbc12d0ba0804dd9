//! API endpoints for one-off serving events.

use rocket::Route;
use rocket::serde::json::Json;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::models::{ExtraServing, ExtraServingInput};
use crate::orm::DbConn;
use crate::orm::company::get_company;
use crate::orm::extra_serving::{
    delete_extra_serving, get_extra_serving, insert_extra_serving, update_extra_serving,
};
use crate::session_guards::{AuthenticatedProfile, XsrfGuard};

fn check_company_owner(
    conn: &mut diesel::SqliteConnection,
    company_id: i32,
    caller: &AuthenticatedProfile,
) -> Result<(), ApiError> {
    let company = get_company(conn, company_id)?
        .ok_or_else(|| ApiError::not_found("the company does not exist"))?;
    if !caller.can_act_for(company.company_profile_id) {
        return Err(ApiError::authorization("this is not your company"));
    }
    Ok(())
}

/// Create Extra Serving endpoint.
///
/// - **URL:** `/api/1/extra-servings`
/// - **Method:** `POST`
/// - **Authentication:** The company's owner, or an admin; XSRF required
#[post("/1/extra-servings", data = "<input>")]
pub async fn create_extra_serving(
    db: DbConn,
    input: Json<ExtraServingInput>,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<ExtraServing>>, ApiError> {
    let input = input.into_inner();
    let serving = db
        .run(move |conn| {
            check_company_owner(conn, input.extra_serving_company_id, &caller)?;
            insert_extra_serving(conn, input)
        })
        .await?;
    Ok(Json(Envelope::ok(serving)))
}

/// Get Extra Serving endpoint.
///
/// - **URL:** `/api/1/extra-servings/<id>`
/// - **Method:** `GET`
/// - **Authentication:** None
#[get("/1/extra-servings/<id>")]
pub async fn get_extra_serving_endpoint(
    db: DbConn,
    id: i32,
) -> Result<Json<Envelope<ExtraServing>>, ApiError> {
    let found = db.run(move |conn| get_extra_serving(conn, id)).await?;
    match found {
        Some(serving) => Ok(Json(Envelope::ok(serving))),
        None => Err(ApiError::not_found("the serving event does not exist")),
    }
}

/// Update Extra Serving endpoint.
///
/// - **URL:** `/api/1/extra-servings/<id>`
/// - **Method:** `PUT`
/// - **Authentication:** The company's owner, or an admin; XSRF required
#[put("/1/extra-servings/<id>", data = "<input>")]
pub async fn update_extra_serving_endpoint(
    db: DbConn,
    id: i32,
    input: Json<ExtraServingInput>,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<ExtraServing>>, ApiError> {
    let input = input.into_inner();
    let updated = db
        .run(move |conn| {
            let existing = get_extra_serving(conn, id)?
                .ok_or_else(|| ApiError::not_found("the serving event does not exist"))?;
            check_company_owner(conn, existing.extra_serving_company_id, &caller)?;
            if input.extra_serving_company_id != existing.extra_serving_company_id {
                check_company_owner(conn, input.extra_serving_company_id, &caller)?;
            }
            update_extra_serving(conn, id, input)
        })
        .await?;
    Ok(Json(Envelope::with_message(
        updated,
        "the serving event was updated",
    )))
}

/// Delete Extra Serving endpoint.
///
/// - **URL:** `/api/1/extra-servings/<id>`
/// - **Method:** `DELETE`
/// - **Authentication:** The company's owner, or an admin; XSRF required
#[delete("/1/extra-servings/<id>")]
pub async fn delete_extra_serving_endpoint(
    db: DbConn,
    id: i32,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<()>>, ApiError> {
    db.run(move |conn| {
        let existing = get_extra_serving(conn, id)?
            .ok_or_else(|| ApiError::not_found("the serving event does not exist"))?;
        check_company_owner(conn, existing.extra_serving_company_id, &caller)?;
        delete_extra_serving(conn, id)
    })
    .await?;
    Ok(Json(Envelope::message("the serving event was deleted")))
}

pub fn routes() -> Vec<Route> {
    routes![
        create_extra_serving,
        get_extra_serving_endpoint,
        update_extra_serving_endpoint,
        delete_extra_serving_endpoint
    ]
}
