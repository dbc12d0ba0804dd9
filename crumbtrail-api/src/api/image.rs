//! API endpoints for company images.

use rocket::Route;
use rocket::serde::json::Json;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::models::{Image, ImageInput};
use crate::orm::DbConn;
use crate::orm::company::get_company;
use crate::orm::image::{delete_image, get_image, insert_image, update_image};
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

/// Create Image endpoint.
///
/// - **URL:** `/api/1/images`
/// - **Method:** `POST`
/// - **Authentication:** The company's owner, or an admin; XSRF required
#[post("/1/images", data = "<input>")]
pub async fn create_image(
    db: DbConn,
    input: Json<ImageInput>,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<Image>>, ApiError> {
    let input = input.into_inner();
    let image = db
        .run(move |conn| {
            check_company_owner(conn, input.image_company_id, &caller)?;
            insert_image(conn, input)
        })
        .await?;
    Ok(Json(Envelope::ok(image)))
}

/// Get Image endpoint.
///
/// - **URL:** `/api/1/images/<id>`
/// - **Method:** `GET`
/// - **Authentication:** None
#[get("/1/images/<id>")]
pub async fn get_image_endpoint(db: DbConn, id: i32) -> Result<Json<Envelope<Image>>, ApiError> {
    let found = db.run(move |conn| get_image(conn, id)).await?;
    match found {
        Some(image) => Ok(Json(Envelope::ok(image))),
        None => Err(ApiError::not_found("the image does not exist")),
    }
}

/// Update Image endpoint.
///
/// - **URL:** `/api/1/images/<id>`
/// - **Method:** `PUT`
/// - **Authentication:** The company's owner, or an admin; XSRF required
#[put("/1/images/<id>", data = "<input>")]
pub async fn update_image_endpoint(
    db: DbConn,
    id: i32,
    input: Json<ImageInput>,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<Image>>, ApiError> {
    let input = input.into_inner();
    let updated = db
        .run(move |conn| {
            let existing =
                get_image(conn, id)?.ok_or_else(|| ApiError::not_found("the image does not exist"))?;
            check_company_owner(conn, existing.image_company_id, &caller)?;
            if input.image_company_id != existing.image_company_id {
                check_company_owner(conn, input.image_company_id, &caller)?;
            }
            update_image(conn, id, input)
        })
        .await?;
    Ok(Json(Envelope::with_message(updated, "the image was updated")))
}

/// Delete Image endpoint.
///
/// - **URL:** `/api/1/images/<id>`
/// - **Method:** `DELETE`
/// - **Authentication:** The company's owner, or an admin; XSRF required
#[delete("/1/images/<id>")]
pub async fn delete_image_endpoint(
    db: DbConn,
    id: i32,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<()>>, ApiError> {
    db.run(move |conn| {
        let existing =
            get_image(conn, id)?.ok_or_else(|| ApiError::not_found("the image does not exist"))?;
        check_company_owner(conn, existing.image_company_id, &caller)?;
        delete_image(conn, id)
    })
    .await?;
    Ok(Json(Envelope::message("the image was deleted")))
}

pub fn routes() -> Vec<Route> {
    routes![
        create_image,
        get_image_endpoint,
        update_image_endpoint,
        delete_image_endpoint
    ]
}
