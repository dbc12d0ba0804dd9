//! API endpoints for managing companies.
//!
//! The public surface (the map view's data source) sees approved companies
//! only; owners and admins can see and mutate everything of theirs.

use rocket::Route;
use rocket::serde::json::Json;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::models::{Company, CompanyUpdate, Employ, ExtraServing, Image, Schedule};
use crate::orm::DbConn;
use crate::orm::company::{delete_company, get_company, list_approved_companies, update_company};
use crate::orm::employ::get_employs_by_company;
use crate::orm::extra_serving::get_extra_servings_by_company;
use crate::orm::image::get_images_by_company;
use crate::orm::schedule::get_schedules_by_company;
use crate::session_guards::{AuthenticatedProfile, XsrfGuard};

/// Looks up a company and enforces the ownership rule for mutation.
fn owned_company(
    conn: &mut diesel::SqliteConnection,
    id: i32,
    caller: &AuthenticatedProfile,
) -> Result<Company, ApiError> {
    let company =
        get_company(conn, id)?.ok_or_else(|| ApiError::not_found("the company does not exist"))?;
    if !caller.can_act_for(company.company_profile_id) {
        return Err(ApiError::authorization("this is not your company"));
    }
    Ok(company)
}

/// List Companies endpoint.
///
/// - **URL:** `/api/1/companies`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves the approved companies (ordered by ID)
/// - **Authentication:** None; this feeds the public map
#[get("/1/companies")]
pub async fn list_companies(db: DbConn) -> Result<Json<Envelope<Vec<Company>>>, ApiError> {
    let companies = db.run(list_approved_companies).await?;
    Ok(Json(Envelope::ok(companies)))
}

/// Get Company endpoint.
///
/// - **URL:** `/api/1/companies/<id>`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves one company by ID
/// - **Authentication:** None for approved companies; pending companies are
///   visible only to their owner or an admin
#[get("/1/companies/<id>")]
pub async fn get_company_endpoint(
    db: DbConn,
    id: i32,
    caller: Option<AuthenticatedProfile>,
) -> Result<Json<Envelope<Company>>, ApiError> {
    let found = db.run(move |conn| get_company(conn, id)).await?;
    let company = found.ok_or_else(|| ApiError::not_found("the company does not exist"))?;

    if !company.company_approved {
        let authorized = caller
            .map(|caller| caller.can_act_for(company.company_profile_id))
            .unwrap_or(false);
        if !authorized {
            return Err(ApiError::not_found("the company does not exist"));
        }
    }

    Ok(Json(Envelope::ok(company)))
}

/// Update Company endpoint.
///
/// - **URL:** `/api/1/companies/<id>`
/// - **Method:** `PUT`
/// - **Purpose:** Overwrites the mutable company fields
/// - **Authentication:** The owning profile, or an admin; XSRF required
#[put("/1/companies/<id>", data = "<update>")]
pub async fn update_company_endpoint(
    db: DbConn,
    id: i32,
    update: Json<CompanyUpdate>,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<Company>>, ApiError> {
    let update = update.into_inner();
    let updated = db
        .run(move |conn| {
            owned_company(conn, id, &caller)?;
            update_company(conn, id, update)
        })
        .await?;
    Ok(Json(Envelope::with_message(updated, "the company was updated")))
}

/// Delete Company endpoint.
///
/// - **URL:** `/api/1/companies/<id>`
/// - **Method:** `DELETE`
/// - **Purpose:** Removes a company and its dependent rows
/// - **Authentication:** The owning profile, or an admin; XSRF required
#[delete("/1/companies/<id>")]
pub async fn delete_company_endpoint(
    db: DbConn,
    id: i32,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<()>>, ApiError> {
    db.run(move |conn| {
        owned_company(conn, id, &caller)?;
        delete_company(conn, id)
    })
    .await?;
    Ok(Json(Envelope::message("the company was deleted")))
}

/// List Company Schedules endpoint.
///
/// - **URL:** `/api/1/companies/<id>/schedules`
/// - **Method:** `GET`
/// - **Authentication:** None; the map shows where trucks will be
#[get("/1/companies/<id>/schedules")]
pub async fn list_company_schedules(
    db: DbConn,
    id: i32,
) -> Result<Json<Envelope<Vec<Schedule>>>, ApiError> {
    let schedules = db.run(move |conn| get_schedules_by_company(conn, id)).await?;
    Ok(Json(Envelope::ok(schedules)))
}

/// List Company Images endpoint.
///
/// - **URL:** `/api/1/companies/<id>/images`
/// - **Method:** `GET`
/// - **Authentication:** None
#[get("/1/companies/<id>/images")]
pub async fn list_company_images(
    db: DbConn,
    id: i32,
) -> Result<Json<Envelope<Vec<Image>>>, ApiError> {
    let images = db.run(move |conn| get_images_by_company(conn, id)).await?;
    Ok(Json(Envelope::ok(images)))
}

/// List Company Extra Servings endpoint.
///
/// - **URL:** `/api/1/companies/<id>/extra-servings`
/// - **Method:** `GET`
/// - **Authentication:** None
#[get("/1/companies/<id>/extra-servings")]
pub async fn list_company_extra_servings(
    db: DbConn,
    id: i32,
) -> Result<Json<Envelope<Vec<ExtraServing>>>, ApiError> {
    let servings = db
        .run(move |conn| get_extra_servings_by_company(conn, id))
        .await?;
    Ok(Json(Envelope::ok(servings)))
}

/// List Company Employments endpoint.
///
/// - **URL:** `/api/1/companies/<id>/employs`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves the employment pairs of one company
/// - **Authentication:** The owning profile, or an admin
#[get("/1/companies/<id>/employs")]
pub async fn list_company_employs(
    db: DbConn,
    id: i32,
    caller: AuthenticatedProfile,
) -> Result<Json<Envelope<Vec<Employ>>>, ApiError> {
    let employs = db
        .run(move |conn| {
            owned_company(conn, id, &caller)?;
            get_employs_by_company(conn, id)
        })
        .await?;
    Ok(Json(Envelope::ok(employs)))
}

pub fn routes() -> Vec<Route> {
    routes![
        list_companies,
        get_company_endpoint,
        update_company_endpoint,
        delete_company_endpoint,
        list_company_schedules,
        list_company_images,
        list_company_extra_servings,
        list_company_employs
    ]
}
