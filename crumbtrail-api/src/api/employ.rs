//! API endpoints for the employment relation.
//!
//! Employ is the weak entity: no surrogate id, so the routes address rows by
//! the (company, profile) pair. Hiring and firing is the company owner's
//! (or an admin's) capability.

use rocket::Route;
use rocket::serde::json::Json;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::models::{Employ, EmployInput};
use crate::orm::DbConn;
use crate::orm::company::get_company;
use crate::orm::employ::{delete_employ, get_employ, insert_employ};
use crate::session_guards::{AuthenticatedProfile, XsrfGuard};

/// The ownership rule for the pair's company half.
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

/// Create Employment endpoint.
///
/// - **URL:** `/api/1/employs`
/// - **Method:** `POST`
/// - **Purpose:** Employs a profile at a company
/// - **Authentication:** The company's owner, or an admin; XSRF required
///
/// The store's composite key is the uniqueness authority: employing the
/// same profile twice surfaces the constraint violation.
#[post("/1/employs", data = "<input>")]
pub async fn create_employ(
    db: DbConn,
    input: Json<EmployInput>,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<Employ>>, ApiError> {
    let input = input.into_inner();
    let employ = db
        .run(move |conn| {
            check_company_owner(conn, input.employ_company_id, &caller)?;
            insert_employ(conn, input)
        })
        .await?;
    Ok(Json(Envelope::ok(employ)))
}

/// Get Employment endpoint.
///
/// - **URL:** `/api/1/employs/<company_id>/<profile_id>`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves one employment by its composite key
/// - **Authentication:** The company's owner, the employed profile, or an
///   admin
#[get("/1/employs/<company_id>/<profile_id>")]
pub async fn get_employ_endpoint(
    db: DbConn,
    company_id: i32,
    profile_id: i32,
    caller: AuthenticatedProfile,
) -> Result<Json<Envelope<Employ>>, ApiError> {
    let found = db
        .run(move |conn| {
            if !caller.can_act_for(profile_id) {
                check_company_owner(conn, company_id, &caller)?;
            }
            get_employ(conn, company_id, profile_id)
        })
        .await?;

    match found {
        Some(employ) => Ok(Json(Envelope::ok(employ))),
        None => Err(ApiError::not_found("the employment does not exist")),
    }
}

/// Delete Employment endpoint.
///
/// - **URL:** `/api/1/employs/<company_id>/<profile_id>`
/// - **Method:** `DELETE`
/// - **Purpose:** Ends an employment
/// - **Authentication:** The company's owner, or an admin; XSRF required
#[delete("/1/employs/<company_id>/<profile_id>")]
pub async fn delete_employ_endpoint(
    db: DbConn,
    company_id: i32,
    profile_id: i32,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<()>>, ApiError> {
    let removed = db
        .run(move |conn| {
            check_company_owner(conn, company_id, &caller)?;
            delete_employ(conn, company_id, profile_id)
        })
        .await?;

    if !removed {
        return Err(ApiError::not_found("the employment does not exist"));
    }
    Ok(Json(Envelope::message("the employment was ended")))
}

pub fn routes() -> Vec<Route> {
    routes![create_employ, get_employ_endpoint, delete_employ_endpoint]
}
