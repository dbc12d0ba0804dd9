//! API endpoints for weekly schedules.

use rocket::Route;
use rocket::serde::json::Json;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::models::{Schedule, ScheduleInput};
use crate::orm::DbConn;
use crate::orm::company::get_company;
use crate::orm::schedule::{delete_schedule, get_schedule, insert_schedule, update_schedule};
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

/// Create Schedule endpoint.
///
/// - **URL:** `/api/1/schedules`
/// - **Method:** `POST`
/// - **Authentication:** The company's owner, or an admin; XSRF required
#[post("/1/schedules", data = "<input>")]
pub async fn create_schedule(
    db: DbConn,
    input: Json<ScheduleInput>,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<Schedule>>, ApiError> {
    let input = input.into_inner();
    let schedule = db
        .run(move |conn| {
            check_company_owner(conn, input.schedule_company_id, &caller)?;
            insert_schedule(conn, input)
        })
        .await?;
    Ok(Json(Envelope::ok(schedule)))
}

/// Get Schedule endpoint.
///
/// - **URL:** `/api/1/schedules/<id>`
/// - **Method:** `GET`
/// - **Authentication:** None; schedules are public map data
#[get("/1/schedules/<id>")]
pub async fn get_schedule_endpoint(
    db: DbConn,
    id: i32,
) -> Result<Json<Envelope<Schedule>>, ApiError> {
    let found = db.run(move |conn| get_schedule(conn, id)).await?;
    match found {
        Some(schedule) => Ok(Json(Envelope::ok(schedule))),
        None => Err(ApiError::not_found("the schedule does not exist")),
    }
}

/// Update Schedule endpoint.
///
/// - **URL:** `/api/1/schedules/<id>`
/// - **Method:** `PUT`
/// - **Authentication:** The company's owner, or an admin; XSRF required
#[put("/1/schedules/<id>", data = "<input>")]
pub async fn update_schedule_endpoint(
    db: DbConn,
    id: i32,
    input: Json<ScheduleInput>,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<Schedule>>, ApiError> {
    let input = input.into_inner();
    let updated = db
        .run(move |conn| {
            let existing = get_schedule(conn, id)?
                .ok_or_else(|| ApiError::not_found("the schedule does not exist"))?;
            check_company_owner(conn, existing.schedule_company_id, &caller)?;
            // Moving the slot to another company requires owning that one too.
            if input.schedule_company_id != existing.schedule_company_id {
                check_company_owner(conn, input.schedule_company_id, &caller)?;
            }
            update_schedule(conn, id, input)
        })
        .await?;
    Ok(Json(Envelope::with_message(updated, "the schedule was updated")))
}

/// Delete Schedule endpoint.
///
/// - **URL:** `/api/1/schedules/<id>`
/// - **Method:** `DELETE`
/// - **Authentication:** The company's owner, or an admin; XSRF required
#[delete("/1/schedules/<id>")]
pub async fn delete_schedule_endpoint(
    db: DbConn,
    id: i32,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<()>>, ApiError> {
    db.run(move |conn| {
        let existing = get_schedule(conn, id)?
            .ok_or_else(|| ApiError::not_found("the schedule does not exist"))?;
        check_company_owner(conn, existing.schedule_company_id, &caller)?;
        delete_schedule(conn, id)
    })
    .await?;
    Ok(Json(Envelope::message("the schedule was deleted")))
}

pub fn routes() -> Vec<Route> {
    routes![
        create_schedule,
        get_schedule_endpoint,
        update_schedule_endpoint,
        delete_schedule_endpoint
    ]
}
