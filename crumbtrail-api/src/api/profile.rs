//! API endpoints for managing profiles.
//!
//! Profile information is confidential: only the profile's own session (or
//! an admin) can view or modify it.

use rocket::Route;
use rocket::serde::json::Json;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::models::{Employ, Profile, ProfileUpdate};
use crate::orm::DbConn;
use crate::orm::employ::get_employs_by_profile;
use crate::orm::profile::{delete_profile, get_profile, list_all_profiles, update_profile};
use crate::session_guards::{AdminProfile, AuthenticatedProfile, XsrfGuard};

/// List Profiles endpoint.
///
/// - **URL:** `/api/1/profiles`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves all profiles (ordered by ID)
/// - **Authentication:** Admin only
#[get("/1/profiles")]
pub async fn list_profiles(
    db: DbConn,
    _admin: AdminProfile,
) -> Result<Json<Envelope<Vec<Profile>>>, ApiError> {
    let profiles = db.run(list_all_profiles).await?;
    Ok(Json(Envelope::ok(profiles)))
}

/// Get Profile endpoint.
///
/// - **URL:** `/api/1/profiles/<id>`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves one profile by ID
/// - **Authentication:** The profile itself, or an admin
///
/// The serialized profile never includes credential or token fields.
#[get("/1/profiles/<id>")]
pub async fn get_profile_endpoint(
    db: DbConn,
    id: i32,
    caller: AuthenticatedProfile,
) -> Result<Json<Envelope<Profile>>, ApiError> {
    if !caller.can_act_for(id) {
        return Err(ApiError::authorization("this is not your profile"));
    }

    let found = db.run(move |conn| get_profile(conn, id)).await?;
    match found {
        Some(profile) => Ok(Json(Envelope::ok(profile))),
        None => Err(ApiError::not_found("the profile does not exist")),
    }
}

/// Update Profile endpoint.
///
/// - **URL:** `/api/1/profiles/<id>`
/// - **Method:** `PUT`
/// - **Purpose:** Overwrites the mutable profile fields
/// - **Authentication:** The profile itself, or an admin; XSRF required
#[put("/1/profiles/<id>", data = "<update>")]
pub async fn update_profile_endpoint(
    db: DbConn,
    id: i32,
    update: Json<ProfileUpdate>,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<Profile>>, ApiError> {
    if !caller.can_act_for(id) {
        return Err(ApiError::authorization("this is not your profile"));
    }

    let update = update.into_inner();
    let updated = db.run(move |conn| update_profile(conn, id, update)).await?;
    Ok(Json(Envelope::with_message(updated, "the profile was updated")))
}

/// Delete Profile endpoint.
///
/// - **URL:** `/api/1/profiles/<id>`
/// - **Method:** `DELETE`
/// - **Purpose:** Removes a profile and, through the cascade, its
///   companies, employments, and sessions
/// - **Authentication:** The profile itself, or an admin; XSRF required
#[delete("/1/profiles/<id>")]
pub async fn delete_profile_endpoint(
    db: DbConn,
    id: i32,
    caller: AuthenticatedProfile,
    _xsrf: XsrfGuard,
) -> Result<Json<Envelope<()>>, ApiError> {
    if !caller.can_act_for(id) {
        return Err(ApiError::authorization("this is not your profile"));
    }

    let removed = db.run(move |conn| delete_profile(conn, id)).await?;
    if !removed {
        return Err(ApiError::not_found("the profile does not exist"));
    }
    Ok(Json(Envelope::message("the profile was deleted")))
}

/// List Profile Employments endpoint.
///
/// - **URL:** `/api/1/profiles/<id>/employs`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves the employments of one profile
/// - **Authentication:** The profile itself, or an admin
#[get("/1/profiles/<id>/employs")]
pub async fn list_profile_employs(
    db: DbConn,
    id: i32,
    caller: AuthenticatedProfile,
) -> Result<Json<Envelope<Vec<Employ>>>, ApiError> {
    if !caller.can_act_for(id) {
        return Err(ApiError::authorization("this is not your profile"));
    }

    let employs = db.run(move |conn| get_employs_by_profile(conn, id)).await?;
    Ok(Json(Envelope::ok(employs)))
}

pub fn routes() -> Vec<Route> {
    routes![
        list_profiles,
        get_profile_endpoint,
        update_profile_endpoint,
        delete_profile_endpoint,
        list_profile_employs
    ]
}
