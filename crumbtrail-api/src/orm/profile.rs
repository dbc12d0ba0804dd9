use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::error::ApiError;
use crate::models::{Profile, ProfileInput, ProfileUpdate};
use crate::validate;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = BigInt)]
    last_insert_rowid: i64,
}

/// Validates and inserts a new profile, returning the persisted row with its
/// store-assigned key.
pub fn insert_profile(conn: &mut SqliteConnection, input: ProfileInput) -> Result<Profile, ApiError> {
    use crate::schema::profile::dsl::*;

    let new_profile = input.validated()?;

    diesel::insert_into(profile)
        .values(&new_profile)
        .execute(conn)?;

    let last_id = diesel::sql_query("SELECT last_insert_rowid() as last_insert_rowid")
        .get_result::<LastInsertRowId>(conn)?
        .last_insert_rowid;

    Ok(profile
        .filter(profile_id.eq(last_id as i32))
        .first::<Profile>(conn)?)
}

/// Gets a single profile by ID. A well-formed key that matches nothing is
/// `Ok(None)`; a non-positive key is a persistence error.
pub fn get_profile(conn: &mut SqliteConnection, id: i32) -> Result<Option<Profile>, ApiError> {
    use crate::schema::profile::dsl::*;
    validate::key("profile_id", id)?;
    Ok(profile
        .filter(profile_id.eq(id))
        .first::<Profile>(conn)
        .optional()?)
}

/// Gets a single profile by email (case-insensitive).
pub fn get_profile_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<Profile>, ApiError> {
    Ok(
        diesel::sql_query("SELECT * FROM profile WHERE LOWER(profile_email) = LOWER(?)")
            .bind::<diesel::sql_types::Text, _>(email)
            .get_result::<Profile>(conn)
            .optional()?,
    )
}

/// Gets a single profile by its access token.
pub fn get_profile_by_access_token(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<Profile>, ApiError> {
    use crate::schema::profile::dsl::*;
    Ok(profile
        .filter(profile_access_token.eq(token))
        .first::<Profile>(conn)
        .optional()?)
}

/// Returns all profiles in ascending order by id.
pub fn list_all_profiles(conn: &mut SqliteConnection) -> Result<Vec<Profile>, ApiError> {
    use crate::schema::profile::dsl::*;
    Ok(profile.order(profile_id.asc()).load::<Profile>(conn)?)
}

/// Overwrites the mutable fields of a persisted profile.
///
/// A non-positive key means the caller is updating an entity that was never
/// persisted, which is a persistence-contract violation.
pub fn update_profile(
    conn: &mut SqliteConnection,
    id: i32,
    update: ProfileUpdate,
) -> Result<Profile, ApiError> {
    use crate::schema::profile::dsl::*;

    validate::key("profile_id", id)?;
    let changes = update.validated()?;

    let affected = diesel::update(profile.filter(profile_id.eq(id)))
        .set((
            profile_name.eq(changes.profile_name),
            profile_email.eq(changes.profile_email),
            profile_phone.eq(changes.profile_phone),
            profile_type.eq(changes.profile_type),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(ApiError::not_found("the profile does not exist"));
    }

    Ok(profile.filter(profile_id.eq(id)).first::<Profile>(conn)?)
}

/// Deletes a profile by ID. Returns whether a row was removed.
pub fn delete_profile(conn: &mut SqliteConnection, id: i32) -> Result<bool, ApiError> {
    use crate::schema::profile::dsl::*;
    validate::key("profile_id", id)?;
    let affected = diesel::delete(profile.filter(profile_id.eq(id))).execute(conn)?;
    Ok(affected > 0)
}
