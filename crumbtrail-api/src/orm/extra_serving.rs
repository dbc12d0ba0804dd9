use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::error::ApiError;
use crate::models::{ExtraServing, ExtraServingInput};
use crate::validate;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = BigInt)]
    last_insert_rowid: i64,
}

/// Validates and inserts a new one-off serving event.
pub fn insert_extra_serving(
    conn: &mut SqliteConnection,
    input: ExtraServingInput,
) -> Result<ExtraServing, ApiError> {
    use crate::schema::extra_serving::dsl::*;

    let new_serving = input.validated()?;

    diesel::insert_into(extra_serving)
        .values(&new_serving)
        .execute(conn)?;

    let last_id = diesel::sql_query("SELECT last_insert_rowid() as last_insert_rowid")
        .get_result::<LastInsertRowId>(conn)?
        .last_insert_rowid;

    Ok(extra_serving
        .filter(extra_serving_id.eq(last_id as i32))
        .first::<ExtraServing>(conn)?)
}

/// Gets a single serving event by ID.
pub fn get_extra_serving(
    conn: &mut SqliteConnection,
    id: i32,
) -> Result<Option<ExtraServing>, ApiError> {
    use crate::schema::extra_serving::dsl::*;
    validate::key("extra_serving_id", id)?;
    Ok(extra_serving
        .filter(extra_serving_id.eq(id))
        .first::<ExtraServing>(conn)
        .optional()?)
}

/// Returns the serving events for a company, ordered by start time.
pub fn get_extra_servings_by_company(
    conn: &mut SqliteConnection,
    company_id: i32,
) -> Result<Vec<ExtraServing>, ApiError> {
    use crate::schema::extra_serving::dsl::*;
    validate::key("extra_serving_company_id", company_id)?;
    Ok(extra_serving
        .filter(extra_serving_company_id.eq(company_id))
        .order(extra_serving_start_time.asc())
        .load::<ExtraServing>(conn)?)
}

/// Overwrites a persisted serving event.
pub fn update_extra_serving(
    conn: &mut SqliteConnection,
    id: i32,
    input: ExtraServingInput,
) -> Result<ExtraServing, ApiError> {
    use crate::schema::extra_serving::dsl::*;

    validate::key("extra_serving_id", id)?;
    let changes = input.validated()?;

    let affected = diesel::update(extra_serving.filter(extra_serving_id.eq(id)))
        .set((
            extra_serving_company_id.eq(changes.extra_serving_company_id),
            extra_serving_description.eq(changes.extra_serving_description),
            extra_serving_location.eq(changes.extra_serving_location),
            extra_serving_start_time.eq(changes.extra_serving_start_time),
            extra_serving_end_time.eq(changes.extra_serving_end_time),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(ApiError::not_found("the serving event does not exist"));
    }

    Ok(extra_serving
        .filter(extra_serving_id.eq(id))
        .first::<ExtraServing>(conn)?)
}

/// Deletes a serving event by ID. Returns whether a row was removed.
pub fn delete_extra_serving(conn: &mut SqliteConnection, id: i32) -> Result<bool, ApiError> {
    use crate::schema::extra_serving::dsl::*;
    validate::key("extra_serving_id", id)?;
    let affected =
        diesel::delete(extra_serving.filter(extra_serving_id.eq(id))).execute(conn)?;
    Ok(affected > 0)
}
