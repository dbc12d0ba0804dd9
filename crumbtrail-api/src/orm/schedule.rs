use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::error::ApiError;
use crate::models::{Schedule, ScheduleInput};
use crate::validate;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = BigInt)]
    last_insert_rowid: i64,
}

/// Validates and inserts a new weekly schedule slot.
pub fn insert_schedule(
    conn: &mut SqliteConnection,
    input: ScheduleInput,
) -> Result<Schedule, ApiError> {
    use crate::schema::schedule::dsl::*;

    let new_schedule = input.validated()?;

    diesel::insert_into(schedule)
        .values(&new_schedule)
        .execute(conn)?;

    let last_id = diesel::sql_query("SELECT last_insert_rowid() as last_insert_rowid")
        .get_result::<LastInsertRowId>(conn)?
        .last_insert_rowid;

    Ok(schedule
        .filter(schedule_id.eq(last_id as i32))
        .first::<Schedule>(conn)?)
}

/// Gets a single schedule by ID.
pub fn get_schedule(conn: &mut SqliteConnection, id: i32) -> Result<Option<Schedule>, ApiError> {
    use crate::schema::schedule::dsl::*;
    validate::key("schedule_id", id)?;
    Ok(schedule
        .filter(schedule_id.eq(id))
        .first::<Schedule>(conn)
        .optional()?)
}

/// Returns the schedule slots for a company, ordered by id.
pub fn get_schedules_by_company(
    conn: &mut SqliteConnection,
    company_id: i32,
) -> Result<Vec<Schedule>, ApiError> {
    use crate::schema::schedule::dsl::*;
    validate::key("schedule_company_id", company_id)?;
    Ok(schedule
        .filter(schedule_company_id.eq(company_id))
        .order(schedule_id.asc())
        .load::<Schedule>(conn)?)
}

/// Overwrites a persisted schedule slot.
pub fn update_schedule(
    conn: &mut SqliteConnection,
    id: i32,
    input: ScheduleInput,
) -> Result<Schedule, ApiError> {
    use crate::schema::schedule::dsl::*;

    validate::key("schedule_id", id)?;
    let changes = input.validated()?;

    let affected = diesel::update(schedule.filter(schedule_id.eq(id)))
        .set((
            schedule_company_id.eq(changes.schedule_company_id),
            schedule_day_of_week.eq(changes.schedule_day_of_week),
            schedule_start_time.eq(changes.schedule_start_time),
            schedule_end_time.eq(changes.schedule_end_time),
            schedule_location_name.eq(changes.schedule_location_name),
            schedule_location_address.eq(changes.schedule_location_address),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(ApiError::not_found("the schedule does not exist"));
    }

    Ok(schedule.filter(schedule_id.eq(id)).first::<Schedule>(conn)?)
}

/// Deletes a schedule by ID. Returns whether a row was removed.
pub fn delete_schedule(conn: &mut SqliteConnection, id: i32) -> Result<bool, ApiError> {
    use crate::schema::schedule::dsl::*;
    validate::key("schedule_id", id)?;
    let affected = diesel::delete(schedule.filter(schedule_id.eq(id))).execute(conn)?;
    Ok(affected > 0)
}
