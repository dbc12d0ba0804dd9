use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::error::ApiError;
use crate::models::{Company, CompanyInput, CompanyUpdate};
use crate::validate;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = BigInt)]
    last_insert_rowid: i64,
}

/// Validates and inserts a new company. Companies enter the system
/// unapproved; `activate_company` flips the flag once the token round-trips.
pub fn insert_company(conn: &mut SqliteConnection, input: CompanyInput) -> Result<Company, ApiError> {
    use crate::schema::company::dsl::*;

    let new_company = input.validated()?;

    diesel::insert_into(company)
        .values(&new_company)
        .execute(conn)?;

    let last_id = diesel::sql_query("SELECT last_insert_rowid() as last_insert_rowid")
        .get_result::<LastInsertRowId>(conn)?
        .last_insert_rowid;

    Ok(company
        .filter(company_id.eq(last_id as i32))
        .first::<Company>(conn)?)
}

/// Gets a single company by ID.
pub fn get_company(conn: &mut SqliteConnection, id: i32) -> Result<Option<Company>, ApiError> {
    use crate::schema::company::dsl::*;
    validate::key("company_id", id)?;
    Ok(company
        .filter(company_id.eq(id))
        .first::<Company>(conn)
        .optional()?)
}

/// Returns all companies owned by a profile, ordered by id.
pub fn get_companies_by_profile(
    conn: &mut SqliteConnection,
    profile_id: i32,
) -> Result<Vec<Company>, ApiError> {
    use crate::schema::company::dsl::*;
    validate::key("company_profile_id", profile_id)?;
    Ok(company
        .filter(company_profile_id.eq(profile_id))
        .order(company_id.asc())
        .load::<Company>(conn)?)
}

/// Returns the approved companies, ordered by id. This is the set the public
/// map is allowed to see.
pub fn list_approved_companies(conn: &mut SqliteConnection) -> Result<Vec<Company>, ApiError> {
    use crate::schema::company::dsl::*;
    Ok(company
        .filter(company_approved.eq(true))
        .order(company_id.asc())
        .load::<Company>(conn)?)
}

/// Returns all companies, ordered by id.
pub fn list_all_companies(conn: &mut SqliteConnection) -> Result<Vec<Company>, ApiError> {
    use crate::schema::company::dsl::*;
    Ok(company.order(company_id.asc()).load::<Company>(conn)?)
}

/// Looks up the company holding an outstanding activation token.
pub fn get_company_by_activation_token(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<Company>, ApiError> {
    use crate::schema::company::dsl::*;
    Ok(company
        .filter(company_activation_token.eq(token))
        .first::<Company>(conn)
        .optional()?)
}

/// Consumes an activation token: marks the company approved and clears the
/// token so the link cannot be replayed. A token that matches nothing means
/// the company was already activated (or never existed).
pub fn activate_company(conn: &mut SqliteConnection, token: &str) -> Result<Company, ApiError> {
    use crate::schema::company::dsl::*;

    let found = get_company_by_activation_token(conn, token)?
        .ok_or_else(|| ApiError::not_found("the company has already been activated"))?;

    diesel::update(company.filter(company_id.eq(found.company_id)))
        .set((
            company_approved.eq(true),
            company_activation_token.eq(None::<String>),
        ))
        .execute(conn)?;

    Ok(company
        .filter(company_id.eq(found.company_id))
        .first::<Company>(conn)?)
}

/// Overwrites the mutable fields of a persisted company.
pub fn update_company(
    conn: &mut SqliteConnection,
    id: i32,
    update: CompanyUpdate,
) -> Result<Company, ApiError> {
    use crate::schema::company::dsl::*;

    validate::key("company_id", id)?;
    let changes = update.validated()?;

    let affected = diesel::update(company.filter(company_id.eq(id)))
        .set((
            company_name.eq(changes.company_name),
            company_email.eq(changes.company_email),
            company_phone.eq(changes.company_phone),
            company_permit.eq(changes.company_permit),
            company_license.eq(changes.company_license),
            company_attn.eq(changes.company_attn),
            company_street1.eq(changes.company_street1),
            company_street2.eq(changes.company_street2),
            company_city.eq(changes.company_city),
            company_state.eq(changes.company_state),
            company_zip.eq(changes.company_zip),
            company_description.eq(changes.company_description),
            company_menu_text.eq(changes.company_menu_text),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(ApiError::not_found("the company does not exist"));
    }

    Ok(company.filter(company_id.eq(id)).first::<Company>(conn)?)
}

/// Deletes a company by ID. Dependent schedules, images, servings, and
/// employ rows go with it through the cascade.
pub fn delete_company(conn: &mut SqliteConnection, id: i32) -> Result<bool, ApiError> {
    use crate::schema::company::dsl::*;
    validate::key("company_id", id)?;
    let affected = diesel::delete(company.filter(company_id.eq(id))).execute(conn)?;
    Ok(affected > 0)
}
