use diesel::prelude::*;

use crate::error::ApiError;
use crate::models::{Employ, EmployInput};
use crate::validate;

/// Inserts an employment pair. There is no surrogate key to read back; the
/// pair itself is the identity. A duplicate pair violates the composite
/// primary key and surfaces as the store's constraint error.
pub fn insert_employ(conn: &mut SqliteConnection, input: EmployInput) -> Result<Employ, ApiError> {
    use crate::schema::employ::dsl::*;

    let new_employ = input.validated()?;

    diesel::insert_into(employ)
        .values(&new_employ)
        .execute(conn)?;

    Ok(Employ {
        employ_company_id: new_employ.employ_company_id,
        employ_profile_id: new_employ.employ_profile_id,
    })
}

/// Gets an employment by its composite key.
pub fn get_employ(
    conn: &mut SqliteConnection,
    company_id: i32,
    profile_id: i32,
) -> Result<Option<Employ>, ApiError> {
    use crate::schema::employ::dsl::*;
    validate::key("employ_company_id", company_id)?;
    validate::key("employ_profile_id", profile_id)?;
    Ok(employ
        .filter(employ_company_id.eq(company_id))
        .filter(employ_profile_id.eq(profile_id))
        .first::<Employ>(conn)
        .optional()?)
}

/// Returns the employments for a company, ordered by profile id.
pub fn get_employs_by_company(
    conn: &mut SqliteConnection,
    company_id: i32,
) -> Result<Vec<Employ>, ApiError> {
    use crate::schema::employ::dsl::*;
    validate::key("employ_company_id", company_id)?;
    Ok(employ
        .filter(employ_company_id.eq(company_id))
        .order(employ_profile_id.asc())
        .load::<Employ>(conn)?)
}

/// Returns the employments for a profile, ordered by company id.
pub fn get_employs_by_profile(
    conn: &mut SqliteConnection,
    profile_id: i32,
) -> Result<Vec<Employ>, ApiError> {
    use crate::schema::employ::dsl::*;
    validate::key("employ_profile_id", profile_id)?;
    Ok(employ
        .filter(employ_profile_id.eq(profile_id))
        .order(employ_company_id.asc())
        .load::<Employ>(conn)?)
}

/// Deletes an employment by its composite key. Returns whether a row was
/// removed.
pub fn delete_employ(
    conn: &mut SqliteConnection,
    company_id: i32,
    profile_id: i32,
) -> Result<bool, ApiError> {
    use crate::schema::employ::dsl::*;
    validate::key("employ_company_id", company_id)?;
    validate::key("employ_profile_id", profile_id)?;
    let affected = diesel::delete(
        employ
            .filter(employ_company_id.eq(company_id))
            .filter(employ_profile_id.eq(profile_id)),
    )
    .execute(conn)?;
    Ok(affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{CompanyInput, ProfileInput};
    use crate::orm::company::insert_company;
    use crate::orm::profile::insert_profile;
    use crate::orm::testing::setup_test_db;

    fn row_count(conn: &mut SqliteConnection) -> i64 {
        use crate::schema::employ::dsl::*;
        employ.count().get_result(conn).expect("count employs")
    }

    fn seed_owner_and_company(conn: &mut SqliteConnection) -> (i32, i32) {
        let owner = insert_profile(
            conn,
            ProfileInput {
                profile_name: "Loren".to_string(),
                profile_email: "loren@x.com".to_string(),
                profile_phone: "5055551234".to_string(),
                profile_access_token: "4".repeat(64),
                profile_activation_token: "2".repeat(32),
                profile_type: "o".to_string(),
                profile_salt: "a".repeat(64),
                profile_hash: "b".repeat(128),
            },
        )
        .expect("insert owner");

        let company = insert_company(
            conn,
            CompanyInput {
                company_profile_id: owner.profile_id,
                company_name: "Terry's Tacos".to_string(),
                company_email: "terrytacos@tacos.com".to_string(),
                company_phone: "5052345678".to_string(),
                company_permit: "12345".to_string(),
                company_license: "2345".to_string(),
                company_attn: "attn: MR Taco".to_string(),
                company_street1: "345 Taco Street".to_string(),
                company_street2: None,
                company_city: "Albuquerque".to_string(),
                company_state: "NM".to_string(),
                company_zip: "87654".to_string(),
                company_description: None,
                company_menu_text: None,
                company_activation_token: None,
            },
        )
        .expect("insert company");

        (company.company_id, owner.profile_id)
    }

    #[test]
    fn test_insert_fetch_delete_scenario() {
        let mut conn = setup_test_db();
        let (company_id, profile_id) = seed_owner_and_company(&mut conn);
        let baseline = row_count(&mut conn);

        insert_employ(
            &mut conn,
            EmployInput {
                employ_company_id: company_id,
                employ_profile_id: profile_id,
            },
        )
        .expect("insert employ");
        assert_eq!(row_count(&mut conn), baseline + 1);

        let fetched = get_employ(&mut conn, company_id, profile_id)
            .expect("fetch")
            .expect("pair should exist");
        assert_eq!(fetched.employ_company_id, company_id);
        assert_eq!(fetched.employ_profile_id, profile_id);

        assert!(delete_employ(&mut conn, company_id, profile_id).expect("delete"));
        assert_eq!(row_count(&mut conn), baseline);
        assert!(get_employ(&mut conn, company_id, profile_id).expect("fetch").is_none());
    }

    #[test]
    fn test_duplicate_pair_fails_and_adds_exactly_one_row() {
        let mut conn = setup_test_db();
        let (company_id, profile_id) = seed_owner_and_company(&mut conn);
        let baseline = row_count(&mut conn);

        let input = EmployInput {
            employ_company_id: company_id,
            employ_profile_id: profile_id,
        };
        insert_employ(&mut conn, input.clone()).expect("first insert");

        let err = insert_employ(&mut conn, input).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Persistence);
        assert_eq!(row_count(&mut conn), baseline + 1);
    }

    #[test]
    fn test_missing_half_of_pair_is_persistence_error() {
        let mut conn = setup_test_db();

        let err = insert_employ(
            &mut conn,
            EmployInput {
                employ_company_id: 0,
                employ_profile_id: 1,
            },
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Persistence);

        let err = get_employ(&mut conn, 1, -1).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Persistence);

        let err = delete_employ(&mut conn, -1, 1).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Persistence);
    }

    #[test]
    fn test_fetch_by_foreign_key_halves() {
        let mut conn = setup_test_db();
        let (company_id, profile_id) = seed_owner_and_company(&mut conn);

        insert_employ(
            &mut conn,
            EmployInput {
                employ_company_id: company_id,
                employ_profile_id: profile_id,
            },
        )
        .expect("insert employ");

        let by_company = get_employs_by_company(&mut conn, company_id).expect("by company");
        assert_eq!(by_company.len(), 1);
        assert_eq!(by_company[0].employ_profile_id, profile_id);

        let by_profile = get_employs_by_profile(&mut conn, profile_id).expect("by profile");
        assert_eq!(by_profile.len(), 1);
        assert_eq!(by_profile[0].employ_company_id, company_id);

        // Well-formed keys that match nothing return empty collections.
        assert!(get_employs_by_company(&mut conn, 9999).expect("by company").is_empty());
    }
}
