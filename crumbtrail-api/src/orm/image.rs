use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::error::ApiError;
use crate::models::{Image, ImageInput};
use crate::validate;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = BigInt)]
    last_insert_rowid: i64,
}

/// Validates and inserts a new image record.
pub fn insert_image(conn: &mut SqliteConnection, input: ImageInput) -> Result<Image, ApiError> {
    use crate::schema::image::dsl::*;

    let new_image = input.validated()?;

    diesel::insert_into(image).values(&new_image).execute(conn)?;

    let last_id = diesel::sql_query("SELECT last_insert_rowid() as last_insert_rowid")
        .get_result::<LastInsertRowId>(conn)?
        .last_insert_rowid;

    Ok(image.filter(image_id.eq(last_id as i32)).first::<Image>(conn)?)
}

/// Gets a single image by ID.
pub fn get_image(conn: &mut SqliteConnection, id: i32) -> Result<Option<Image>, ApiError> {
    use crate::schema::image::dsl::*;
    validate::key("image_id", id)?;
    Ok(image
        .filter(image_id.eq(id))
        .first::<Image>(conn)
        .optional()?)
}

/// Returns the images for a company, ordered by id.
pub fn get_images_by_company(
    conn: &mut SqliteConnection,
    company_id: i32,
) -> Result<Vec<Image>, ApiError> {
    use crate::schema::image::dsl::*;
    validate::key("image_company_id", company_id)?;
    Ok(image
        .filter(image_company_id.eq(company_id))
        .order(image_id.asc())
        .load::<Image>(conn)?)
}

/// Overwrites a persisted image record.
pub fn update_image(
    conn: &mut SqliteConnection,
    id: i32,
    input: ImageInput,
) -> Result<Image, ApiError> {
    use crate::schema::image::dsl::*;

    validate::key("image_id", id)?;
    let changes = input.validated()?;

    let affected = diesel::update(image.filter(image_id.eq(id)))
        .set((
            image_company_id.eq(changes.image_company_id),
            image_file_type.eq(changes.image_file_type),
            image_file_name.eq(changes.image_file_name),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(ApiError::not_found("the image does not exist"));
    }

    Ok(image.filter(image_id.eq(id)).first::<Image>(conn)?)
}

/// Deletes an image by ID. Returns whether a row was removed.
pub fn delete_image(conn: &mut SqliteConnection, id: i32) -> Result<bool, ApiError> {
    use crate::schema::image::dsl::*;
    validate::key("image_id", id)?;
    let affected = diesel::delete(image.filter(image_id.eq(id))).execute(conn)?;
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

    fn seed_company(conn: &mut SqliteConnection) -> i32 {
        let owner = insert_profile(
            conn,
            ProfileInput {
                profile_name: "Terry".to_string(),
                profile_email: "terry@tacos.com".to_string(),
                profile_phone: "5055551234".to_string(),
                profile_access_token: "4".repeat(64),
                profile_activation_token: "2".repeat(32),
                profile_type: "o".to_string(),
                profile_salt: "a".repeat(64),
                profile_hash: "b".repeat(128),
            },
        )
        .expect("insert owner");

        insert_company(
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
        .expect("insert company")
        .company_id
    }

    #[test]
    fn test_insert_and_round_trip() {
        let mut conn = setup_test_db();
        let company_id = seed_company(&mut conn);

        let inserted = insert_image(
            &mut conn,
            ImageInput {
                image_company_id: company_id,
                image_file_type: "image/jpg".to_string(),
                image_file_name: "TheAwesomeCuisineOrder".to_string(),
            },
        )
        .expect("insert");
        assert!(inserted.image_id > 0);

        let fetched = get_image(&mut conn, inserted.image_id)
            .expect("fetch")
            .expect("image should exist");
        assert_eq!(fetched.image_company_id, company_id);
        assert_eq!(fetched.image_file_type, "image/jpg");
        assert_eq!(fetched.image_file_name, "TheAwesomeCuisineOrder");
    }

    #[test]
    fn test_update_replaces_file_fields() {
        let mut conn = setup_test_db();
        let company_id = seed_company(&mut conn);
        let inserted = insert_image(
            &mut conn,
            ImageInput {
                image_company_id: company_id,
                image_file_type: "image/jpg".to_string(),
                image_file_name: "before".to_string(),
            },
        )
        .expect("insert");

        let updated = update_image(
            &mut conn,
            inserted.image_id,
            ImageInput {
                image_company_id: company_id,
                image_file_type: "image/png".to_string(),
                image_file_name: "after".to_string(),
            },
        )
        .expect("update");
        assert_eq!(updated.image_file_type, "image/png");
        assert_eq!(updated.image_file_name, "after");
    }

    #[test]
    fn test_unpersisted_key_contract() {
        let mut conn = setup_test_db();
        let err = delete_image(&mut conn, 0).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Persistence);
        assert!(get_image(&mut conn, 12345).expect("query").is_none());
    }
}
