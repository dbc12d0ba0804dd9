use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ApiError;
use crate::schema::image;
use crate::validate;

/// A stored reference to a company's uploaded image. The bytes live
/// elsewhere; this row records the MIME type and file name.
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, Serialize, TS)]
#[diesel(belongs_to(crate::models::company::Company, foreign_key = image_company_id))]
#[diesel(table_name = image)]
#[diesel(primary_key(image_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct Image {
    pub image_id: i32,
    pub image_company_id: i32, // Foreign key to Company
    pub image_file_type: String,
    pub image_file_name: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = image)]
pub struct NewImage {
    pub image_company_id: i32,
    pub image_file_type: String,
    pub image_file_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, TS)]
#[ts(export)]
pub struct ImageInput {
    pub image_company_id: i32,
    pub image_file_type: String,
    pub image_file_name: String,
}

impl ImageInput {
    pub fn validated(self) -> Result<NewImage, ApiError> {
        Ok(NewImage {
            image_company_id: validate::key("image_company_id", self.image_company_id)?,
            image_file_type: validate::text("image_file_type", &self.image_file_type, 64)?,
            image_file_name: validate::text("image_file_name", &self.image_file_name, 128)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_accepts_mime_type_and_name() {
        let new_image = ImageInput {
            image_company_id: 1,
            image_file_type: "image/jpg".to_string(),
            image_file_name: "TheAwesomeCuisineOrder".to_string(),
        }
        .validated()
        .expect("valid input");
        assert_eq!(new_image.image_file_type, "image/jpg");
    }

    #[test]
    fn test_validated_rejects_empty_file_name() {
        let err = ImageInput {
            image_company_id: 1,
            image_file_type: "image/jpg".to_string(),
            image_file_name: "  ".to_string(),
        }
        .validated()
        .unwrap_err();
        assert!(err.message.contains("image_file_name"));
    }
}
