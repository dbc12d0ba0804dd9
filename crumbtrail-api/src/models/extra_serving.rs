use chrono::NaiveDateTime;
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ApiError;
use crate::schema::extra_serving;
use crate::validate;

/// A one-off serving event outside a company's weekly schedule.
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, Serialize, TS)]
#[diesel(belongs_to(crate::models::company::Company, foreign_key = extra_serving_company_id))]
#[diesel(table_name = extra_serving)]
#[diesel(primary_key(extra_serving_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct ExtraServing {
    pub extra_serving_id: i32,
    pub extra_serving_company_id: i32, // Foreign key to Company
    pub extra_serving_description: String,
    pub extra_serving_location: String,
    #[ts(type = "string")]
    pub extra_serving_start_time: NaiveDateTime,
    #[ts(type = "string")]
    pub extra_serving_end_time: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = extra_serving)]
pub struct NewExtraServing {
    pub extra_serving_company_id: i32,
    pub extra_serving_description: String,
    pub extra_serving_location: String,
    pub extra_serving_start_time: NaiveDateTime,
    pub extra_serving_end_time: NaiveDateTime,
}

#[derive(Deserialize, Serialize, Debug, Clone, TS)]
#[ts(export)]
pub struct ExtraServingInput {
    pub extra_serving_company_id: i32,
    pub extra_serving_description: String,
    pub extra_serving_location: String,
    #[ts(type = "string")]
    pub extra_serving_start_time: NaiveDateTime,
    #[ts(type = "string")]
    pub extra_serving_end_time: NaiveDateTime,
}

impl ExtraServingInput {
    pub fn validated(self) -> Result<NewExtraServing, ApiError> {
        Ok(NewExtraServing {
            extra_serving_company_id: validate::key(
                "extra_serving_company_id",
                self.extra_serving_company_id,
            )?,
            extra_serving_description: validate::text(
                "extra_serving_description",
                &self.extra_serving_description,
                4096,
            )?,
            extra_serving_location: validate::text(
                "extra_serving_location",
                &self.extra_serving_location,
                512,
            )?,
            extra_serving_start_time: self.extra_serving_start_time,
            extra_serving_end_time: self.extra_serving_end_time,
        })
    }
}
