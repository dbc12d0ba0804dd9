use chrono::NaiveTime;
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ApiError;
use crate::schema::schedule;
use crate::validate;

/// A recurring weekly serving slot for a company's truck.
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, Serialize, TS)]
#[diesel(belongs_to(crate::models::company::Company, foreign_key = schedule_company_id))]
#[diesel(table_name = schedule)]
#[diesel(primary_key(schedule_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct Schedule {
    pub schedule_id: i32,
    pub schedule_company_id: i32, // Foreign key to Company
    pub schedule_day_of_week: String,
    #[ts(type = "string")]
    pub schedule_start_time: NaiveTime,
    #[ts(type = "string")]
    pub schedule_end_time: NaiveTime,
    pub schedule_location_name: String,
    pub schedule_location_address: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = schedule)]
pub struct NewSchedule {
    pub schedule_company_id: i32,
    pub schedule_day_of_week: String,
    pub schedule_start_time: NaiveTime,
    pub schedule_end_time: NaiveTime,
    pub schedule_location_name: String,
    pub schedule_location_address: String,
}

/// Raw schedule attributes; times arrive as `HH:MM` strings from the form.
#[derive(Deserialize, Serialize, Debug, Clone, TS)]
#[ts(export)]
pub struct ScheduleInput {
    pub schedule_company_id: i32,
    pub schedule_day_of_week: String,
    pub schedule_start_time: String,
    pub schedule_end_time: String,
    pub schedule_location_name: String,
    pub schedule_location_address: String,
}

impl ScheduleInput {
    pub fn validated(self) -> Result<NewSchedule, ApiError> {
        Ok(NewSchedule {
            schedule_company_id: validate::key("schedule_company_id", self.schedule_company_id)?,
            schedule_day_of_week: validate::day_of_week(&self.schedule_day_of_week)?,
            schedule_start_time: validate::time_of_day(
                "schedule_start_time",
                &self.schedule_start_time,
            )?,
            schedule_end_time: validate::time_of_day(
                "schedule_end_time",
                &self.schedule_end_time,
            )?,
            schedule_location_name: validate::text(
                "schedule_location_name",
                &self.schedule_location_name,
                128,
            )?,
            schedule_location_address: validate::text(
                "schedule_location_address",
                &self.schedule_location_address,
                512,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    pub fn valid_input(company_id: i32) -> ScheduleInput {
        ScheduleInput {
            schedule_company_id: company_id,
            schedule_day_of_week: "Monday".to_string(),
            schedule_start_time: "10:30".to_string(),
            schedule_end_time: "14:00".to_string(),
            schedule_location_name: "The Rail Yards".to_string(),
            schedule_location_address: "1312 Awesome Food Rd SW, Albuquerque NM 87121".to_string(),
        }
    }

    #[test]
    fn test_validated_parses_times() {
        let new_schedule = valid_input(1).validated().expect("valid input");
        assert_eq!(
            new_schedule.schedule_start_time,
            NaiveTime::from_hms_opt(10, 30, 0).unwrap()
        );
        assert_eq!(new_schedule.schedule_day_of_week, "Monday");
    }

    #[test]
    fn test_validated_rejects_unknown_day() {
        let mut input = valid_input(1);
        input.schedule_day_of_week = "Moonday".to_string();
        let err = input.validated().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_validated_rejects_malformed_time() {
        let mut input = valid_input(1);
        input.schedule_end_time = "26:99".to_string();
        assert!(input.validated().is_err());
    }

    #[test]
    fn test_validated_rejects_long_address() {
        let mut input = valid_input(1);
        input.schedule_location_address = "a".repeat(513);
        assert!(input.validated().is_err());
    }
}
