use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ApiError;
use crate::schema::employ;
use crate::validate;

/// The employment relation between a company and a profile. A weak entity:
/// its identity is the (company, profile) pair, and the store's composite
/// primary key is the uniqueness authority.
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, Serialize, TS)]
#[diesel(belongs_to(crate::models::company::Company, foreign_key = employ_company_id))]
#[diesel(belongs_to(crate::models::profile::Profile, foreign_key = employ_profile_id))]
#[diesel(table_name = employ)]
#[diesel(primary_key(employ_company_id, employ_profile_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct Employ {
    pub employ_company_id: i32,
    pub employ_profile_id: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = employ)]
pub struct NewEmploy {
    pub employ_company_id: i32,
    pub employ_profile_id: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone, TS)]
#[ts(export)]
pub struct EmployInput {
    pub employ_company_id: i32,
    pub employ_profile_id: i32,
}

impl EmployInput {
    /// Both halves of the pair must name persisted rows; an absent half is a
    /// persistence-contract violation, not a field-validation failure.
    pub fn validated(self) -> Result<NewEmploy, ApiError> {
        Ok(NewEmploy {
            employ_company_id: validate::key("employ_company_id", self.employ_company_id)?,
            employ_profile_id: validate::key("employ_profile_id", self.employ_profile_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_validated_accepts_positive_pair() {
        let new_employ = EmployInput {
            employ_company_id: 3,
            employ_profile_id: 7,
        }
        .validated()
        .expect("valid pair");
        assert_eq!(new_employ.employ_company_id, 3);
        assert_eq!(new_employ.employ_profile_id, 7);
    }

    #[test]
    fn test_validated_rejects_either_half_missing() {
        let err = EmployInput {
            employ_company_id: 0,
            employ_profile_id: 7,
        }
        .validated()
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Persistence);

        let err = EmployInput {
            employ_company_id: 3,
            employ_profile_id: -1,
        }
        .validated()
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Persistence);
    }
}
