use diesel::{Associations, Identifiable, Insertable, Queryable, QueryableByName, Selectable};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ApiError;
use crate::schema::company;
use crate::validate;

/// A persisted food-truck company. Owned by the profile that signed it up;
/// unapproved until an activation token round-trips.
#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Associations,
    QueryableByName,
    Debug,
    Clone,
    Serialize,
    TS,
)]
#[diesel(belongs_to(crate::models::profile::Profile, foreign_key = company_profile_id))]
#[diesel(table_name = company)]
#[diesel(primary_key(company_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct Company {
    pub company_id: i32,
    pub company_profile_id: i32, // Foreign key to Profile
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_permit: String,
    pub company_license: String,
    pub company_attn: String,
    pub company_street1: String,
    pub company_street2: Option<String>,
    pub company_city: String,
    pub company_state: String,
    pub company_zip: String,
    pub company_description: Option<String>,
    pub company_menu_text: Option<String>,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub company_activation_token: Option<String>,
    pub company_approved: bool,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = company)]
pub struct NewCompany {
    pub company_profile_id: i32,
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_permit: String,
    pub company_license: String,
    pub company_attn: String,
    pub company_street1: String,
    pub company_street2: Option<String>,
    pub company_city: String,
    pub company_state: String,
    pub company_zip: String,
    pub company_description: Option<String>,
    pub company_menu_text: Option<String>,
    pub company_activation_token: Option<String>,
    pub company_approved: bool,
}

/// Raw company attributes as supplied by a caller. Companies always enter
/// the system unapproved; approval is a separate activation step.
#[derive(Deserialize, Serialize, Debug, Clone, TS)]
#[ts(export)]
pub struct CompanyInput {
    pub company_profile_id: i32,
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_permit: String,
    pub company_license: String,
    pub company_attn: String,
    pub company_street1: String,
    pub company_street2: Option<String>,
    pub company_city: String,
    pub company_state: String,
    pub company_zip: String,
    pub company_description: Option<String>,
    pub company_menu_text: Option<String>,
    pub company_activation_token: Option<String>,
}

impl CompanyInput {
    pub fn validated(self) -> Result<NewCompany, ApiError> {
        Ok(NewCompany {
            company_profile_id: validate::key("company_profile_id", self.company_profile_id)?,
            company_name: validate::text("company_name", &self.company_name, 128)?,
            company_email: validate::email("company_email", &self.company_email)?,
            company_phone: validate::phone("company_phone", &self.company_phone)?,
            company_permit: validate::text("company_permit", &self.company_permit, 64)?,
            company_license: validate::text("company_license", &self.company_license, 64)?,
            company_attn: validate::text("company_attn", &self.company_attn, 128)?,
            company_street1: validate::text("company_street1", &self.company_street1, 128)?,
            company_street2: validate::optional_text(
                "company_street2",
                self.company_street2.as_deref(),
                128,
            )?,
            company_city: validate::text("company_city", &self.company_city, 64)?,
            company_state: validate::text("company_state", &self.company_state, 32)?,
            company_zip: validate::text("company_zip", &self.company_zip, 10)?,
            company_description: validate::optional_text(
                "company_description",
                self.company_description.as_deref(),
                4096,
            )?,
            company_menu_text: validate::optional_text(
                "company_menu_text",
                self.company_menu_text.as_deref(),
                4096,
            )?,
            company_activation_token: match self.company_activation_token.as_deref() {
                Some(token) => Some(validate::token("company_activation_token", token, 32)?),
                None => None,
            },
            company_approved: false,
        })
    }
}

/// The mutable surface of a company: contact and descriptive fields. The
/// owner, approval flag, and activation token are not client-writable.
#[derive(Deserialize, Serialize, Debug, Clone, TS)]
#[ts(export)]
pub struct CompanyUpdate {
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_permit: String,
    pub company_license: String,
    pub company_attn: String,
    pub company_street1: String,
    pub company_street2: Option<String>,
    pub company_city: String,
    pub company_state: String,
    pub company_zip: String,
    pub company_description: Option<String>,
    pub company_menu_text: Option<String>,
}

#[derive(Debug)]
pub struct CompanyChanges {
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_permit: String,
    pub company_license: String,
    pub company_attn: String,
    pub company_street1: String,
    pub company_street2: Option<String>,
    pub company_city: String,
    pub company_state: String,
    pub company_zip: String,
    pub company_description: Option<String>,
    pub company_menu_text: Option<String>,
}

impl CompanyUpdate {
    pub fn validated(self) -> Result<CompanyChanges, ApiError> {
        Ok(CompanyChanges {
            company_name: validate::text("company_name", &self.company_name, 128)?,
            company_email: validate::email("company_email", &self.company_email)?,
            company_phone: validate::phone("company_phone", &self.company_phone)?,
            company_permit: validate::text("company_permit", &self.company_permit, 64)?,
            company_license: validate::text("company_license", &self.company_license, 64)?,
            company_attn: validate::text("company_attn", &self.company_attn, 128)?,
            company_street1: validate::text("company_street1", &self.company_street1, 128)?,
            company_street2: validate::optional_text(
                "company_street2",
                self.company_street2.as_deref(),
                128,
            )?,
            company_city: validate::text("company_city", &self.company_city, 64)?,
            company_state: validate::text("company_state", &self.company_state, 32)?,
            company_zip: validate::text("company_zip", &self.company_zip, 10)?,
            company_description: validate::optional_text(
                "company_description",
                self.company_description.as_deref(),
                4096,
            )?,
            company_menu_text: validate::optional_text(
                "company_menu_text",
                self.company_menu_text.as_deref(),
                4096,
            )?,
        })
    }
}
