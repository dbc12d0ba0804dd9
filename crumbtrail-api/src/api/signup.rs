//! The sign-up flow: one request creates an owner profile, their company,
//! and the employment between them.

use rocket::Route;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use diesel::Connection;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::models::{CompanyInput, EmployInput, Profile, ProfileInput};
use crate::orm::DbConn;
use crate::orm::company::insert_company;
use crate::orm::employ::insert_employ;
use crate::orm::login::{
    generate_access_token, generate_activation_token, generate_salt, hash_password,
};
use crate::orm::profile::{get_profile_by_email, insert_profile};

/// The combined sign-up payload: the applicant and their food truck company.
#[derive(Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct SignupRequest {
    pub profile_name: String,
    pub profile_email: String,
    pub profile_phone: String,
    pub profile_password: String,
    pub profile_password_confirm: String,
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

/// Sign Up endpoint.
///
/// - **URL:** `/api/1/signup`
/// - **Method:** `POST`
/// - **Purpose:** Creates an owner profile, their company (pending
///   approval), and the employment pair between them
/// - **Authentication:** None required
///
/// The three inserts run inside one transaction: a failure in any of them
/// leaves no orphan rows behind. The company enters the system unapproved
/// and holds an activation token; approval is a separate step.
#[post("/1/signup", data = "<signup>")]
pub async fn sign_up(
    db: DbConn,
    signup: Json<SignupRequest>,
) -> Result<Json<Envelope<Profile>>, ApiError> {
    let req = signup.into_inner();

    let profile = db
        .run(move |conn| {
            if req.profile_password.trim().is_empty() {
                return Err(ApiError::validation("a password is required"));
            }
            if req.profile_password != req.profile_password_confirm {
                return Err(ApiError::validation("the passwords do not match"));
            }
            if get_profile_by_email(conn, req.profile_email.trim())?.is_some() {
                return Err(ApiError::validation("this email already has an account"));
            }

            let salt = generate_salt();
            let hash = hash_password(&req.profile_password, &salt);

            conn.transaction::<Profile, ApiError, _>(|conn| {
                let profile = insert_profile(
                    conn,
                    ProfileInput {
                        profile_name: req.profile_name,
                        profile_email: req.profile_email,
                        profile_phone: req.profile_phone,
                        profile_access_token: generate_access_token(),
                        profile_activation_token: generate_activation_token(),
                        // Anyone signing up through this route is an owner.
                        profile_type: "o".to_string(),
                        profile_salt: salt,
                        profile_hash: hash,
                    },
                )?;

                let company = insert_company(
                    conn,
                    CompanyInput {
                        company_profile_id: profile.profile_id,
                        company_name: req.company_name,
                        company_email: req.company_email,
                        company_phone: req.company_phone,
                        company_permit: req.company_permit,
                        company_license: req.company_license,
                        company_attn: req.company_attn,
                        company_street1: req.company_street1,
                        company_street2: req.company_street2,
                        company_city: req.company_city,
                        company_state: req.company_state,
                        company_zip: req.company_zip,
                        company_description: req.company_description,
                        company_menu_text: req.company_menu_text,
                        company_activation_token: Some(generate_activation_token()),
                    },
                )?;

                insert_employ(
                    conn,
                    EmployInput {
                        employ_company_id: company.company_id,
                        employ_profile_id: profile.profile_id,
                    },
                )?;

                Ok(profile)
            })
        })
        .await?;

    Ok(Json(Envelope::with_message(
        profile,
        "In the next 48 hours you will receive your approval notice from CrumbTrail. \
         Check your email to activate your account",
    )))
}

pub fn routes() -> Vec<Route> {
    routes![sign_up]
}
