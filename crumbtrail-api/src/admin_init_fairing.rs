use diesel::prelude::*;
use dotenvy::dotenv;
use rocket::Rocket;
use rocket::fairing::AdHoc;

use crate::models::ProfileInput;
use crate::orm::DbConn;
use crate::orm::login::{
    generate_access_token, generate_activation_token, generate_salt, hash_password,
};
use crate::orm::profile::{get_profile_by_email, insert_profile};

/// Add the bootstrap admin profile if needed.
///
/// Set the default admin email/pass based on envars CRUMBTRAIL_DEFAULT_EMAIL
/// and CRUMBTRAIL_DEFAULT_PASSWORD
pub fn admin_init_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Admin Profile Initialization", |rocket| async {
        dotenv().ok();

        let conn = match get_db_connection(&rocket).await {
            Some(conn) => conn,
            None => return Err(rocket),
        };

        let admin_email = get_admin_email();
        let result = conn
            .run(move |c| create_admin_profile_if_needed(c, &admin_email))
            .await;

        match result {
            Ok(()) => Ok(rocket),
            Err(e) => {
                error!("[admin-init] FATAL: Admin profile creation failed: {e}");
                Err(rocket)
            }
        }
    })
}

async fn get_db_connection(rocket: &Rocket<rocket::Build>) -> Option<DbConn> {
    match DbConn::get_one(rocket).await {
        Some(conn) => Some(conn),
        None => {
            error!("[admin-init] ERROR: Could not get DB connection.");
            None
        }
    }
}

fn get_admin_email() -> String {
    std::env::var("CRUMBTRAIL_DEFAULT_EMAIL")
        .unwrap_or_else(|_| "admin@crumbtrail.local".to_string())
}

fn get_admin_password() -> String {
    std::env::var("CRUMBTRAIL_DEFAULT_PASSWORD").unwrap_or_else(|_| "admin".to_string())
}

fn create_admin_profile_if_needed(
    c: &mut SqliteConnection,
    admin_email: &str,
) -> Result<(), crate::error::ApiError> {
    if get_profile_by_email(c, admin_email)?.is_some() {
        info!("[admin-init] Admin profile '{}' already exists", admin_email);
        return Ok(());
    }

    let salt = generate_salt();
    let hash = hash_password(&get_admin_password(), &salt);

    insert_profile(
        c,
        ProfileInput {
            profile_name: "CrumbTrail Admin".to_string(),
            profile_email: admin_email.to_string(),
            profile_phone: "0000000000".to_string(),
            profile_access_token: generate_access_token(),
            profile_activation_token: generate_activation_token(),
            profile_type: "a".to_string(),
            profile_salt: salt,
            profile_hash: hash,
        },
    )?;

    info!("[admin-init] Created admin profile '{}'", admin_email);
    Ok(())
}
