//! Test scaffolding: in-memory databases, a synchronous stand-in for the
//! pooled connection, and a fully-wired Rocket instance seeded with a known
//! cast of profiles and companies.

use diesel::sqlite::SqliteConnection;
use rocket::figment::{
    util::map,
    value::{Map, Value},
};
use rocket::{Build, Rocket, fairing::AdHoc};
use rocket_sync_db_pools::diesel;

use super::db::{DbConn, run_pending_migrations, set_foreign_keys};
use crate::admin_init_fairing::admin_init_fairing;
use crate::error::ApiError;
use crate::models::{CompanyInput, EmployInput, ImageInput, ProfileInput, ScheduleInput};
use crate::orm::company::insert_company;
use crate::orm::employ::insert_employ;
use crate::orm::image::insert_image;
use crate::orm::login::{
    generate_access_token, generate_activation_token, generate_salt, hash_password,
};
use crate::orm::profile::{get_profile_by_email, insert_profile};
use crate::orm::schedule::insert_schedule;

pub const TEST_OWNER_EMAIL: &str = "owner@crumbtrail.test";
pub const TEST_OWNER_PASSWORD: &str = "tacos123";
pub const TEST_EMPLOYEE_EMAIL: &str = "employee@crumbtrail.test";
pub const TEST_EMPLOYEE_PASSWORD: &str = "crumbs456";
/// Activation token seeded on the unapproved test company.
pub const TEST_ACTIVATION_TOKEN: &str = "0123456789abcdef0123456789abcdef";
/// The bootstrap admin created by the admin-init fairing defaults.
pub const TEST_ADMIN_EMAIL: &str = "admin@crumbtrail.local";
pub const TEST_ADMIN_PASSWORD: &str = "admin";

/// Configures SQLite with performance-optimized settings for testing.
///
/// These settings make SQLite faster but less durable - only use for testing.
fn set_sqlite_test_pragmas(conn: &mut diesel::SqliteConnection) {
    use diesel::connection::SimpleConnection;
    conn.batch_execute(
        r#"
        PRAGMA synchronous = OFF;
        PRAGMA journal_mode = OFF;
        "#,
    )
    .expect("Failed to set SQLite PRAGMAs");
}

fn set_sqlite_test_pragmas_fairing() -> AdHoc {
    AdHoc::on_ignite("Set SQLite Test Pragmas", |rocket| async {
        let conn = DbConn::get_one(&rocket)
            .await
            .expect("database connection for migration");
        conn.run(|c| {
            set_sqlite_test_pragmas(c);
        })
        .await;
        rocket
    })
}

/// Creates a Rocket fairing that seeds the standard test cast.
fn test_data_init_fairing() -> AdHoc {
    AdHoc::on_ignite("Test Data Initialization", |rocket| async {
        let conn = DbConn::get_one(&rocket)
            .await
            .expect("database connection for test data initialization");

        conn.run(|c| {
            if let Err(e) = create_test_data(c) {
                eprintln!("[test-data-init] ERROR: Failed to create test data: {e}");
            }
        })
        .await;

        rocket
    })
}

fn create_test_profile(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
    password: &str,
    profile_type: &str,
) -> Result<crate::models::Profile, ApiError> {
    if let Some(existing) = get_profile_by_email(conn, email)? {
        return Ok(existing);
    }
    let salt = generate_salt();
    let hash = hash_password(password, &salt);
    insert_profile(
        conn,
        ProfileInput {
            profile_name: name.to_string(),
            profile_email: email.to_string(),
            profile_phone: "5055551234".to_string(),
            profile_access_token: generate_access_token(),
            profile_activation_token: generate_activation_token(),
            profile_type: profile_type.to_string(),
            profile_salt: salt,
            profile_hash: hash,
        },
    )
}

/// Creates the standard cast: an owner with one approved and one pending
/// company, an employee on the approved company, and a schedule plus an
/// image for the approved company. Idempotent across fairing reruns.
fn create_test_data(conn: &mut SqliteConnection) -> Result<(), ApiError> {
    let owner = create_test_profile(
        conn,
        "Terry Taco",
        TEST_OWNER_EMAIL,
        TEST_OWNER_PASSWORD,
        "o",
    )?;
    let employee = create_test_profile(
        conn,
        "Eddie Employee",
        TEST_EMPLOYEE_EMAIL,
        TEST_EMPLOYEE_PASSWORD,
        "e",
    )?;

    let existing = crate::orm::company::get_companies_by_profile(conn, owner.profile_id)?;
    if !existing.is_empty() {
        return Ok(());
    }

    let tacos = insert_company(
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
            company_description: Some("We are a taco truck".to_string()),
            company_menu_text: Some("Tacos, tortillas, burritos".to_string()),
            company_activation_token: Some(generate_activation_token()),
        },
    )?;
    // Approve the primary test company directly through its token.
    let tacos = crate::orm::company::activate_company(
        conn,
        tacos
            .company_activation_token
            .as_deref()
            .expect("fresh company carries a token"),
    )?;

    insert_company(
        conn,
        CompanyInput {
            company_profile_id: owner.profile_id,
            company_name: "Truckina's Crepes".to_string(),
            company_email: "truckina@trucks.com".to_string(),
            company_phone: "5052345666".to_string(),
            company_permit: "45678".to_string(),
            company_license: "4567".to_string(),
            company_attn: "attn: MRS Crepe".to_string(),
            company_street1: "456 Crepe Street".to_string(),
            company_street2: None,
            company_city: "Albuquerque".to_string(),
            company_state: "NM".to_string(),
            company_zip: "45678".to_string(),
            company_description: Some("We sell crepes".to_string()),
            company_menu_text: None,
            company_activation_token: Some(TEST_ACTIVATION_TOKEN.to_string()),
        },
    )?;

    insert_employ(
        conn,
        EmployInput {
            employ_company_id: tacos.company_id,
            employ_profile_id: owner.profile_id,
        },
    )?;
    insert_employ(
        conn,
        EmployInput {
            employ_company_id: tacos.company_id,
            employ_profile_id: employee.profile_id,
        },
    )?;

    insert_schedule(
        conn,
        ScheduleInput {
            schedule_company_id: tacos.company_id,
            schedule_day_of_week: "Monday".to_string(),
            schedule_start_time: "10:30".to_string(),
            schedule_end_time: "14:00".to_string(),
            schedule_location_name: "The Rail Yards".to_string(),
            schedule_location_address: "1312 Awesome Food Rd SW, Albuquerque NM 87121".to_string(),
        },
    )?;
    insert_image(
        conn,
        ImageInput {
            image_company_id: tacos.company_id,
            image_file_type: "image/jpg".to_string(),
            image_file_name: "terrys-tacos-truck".to_string(),
        },
    )?;

    Ok(())
}

/// Creates and configures a Rocket instance for testing with an in-memory
/// SQLite database.
///
/// The returned Rocket instance will have:
/// - An in-memory SQLite database configured
/// - Database connection pool attached
/// - Foreign keys enabled
/// - Testing pragmas set
/// - All migrations run
/// - Admin initialization completed
/// - The standard test cast seeded
/// - All API routes mounted
pub fn test_rocket() -> Rocket<Build> {
    use uuid::Uuid;

    // Unique shared in-memory DB per test instance
    let unique_db_name = format!("file:test_db_{}?mode=memory&cache=shared", Uuid::new_v4());

    let db_config: Map<_, Value> = map! {
        "url" => unique_db_name.into(),
        "pool_size" => 5.into(),
        "timeout" => 5.into(),
    };

    let databases = map!["crumbtrail_db" => db_config];

    let figment = rocket::Config::figment().merge(("databases", databases));

    let rocket = rocket::custom(figment)
        .attach(DbConn::fairing())
        .attach(super::db::set_foreign_keys_fairing())
        .attach(set_sqlite_test_pragmas_fairing())
        .attach(super::db::run_migrations_fairing())
        .attach(admin_init_fairing())
        .attach(test_data_init_fairing());

    crate::mount_api_routes(crate::register_catchers(rocket))
}

/// Creates a synchronous in-memory SQLite database connection for unit
/// tests, with migrations run and foreign keys enabled.
///
/// Each call returns a new, independent in-memory database.
pub fn setup_test_db() -> SqliteConnection {
    use diesel::Connection;

    let mut conn = SqliteConnection::establish(":memory:")
        .expect("Failed to create in-memory SQLite database");
    set_foreign_keys(&mut conn);
    run_pending_migrations(&mut conn);
    conn
}

/// A minimal async-compatible wrapper for a synchronous SQLite connection.
///
/// Mimics the Rocket-style `.run()` interface so functions written against
/// [`crate::orm::login::DbRunner`] can be exercised in unit tests without a
/// live pool.
pub struct FakeDbConn<'a>(pub &'a mut diesel::SqliteConnection);

impl<'a> FakeDbConn<'a> {
    /// Executes a closure with a mutable reference to the underlying SQLite
    /// connection.
    ///
    /// # Safety
    /// Converts an immutable reference to mutable, which is sound here
    /// because tests hold exclusive access to the wrapped connection.
    pub async fn run<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut diesel::SqliteConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        unsafe {
            let conn_ptr =
                self.0 as *const diesel::SqliteConnection as *mut diesel::SqliteConnection;
            f(&mut *conn_ptr)
        }
    }
}

/// Creates a `FakeDbConn` for async-style testing with the given connection.
pub fn setup_test_dbconn<'a>(conn: &'a mut diesel::SqliteConnection) -> FakeDbConn<'a> {
    FakeDbConn(conn)
}
