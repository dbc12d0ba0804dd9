//! Database operations for authentication and session management.
//!
//! Covers password hashing and verification, salt and token generation,
//! session creation, and the cookie pair (session + XSRF) set on login.

use std::fmt::Write;

use argon2::Argon2;
use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::Utc;
use diesel::prelude::*;
use rand::RngCore as _;
use rocket::http::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{NewSession, Profile};
use crate::orm::DbConn;
use crate::orm::testing::FakeDbConn;
use crate::schema::session;

/// Name of the HTTP-only session cookie.
pub const SESSION_COOKIE: &str = "session";
/// Name of the readable anti-forgery cookie; clients echo its value in the
/// `X-XSRF-TOKEN` header on every mutating request.
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// Trait for abstracting database operations to support both production and
/// testing. Lets the same login workflow run against Rocket's pooled
/// `DbConn` and the synchronous test wrapper.
pub trait DbRunner {
    fn run<F, R>(&self, f: F) -> impl std::future::Future<Output = R>
    where
        F: FnOnce(&mut diesel::SqliteConnection) -> R + Send + 'static,
        R: Send + 'static;
}

impl DbRunner for DbConn {
    fn run<F, R>(&self, f: F) -> impl std::future::Future<Output = R>
    where
        F: FnOnce(&mut diesel::SqliteConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        DbConn::run(self, f)
    }
}

impl<'a> DbRunner for FakeDbConn<'a> {
    fn run<F, R>(&self, f: F) -> impl std::future::Future<Output = R>
    where
        F: FnOnce(&mut diesel::SqliteConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        FakeDbConn::run(self, f)
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}

/// Generates a fresh 64-character hex salt from the OS entropy source.
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

/// Generates a 64-character access token.
pub fn generate_access_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

/// Generates a 32-character activation token.
pub fn generate_activation_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

/// Hashes a password with Argon2 under the given hex salt, producing the
/// fixed 128-character hex hash stored on the profile.
///
/// # Panics
/// Panics if hashing fails (should not happen in normal operation).
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut out = [0u8; 64];
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut out)
        .expect("Hashing should succeed");
    hex_encode(&out)
}

/// Verifies a password against a profile's stored salt and hash.
pub fn verify_password(password: &str, profile: &Profile) -> bool {
    hash_password(password, &profile.profile_salt) == profile.profile_hash
}

/// Generates a new UUID-based session token.
fn generate_session_token() -> String {
    Uuid::new_v4().to_string()
}

/// Finds a profile by email address (case-insensitive).
pub async fn find_profile_by_email<D: DbRunner>(
    db: &D,
    email: &str,
) -> Result<Option<Profile>, ApiError> {
    let email = email.to_owned();
    db.run(move |conn| crate::orm::profile::get_profile_by_email(conn, &email))
        .await
}

/// Creates a new session row and returns its token.
pub async fn create_and_store_session<D: DbRunner>(
    db: &D,
    profile_id: i32,
) -> Result<String, ApiError> {
    let session_token = generate_session_token();
    let now = Utc::now().naive_utc();

    let new_session = NewSession {
        session_id: session_token.clone(),
        session_profile_id: profile_id,
        session_created_at: now,
        session_expires_at: None,
        session_revoked: false,
    };

    db.run(move |conn| {
        diesel::insert_into(session::table)
            .values(&new_session)
            .execute(conn)
    })
    .await?;

    Ok(session_token)
}

/// Sets the session cookie pair: the HTTP-only session token plus the
/// readable anti-forgery token clients must echo on mutating requests.
pub fn set_session_cookies(cookies: &CookieJar<'_>, session_token: &str) {
    let secure_flag = !cfg!(test);
    let session_cookie = Cookie::build((SESSION_COOKIE, session_token.to_string()))
        .http_only(true)
        .secure(secure_flag)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    cookies.add(session_cookie);

    let xsrf_cookie = Cookie::build((XSRF_COOKIE, Uuid::new_v4().to_string()))
        .http_only(false)
        .secure(secure_flag)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    cookies.add(xsrf_cookie);
}

/// Processes a complete login workflow: validates input, finds the profile,
/// verifies the password, creates a session, and sets the cookie pair.
///
/// Unknown email and wrong password produce the same generic error to
/// prevent account enumeration.
pub async fn process_login<D: DbRunner>(
    db: &D,
    cookies: &CookieJar<'_>,
    login: &crate::api::login::LoginRequest,
) -> Result<Profile, ApiError> {
    if login.email.trim().is_empty() || login.password.trim().is_empty() {
        return Err(ApiError::validation("email and password are required"));
    }

    let profile = match find_profile_by_email(db, &login.email).await? {
        Some(profile) => profile,
        None => return Err(ApiError::authorization("invalid email or password")),
    };

    if !verify_password(&login.password, &profile) {
        return Err(ApiError::authorization("invalid email or password"));
    }

    let session_token = create_and_store_session(db, profile.profile_id).await?;
    set_session_cookies(cookies, &session_token);

    Ok(profile)
}
