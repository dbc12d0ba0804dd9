//! Session-based authentication and anti-forgery guards for Rocket routes.
//!
//! Caller identity is always an explicit guard parameter on the route; the
//! entity and persistence layers never see ambient session state.
//!
//! # Basic Authentication
//!
//! ```rust
//! use rocket::get;
//! use crumbtrail_api::session_guards::AuthenticatedProfile;
//!
//! #[get("/whoami")]
//! fn whoami(caller: AuthenticatedProfile) -> String {
//!     format!("Hello, {}!", caller.profile.profile_name)
//! }
//! ```
//!
//! # Capability checks
//!
//! `AuthenticatedProfile::can_act_for` implements the ownership rule used
//! across the API: a caller may act on a resource owned by a profile when it
//! is that profile, or when it is an admin (`profile_type == "a"`).

use chrono::Utc;
use diesel::prelude::*;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest, Request};

use crate::models::{Profile, Session};
use crate::orm::DbConn;
use crate::orm::login::{SESSION_COOKIE, XSRF_COOKIE};
use crate::schema::{profile, session};

/// A request guard for routes that require an authenticated caller.
///
/// Validates the session cookie against the session table (present, not
/// revoked, not expired) and loads the owning profile. Fails the request
/// with 401 when any step does not hold.
#[derive(Debug)]
pub struct AuthenticatedProfile {
    /// The authenticated profile from the database
    pub profile: Profile,
}

impl AuthenticatedProfile {
    pub fn is_admin(&self) -> bool {
        self.profile.profile_type == "a"
    }

    /// The ownership rule: the caller is the named profile, or an admin.
    pub fn can_act_for(&self, profile_id: i32) -> bool {
        self.is_admin() || self.profile.profile_id == profile_id
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedProfile {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let cookies = request.cookies();
        let db = match request.guard::<DbConn>().await {
            Outcome::Success(db) => db,
            _ => return Outcome::Error((Status::InternalServerError, ())),
        };

        let session_cookie = match cookies.get(SESSION_COOKIE) {
            Some(cookie) => cookie,
            None => return Outcome::Error((Status::Unauthorized, ())),
        };

        let token = session_cookie.value().to_string();

        let session_result = db
            .run(move |conn| {
                session::table
                    .filter(session::session_id.eq(&token))
                    .filter(session::session_revoked.eq(false))
                    .filter(
                        session::session_expires_at
                            .is_null()
                            .or(session::session_expires_at.gt(Utc::now().naive_utc())),
                    )
                    .first::<Session>(conn)
                    .optional()
            })
            .await;

        let live_session = match session_result {
            Ok(Some(sess)) => sess,
            Ok(None) => return Outcome::Error((Status::Unauthorized, ())),
            Err(e) => {
                error!("Database error finding session: {:?}", e);
                return Outcome::Error((Status::Unauthorized, ()));
            }
        };

        let profile_result = db
            .run(move |conn| {
                profile::table
                    .filter(profile::profile_id.eq(live_session.session_profile_id))
                    .first::<Profile>(conn)
                    .optional()
            })
            .await;

        match profile_result {
            Ok(Some(found)) => Outcome::Success(AuthenticatedProfile { profile: found }),
            Ok(None) => Outcome::Error((Status::Unauthorized, ())),
            Err(e) => {
                error!("Database error finding profile: {:?}", e);
                Outcome::Error((Status::Unauthorized, ()))
            }
        }
    }
}

/// A request guard that additionally requires the admin profile type.
#[derive(Debug)]
pub struct AdminProfile {
    pub profile: Profile,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminProfile {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let caller = match AuthenticatedProfile::from_request(request).await {
            Outcome::Success(caller) => caller,
            Outcome::Error(e) => return Outcome::Error(e),
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        if caller.is_admin() {
            Outcome::Success(AdminProfile {
                profile: caller.profile,
            })
        } else {
            Outcome::Error((Status::Forbidden, ()))
        }
    }
}

/// The anti-forgery guard for mutating requests: the `X-XSRF-TOKEN` header
/// must match the `XSRF-TOKEN` cookie issued at login (double-submit).
#[derive(Debug)]
pub struct XsrfGuard;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for XsrfGuard {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let cookie_value = match request.cookies().get(XSRF_COOKIE) {
            Some(cookie) => cookie.value().to_string(),
            None => return Outcome::Error((Status::Forbidden, ())),
        };

        match request.headers().get_one("X-XSRF-TOKEN") {
            Some(header) if header == cookie_value => Outcome::Success(XsrfGuard),
            _ => Outcome::Error((Status::Forbidden, ())),
        }
    }
}
