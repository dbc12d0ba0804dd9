//! Database operations for logout and session revocation.

use diesel::prelude::*;

use crate::{orm::DbConn, schema::session::dsl::*};

/// Revokes a session by marking it as revoked in the database.
///
/// The session row is kept (not deleted) so revocations stay auditable; the
/// token simply stops validating. Returns the number of rows affected, which
/// is 0 for an unknown token.
pub async fn revoke_session(db: &DbConn, token: &str) -> Result<usize, diesel::result::Error> {
    let token = token.to_string();
    db.run(move |conn| {
        diesel::update(session.filter(session_id.eq(&token)))
            .set(session_revoked.eq(true))
            .execute(conn)
    })
    .await
}
