use chrono::NaiveDateTime;
use diesel::{Identifiable, Insertable, Queryable};

use crate::schema::session;

#[derive(Queryable, Identifiable, Debug)]
#[diesel(table_name = session)]
#[diesel(primary_key(session_id))]
pub struct Session {
    pub session_id: String, // Opaque session token (UUID)
    pub session_profile_id: i32,
    pub session_created_at: NaiveDateTime,
    pub session_expires_at: Option<NaiveDateTime>,
    pub session_revoked: bool,
}

#[derive(Insertable)]
#[diesel(table_name = session)]
pub struct NewSession {
    pub session_id: String,
    pub session_profile_id: i32,
    pub session_created_at: NaiveDateTime,
    pub session_expires_at: Option<NaiveDateTime>,
    pub session_revoked: bool,
}
