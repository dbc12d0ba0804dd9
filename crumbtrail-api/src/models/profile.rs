use diesel::{Identifiable, Insertable, Queryable, QueryableByName, Selectable};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ApiError;
use crate::schema::profile;
use crate::validate;

/// A persisted profile row. The key is assigned by the store and immutable.
///
/// Credential and token fields never leave the process: they are skipped by
/// serialization, so no endpoint can leak them.
#[derive(Queryable, Selectable, Identifiable, QueryableByName, Debug, Clone, Serialize, TS)]
#[diesel(table_name = profile)]
#[diesel(primary_key(profile_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct Profile {
    pub profile_id: i32,
    pub profile_name: String,
    pub profile_email: String,
    pub profile_phone: String,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub profile_access_token: String,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub profile_activation_token: String,
    pub profile_type: String,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub profile_salt: String,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub profile_hash: String,
}

/// A validated, not-yet-persisted profile. Only obtainable through
/// [`ProfileInput::validated`].
#[derive(Insertable, Debug)]
#[diesel(table_name = profile)]
pub struct NewProfile {
    pub profile_name: String,
    pub profile_email: String,
    pub profile_phone: String,
    pub profile_access_token: String,
    pub profile_activation_token: String,
    pub profile_type: String,
    pub profile_salt: String,
    pub profile_hash: String,
}

/// Raw profile attributes as supplied by a caller.
#[derive(Deserialize, Serialize, Debug, Clone, TS)]
#[ts(export)]
pub struct ProfileInput {
    pub profile_name: String,
    pub profile_email: String,
    pub profile_phone: String,
    pub profile_access_token: String,
    pub profile_activation_token: String,
    pub profile_type: String,
    pub profile_salt: String,
    pub profile_hash: String,
}

impl ProfileInput {
    /// Routes every field through its validator. Fails atomically on the
    /// first violation; no partial record is produced.
    pub fn validated(self) -> Result<NewProfile, ApiError> {
        Ok(NewProfile {
            profile_name: validate::text("profile_name", &self.profile_name, 128)?,
            profile_email: validate::email("profile_email", &self.profile_email)?,
            profile_phone: validate::phone("profile_phone", &self.profile_phone)?,
            profile_access_token: validate::token(
                "profile_access_token",
                &self.profile_access_token,
                64,
            )?,
            profile_activation_token: validate::token(
                "profile_activation_token",
                &self.profile_activation_token,
                32,
            )?,
            profile_type: validate::profile_type(&self.profile_type)?,
            profile_salt: validate::exact("profile_salt", &self.profile_salt, 64)?,
            profile_hash: validate::exact("profile_hash", &self.profile_hash, 128)?,
        })
    }
}

/// The mutable surface of a profile: everything a PUT may change.
#[derive(Deserialize, Serialize, Debug, Clone, TS)]
#[ts(export)]
pub struct ProfileUpdate {
    pub profile_name: String,
    pub profile_email: String,
    pub profile_phone: String,
    pub profile_type: String,
}

/// The validated counterpart of [`ProfileUpdate`].
#[derive(Debug)]
pub struct ProfileChanges {
    pub profile_name: String,
    pub profile_email: String,
    pub profile_phone: String,
    pub profile_type: String,
}

impl ProfileUpdate {
    pub fn validated(self) -> Result<ProfileChanges, ApiError> {
        Ok(ProfileChanges {
            profile_name: validate::text("profile_name", &self.profile_name, 128)?,
            profile_email: validate::email("profile_email", &self.profile_email)?,
            profile_phone: validate::phone("profile_phone", &self.profile_phone)?,
            profile_type: validate::profile_type(&self.profile_type)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn valid_input() -> ProfileInput {
        ProfileInput {
            profile_name: "Loren".to_string(),
            profile_email: "loren@x.com".to_string(),
            profile_phone: "5055551234".to_string(),
            profile_access_token: "4".repeat(64),
            profile_activation_token: "2".repeat(32),
            profile_type: "o".to_string(),
            profile_salt: "a".repeat(64),
            profile_hash: "b".repeat(128),
        }
    }

    #[test]
    fn test_validated_passes_clean_input() {
        let new_profile = valid_input().validated().expect("valid input");
        assert_eq!(new_profile.profile_name, "Loren");
        assert_eq!(new_profile.profile_type, "o");
    }

    #[test]
    fn test_validated_rejects_long_name() {
        let mut input = valid_input();
        input.profile_name = "x".repeat(129);
        let err = input.validated().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("profile_name"));
    }

    #[test]
    fn test_validated_rejects_whitespace_only_name() {
        let mut input = valid_input();
        input.profile_name = "   ".to_string();
        let err = input.validated().unwrap_err();
        assert!(err.message.contains("required"));
    }

    #[test]
    fn test_validated_rejects_wrong_salt_length() {
        let mut input = valid_input();
        input.profile_salt = "a".repeat(63);
        assert!(input.validated().is_err());
    }

    #[test]
    fn test_serialization_excludes_secrets() {
        let profile = Profile {
            profile_id: 1,
            profile_name: "Loren".to_string(),
            profile_email: "loren@x.com".to_string(),
            profile_phone: "5055551234".to_string(),
            profile_access_token: "4".repeat(64),
            profile_activation_token: "2".repeat(32),
            profile_type: "o".to_string(),
            profile_salt: "a".repeat(64),
            profile_hash: "b".repeat(128),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["profile_name"], "Loren");
        assert!(json.get("profile_hash").is_none());
        assert!(json.get("profile_salt").is_none());
        assert!(json.get("profile_access_token").is_none());
        assert!(json.get("profile_activation_token").is_none());
    }
}
