use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::Role;
use crate::utils::date::serializer;

// MemberEntity is a student or librarian account. The username is the student number
// for students and the staff number for librarians.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MemberEntity {
    pub member_id: String,
    pub version: i64,
    pub member_role: Role,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MemberEntity {
    pub fn new(member_role: Role, username: &str, full_name: &str, email: &str, password_hash: &str) -> Self {
        Self {
            member_id: Uuid::new_v4().to_string(),
            version: 0,
            member_role,
            username: username.trim().to_string(),
            full_name: full_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // login accepts either the username or the email
    pub fn has_identifier(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        self.username == identifier || self.email == identifier.to_lowercase()
    }
}

impl Identifiable for MemberEntity {
    fn id(&self) -> String {
        self.member_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// SessionEntity is a login that is valid until expires_at.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct SessionEntity {
    pub session_id: String,
    pub version: i64,
    pub member_id: String,
    pub member_role: Role,
    pub username: String,
    #[serde(with = "serializer")]
    pub expires_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl SessionEntity {
    pub fn new(member: &MemberEntity, ttl_minutes: i64) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            session_id: Uuid::new_v4().to_string(),
            version: 0,
            member_id: member.member_id.to_string(),
            member_role: member.member_role,
            username: member.username.to_string(),
            expires_at: now + Duration::minutes(ttl_minutes),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires_at <= now
    }
}

impl Identifiable for SessionEntity {
    fn id(&self) -> String {
        self.session_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
