use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::accounts::domain::Member;
use crate::core::domain::Identifiable;
use crate::core::library::Role;
use crate::members::domain::model::{MemberEntity, SessionEntity};
use crate::utils::date::serializer;

// MemberDto is the public view of an account, it never carries the password hash.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MemberDto {
    pub member_id: String,
    pub version: i64,
    pub member_role: Role,
    pub username: String,
    pub full_name: String,
    pub email: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl Identifiable for MemberDto {
    fn id(&self) -> String {
        self.member_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Member for MemberDto {
    fn role(&self) -> Role {
        self.member_role
    }
}

impl From<&MemberEntity> for MemberDto {
    fn from(other: &MemberEntity) -> Self {
        Self {
            member_id: other.member_id.to_string(),
            version: other.version,
            member_role: other.member_role,
            username: other.username.to_string(),
            full_name: other.full_name.to_string(),
            email: other.email.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

// SessionDto is returned by login; session_id goes into the x-session-id header.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct SessionDto {
    pub session_id: String,
    pub member_id: String,
    pub member_role: Role,
    pub username: String,
    #[serde(with = "serializer")]
    pub expires_at: NaiveDateTime,
}

impl SessionDto {
    pub fn is_librarian(&self) -> bool {
        self.member_role == Role::Librarian
    }
}

impl From<&SessionEntity> for SessionDto {
    fn from(other: &SessionEntity) -> Self {
        Self {
            session_id: other.session_id.to_string(),
            member_id: other.member_id.to_string(),
            member_role: other.member_role,
            username: other.username.to_string(),
            expires_at: other.expires_at,
        }
    }
}
