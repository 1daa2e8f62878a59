pub(crate) mod ddb_member_repository;
pub(crate) mod ddb_session_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::core::library::{LibraryResult, Role};
use crate::core::repository::{query_all, Repository};
use crate::members::domain::model::{MemberEntity, SessionEntity};
use crate::utils::date::format_date;
use crate::utils::memdb::MemRepository;

#[async_trait]
pub(crate) trait MemberRepository: Repository<MemberEntity> {
    async fn find_by_username(&self, role: Role, username: &str) -> LibraryResult<Option<MemberEntity>> {
        let predicate = HashMap::from([
            ("member_role".to_string(), role.to_string()),
            ("username".to_string(), username.trim().to_string()),
        ]);
        let res = self.query(&predicate, None, 2).await?;
        Ok(res.records.into_iter().next())
    }

    async fn find_by_email(&self, role: Role, email: &str) -> LibraryResult<Option<MemberEntity>> {
        let predicate = HashMap::from([
            ("member_role".to_string(), role.to_string()),
            ("email".to_string(), email.trim().to_lowercase()),
        ]);
        Ok(query_all(self, &predicate).await?.into_iter().next())
    }
}

#[async_trait]
pub(crate) trait SessionRepository: Repository<SessionEntity> {
    // removes sessions of the member that expired before `now`
    async fn purge_expired(&self, member_id: &str, now: NaiveDateTime) -> LibraryResult<usize> {
        let predicate = HashMap::from([
            ("member_id".to_string(), member_id.to_string()),
            ("expires_at:<=".to_string(), format_date(now)),
        ]);
        let mut removed = 0;
        for session in query_all(self, &predicate).await? {
            removed += self.delete(session.session_id.as_str()).await?;
        }
        Ok(removed)
    }
}

impl MemberRepository for MemRepository<MemberEntity> {}

impl SessionRepository for MemRepository<SessionEntity> {}
