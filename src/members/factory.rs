use crate::core::repository::RepositoryStore;
use crate::members::domain::model::{MemberEntity, SessionEntity};
use crate::members::repository::{MemberRepository, SessionRepository};
use crate::members::repository::ddb_member_repository::DDBMemberRepository;
use crate::members::repository::ddb_session_repository::DDBSessionRepository;
use crate::utils::ddb::{build_db_client, create_table};
use crate::utils::memdb::MemRepository;

pub(crate) async fn create_member_repository(store: RepositoryStore) -> Box<dyn MemberRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBMemberRepository::new(client, "members", "members_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "members", "member_id", "member_role", "username").await;
            Box::new(DDBMemberRepository::new(client, "members", "members_ndx"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemRepository::<MemberEntity>::new("members", "member_id", "member_role", "username", None))
        }
    }
}

pub(crate) async fn create_session_repository(store: RepositoryStore) -> Box<dyn SessionRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBSessionRepository::new(client, "sessions", "sessions_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "sessions", "session_id", "member_id", "expires_at").await;
            Box::new(DDBSessionRepository::new(client, "sessions", "sessions_ndx"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemRepository::<SessionEntity>::new("sessions", "session_id", "member_id", "expires_at", None))
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::library::Role;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::members::domain::model::MemberEntity;
    use crate::members::factory::create_member_repository;
    use crate::members::repository::MemberRepository;

    #[tokio::test]
    async fn test_should_find_members_by_username_and_email() {
        let repo = create_member_repository(RepositoryStore::InMemory).await;
        let username = Uuid::new_v4().to_string();
        let email = format!("{}@uni.edu", username);
        let member = MemberEntity::new(Role::Librarian, username.as_str(), "Grace", email.as_str(), "hash");
        repo.create(&member).await.expect("should create member");
        let by_name = repo.find_by_username(Role::Librarian, username.as_str()).await.expect("should query");
        assert_eq!(Some(member.member_id.to_string()), by_name.map(|m| m.member_id));
        let by_email = repo.find_by_email(Role::Librarian, email.to_uppercase().as_str()).await.expect("should query");
        assert_eq!(Some(member.member_id.to_string()), by_email.map(|m| m.member_id));
        assert_eq!(None, repo.find_by_username(Role::Student, username.as_str()).await.expect("should query"));
    }
}
