use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};
use crate::accounts::domain::AccountService;
use crate::accounts::dto::{MemberDto, SessionDto};
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult, Role};
use crate::gateway::events::EventPublisher;
use crate::members::domain::model::{MemberEntity, SessionEntity};
use crate::members::repository::{MemberRepository, SessionRepository};
use crate::utils::password::{hash_password, verify_password};

pub(crate) struct AccountServiceImpl {
    session_ttl_minutes: i64,
    member_repository: Box<dyn MemberRepository>,
    session_repository: Box<dyn SessionRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl AccountServiceImpl {
    pub(crate) fn new(config: &Configuration, member_repository: Box<dyn MemberRepository>,
                      session_repository: Box<dyn SessionRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            session_ttl_minutes: config.session_ttl_minutes,
            member_repository,
            session_repository,
            events_publisher,
        }
    }

    async fn register(&self, role: Role, username: &str, full_name: &str, email: &str, password: &str) -> LibraryResult<MemberDto> {
        for (field, value) in [("username", username), ("full_name", full_name), ("email", email), ("password", password)] {
            if value.trim().is_empty() {
                return Err(LibraryError::validation(format!("{} is required", field).as_str(), Some("400".to_string())));
            }
        }
        if !email.contains('@') {
            return Err(LibraryError::validation(format!("invalid email {}", email).as_str(), Some("400".to_string())));
        }
        if self.member_repository.find_by_username(role, username).await?.is_some() {
            return Err(LibraryError::duplicate_key(format!("{} {} is already registered", role, username.trim()).as_str()));
        }
        if self.member_repository.find_by_email(role, email).await?.is_some() {
            return Err(LibraryError::duplicate_key(format!("{} email {} is already registered", role, email.trim()).as_str()));
        }
        let member = MemberEntity::new(role, username, full_name, email, hash_password(password)?.as_str());
        self.member_repository.create(&member).await?;
        let dto = MemberDto::from(&member);
        info!("registered {} {}", role, dto.username);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "member_registered", "members", dto.member_id.as_str(), &dto)?).await?;
        Ok(dto)
    }

    async fn find_by_identifier(&self, role: Role, identifier: &str) -> LibraryResult<Option<MemberEntity>> {
        if let Some(member) = self.member_repository.find_by_username(role, identifier).await? {
            return Ok(Some(member));
        }
        if identifier.contains('@') {
            return self.member_repository.find_by_email(role, identifier).await;
        }
        Ok(None)
    }
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    async fn register_student(&self, student_number: &str, full_name: &str, email: &str, password: &str) -> LibraryResult<MemberDto> {
        self.register(Role::Student, student_number, full_name, email, password).await
    }

    async fn register_librarian(&self, librarian_number: &str, full_name: &str, email: &str, password: &str) -> LibraryResult<MemberDto> {
        self.register(Role::Librarian, librarian_number, full_name, email, password).await
    }

    async fn login(&self, identifier: &str, password: &str) -> LibraryResult<SessionDto> {
        for role in Role::all() {
            let member = match self.find_by_identifier(role, identifier).await? {
                Some(member) if member.has_identifier(identifier) => member,
                _ => continue,
            };
            if !verify_password(password, member.password_hash.as_str()) {
                continue;
            }
            let _ = self.session_repository.purge_expired(member.member_id.as_str(), Utc::now().naive_utc()).await?;
            let session = SessionEntity::new(&member, self.session_ttl_minutes);
            self.session_repository.create(&session).await?;
            info!("{} {} logged in", role, member.username);
            return Ok(SessionDto::from(&session));
        }
        warn!("rejected login for {}", identifier.trim());
        Err(LibraryError::access_denied("invalid credentials", Some("401".to_string())))
    }

    async fn logout(&self, session_id: &str) -> LibraryResult<()> {
        self.session_repository.delete(session_id).await.map(|_| ())
    }

    async fn authorize(&self, session_id: &str, role: Option<Role>) -> LibraryResult<SessionDto> {
        let session = match self.session_repository.get(session_id).await {
            Ok(session) => session,
            Err(LibraryError::NotFound { .. }) => {
                return Err(LibraryError::access_denied("session not found, please login", Some("401".to_string())));
            }
            Err(err) => return Err(err),
        };
        if session.is_expired(Utc::now().naive_utc()) {
            let _ = self.session_repository.delete(session_id).await?;
            return Err(LibraryError::access_denied("session expired, please login", Some("401".to_string())));
        }
        if let Some(role) = role {
            if session.member_role != role {
                return Err(LibraryError::not_granted(
                    format!("{} is not allowed for {}", role, session.username).as_str(), Some("403".to_string())));
            }
        }
        Ok(SessionDto::from(&session))
    }

    async fn find_member_by_id(&self, id: &str) -> LibraryResult<MemberDto> {
        self.member_repository.get(id).await.map(|m| MemberDto::from(&m))
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::accounts::domain::{AccountService, Member};
    use crate::accounts::factory;
    use crate::core::domain::Configuration;
    use crate::core::library::{LibraryError, Role};
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::members::domain::model::{MemberEntity, SessionEntity};
    use crate::members::factory::create_session_repository;

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Box<dyn AccountService>> = AsyncOnce::new(async {
                factory::create_account_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
    }

    fn unique(prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_should_register_and_login_student() {
        let account_svc = SUT_SVC.get().await;
        let number = unique("S");
        let email = format!("{}@uni.edu", number);
        let student = account_svc.register_student(number.as_str(), "Ada Lovelace", email.as_str(), "pass-1")
            .await.expect("should register");
        assert!(student.is_student());

        let by_number = account_svc.login(number.as_str(), "pass-1").await.expect("should login");
        assert_eq!(student.member_id, by_number.member_id);
        let by_email = account_svc.login(email.to_uppercase().as_str(), "pass-1").await.expect("should login");
        assert_eq!(Role::Student, by_email.member_role);

        let res = account_svc.login(number.as_str(), "wrong").await;
        assert!(matches!(res, Err(LibraryError::AccessDenied { .. })));
        let res = account_svc.login(unique("nobody").as_str(), "pass-1").await;
        assert!(matches!(res, Err(LibraryError::AccessDenied { .. })));
    }

    #[tokio::test]
    async fn test_should_reject_invalid_or_duplicate_registration() {
        let account_svc = SUT_SVC.get().await;
        let number = unique("S");
        let email = format!("{}@uni.edu", number);
        let res = account_svc.register_student(" ", "Ada", email.as_str(), "pass").await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
        let res = account_svc.register_student(number.as_str(), "Ada", "no-at-sign", "pass").await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));

        account_svc.register_student(number.as_str(), "Ada", email.as_str(), "pass").await.expect("should register");
        let res = account_svc.register_student(number.as_str(), "Other", "other@uni.edu", "pass").await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        let res = account_svc.register_student(unique("S").as_str(), "Other", email.as_str(), "pass").await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        // same number is fine for the other role
        account_svc.register_librarian(number.as_str(), "Ada", email.as_str(), "pass").await.expect("should register");
    }

    #[tokio::test]
    async fn test_should_authorize_by_role_and_logout() {
        let account_svc = SUT_SVC.get().await;
        let number = unique("L");
        let librarian = account_svc.register_librarian(number.as_str(), "Grace", format!("{}@uni.edu", number).as_str(), "pass")
            .await.expect("should register");
        let session = account_svc.login(number.as_str(), "pass").await.expect("should login");

        let authorized = account_svc.authorize(session.session_id.as_str(), Some(Role::Librarian)).await.expect("should authorize");
        assert_eq!(librarian.member_id, authorized.member_id);
        account_svc.authorize(session.session_id.as_str(), None).await.expect("should authorize");
        let res = account_svc.authorize(session.session_id.as_str(), Some(Role::Student)).await;
        assert!(matches!(res, Err(LibraryError::NotGranted { .. })));

        account_svc.logout(session.session_id.as_str()).await.expect("should logout");
        account_svc.logout(session.session_id.as_str()).await.expect("should ignore unknown session");
        let res = account_svc.authorize(session.session_id.as_str(), None).await;
        assert!(matches!(res, Err(LibraryError::AccessDenied { .. })));
    }

    #[tokio::test]
    async fn test_should_reject_expired_session() {
        let mut config = Configuration::new("test");
        config.session_ttl_minutes = -1;
        let account_svc = factory::create_account_service(&config, RepositoryStore::InMemory).await;
        let number = unique("S");
        account_svc.register_student(number.as_str(), "Alan", format!("{}@uni.edu", number).as_str(), "pass")
            .await.expect("should register");
        let session = account_svc.login(number.as_str(), "pass").await.expect("should login");
        let res = account_svc.authorize(session.session_id.as_str(), None).await;
        assert!(matches!(res, Err(LibraryError::AccessDenied { .. })));
    }

    #[tokio::test]
    async fn test_should_delete_expired_session_on_authorize() {
        let account_svc = SUT_SVC.get().await;
        let sessions = create_session_repository(RepositoryStore::InMemory).await;
        let number = unique("S");
        let member = MemberEntity::new(Role::Student, number.as_str(), "Alan", format!("{}@uni.edu", number).as_str(), "hash");
        let stale = SessionEntity::new(&member, -5);
        sessions.create(&stale).await.expect("should create session");

        let res = account_svc.authorize(stale.session_id.as_str(), None).await;
        assert!(matches!(res, Err(LibraryError::AccessDenied { .. })));
        let res = sessions.get(stale.session_id.as_str()).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
        let res = account_svc.authorize(stale.session_id.as_str(), Some(Role::Student)).await;
        assert!(matches!(res, Err(LibraryError::AccessDenied { .. })));
    }

    #[tokio::test]
    async fn test_should_find_member_by_id() {
        let account_svc = SUT_SVC.get().await;
        let number = unique("S");
        let student = account_svc.register_student(number.as_str(), "Alan", format!("{}@uni.edu", number).as_str(), "pass")
            .await.expect("should register");
        let loaded = account_svc.find_member_by_id(student.member_id.as_str()).await.expect("should find member");
        assert_eq!(student, loaded);
        assert!(account_svc.find_member_by_id("missing").await.is_err());
    }
}
