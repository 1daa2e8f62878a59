pub mod service;

use async_trait::async_trait;
use crate::accounts::dto::{MemberDto, SessionDto};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryResult, Role};

#[async_trait]
pub(crate) trait AccountService: Sync + Send {
    async fn register_student(&self, student_number: &str, full_name: &str, email: &str, password: &str) -> LibraryResult<MemberDto>;
    async fn register_librarian(&self, librarian_number: &str, full_name: &str, email: &str, password: &str) -> LibraryResult<MemberDto>;
    async fn login(&self, identifier: &str, password: &str) -> LibraryResult<SessionDto>;
    async fn logout(&self, session_id: &str) -> LibraryResult<()>;
    // authorize checks the session is live and, when given, that it belongs to the role
    async fn authorize(&self, session_id: &str, role: Option<Role>) -> LibraryResult<SessionDto>;
    async fn find_member_by_id(&self, id: &str) -> LibraryResult<MemberDto>;
}

pub(crate) trait Member: Identifiable {
    fn role(&self) -> Role;
    fn is_student(&self) -> bool {
        self.role() == Role::Student
    }
    fn is_librarian(&self) -> bool {
        self.role() == Role::Librarian
    }
}
