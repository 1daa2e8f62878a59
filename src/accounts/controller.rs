use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::Value;
use crate::accounts::command::get_member_cmd::{GetMemberCommand, GetMemberCommandRequest, GetMemberCommandResponse};
use crate::accounts::command::login_cmd::{LoginCommand, LoginCommandRequest, LoginCommandResponse};
use crate::accounts::command::logout_cmd::{LogoutCommand, LogoutCommandRequest, LogoutCommandResponse};
use crate::accounts::command::register_member_cmd::{RegisterMemberCommand, RegisterMemberCommandRequest, RegisterMemberCommandResponse};
use crate::accounts::domain::AccountService;
use crate::accounts::dto::SessionDto;
use crate::accounts::factory;
use crate::core::command::{Command, CommandError};
use crate::core::controller::{AppState, json_to_server_error, ServerError, session_id};
use crate::core::library::Role;

async fn build_service(state: &AppState) -> Box<dyn AccountService> {
    factory::create_account_service(&state.config, state.store).await
}

// authorize resolves the x-session-id header to a live session, optionally of one role
pub(crate) async fn authorize(state: &AppState, headers: &HeaderMap, role: Option<Role>) -> Result<SessionDto, ServerError> {
    let session_id = session_id(headers)?;
    build_service(state).await.authorize(session_id.as_str(), role).await
        .map_err(|err| ServerError::from(CommandError::from(err)))
}

pub(crate) async fn register_student(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<RegisterMemberCommandResponse>, ServerError> {
    let req: RegisterMemberCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(&state).await;
    let res = RegisterMemberCommand::new(svc, Role::Student).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn register_librarian(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<RegisterMemberCommandResponse>, ServerError> {
    let req: RegisterMemberCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(&state).await;
    let res = RegisterMemberCommand::new(svc, Role::Librarian).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn login(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<LoginCommandResponse>, ServerError> {
    let req: LoginCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(&state).await;
    let res = LoginCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap) -> Result<Json<LogoutCommandResponse>, ServerError> {
    let req = LogoutCommandRequest { session_id: session_id(&headers)? };
    let svc = build_service(&state).await;
    let res = LogoutCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_me(
    State(state): State<AppState>,
    headers: HeaderMap) -> Result<Json<GetMemberCommandResponse>, ServerError> {
    let session = authorize(&state, &headers, None).await?;
    let req = GetMemberCommandRequest { member_id: session.member_id };
    let svc = build_service(&state).await;
    let res = GetMemberCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_member_by_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(member_id): Path<String>) -> Result<Json<GetMemberCommandResponse>, ServerError> {
    let _ = authorize(&state, &headers, Some(Role::Librarian)).await?;
    let req = GetMemberCommandRequest { member_id };
    let svc = build_service(&state).await;
    let res = GetMemberCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use axum::http::{HeaderMap, HeaderValue, StatusCode};
    use axum::response::Json;
    use serde_json::json;
    use uuid::Uuid;
    use crate::accounts::controller::{authorize, find_me, login, register_student};
    use crate::core::controller::{AppState, SESSION_HEADER};
    use crate::core::library::Role;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_register_login_and_find_me() {
        let state = AppState::new("test", RepositoryStore::InMemory);
        let number = format!("S-{}", Uuid::new_v4());
        let email = format!("{}@uni.edu", number);
        let registered = register_student(State(state.clone()), Json(json!({
            "student_number": number, "full_name": "Ada", "email": email, "password": "pw"})))
            .await.expect("should register");
        let session = login(State(state.clone()), Json(json!({"identifier": number, "password": "pw"})))
            .await.expect("should login").0.session;

        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_str(session.session_id.as_str()).expect("header"));
        let me = find_me(State(state.clone()), headers.clone()).await.expect("should find me");
        assert_eq!(registered.0.member.member_id, me.0.member.member_id);

        let err = authorize(&state, &headers, Some(Role::Librarian)).await.expect_err("should not grant");
        assert_eq!(StatusCode::FORBIDDEN, err.0);
        let err = authorize(&state, &HeaderMap::new(), None).await.expect_err("should require session");
        assert_eq!(StatusCode::UNAUTHORIZED, err.0);
    }

    #[tokio::test]
    async fn test_should_reject_malformed_registration() {
        let state = AppState::new("test", RepositoryStore::InMemory);
        let err = register_student(State(state), Json(json!({"full_name": "Ada"}))).await.expect_err("should fail");
        assert_eq!(StatusCode::BAD_REQUEST, err.0);
    }
}
