use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use serde::Deserialize;
use crate::accounts::controller::authorize;
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::core::library::Role;
use crate::fines::command::list_fines_cmd::{ListFinesCommand, ListFinesCommandRequest, ListFinesCommandResponse};
use crate::fines::command::pay_fine_cmd::{PayFineCommand, PayFineCommandRequest, PayFineCommandResponse};
use crate::fines::factory;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FinesQuery {
    #[serde(default)]
    pub unpaid_only: bool,
}

// students see and pay their own fines
pub(crate) async fn list_fines(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FinesQuery>) -> Result<Json<ListFinesCommandResponse>, ServerError> {
    let session = authorize(&state, &headers, Some(Role::Student)).await?;
    let svc = factory::create_fine_service(&state.config, state.store).await;
    let req = ListFinesCommandRequest { student_id: session.member_id, unpaid_only: query.unpaid_only };
    let res = ListFinesCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn pay_fine(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(fine_id): Path<String>) -> Result<Json<PayFineCommandResponse>, ServerError> {
    let session = authorize(&state, &headers, Some(Role::Student)).await?;
    let svc = factory::create_fine_service(&state.config, state.store).await;
    let res = PayFineCommand::new(svc).execute(PayFineCommandRequest { student_id: session.member_id, fine_id }).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use axum::extract::{Path, Query, State};
    use axum::http::{HeaderMap, HeaderValue, StatusCode};
    use uuid::Uuid;
    use crate::accounts::factory::create_account_service;
    use crate::core::controller::{AppState, SESSION_HEADER};
    use crate::core::repository::RepositoryStore;
    use crate::fines::controller::{list_fines, pay_fine, FinesQuery};
    use crate::fines::factory::create_fine_service;

    #[tokio::test]
    async fn test_should_list_and_pay_own_fines() {
        let state = AppState::new("test", RepositoryStore::InMemory);
        let accounts = create_account_service(&state.config, state.store).await;
        let number = format!("S-{}", Uuid::new_v4());
        let student = accounts.register_student(number.as_str(), "Ada", format!("{}@uni.edu", number).as_str(), "pw")
            .await.expect("should register");
        let session = accounts.login(number.as_str(), "pw").await.expect("should login");
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_str(session.session_id.as_str()).expect("header"));

        let fine = create_fine_service(&state.config, state.store).await
            .assess_fine(student.member_id.as_str(), "borrow", 1000, "Overdue by 1 days").await.expect("should assess");
        let res = list_fines(State(state.clone()), headers.clone(), Query(FinesQuery::default())).await.expect("should list");
        assert_eq!(1000, res.0.outstanding_cents);
        let _ = pay_fine(State(state.clone()), headers.clone(), Path(fine.fine_id.to_string())).await.expect("should pay");
        let err = pay_fine(State(state.clone()), headers.clone(), Path(fine.fine_id.to_string())).await.expect_err("already paid");
        assert_eq!(StatusCode::BAD_REQUEST, err.0);
        let res = list_fines(State(state), headers, Query(FinesQuery { unpaid_only: true })).await.expect("should list");
        assert!(res.0.fines.is_empty());
    }
}
