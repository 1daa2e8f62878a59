use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::Value;
use crate::accounts::controller::authorize;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::core::library::Role;
use crate::orders::command::list_orders_cmd::{ListOrdersCommand, ListOrdersCommandRequest, ListOrdersCommandResponse};
use crate::orders::command::place_order_cmd::{PlaceOrderCommand, PlaceOrderCommandRequest, PlaceOrderCommandResponse};
use crate::orders::command::request_book_cmd::{RequestBookCommand, RequestBookCommandRequest, RequestBookCommandResponse};
use crate::orders::command::update_orders_cmd::{UpdateOrdersCommand, UpdateOrdersCommandRequest, UpdateOrdersCommandResponse};
use crate::orders::domain::OrderService;
use crate::orders::factory;

async fn build_service(state: &AppState) -> Box<dyn OrderService> {
    factory::create_order_service(&state.config, state.store).await
}

pub(crate) async fn place_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    json: Json<Value>) -> Result<Json<PlaceOrderCommandResponse>, ServerError> {
    let session = authorize(&state, &headers, Some(Role::Student)).await?;
    let mut req: PlaceOrderCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.student_id = session.member_id;
    let res = PlaceOrderCommand::new(build_service(&state).await).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn request_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    json: Json<Value>) -> Result<Json<RequestBookCommandResponse>, ServerError> {
    let session = authorize(&state, &headers, Some(Role::Student)).await?;
    let mut req: RequestBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.student_id = session.member_id;
    let res = RequestBookCommand::new(build_service(&state).await).execute(req).await?;
    Ok(Json(res))
}

// students list their own orders, librarians every order
pub(crate) async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(mut req): Query<ListOrdersCommandRequest>) -> Result<Json<ListOrdersCommandResponse>, ServerError> {
    let session = authorize(&state, &headers, None).await?;
    if !session.is_librarian() {
        req.student_id = Some(session.member_id);
    }
    let res = ListOrdersCommand::new(build_service(&state).await).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    json: Json<Value>) -> Result<Json<UpdateOrdersCommandResponse>, ServerError> {
    let _ = authorize(&state, &headers, Some(Role::Librarian)).await?;
    let req: UpdateOrdersCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = UpdateOrdersCommand::new(build_service(&state).await).execute(req).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, HeaderValue, StatusCode};
    use axum::response::Json;
    use serde_json::json;
    use uuid::Uuid;
    use crate::accounts::factory::create_account_service;
    use crate::core::controller::{AppState, SESSION_HEADER};
    use crate::core::library::{OrderStatus, Role};
    use crate::core::repository::RepositoryStore;
    use crate::orders::command::list_orders_cmd::ListOrdersCommandRequest;
    use crate::orders::controller::{list_orders, request_book, update_orders};

    async fn login_headers(state: &AppState, role: Role) -> HeaderMap {
        let svc = create_account_service(&state.config, state.store).await;
        let number = format!("{}-{}", role, Uuid::new_v4());
        let email = format!("{}@uni.edu", number);
        let registered = match role {
            Role::Librarian => svc.register_librarian(number.as_str(), "Grace", email.as_str(), "pw").await,
            Role::Student => svc.register_student(number.as_str(), "Ada", email.as_str(), "pw").await,
        };
        registered.expect("should register");
        let session = svc.login(number.as_str(), "pw").await.expect("should login");
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_str(session.session_id.as_str()).expect("header"));
        headers
    }

    #[tokio::test]
    async fn test_should_request_and_process_orders() {
        let state = AppState::new(Uuid::new_v4().to_string().as_str(), RepositoryStore::InMemory);
        let student = login_headers(&state, Role::Student).await;
        let librarian = login_headers(&state, Role::Librarian).await;
        let order = request_book(State(state.clone()), student.clone(), Json(json!({"title": "Neuromancer", "author": "William Gibson"})))
            .await.expect("should request book").0.order;

        let all = list_orders(State(state.clone()), librarian.clone(), Query(ListOrdersCommandRequest::default()))
            .await.expect("should list").0.orders;
        assert_eq!(1, all.len());
        let err = update_orders(State(state.clone()), student.clone(), Json(json!({
            "order_ids": [order.order_id.as_str()], "order_status": "Arrived", "payment_status": "Paid"})))
            .await.expect_err("students cannot update orders");
        assert_eq!(StatusCode::FORBIDDEN, err.0);
        let res = update_orders(State(state.clone()), librarian, Json(json!({
            "order_ids": [order.order_id.as_str()], "order_status": "Arrived", "payment_status": "Paid"})))
            .await.expect("should update orders").0;
        assert_eq!(OrderStatus::Arrived, res.orders[0].order_status);

        let mine = list_orders(State(state), student, Query(ListOrdersCommandRequest::default()))
            .await.expect("should list").0.orders;
        assert_eq!(vec![order.order_id.to_string()], mine.iter().map(|o| o.order_id.to_string()).collect::<Vec<String>>());
    }
}
