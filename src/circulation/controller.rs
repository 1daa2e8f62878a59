use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::Value;
use crate::accounts::controller::authorize;
use crate::circulation::command::book_history_cmd::{BookHistoryCommand, BookHistoryCommandRequest, BookHistoryCommandResponse};
use crate::circulation::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest, BorrowBookCommandResponse};
use crate::circulation::command::list_borrowed_cmd::{ListBorrowedCommand, ListBorrowedCommandRequest, ListBorrowedCommandResponse};
use crate::circulation::command::query_overdue_cmd::{QueryOverdueCommand, QueryOverdueCommandRequest, QueryOverdueCommandResponse};
use crate::circulation::command::report_lost_cmd::{ReportLostCommand, ReportLostCommandRequest, ReportLostCommandResponse};
use crate::circulation::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest, ReturnBookCommandResponse};
use crate::circulation::domain::CirculationService;
use crate::circulation::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::core::library::Role;

async fn build_service(state: &AppState) -> Box<dyn CirculationService> {
    factory::create_circulation_service(&state.config, state.store).await
}

pub(crate) async fn borrow_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    json: Json<Value>) -> Result<Json<BorrowBookCommandResponse>, ServerError> {
    let session = authorize(&state, &headers, Some(Role::Student)).await?;
    let mut req: BorrowBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.student_id = session.member_id;
    let res = BorrowBookCommand::new(build_service(&state).await).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn return_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(borrow_id): Path<String>) -> Result<Json<ReturnBookCommandResponse>, ServerError> {
    let _ = authorize(&state, &headers, Some(Role::Librarian)).await?;
    let res = ReturnBookCommand::new(build_service(&state).await).execute(ReturnBookCommandRequest { borrow_id }).await?;
    Ok(Json(res))
}

pub(crate) async fn report_lost(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(borrow_id): Path<String>) -> Result<Json<ReportLostCommandResponse>, ServerError> {
    let _ = authorize(&state, &headers, Some(Role::Librarian)).await?;
    let res = ReportLostCommand::new(build_service(&state).await).execute(ReportLostCommandRequest { borrow_id }).await?;
    Ok(Json(res))
}

pub(crate) async fn query_overdue(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<QueryOverdueCommandRequest>) -> Result<Json<QueryOverdueCommandResponse>, ServerError> {
    let _ = authorize(&state, &headers, Some(Role::Librarian)).await?;
    let res = QueryOverdueCommand::new(build_service(&state).await).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn book_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(book_id): Path<String>) -> Result<Json<BookHistoryCommandResponse>, ServerError> {
    let _ = authorize(&state, &headers, Some(Role::Librarian)).await?;
    let res = BookHistoryCommand::new(build_service(&state).await).execute(BookHistoryCommandRequest { book_id }).await?;
    Ok(Json(res))
}

// students only see their own borrows, librarians may filter by student
pub(crate) async fn list_borrowed(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(mut req): Query<ListBorrowedCommandRequest>) -> Result<Json<ListBorrowedCommandResponse>, ServerError> {
    let session = authorize(&state, &headers, None).await?;
    if !session.is_librarian() {
        req.student_id = Some(session.member_id);
    }
    let res = ListBorrowedCommand::new(build_service(&state).await).execute(req).await?;
    Ok(Json(res))
}
