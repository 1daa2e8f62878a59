use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::Value;
use crate::accounts::controller::authorize;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::core::library::Role;
use crate::suppliers::command::add_supplier_cmd::{AddSupplierCommand, AddSupplierCommandRequest, AddSupplierCommandResponse};
use crate::suppliers::command::get_supplier_cmd::{GetSupplierCommand, GetSupplierCommandRequest, GetSupplierCommandResponse};
use crate::suppliers::command::remove_supplier_cmd::{RemoveSupplierCommand, RemoveSupplierCommandRequest, RemoveSupplierCommandResponse};
use crate::suppliers::command::search_suppliers_cmd::{SearchSuppliersCommand, SearchSuppliersCommandRequest, SearchSuppliersCommandResponse};
use crate::suppliers::command::update_supplier_cmd::{UpdateSupplierCommand, UpdateSupplierCommandRequest, UpdateSupplierCommandResponse};
use crate::suppliers::domain::SupplierService;
use crate::suppliers::factory;

// suppliers are managed by librarians only
async fn build_service(state: &AppState, headers: &HeaderMap) -> Result<Box<dyn SupplierService>, ServerError> {
    let _ = authorize(state, headers, Some(Role::Librarian)).await?;
    Ok(factory::create_supplier_service(&state.config, state.store).await)
}

pub(crate) async fn add_supplier(
    State(state): State<AppState>,
    headers: HeaderMap,
    json: Json<Value>) -> Result<Json<AddSupplierCommandResponse>, ServerError> {
    let req: AddSupplierCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(&state, &headers).await?;
    let res = AddSupplierCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn search_suppliers(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<SearchSuppliersCommandRequest>) -> Result<Json<SearchSuppliersCommandResponse>, ServerError> {
    let svc = build_service(&state, &headers).await?;
    let res = SearchSuppliersCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_supplier_by_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(supplier_id): Path<String>) -> Result<Json<GetSupplierCommandResponse>, ServerError> {
    let svc = build_service(&state, &headers).await?;
    let res = GetSupplierCommand::new(svc).execute(GetSupplierCommandRequest { supplier_id }).await?;
    Ok(Json(res))
}

pub(crate) async fn update_supplier(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(supplier_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdateSupplierCommandResponse>, ServerError> {
    let mut req: UpdateSupplierCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.supplier_id = supplier_id;
    let svc = build_service(&state, &headers).await?;
    let res = UpdateSupplierCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_supplier(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(supplier_id): Path<String>) -> Result<Json<RemoveSupplierCommandResponse>, ServerError> {
    let svc = build_service(&state, &headers).await?;
    let res = RemoveSupplierCommand::new(svc).execute(RemoveSupplierCommandRequest { supplier_id }).await?;
    Ok(Json(res))
}
