include!("../../lib.rs");
use axum::{
    routing::get,
    Router,
};
use lambda_http::{run, Error};
use crate::core::controller::{configure_dev_runtime, AppState};
use crate::suppliers::controller::{add_supplier, find_supplier_by_id, remove_supplier, search_suppliers, update_supplier};
use crate::utils::logs::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = AppState::from_env();
    configure_dev_runtime(&state);

    let app = Router::new()
        .route("/suppliers", get(search_suppliers).post(add_supplier))
        .route("/suppliers/:id", get(find_supplier_by_id).put(update_supplier).delete(remove_supplier))
        .with_state(state);

    run(app).await
}
