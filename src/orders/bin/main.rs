include!("../../lib.rs");
use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use crate::core::controller::{configure_dev_runtime, AppState};
use crate::orders::controller::{list_orders, place_order, request_book, update_orders};
use crate::utils::logs::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = AppState::from_env();
    configure_dev_runtime(&state);

    let app = Router::new()
        .route("/orders", get(list_orders).post(place_order).put(update_orders))
        .route("/orders/requests", post(request_book))
        .with_state(state);

    run(app).await
}
