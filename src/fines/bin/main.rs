include!("../../lib.rs");
use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use crate::core::controller::{configure_dev_runtime, AppState};
use crate::fines::controller::{list_fines, pay_fine};
use crate::utils::logs::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = AppState::from_env();
    configure_dev_runtime(&state);

    let app = Router::new()
        .route("/fines", get(list_fines))
        .route("/fines/:id/pay", post(pay_fine))
        .with_state(state);

    run(app).await
}
