include!("../../lib.rs");
use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use crate::accounts::controller::{find_me, find_member_by_id, login, logout, register_librarian, register_student};
use crate::core::controller::{configure_dev_runtime, AppState};
use crate::utils::logs::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = AppState::from_env();
    configure_dev_runtime(&state);

    let app = Router::new()
        .route("/accounts/students", post(register_student))
        .route("/accounts/librarians", post(register_librarian))
        .route("/accounts/login", post(login))
        .route("/accounts/logout", post(logout))
        .route("/accounts/me", get(find_me))
        .route("/accounts/members/:id", get(find_member_by_id))
        .with_state(state);

    run(app).await
}
