include!("../../lib.rs");
use axum::{
    routing::get,
    Router,
};
use lambda_http::{run, Error};
use crate::catalog::controller::{add_book, find_book_by_id, remove_book, search_books, update_book};
use crate::core::controller::{configure_dev_runtime, AppState};
use crate::utils::logs::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = AppState::from_env();
    configure_dev_runtime(&state);

    let app = Router::new()
        .route("/catalog", get(search_books).post(add_book))
        .route("/catalog/:id", get(find_book_by_id).put(update_book).delete(remove_book))
        .with_state(state);

    run(app).await
}
