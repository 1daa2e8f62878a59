include!("../../lib.rs");
use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use crate::circulation::controller::{book_history, borrow_book, list_borrowed, query_overdue, report_lost, return_book};
use crate::core::controller::{configure_dev_runtime, AppState};
use crate::utils::logs::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = AppState::from_env();
    configure_dev_runtime(&state);

    let app = Router::new()
        .route("/circulation/borrow", post(borrow_book))
        .route("/circulation/borrowed", get(list_borrowed))
        .route("/circulation/overdue", get(query_overdue))
        .route("/circulation/books/:id/history", get(book_history))
        .route("/circulation/:id/return", post(return_book))
        .route("/circulation/:id/lost", post(report_lost))
        .with_state(state);

    run(app).await
}
