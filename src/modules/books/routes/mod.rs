use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{StatusCode, Uri},
    routing::{delete, get, patch, post},
    Json, Router,
};
use bookstore_http::error::AppError;

use super::models::CreateBook;
use crate::store::{Book, Store};
use crate::utils;

type BookResult = Result<Json<Book>, AppError>;

type IdQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// HTTP routes for the Books module.
///
/// A `GET` on an action path is answered as a lookup of that segment, the
/// same as `GET /books/{id}`.
pub fn router(store: Arc<Store>) -> Router {
    Router::new()
        .route("/books", get(list_books).post(add_book))
        .route("/books/{id}", get(book_by_id))
        .route("/books/buy", get(book_by_segment).post(buy_book))
        .route("/books/sell", get(book_by_segment).post(sell_book))
        .route("/books/checkout", get(book_by_segment).patch(checkout_book))
        .route("/books/return", get(book_by_segment).patch(return_book))
        .route("/books/burn", get(book_by_segment).delete(burn_book))
        .with_state(store)
}

/// First `id` in the query string; repeats are ignored.
fn query_id(query: IdQuery) -> Result<i64, AppError> {
    let Query(pairs) = query?;
    let first = pairs
        .iter()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.as_str());
    utils::required_id(first)
}

async fn list_books(State(store): State<Arc<Store>>) -> Json<Vec<Book>> {
    Json(store.list_books())
}

async fn add_book(
    State(store): State<Arc<Store>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Book>), AppError> {
    // Decoded regardless of the Content-Type header.
    let request: CreateBook = serde_json::from_slice(&body)
        .map_err(|err| AppError::bad_request(format!("invalid book body: {}", err)))?;
    let book = store.add_book(request.into());
    tracing::info!(book_id = book.id, title = %book.title, "book added");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn book_by_id(
    State(store): State<Arc<Store>>,
    id: Result<Path<String>, PathRejection>,
) -> BookResult {
    let Path(raw) = id?;
    let id = utils::parse_id(&raw)?;
    Ok(Json(store.find_by_id(id)?))
}

async fn book_by_segment(State(store): State<Arc<Store>>, uri: Uri) -> BookResult {
    let raw = uri.path().rsplit('/').next().unwrap_or_default();
    let id = utils::parse_id(raw)?;
    Ok(Json(store.find_by_id(id)?))
}

async fn checkout_book(
    State(store): State<Arc<Store>>,
    query: IdQuery,
) -> BookResult {
    let book = store.checkout(query_id(query)?)?;
    tracing::info!(book_id = book.id, quantity = book.quantity, "book checked out");
    Ok(Json(book))
}

async fn return_book(
    State(store): State<Arc<Store>>,
    query: IdQuery,
) -> BookResult {
    let book = store.return_book(query_id(query)?)?;
    tracing::info!(book_id = book.id, quantity = book.quantity, "book returned");
    Ok(Json(book))
}

async fn buy_book(
    State(store): State<Arc<Store>>,
    query: IdQuery,
) -> BookResult {
    let book = store.buy(query_id(query)?)?;
    tracing::info!(
        book_id = book.id,
        quantity = book.quantity,
        balance = %store.balance(),
        "book bought"
    );
    Ok(Json(book))
}

async fn sell_book(
    State(store): State<Arc<Store>>,
    query: IdQuery,
) -> BookResult {
    let book = store.sell(query_id(query)?)?;
    tracing::info!(
        book_id = book.id,
        quantity = book.quantity,
        balance = %store.balance(),
        "book sold"
    );
    Ok(Json(book))
}

async fn burn_book(
    State(store): State<Arc<Store>>,
    query: IdQuery,
) -> BookResult {
    let book = store.remove(query_id(query)?)?;
    tracing::info!(book_id = book.id, "book removed");
    Ok(Json(book))
}
