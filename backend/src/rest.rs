use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use shared::{BookListResponse, BookPayload, BookResponse, DeleteBookResponse, ErrorResponse};
use tracing::info;

use crate::domain::{BookError, BookService};

/// Application state containing the BookService
#[derive(Clone)]
pub struct AppState {
    pub book_service: BookService,
}

impl AppState {
    /// Create new application state with the given BookService
    pub fn new(book_service: BookService) -> Self {
        Self { book_service }
    }
}

/// Build the router for the four catalog routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/:id", put(update_book).delete(delete_book))
        .with_state(state)
}

/// Map a BookError to its status code and `{error}` body
fn error_response(err: BookError) -> Response {
    let status = match err {
        BookError::MissingFields => StatusCode::BAD_REQUEST,
        BookError::NotFound => StatusCode::NOT_FOUND,
        // Storage errors carry the raw engine message to the caller
        BookError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse { error: err.to_string() })).into_response()
}

/// Axum handler function for GET /books
pub async fn list_books(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /books");

    match state.book_service.list_books().await {
        Ok(books) => (
            StatusCode::OK,
            Json(BookListResponse {
                message: "success".to_string(),
                data: books,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error listing books: {:?}", e);
            error_response(e)
        }
    }
}

/// Axum handler function for POST /books
pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<BookPayload>,
) -> impl IntoResponse {
    info!("POST /books - payload: {:?}", payload);

    match state.book_service.create_book(payload).await {
        Ok(book) => (
            StatusCode::CREATED,
            Json(BookResponse {
                message: "success".to_string(),
                data: book,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error creating book: {:?}", e);
            error_response(e)
        }
    }
}

/// Axum handler function for PUT /books/:id
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookPayload>,
) -> impl IntoResponse {
    info!("PUT /books/{} - payload: {:?}", id, payload);

    match state.book_service.update_book(id, payload).await {
        Ok(book) => (
            StatusCode::OK,
            Json(BookResponse {
                message: "success".to_string(),
                data: book,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error updating book {}: {:?}", id, e);
            error_response(e)
        }
    }
}

/// Axum handler function for DELETE /books/:id
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /books/{}", id);

    match state.book_service.delete_book(id).await {
        Ok(changes) => (
            StatusCode::OK,
            Json(DeleteBookResponse {
                message: "deleted".to_string(),
                changes,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error deleting book {}: {:?}", id, e);
            error_response(e)
        }
    }
}
