use serde::{Deserialize, Serialize};

/// A single catalog entry as stored and served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Storage-assigned identifier, never reused after deletion
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Publication year, if known
    pub year: Option<i64>,
    /// Genre label, if any
    pub genre: Option<String>,
}

/// Request body for both POST /books and PUT /books/{id}.
///
/// `title` and `author` are optional at the serde layer so a request missing
/// them still deserializes and reaches validation, which answers 400 with the
/// contract's error message instead of a bare body-rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub genre: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookListResponse {
    pub message: String,
    pub data: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookResponse {
    pub message: String,
    pub data: Book,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteBookResponse {
    pub message: String,
    pub changes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
