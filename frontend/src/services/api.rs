use gloo::net::http::{Request, Response};
use shared::{BookListResponse, BookPayload, BookResponse, DeleteBookResponse, ErrorResponse};

/// API client for communicating with the backend server
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// Fetch the whole catalog
    pub async fn get_books(&self) -> Result<BookListResponse, String> {
        let url = format!("{}/books", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<BookListResponse>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse books: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch books: {}", e)),
        }
    }

    /// Create a new book
    pub async fn create_book(&self, payload: &BookPayload) -> Result<BookResponse, String> {
        let url = format!("{}/books", self.base_url);

        match Request::post(&url)
            .json(payload)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    response
                        .json::<BookResponse>()
                        .await
                        .map_err(|e| format!("Failed to parse response: {}", e))
                } else {
                    Err(Self::error_text(response).await)
                }
            }
            Err(e) => Err(format!("Failed to create book: {}", e)),
        }
    }

    /// Replace all fields of an existing book
    pub async fn update_book(&self, id: i64, payload: &BookPayload) -> Result<BookResponse, String> {
        let url = format!("{}/books/{}", self.base_url, id);

        match Request::put(&url)
            .json(payload)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    response
                        .json::<BookResponse>()
                        .await
                        .map_err(|e| format!("Failed to parse response: {}", e))
                } else {
                    Err(Self::error_text(response).await)
                }
            }
            Err(e) => Err(format!("Failed to update book: {}", e)),
        }
    }

    /// Delete a book by id
    pub async fn delete_book(&self, id: i64) -> Result<DeleteBookResponse, String> {
        let url = format!("{}/books/{}", self.base_url, id);

        match Request::delete(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    response
                        .json::<DeleteBookResponse>()
                        .await
                        .map_err(|e| format!("Failed to parse response: {}", e))
                } else {
                    Err(Self::error_text(response).await)
                }
            }
            Err(e) => Err(format!("Failed to delete book: {}", e)),
        }
    }

    /// Pull the `{error}` body out of a failed response
    async fn error_text(response: Response) -> String {
        match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => "Unknown error".to_string(),
        }
    }
}
