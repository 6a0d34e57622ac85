use crate::db::DbConnection;
use shared::{Book, BookPayload};
use thiserror::Error;
use tracing::info;

/// Errors a catalog operation can surface to the HTTP layer
#[derive(Debug, Error)]
pub enum BookError {
    /// A required field was missing or empty
    #[error("Title and Author are required")]
    MissingFields,
    /// No record with the requested id
    #[error("Book not found")]
    NotFound,
    /// The storage engine failed underneath us
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// BookService owns the catalog's business rules
#[derive(Clone)]
pub struct BookService {
    db: DbConnection,
}

impl BookService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// List the whole catalog
    pub async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        Ok(self.db.list_books().await?)
    }

    /// Validate and insert a new book, returning it with its assigned id
    pub async fn create_book(&self, payload: BookPayload) -> Result<Book, BookError> {
        let (title, author) = validate(&payload)?;
        info!("Creating book: {} by {}", title, author);

        let id = self
            .db
            .insert_book(&title, &author, payload.year, payload.genre.as_deref())
            .await?;

        Ok(Book {
            id,
            title,
            author,
            year: payload.year,
            genre: payload.genre,
        })
    }

    /// Validate and replace all mutable fields of an existing book.
    /// The id is the lookup key and never changes.
    pub async fn update_book(&self, id: i64, payload: BookPayload) -> Result<Book, BookError> {
        let (title, author) = validate(&payload)?;
        info!("Updating book {}", id);

        let affected = self
            .db
            .update_book(id, &title, &author, payload.year, payload.genre.as_deref())
            .await?;
        if affected == 0 {
            return Err(BookError::NotFound);
        }

        Ok(Book {
            id,
            title,
            author,
            year: payload.year,
            genre: payload.genre,
        })
    }

    /// Delete a book, returning the number of rows removed
    pub async fn delete_book(&self, id: i64) -> Result<u64, BookError> {
        info!("Deleting book {}", id);

        let affected = self.db.delete_book(id).await?;
        if affected == 0 {
            return Err(BookError::NotFound);
        }
        Ok(affected)
    }
}

/// Title and author must both be present and non-empty
fn validate(payload: &BookPayload) -> Result<(String, String), BookError> {
    match (&payload.title, &payload.author) {
        (Some(title), Some(author)) if !title.is_empty() && !author.is_empty() => {
            Ok((title.clone(), author.clone()))
        }
        _ => Err(BookError::MissingFields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_service() -> BookService {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        BookService::new(db)
    }

    fn payload(title: Option<&str>, author: Option<&str>) -> BookPayload {
        BookPayload {
            title: title.map(String::from),
            author: author.map(String::from),
            year: None,
            genre: None,
        }
    }

    #[tokio::test]
    async fn test_create_book_returns_assigned_id() {
        let service = create_test_service().await;

        let book = service
            .create_book(BookPayload {
                title: Some("The Hobbit".to_string()),
                author: Some("Tolkien".to_string()),
                year: Some(1937),
                genre: Some("Fantasy".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(book.title, "The Hobbit");
        assert_eq!(book.author, "Tolkien");
        assert_eq!(book.year, Some(1937));
        assert_eq!(book.genre, Some("Fantasy".to_string()));

        // The record must be visible through a subsequent list
        let books = service.list_books().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0], book);
    }

    #[tokio::test]
    async fn test_create_book_rejects_missing_title() {
        let service = create_test_service().await;

        let result = service.create_book(payload(None, Some("Tolkien"))).await;
        assert!(matches!(result, Err(BookError::MissingFields)));

        // Validation failures must not create records
        let books = service.list_books().await.unwrap();
        assert!(books.is_empty());
    }

    #[tokio::test]
    async fn test_create_book_rejects_missing_author() {
        let service = create_test_service().await;

        let result = service.create_book(payload(Some("The Hobbit"), None)).await;
        assert!(matches!(result, Err(BookError::MissingFields)));
    }

    #[tokio::test]
    async fn test_create_book_rejects_empty_strings() {
        let service = create_test_service().await;

        let result = service.create_book(payload(Some(""), Some("Tolkien"))).await;
        assert!(matches!(result, Err(BookError::MissingFields)));

        let result = service.create_book(payload(Some("The Hobbit"), Some(""))).await;
        assert!(matches!(result, Err(BookError::MissingFields)));
    }

    #[tokio::test]
    async fn test_validation_error_message() {
        let service = create_test_service().await;

        let err = service.create_book(payload(None, None)).await.unwrap_err();
        assert_eq!(err.to_string(), "Title and Author are required");
    }

    #[tokio::test]
    async fn test_update_book_replaces_fields() {
        let service = create_test_service().await;

        let created = service
            .create_book(BookPayload {
                title: Some("The Hobbit".to_string()),
                author: Some("Tolkien".to_string()),
                year: Some(1937),
                genre: Some("Fantasy".to_string()),
            })
            .await
            .unwrap();

        let updated = service
            .update_book(
                created.id,
                BookPayload {
                    title: Some("The Lord of the Rings".to_string()),
                    author: Some("Tolkien".to_string()),
                    year: Some(1954),
                    genre: Some("Fantasy".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "The Lord of the Rings");
        assert_eq!(updated.year, Some(1954));

        let books = service.list_books().await.unwrap();
        assert_eq!(books, vec![updated]);
    }

    #[tokio::test]
    async fn test_update_book_clears_optional_fields() {
        let service = create_test_service().await;

        let created = service
            .create_book(BookPayload {
                title: Some("Dune".to_string()),
                author: Some("Herbert".to_string()),
                year: Some(1965),
                genre: Some("Sci-Fi".to_string()),
            })
            .await
            .unwrap();

        // A full-field update with absent optionals nulls them out
        let updated = service
            .update_book(created.id, payload(Some("Dune"), Some("Herbert")))
            .await
            .unwrap();

        assert_eq!(updated.year, None);
        assert_eq!(updated.genre, None);

        let books = service.list_books().await.unwrap();
        assert_eq!(books[0].year, None);
        assert_eq!(books[0].genre, None);
    }

    #[tokio::test]
    async fn test_update_missing_book_is_not_found() {
        let service = create_test_service().await;

        let result = service.update_book(9999, payload(Some("Ghost"), Some("Nobody"))).await;
        assert!(matches!(result, Err(BookError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let service = create_test_service().await;

        // Missing fields win over the unknown id
        let result = service.update_book(9999, payload(None, None)).await;
        assert!(matches!(result, Err(BookError::MissingFields)));
    }

    #[tokio::test]
    async fn test_delete_book_twice_is_not_found() {
        let service = create_test_service().await;

        let created = service
            .create_book(payload(Some("The Hobbit"), Some("Tolkien")))
            .await
            .unwrap();

        let changes = service.delete_book(created.id).await.unwrap();
        assert_eq!(changes, 1);

        let result = service.delete_book(created.id).await;
        assert!(matches!(result, Err(BookError::NotFound)));
    }
}
