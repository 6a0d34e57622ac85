use anyhow::Result;
use shared::Book;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:books.db";

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // AUTOINCREMENT keeps ids of deleted rows from being handed out again
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                year INTEGER,
                genre TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// List all books in natural storage order
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query("SELECT id, title, author, year, genre FROM books")
            .fetch_all(&*self.pool)
            .await?;

        let books = rows
            .iter()
            .map(|row| Book {
                id: row.get("id"),
                title: row.get("title"),
                author: row.get("author"),
                year: row.get("year"),
                genre: row.get("genre"),
            })
            .collect();
        Ok(books)
    }

    /// Insert a new book and return its assigned id
    pub async fn insert_book(
        &self,
        title: &str,
        author: &str,
        year: Option<i64>,
        genre: Option<&str>,
    ) -> Result<i64> {
        let result =
            sqlx::query("INSERT INTO books (title, author, year, genre) VALUES (?, ?, ?, ?)")
                .bind(title)
                .bind(author)
                .bind(year)
                .bind(genre)
                .execute(&*self.pool)
                .await?;
        Ok(result.last_insert_rowid())
    }

    /// Replace all fields of the book with the given id.
    /// Returns the affected row count; 0 means no such id, which is the
    /// caller's signal to report not-found.
    pub async fn update_book(
        &self,
        id: i64,
        title: &str,
        author: &str,
        year: Option<i64>,
        genre: Option<&str>,
    ) -> Result<u64> {
        let result =
            sqlx::query("UPDATE books SET title = ?, author = ?, year = ?, genre = ? WHERE id = ?")
                .bind(title)
                .bind(author)
                .bind(year)
                .bind(genre)
                .bind(id)
                .execute(&*self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Delete the book with the given id, returning the affected row count
    pub async fn delete_book(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
