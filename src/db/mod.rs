// Database module - provides data access layer

use std::sync::Arc;

use color_eyre::{eyre::OptionExt, Result};

pub mod models;
pub use models::*;

mod question;
pub use question::QuestionFilter;
mod report;
mod schema;
mod session;
mod subject;
mod user;

// Main database handle
#[derive(Clone)]
pub struct Db {
    db: Arc<libsql::Database>,
}

impl Db {
    pub async fn new(url: String) -> Result<Self> {
        let path = url.strip_prefix("file:").unwrap_or(&url);
        let db = libsql::Builder::new_local(path).build().await?;

        let conn = db.connect()?;

        // Verify connection
        let one = conn
            .query("SELECT 1", ())
            .await?
            .next()
            .await?
            .ok_or_eyre("connection check failed")?
            .get::<i32>(0)?;
        assert_eq!(one, 1);

        schema::create_schema(&conn).await?;

        tracing::info!("database connection has been verified");

        Ok(Self { db: Arc::new(db) })
    }

    /// Foreign keys are off by default in SQLite and scoped per connection,
    /// so every connection enables them before use. Cascading deletes for
    /// subjects, topics, and questions depend on this.
    pub(crate) async fn connect(&self) -> Result<libsql::Connection> {
        let conn = self.db.connect()?;
        conn.execute("PRAGMA foreign_keys = ON", ()).await?;
        Ok(conn)
    }
}
