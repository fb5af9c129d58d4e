use color_eyre::Result;
use libsql::params;
use rand::RngCore;

use super::models::AuthUser;
use super::Db;

const SESSION_ID_BYTES: usize = 16;

impl Db {
    /// Creates a session keyed by a fresh random hex identifier and returns
    /// the identifier for cookie storage.
    pub async fn create_session(&self, email: &str) -> Result<String> {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let session_id = hex::encode(bytes);

        let conn = self.connect().await?;
        conn.execute(
            "INSERT INTO sessions (id, user_email) VALUES (?, ?)",
            params![session_id.clone(), email],
        )
        .await?;

        tracing::info!("new session created for {email}");
        Ok(session_id)
    }

    /// Resolves a session cookie value to the owning user, or `None` when
    /// the session is unknown.
    pub async fn get_user_by_session(&self, session_id: &str) -> Result<Option<AuthUser>> {
        let conn = self.connect().await?;
        let row = conn
            .query(
                r#"
                SELECT u.id, u.email, u.name, u.profile_image, u.role
                FROM sessions s
                JOIN users u ON u.email = s.user_email
                WHERE s.id = ?
                "#,
                params![session_id],
            )
            .await?
            .next()
            .await?;

        match row {
            Some(row) => Ok(Some(libsql::de::from_row::<AuthUser>(&row)?)),
            None => Ok(None),
        }
    }

    /// Idempotent: deleting an absent session is not an error.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        let conn = self.connect().await?;
        conn.execute("DELETE FROM sessions WHERE id = ?", params![session_id])
            .await?;
        Ok(())
    }

    pub async fn delete_sessions_for_user(&self, email: &str) -> Result<()> {
        let conn = self.connect().await?;
        conn.execute(
            "DELETE FROM sessions WHERE user_email = ?",
            params![email],
        )
        .await?;
        Ok(())
    }
}
