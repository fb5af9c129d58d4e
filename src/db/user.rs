use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use color_eyre::{eyre::OptionExt, Result};
use libsql::params;

use super::models::{AuthUser, UserListing};
use super::Db;

impl Db {
    /// Inserts a new user. The password is argon2-hashed before storage;
    /// the unique index on `email` rejects duplicates.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
        role: &str,
    ) -> Result<i32> {
        let password_hash = hash_password(password)?;
        let conn = self.connect().await?;

        let user_id = conn
            .query(
                "INSERT INTO users (email, password_hash, name, role) VALUES (?, ?, ?, ?) RETURNING id",
                params![email, password_hash, name, role],
            )
            .await?
            .next()
            .await?
            .ok_or_eyre("could not get user id")?
            .get::<i32>(0)?;

        tracing::info!("new user created: id={user_id}, email={email}, role={role}");
        Ok(user_id)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let conn = self.connect().await?;
        let row = conn
            .query("SELECT 1 FROM users WHERE email = ?", params![email])
            .await?
            .next()
            .await?;
        Ok(row.is_some())
    }

    /// Used by registration: the first-ever user is granted the admin role.
    pub async fn users_count(&self) -> Result<i64> {
        let conn = self.connect().await?;
        let count = conn
            .query("SELECT COUNT(*) FROM users", ())
            .await?
            .next()
            .await?
            .ok_or_eyre("count query returned no row")?
            .get::<i64>(0)?;
        Ok(count)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>> {
        let conn = self.connect().await?;
        let row = conn
            .query(
                "SELECT id, email, name, profile_image, role FROM users WHERE email = ?",
                params![email],
            )
            .await?
            .next()
            .await?;

        match row {
            Some(row) => Ok(Some(libsql::de::from_row::<AuthUser>(&row)?)),
            None => Ok(None),
        }
    }

    /// False for an unknown email and for a wrong password alike, so the
    /// caller cannot tell which factor failed.
    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<bool> {
        let conn = self.connect().await?;
        let row = conn
            .query(
                "SELECT password_hash FROM users WHERE email = ?",
                params![email],
            )
            .await?
            .next()
            .await?;

        match row {
            Some(row) => {
                let stored_hash = row.get::<String>(0)?;
                Ok(verify_password(password, &stored_hash))
            }
            None => Ok(false),
        }
    }

    pub async fn update_profile(
        &self,
        email: &str,
        name: &str,
        profile_image: Option<&str>,
    ) -> Result<()> {
        let conn = self.connect().await?;
        conn.execute(
            "UPDATE users SET name = ?, profile_image = ?, updated_at = CURRENT_TIMESTAMP WHERE email = ?",
            params![name, profile_image, email],
        )
        .await?;
        Ok(())
    }

    pub async fn update_profile_image(&self, email: &str, profile_image: &str) -> Result<()> {
        let conn = self.connect().await?;
        conn.execute(
            "UPDATE users SET profile_image = ?, updated_at = CURRENT_TIMESTAMP WHERE email = ?",
            params![profile_image, email],
        )
        .await?;
        tracing::info!("profile image updated for {email}");
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<UserListing>> {
        let conn = self.connect().await?;
        let mut rows = conn
            .query(
                "SELECT id, email, name, role, profile_image, created_at FROM users ORDER BY created_at DESC",
                (),
            )
            .await?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(libsql::de::from_row::<UserListing>(&row)?);
        }
        Ok(users)
    }

    /// Returns false when no user has the given id.
    pub async fn set_user_role(&self, user_id: i32, role: &str) -> Result<bool> {
        let conn = self.connect().await?;
        let affected = conn
            .execute(
                "UPDATE users SET role = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
                params![role, user_id],
            )
            .await?;

        if affected > 0 {
            tracing::info!("role of user {user_id} changed to {role}");
        }
        Ok(affected > 0)
    }
}

/// Run argon2 hashing on a dedicated thread with a large stack to avoid
/// stack overflow in debug builds.
fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();
    std::thread::Builder::new()
        .stack_size(4 * 1024 * 1024) // 4 MB stack
        .spawn(move || {
            let salt = SaltString::generate(&mut OsRng);
            let argon2 = Argon2::default();
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| color_eyre::eyre::eyre!("failed to hash password: {e}"))
        })?
        .join()
        .map_err(|_| color_eyre::eyre::eyre!("hash thread panicked"))?
}

fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_string();
    let hash = hash.to_string();
    std::thread::Builder::new()
        .stack_size(4 * 1024 * 1024)
        .spawn(move || {
            let parsed_hash = match PasswordHash::new(&hash) {
                Ok(h) => h,
                Err(_) => return false,
            };
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        })
        .map(|h| h.join().unwrap_or(false))
        .unwrap_or(false)
}
