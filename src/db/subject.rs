use color_eyre::{eyre::OptionExt, Result};
use libsql::params;

use super::models::{Subject, Topic};
use super::Db;

impl Db {
    pub async fn subjects(&self) -> Result<Vec<Subject>> {
        let conn = self.connect().await?;
        let mut rows = conn
            .query(
                "SELECT id, name, description, created_at FROM subjects ORDER BY name",
                (),
            )
            .await?;

        let mut subjects = Vec::new();
        while let Some(row) = rows.next().await? {
            subjects.push(libsql::de::from_row::<Subject>(&row)?);
        }
        Ok(subjects)
    }

    pub async fn subject_exists(&self, subject_id: i32) -> Result<bool> {
        let conn = self.connect().await?;
        let row = conn
            .query("SELECT 1 FROM subjects WHERE id = ?", params![subject_id])
            .await?
            .next()
            .await?;
        Ok(row.is_some())
    }

    pub async fn create_subject(&self, name: &str, description: Option<&str>) -> Result<i32> {
        let conn = self.connect().await?;
        let id = conn
            .query(
                "INSERT INTO subjects (name, description) VALUES (?, ?) RETURNING id",
                params![name, description],
            )
            .await?
            .next()
            .await?
            .ok_or_eyre("could not get subject id")?
            .get::<i32>(0)?;

        tracing::info!("subject created: id={id}, name={name}");
        Ok(id)
    }

    pub async fn update_subject(
        &self,
        subject_id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<bool> {
        let conn = self.connect().await?;
        let affected = conn
            .execute(
                "UPDATE subjects SET name = ?, description = ? WHERE id = ?",
                params![name, description, subject_id],
            )
            .await?;
        Ok(affected > 0)
    }

    /// Topics and questions under the subject go with it via FK cascade.
    pub async fn delete_subject(&self, subject_id: i32) -> Result<bool> {
        let conn = self.connect().await?;
        let affected = conn
            .execute("DELETE FROM subjects WHERE id = ?", params![subject_id])
            .await?;

        if affected > 0 {
            tracing::info!("deleted subject {subject_id}");
        }
        Ok(affected > 0)
    }

    pub async fn topics_for_subject(&self, subject_id: i32) -> Result<Vec<Topic>> {
        let conn = self.connect().await?;
        let mut rows = conn
            .query(
                "SELECT id, subject_id, name, description, created_at FROM topics WHERE subject_id = ? ORDER BY name",
                params![subject_id],
            )
            .await?;

        let mut topics = Vec::new();
        while let Some(row) = rows.next().await? {
            topics.push(libsql::de::from_row::<Topic>(&row)?);
        }
        Ok(topics)
    }

    pub async fn create_topic(
        &self,
        subject_id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<i32> {
        let conn = self.connect().await?;
        let id = conn
            .query(
                "INSERT INTO topics (subject_id, name, description) VALUES (?, ?, ?) RETURNING id",
                params![subject_id, name, description],
            )
            .await?
            .next()
            .await?
            .ok_or_eyre("could not get topic id")?
            .get::<i32>(0)?;

        tracing::info!("topic created: id={id}, subject={subject_id}, name={name}");
        Ok(id)
    }

    pub async fn delete_topic(&self, topic_id: i32) -> Result<bool> {
        let conn = self.connect().await?;
        let affected = conn
            .execute("DELETE FROM topics WHERE id = ?", params![topic_id])
            .await?;
        Ok(affected > 0)
    }
}
