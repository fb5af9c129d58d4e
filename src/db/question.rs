use color_eyre::{eyre::OptionExt, Result};
use libsql::params;

use super::models::{NewQuestion, PublicQuestion, QuestionRecord, QuestionRow};
use super::Db;
use crate::scoring::QuestionKey;

const ADMIN_SELECT: &str = r#"
    SELECT q.id, q.subject_id, q.topic_id, q.text, q.options, q.correct_index,
           q.difficulty, q.explanation, q.created_by,
           s.name AS subject_name, t.name AS topic_name
    FROM questions q
    LEFT JOIN subjects s ON q.subject_id = s.id
    LEFT JOIN topics t ON q.topic_id = t.id
"#;

/// Which slice of the question bank an admin listing should cover.
#[derive(Debug, Clone, Copy)]
pub enum QuestionFilter {
    All,
    Subject(i32),
    Topic(i32),
}

impl Db {
    pub async fn questions_admin(&self, filter: QuestionFilter) -> Result<Vec<QuestionRecord>> {
        let conn = self.connect().await?;
        let mut rows = match filter {
            QuestionFilter::All => {
                let sql = format!("{ADMIN_SELECT} ORDER BY q.created_at DESC");
                conn.query(&sql, ()).await?
            }
            QuestionFilter::Subject(id) => {
                let sql = format!("{ADMIN_SELECT} WHERE q.subject_id = ? ORDER BY q.created_at DESC");
                conn.query(&sql, params![id]).await?
            }
            QuestionFilter::Topic(id) => {
                let sql = format!("{ADMIN_SELECT} WHERE q.topic_id = ? ORDER BY q.created_at DESC");
                conn.query(&sql, params![id]).await?
            }
        };

        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            let row = libsql::de::from_row::<QuestionRow>(&row)?;
            questions.push(decode_row(row)?);
        }
        Ok(questions)
    }

    /// Questions as served to quiz takers: ordered by id so the scoring
    /// endpoint can reconstruct the exact same sequence, and without the
    /// correct answer.
    pub async fn public_questions(&self, subject_id: Option<i32>) -> Result<Vec<PublicQuestion>> {
        let conn = self.connect().await?;
        let mut rows = match subject_id {
            Some(id) => {
                conn.query(
                    "SELECT id, text, options FROM questions WHERE subject_id = ? ORDER BY id",
                    params![id],
                )
                .await?
            }
            None => {
                conn.query("SELECT id, text, options FROM questions ORDER BY id", ())
                    .await?
            }
        };

        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            questions.push(PublicQuestion {
                id: row.get::<i32>(0)?,
                text: row.get::<String>(1)?,
                options: serde_json::from_str(&row.get::<String>(2)?)?,
            });
        }
        Ok(questions)
    }

    /// The grading view of the same ordered sequence `public_questions`
    /// serves.
    pub async fn scoring_keys(&self, subject_id: Option<i32>) -> Result<Vec<QuestionKey>> {
        let conn = self.connect().await?;
        let mut rows = match subject_id {
            Some(id) => {
                conn.query(
                    "SELECT id, correct_index FROM questions WHERE subject_id = ? ORDER BY id",
                    params![id],
                )
                .await?
            }
            None => {
                conn.query("SELECT id, correct_index FROM questions ORDER BY id", ())
                    .await?
            }
        };

        let mut keys = Vec::new();
        while let Some(row) = rows.next().await? {
            keys.push(QuestionKey {
                id: row.get::<i32>(0)?,
                correct_index: row.get::<i32>(1)?,
            });
        }
        Ok(keys)
    }

    pub async fn create_question(
        &self,
        question: NewQuestion<'_>,
        created_by: &str,
    ) -> Result<i32> {
        let options_json = serde_json::to_string(question.options)?;
        let conn = self.connect().await?;

        let id = conn
            .query(
                r#"
                INSERT INTO questions
                    (subject_id, topic_id, text, options, correct_index, difficulty, explanation, created_by)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING id
                "#,
                params![
                    question.subject_id,
                    question.topic_id,
                    question.text,
                    options_json,
                    question.correct_index,
                    question.difficulty,
                    question.explanation,
                    created_by
                ],
            )
            .await?
            .next()
            .await?
            .ok_or_eyre("could not get question id")?
            .get::<i32>(0)?;

        tracing::info!("question created: id={id}, subject={}", question.subject_id);
        Ok(id)
    }

    pub async fn update_question(
        &self,
        question_id: i32,
        question: NewQuestion<'_>,
    ) -> Result<bool> {
        let options_json = serde_json::to_string(question.options)?;
        let conn = self.connect().await?;

        let affected = conn
            .execute(
                r#"
                UPDATE questions
                SET subject_id = ?, topic_id = ?, text = ?, options = ?, correct_index = ?,
                    difficulty = ?, explanation = ?, updated_at = CURRENT_TIMESTAMP
                WHERE id = ?
                "#,
                params![
                    question.subject_id,
                    question.topic_id,
                    question.text,
                    options_json,
                    question.correct_index,
                    question.difficulty,
                    question.explanation,
                    question_id
                ],
            )
            .await?;
        Ok(affected > 0)
    }

    pub async fn delete_question(&self, question_id: i32) -> Result<bool> {
        let conn = self.connect().await?;
        let affected = conn
            .execute("DELETE FROM questions WHERE id = ?", params![question_id])
            .await?;

        if affected > 0 {
            tracing::info!("deleted question {question_id}");
        }
        Ok(affected > 0)
    }
}

fn decode_row(row: QuestionRow) -> Result<QuestionRecord> {
    Ok(QuestionRecord {
        id: row.id,
        subject_id: row.subject_id,
        topic_id: row.topic_id,
        text: row.text,
        options: serde_json::from_str(&row.options)?,
        correct_index: row.correct_index,
        difficulty: row.difficulty,
        explanation: row.explanation,
        created_by: row.created_by,
        subject_name: row.subject_name,
        topic_name: row.topic_name,
    })
}
