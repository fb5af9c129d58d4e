use color_eyre::{eyre::OptionExt, Result};
use libsql::params;

use super::models::QuizResultRow;
use super::Db;
use crate::scoring::ScoreResult;

impl Db {
    /// Records a graded submission and its per-question breakdown for the
    /// given user. Returns the result id.
    pub async fn record_result(
        &self,
        email: &str,
        subject_id: Option<i32>,
        result: &ScoreResult,
        time_taken: Option<i32>,
    ) -> Result<i32> {
        let conn = self.connect().await?;

        let result_id = conn
            .query(
                r#"
                INSERT INTO quiz_results
                    (user_email, subject_id, score, total_questions, percentage,
                     correct_answers, wrong_answers, skipped_answers, time_taken)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING id
                "#,
                params![
                    email,
                    subject_id,
                    result.score as i64,
                    result.total as i64,
                    result.percentage,
                    result.correct_answers as i64,
                    result.wrong_answers as i64,
                    result.skipped_answers as i64,
                    time_taken
                ],
            )
            .await?
            .next()
            .await?
            .ok_or_eyre("could not get result id")?
            .get::<i32>(0)?;

        for detail in &result.details {
            conn.execute(
                r#"
                INSERT INTO quiz_result_details (result_id, question_id, user_answer, is_correct)
                VALUES (?, ?, ?, ?)
                "#,
                params![
                    result_id,
                    detail.question_id,
                    detail.user_index,
                    detail.is_correct
                ],
            )
            .await?;
        }

        tracing::info!(
            "recorded result {result_id} for {email}: {}/{}",
            result.score,
            result.total
        );
        Ok(result_id)
    }

    pub async fn results_for_user(&self, email: &str) -> Result<Vec<QuizResultRow>> {
        let conn = self.connect().await?;
        let mut rows = conn
            .query(
                r#"
                SELECT qr.id, qr.subject_id, s.name AS subject_name, qr.score,
                       qr.total_questions, qr.percentage, qr.correct_answers,
                       qr.wrong_answers, qr.skipped_answers, qr.time_taken, qr.completed_at
                FROM quiz_results qr
                LEFT JOIN subjects s ON qr.subject_id = s.id
                WHERE qr.user_email = ?
                ORDER BY qr.completed_at DESC, qr.id DESC
                "#,
                params![email],
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(libsql::de::from_row::<QuizResultRow>(&row)?);
        }
        Ok(results)
    }
}
