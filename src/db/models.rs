// Database model structs, decoded from rows with `libsql::de::from_row`.

use serde::{Deserialize, Serialize};

/// The identity attached to an authenticated request.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == crate::names::ADMIN_ROLE
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserListing {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub profile_image: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Subject {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Topic {
    pub id: i32,
    pub subject_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

/// Full question row for the admin surface, `correct_index` included.
#[derive(Debug, Serialize)]
pub struct QuestionRecord {
    pub id: i32,
    pub subject_id: i32,
    pub topic_id: Option<i32>,
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: i32,
    pub difficulty: String,
    pub explanation: Option<String>,
    pub created_by: Option<String>,
    pub subject_name: Option<String>,
    pub topic_name: Option<String>,
}

/// Raw row shape before the JSON options column is decoded.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRow {
    pub id: i32,
    pub subject_id: i32,
    pub topic_id: Option<i32>,
    pub text: String,
    pub options: String,
    pub correct_index: i32,
    pub difficulty: String,
    pub explanation: Option<String>,
    pub created_by: Option<String>,
    pub subject_name: Option<String>,
    pub topic_name: Option<String>,
}

/// Public-safe projection served to quiz takers; omits the correct answer.
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i32,
    pub text: String,
    pub options: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct QuizResultRow {
    pub id: i32,
    pub subject_id: Option<i32>,
    pub subject_name: Option<String>,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub skipped_answers: i32,
    pub time_taken: Option<i32>,
    pub completed_at: String,
}

/// Fields accepted when creating or updating a question.
#[derive(Debug)]
pub struct NewQuestion<'a> {
    pub subject_id: i32,
    pub topic_id: Option<i32>,
    pub text: &'a str,
    pub options: &'a [String],
    pub correct_index: i32,
    pub difficulty: &'a str,
    pub explanation: Option<&'a str>,
}
