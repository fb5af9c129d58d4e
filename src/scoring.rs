use serde::Serialize;

/// The minimal view of a question needed to grade a submission.
#[derive(Debug, Clone, Copy)]
pub struct QuestionKey {
    pub id: i32,
    pub correct_index: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreDetail {
    pub question_id: i32,
    pub correct_index: i32,
    pub user_index: Option<i32>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub skipped_answers: u32,
    pub details: Vec<ScoreDetail>,
}

/// Grades a submission against an ordered question list. `answers` must be
/// the same length as `questions`, one entry per question in order; `None`
/// means the question was skipped. An out-of-range index is simply wrong,
/// no range check is performed.
pub fn score_quiz(questions: &[QuestionKey], answers: &[Option<i32>]) -> ScoreResult {
    debug_assert_eq!(questions.len(), answers.len());

    let details: Vec<ScoreDetail> = questions
        .iter()
        .zip(answers)
        .map(|(q, &user_index)| ScoreDetail {
            question_id: q.id,
            correct_index: q.correct_index,
            user_index,
            is_correct: user_index == Some(q.correct_index),
        })
        .collect();

    let score = details.iter().filter(|d| d.is_correct).count() as u32;
    let total = questions.len() as u32;
    let skipped_answers = answers.iter().filter(|a| a.is_none()).count() as u32;
    let percentage = if total == 0 {
        0.0
    } else {
        f64::from(score) / f64::from(total) * 100.0
    };

    ScoreResult {
        score,
        total,
        percentage,
        correct_answers: score,
        wrong_answers: total - score - skipped_answers,
        skipped_answers,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mirrors the seeded sample quiz: correct indices 3, 1, 0, 1, 2.
    fn sample_keys() -> Vec<QuestionKey> {
        [3, 1, 0, 1, 2]
            .into_iter()
            .enumerate()
            .map(|(i, correct_index)| QuestionKey {
                id: i as i32 + 1,
                correct_index,
            })
            .collect()
    }

    #[test]
    fn all_correct_answers_score_full_marks() {
        let keys = sample_keys();
        let answers = vec![Some(3), Some(1), Some(0), Some(1), Some(2)];
        let result = score_quiz(&keys, &answers);

        assert_eq!(result.score, 5);
        assert_eq!(result.total, 5);
        assert_eq!(result.percentage, 100.0);
        assert_eq!(result.wrong_answers, 0);
        assert_eq!(result.skipped_answers, 0);
        assert!(result.details.iter().all(|d| d.is_correct));
    }

    #[test]
    fn uniform_zero_answers_match_only_third_question() {
        let keys = sample_keys();
        let answers = vec![Some(0); 5];
        let result = score_quiz(&keys, &answers);

        assert_eq!(result.score, 1);
        assert_eq!(result.wrong_answers, 4);
        assert!(result.details[2].is_correct);
        assert!(!result.details[0].is_correct);
    }

    #[test]
    fn all_skipped_answers_score_zero() {
        let keys = sample_keys();
        let answers = vec![None; 5];
        let result = score_quiz(&keys, &answers);

        assert_eq!(result.score, 0);
        assert_eq!(result.skipped_answers, 5);
        assert_eq!(result.wrong_answers, 0);
        assert!(result.details.iter().all(|d| !d.is_correct));
        assert!(result.details.iter().all(|d| d.user_index.is_none()));
    }

    #[test]
    fn scoring_is_deterministic() {
        let keys = sample_keys();
        let answers = vec![Some(3), None, Some(0), Some(2), Some(2)];
        let first = score_quiz(&keys, &answers);
        let second = score_quiz(&keys, &answers);

        assert_eq!(first.score, second.score);
        assert_eq!(first.details, second.details);
    }

    #[test]
    fn out_of_range_index_is_just_wrong() {
        let keys = sample_keys();
        let answers = vec![Some(99), Some(-1), Some(0), Some(1), Some(2)];
        let result = score_quiz(&keys, &answers);

        assert_eq!(result.score, 3);
        assert!(!result.details[0].is_correct);
        assert!(!result.details[1].is_correct);
    }

    #[test]
    fn details_preserve_input_order() {
        let keys = sample_keys();
        let answers = vec![Some(3), Some(0), Some(0), Some(0), Some(2)];
        let result = score_quiz(&keys, &answers);

        let ids: Vec<i32> = result.details.iter().map(|d| d.question_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_quiz_scores_zero_of_zero() {
        let result = score_quiz(&[], &[]);
        assert_eq!(result.score, 0);
        assert_eq!(result.total, 0);
        assert_eq!(result.percentage, 0.0);
    }
}
